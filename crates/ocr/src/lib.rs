pub mod config;
pub mod extract;
pub mod pipeline;
pub mod preprocess;
pub mod progress;
pub mod recognizer;
pub mod types;

pub use config::OcrConfig;
pub use extract::{
    extract_details_from_text, is_likely_receipt, item_rule, merchant_rule, prepare_lines,
    total_rule, Extractor,
};
pub use pipeline::{PipelineError, ReceiptPipeline};
pub use preprocess::{prepare_for_ocr_from_bytes, PreprocessError};
pub use progress::ProgressReporter;
pub use recognizer::{default_backend, MockRecognizer, OcrBackend, OcrError, UnavailableRecognizer};
pub use types::{ExtractedReceipt, ReceiptItem, ScanResult, UNKNOWN_MERCHANT};
