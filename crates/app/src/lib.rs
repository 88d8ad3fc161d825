pub mod config;
pub mod draft;
pub mod upload;

pub use config::AppConfig;
pub use draft::{BillDraft, DraftError};
pub use upload::{ScanOutcome, Submission, SubmissionPaths, UploadError, UploadSession};
