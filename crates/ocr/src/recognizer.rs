use thiserror::Error;

use crate::progress::ProgressReporter;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — build with `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
/// Implementations accept raw PNG/JPEG image bytes and return the recognized
/// plain text, reporting progress as they go.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8], progress: &ProgressReporter) -> Result<String, OcrError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string — useful for unit testing the extraction pipeline
/// without requiring Tesseract to be installed.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8], progress: &ProgressReporter) -> Result<String, OcrError> {
        progress.report(0.0);
        progress.report(0.5);
        progress.finish();
        Ok(self.text.clone())
    }
}

/// Stand-in used when no engine was compiled in. Always fails, which callers
/// surface as "OCR unavailable" and fall back to manual entry.
pub struct UnavailableRecognizer;

impl OcrBackend for UnavailableRecognizer {
    fn recognize(&self, _image_bytes: &[u8], _progress: &ProgressReporter) -> Result<String, OcrError> {
        Err(OcrError::NotAvailable)
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use crate::config::OcrConfig;
    use crate::progress::ProgressReporter;
    use leptess::LepTess;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }

        pub fn from_config(config: &OcrConfig) -> Self {
            Self::new(config.data_path.clone(), &config.language)
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8], progress: &ProgressReporter) -> Result<String, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            // leptess exposes no incremental progress; report the two ends.
            progress.report(0.1);
            let text = lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))?;
            progress.finish();
            Ok(text)
        }
    }
}

/// The best backend this build can offer.
pub fn default_backend(config: &crate::config::OcrConfig) -> Box<dyn OcrBackend> {
    #[cfg(feature = "tesseract")]
    {
        Box::new(tesseract_backend::TesseractRecognizer::from_config(config))
    }
    #[cfg(not(feature = "tesseract"))]
    {
        let _ = config;
        Box::new(UnavailableRecognizer)
    }
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn recognize(&self, image_bytes: &[u8], progress: &ProgressReporter) -> Result<String, OcrError> {
        (**self).recognize(image_bytes, progress)
    }
}
