use std::path::Path;
use thiserror::Error;

use crate::config::OcrConfig;
use crate::extract::{is_likely_receipt, Extractor};
use crate::preprocess;
use crate::progress::ProgressReporter;
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::ScanResult;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image preprocessing failed: {0}")]
    Preprocess(#[from] crate::preprocess::PreprocessError),
    #[error("OCR unavailable: {0}")]
    Unavailable(#[from] OcrError),
}

/// Orchestrates: preprocess → OCR → validation gate → extract.
///
/// Holds no per-scan state; a caller that starts a second scan simply drops
/// the first future and keeps whichever result arrives last.
pub struct ReceiptPipeline<R: OcrBackend> {
    recognizer: R,
    config: OcrConfig,
}

impl<R: OcrBackend> ReceiptPipeline<R> {
    pub fn new(recognizer: R, config: OcrConfig) -> Self {
        Self { recognizer, config }
    }

    /// Scan a bill photo on disk.
    pub async fn scan_file(
        &self,
        path: &Path,
        progress: &ProgressReporter,
    ) -> Result<ScanResult, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        self.scan_bytes(&bytes, progress).await
    }

    /// Scan raw bytes (from camera capture or file read).
    pub async fn scan_bytes(
        &self,
        data: &[u8],
        progress: &ProgressReporter,
    ) -> Result<ScanResult, PipelineError> {
        let image_bytes = preprocess::prepare_for_ocr_from_bytes(data, self.config.max_dimension)?;

        let raw_text = self.recognizer.recognize(&image_bytes, progress).map_err(|e| {
            tracing::warn!("OCR recognition failed: {e}");
            e
        })?;
        progress.finish();

        let likely_receipt = is_likely_receipt(&raw_text);
        let extracted = Extractor::extract(&raw_text);
        tracing::info!(
            likely_receipt,
            items = extracted.items.len(),
            "scanned bill photo"
        );

        Ok(ScanResult { extracted, raw_text, likely_receipt })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
