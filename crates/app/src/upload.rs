//! One bill upload: photo → validation scan → draft, photo → redaction
//! engine, and finally the two redacted exports plus the draft on disk.

use std::path::{Path, PathBuf};

use receiptart_ocr::{OcrBackend, PipelineError, ProgressReporter, ReceiptPipeline};
use receiptart_redact::{ExportedBills, RedactError, RedactionEngine};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::draft::{BillDraft, DraftError};

pub const SENSITIVE_FILE: &str = "bill_sensitive.png";
pub const BLURRED_FILE: &str = "bill_blurred.png";
pub const DRAFT_FILE: &str = "bill.json";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No bill photo selected")]
    NoPhoto,
    #[error("Scan failed: {0}")]
    Scan(#[from] PipelineError),
    #[error("Privacy processing failed: {0}")]
    Redact(#[from] RedactError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize draft: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a scan did to the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Scan results were written into the draft.
    Applied,
    /// The photo was rejected by the receipt gate; the draft is unchanged.
    Rejected(DraftError),
    /// No OCR engine could run; the draft is unchanged and must be filled by hand.
    ManualEntry,
}

/// Redacted images and form fields ready to persist.
#[derive(Debug, Clone)]
pub struct Submission {
    pub draft: BillDraft,
    pub bills: ExportedBills,
}

/// Where [`Submission::write_to`] put each file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPaths {
    pub sensitive: PathBuf,
    pub blurred: PathBuf,
    pub draft: PathBuf,
}

impl Submission {
    pub async fn write_to(&self, dir: &Path) -> Result<SubmissionPaths, UploadError> {
        tokio::fs::create_dir_all(dir).await?;
        let paths = SubmissionPaths {
            sensitive: dir.join(SENSITIVE_FILE),
            blurred: dir.join(BLURRED_FILE),
            draft: dir.join(DRAFT_FILE),
        };
        tokio::fs::write(&paths.sensitive, &self.bills.sensitive_only).await?;
        tokio::fs::write(&paths.blurred, &self.bills.full).await?;
        tokio::fs::write(&paths.draft, serde_json::to_vec_pretty(&self.draft)?).await?;
        info!("wrote submission to {}", dir.display());
        Ok(paths)
    }
}

pub struct UploadSession<R: OcrBackend> {
    pipeline: ReceiptPipeline<R>,
    engine: RedactionEngine,
    draft: BillDraft,
    photo: Option<Vec<u8>>,
}

impl<R: OcrBackend> UploadSession<R> {
    pub fn new(recognizer: R, config: &AppConfig) -> Self {
        Self {
            pipeline: ReceiptPipeline::new(recognizer, config.ocr.clone()),
            engine: RedactionEngine::new(config.editor.clone()),
            draft: BillDraft::default(),
            photo: None,
        }
    }

    /// Pick a new bill photo. The editor is reset until the photo is validated.
    pub fn select_photo(&mut self, bytes: Vec<u8>) {
        self.photo = Some(bytes);
        self.engine.unload();
    }

    pub async fn select_photo_file(&mut self, path: &Path) -> Result<(), UploadError> {
        let bytes = tokio::fs::read(path).await?;
        self.select_photo(bytes);
        Ok(())
    }

    /// Scan the selected photo and, if it passes, open it in the editor.
    ///
    /// OCR being unavailable is not an error: the photo still opens in the
    /// editor and the draft is left for manual entry.
    pub async fn validate(&mut self, progress: &ProgressReporter) -> Result<ScanOutcome, UploadError> {
        let photo = self.photo.as_deref().ok_or(UploadError::NoPhoto)?;
        let outcome = match self.pipeline.scan_bytes(photo, progress).await {
            Ok(scan) => match self.draft.apply_validation_scan(&scan) {
                Ok(()) => ScanOutcome::Applied,
                Err(e) => {
                    warn!("{e}");
                    return Ok(ScanOutcome::Rejected(e));
                }
            },
            Err(PipelineError::Unavailable(e)) => {
                warn!("OCR unavailable, falling back to manual entry: {e}");
                ScanOutcome::ManualEntry
            }
            Err(e) => return Err(e.into()),
        };
        self.engine.load_image_bytes(photo)?;
        Ok(outcome)
    }

    /// Re-run OCR on the current photo and merge whatever it found.
    pub async fn rescan(&mut self, progress: &ProgressReporter) -> Result<ScanOutcome, UploadError> {
        let photo = self.photo.as_deref().ok_or(UploadError::NoPhoto)?;
        match self.pipeline.scan_bytes(photo, progress).await {
            Ok(scan) => {
                self.draft.merge_rescan(&scan.extracted);
                Ok(ScanOutcome::Applied)
            }
            Err(PipelineError::Unavailable(e)) => {
                warn!("OCR unavailable, enter details manually: {e}");
                Ok(ScanOutcome::ManualEntry)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn draft(&self) -> &BillDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BillDraft {
        &mut self.draft
    }

    pub fn engine(&self) -> &RedactionEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RedactionEngine {
        &mut self.engine
    }

    /// Bake both exports from the editor and pair them with the draft.
    pub fn submit(&self) -> Result<Submission, UploadError> {
        let bills = self.engine.export_pair()?;
        Ok(Submission { draft: self.draft.clone(), bills })
    }
}
