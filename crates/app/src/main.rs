use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use receiptart::{AppConfig, ScanOutcome, UploadSession};
use receiptart_ocr::ProgressReporter;
use tracing_subscriber::EnvFilter;

/// Scan a bill photo, blur its edges and write both redacted exports.
#[derive(Debug, Parser)]
#[command(name = "receiptart")]
#[command(version)]
struct Args {
    /// Bill photo to scan and redact
    photo: PathBuf,
    /// Directory for bill_sensitive.png, bill_blurred.png and bill.json
    #[arg(default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args { photo, out_dir } = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().map_err(anyhow::Error::msg).context("loading config")?;
    let backend = receiptart_ocr::default_backend(&config.ocr);
    let mut session = UploadSession::new(backend, &config);

    session
        .select_photo_file(&photo)
        .await
        .with_context(|| format!("reading {}", photo.display()))?;

    // ── Validation scan ───────────────────────────────────────────────────────
    let (progress, mut progress_rx) = ProgressReporter::channel();
    let progress_log = tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let p = *progress_rx.borrow_and_update();
            tracing::debug!("OCR progress: {:.0}%", p * 100.0);
        }
    });
    let outcome = session.validate(&progress).await?;
    drop(progress);
    let _ = progress_log.await;

    match outcome {
        ScanOutcome::Applied => {
            let draft = session.draft();
            tracing::info!(
                location = %draft.location,
                total = %draft.total,
                items = draft.items.len(),
                "bill details filled from scan"
            );
        }
        ScanOutcome::Rejected(e) => bail!("{}: {e}", photo.display()),
        ScanOutcome::ManualEntry => {
            tracing::warn!("OCR unavailable; bill details left blank for manual entry");
        }
    }

    // ── Redaction and export ──────────────────────────────────────────────────
    session.engine_mut().auto_blur_edges();
    let paths = session.submit()?.write_to(&out_dir).await?;

    println!("{}", paths.sensitive.display());
    println!("{}", paths.blurred.display());
    println!("{}", paths.draft.display());
    Ok(())
}
