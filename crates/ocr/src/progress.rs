use tokio::sync::watch;

/// Publishes recognition progress to whoever holds the matching receiver.
///
/// Reported values are clamped to `[0, 1]` and never go backwards, so a
/// progress bar driven from the receiver only ever advances.
#[derive(Debug)]
pub struct ProgressReporter {
    tx: Option<watch::Sender<f32>>,
}

impl ProgressReporter {
    pub fn channel() -> (Self, watch::Receiver<f32>) {
        let (tx, rx) = watch::channel(0.0);
        (Self { tx: Some(tx) }, rx)
    }

    /// A reporter nobody listens to.
    pub fn silent() -> Self {
        Self { tx: None }
    }

    pub fn report(&self, fraction: f32) {
        let Some(tx) = &self.tx else {
            return;
        };
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        tx.send_if_modified(|current| {
            if fraction > *current {
                *current = fraction;
                true
            } else {
                false
            }
        });
    }

    pub fn finish(&self) {
        self.report(1.0);
    }

    pub fn current(&self) -> f32 {
        self.tx.as_ref().map(|tx| *tx.borrow()).unwrap_or(0.0)
    }
}
