//! The bill half of the upload form, and how scan results are merged into it.

use receiptart_core::{grade_guess, GuessOutcome, Money};
use receiptart_ocr::{ExtractedReceipt, ReceiptItem, ScanResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Local scan failed: no typical receipt keywords (total, amount, ...) found")]
    NotAReceipt,
}

/// User-editable bill fields. Starts blank; filled by scans or by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillDraft {
    pub location: String,
    pub total: Money,
    pub items: Vec<ReceiptItem>,
}

impl BillDraft {
    /// First scan of a newly selected photo.
    ///
    /// A likely receipt replaces location, total and items wholesale. Anything
    /// else is rejected and the draft is left as it was.
    pub fn apply_validation_scan(&mut self, scan: &ScanResult) -> Result<(), DraftError> {
        if !scan.likely_receipt {
            return Err(DraftError::NotAReceipt);
        }
        let ExtractedReceipt { location, total, items } = scan.extracted.clone();
        self.location = location;
        self.total = total;
        self.items = items;
        Ok(())
    }

    /// Explicit re-scan: only fields the new run actually produced win.
    pub fn merge_rescan(&mut self, extracted: &ExtractedReceipt) {
        if !extracted.items.is_empty() {
            self.items = extracted.items.clone();
        }
        if !extracted.total.is_zero() {
            self.total = extracted.total;
        }
        if !extracted.location.is_empty() {
            self.location = extracted.location.clone();
        }
    }

    pub fn grade(&self, guess: Money) -> GuessOutcome {
        grade_guess(guess, self.total)
    }
}
