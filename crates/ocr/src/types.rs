use receiptart_core::Money;
use serde::{Deserialize, Serialize};

/// Location reported when no header line qualifies as a merchant name.
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub price: Money,
}

impl ReceiptItem {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self { name: name.into(), price }
    }
}

/// Structured fields pulled out of one OCR transcription.
///
/// Produced wholesale on every extraction run; merging with earlier state is
/// left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedReceipt {
    pub location: String,
    /// Grand total; zero when no labelled total was found.
    pub total: Money,
    pub items: Vec<ReceiptItem>,
}

impl Default for ExtractedReceipt {
    fn default() -> Self {
        Self {
            location: UNKNOWN_MERCHANT.to_string(),
            total: Money::zero(),
            items: Vec::new(),
        }
    }
}

/// Outcome of a full scan: extracted fields plus the raw text for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub extracted: ExtractedReceipt,
    pub raw_text: String,
    /// Advisory receipt-keyword gate; callers decide whether to block on it.
    pub likely_receipt: bool,
}
