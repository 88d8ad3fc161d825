use std::sync::OnceLock;

use receiptart_core::Money;
use regex::Regex;

use crate::types::{ExtractedReceipt, ReceiptItem, UNKNOWN_MERCHANT};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// ASCII digits only; `\d` is Unicode-aware here.
re!(re_phone_fragment, r"[0-9]{3}-[0-9]{3}");
re!(re_non_alnum, r"[^a-zA-Z0-9\s]");
// Labels start a word, so SUBTOTAL is not a total. GRANDTOTAL is listed explicitly.
re!(re_total,
    r"(?i)\b(?:(?:grand\s*)?total(?:\s*due)?|balance|amount|net)[\s:]*[$€£]?\s*([0-9]+[.,][0-9]{2})");
re!(re_trailing_price,
    r"^(.*?)\s+[$€£]?\s*([0-9]+[.,][0-9]{2})$");
re!(re_leading_bullets, r"^[*.\-\s]+");
re!(re_trailing_punct, r"[*.\-\s]+$");

/// Words that show up on nearly every receipt and almost nowhere else.
pub const RECEIPT_KEYWORDS: &[&str] = &[
    "total", "amount", "tax", "visa", "mastercard", "cash", "change", "balance",
    "items", "receipt", "invoice", "merchant", "qty",
];

/// Minimum number of distinct [`RECEIPT_KEYWORDS`] for text to pass the gate.
pub const MIN_KEYWORD_HITS: usize = 2;

/// Lines containing any of these are summary or metadata rows, never items.
pub const NOISE_KEYWORDS: &[&str] = &[
    "amount", "subtotal", "tax", "total", "visa", "balance", "due", "cash",
    "change", "@", " x ", "unit", "price",
];

/// Lines this short or shorter carry nothing worth parsing.
const MIN_LINE_LEN: usize = 3;

// ── Validation gate ──────────────────────────────────────────────────────────

/// Cheap pre-filter: does this text look like it came off a receipt?
pub fn is_likely_receipt(text: &str) -> bool {
    keyword_hits(text) >= MIN_KEYWORD_HITS
}

/// Number of distinct receipt keywords present anywhere in `text`.
pub fn keyword_hits(text: &str) -> usize {
    let lower = text.to_lowercase();
    RECEIPT_KEYWORDS.iter().filter(|k| lower.contains(*k)).count()
}

// ── Rules ────────────────────────────────────────────────────────────────────

/// Split on newlines, trim, and drop lines too short to carry data.
pub fn prepare_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| l.chars().count() > MIN_LINE_LEN)
        .collect()
}

/// First header line that is neither a phone number nor a date line,
/// stripped down to letters, digits and spaces.
pub fn merchant_rule(lines: &[&str]) -> Option<String> {
    let line = lines
        .iter()
        .find(|l| !re_phone_fragment().is_match(l) && !l.to_lowercase().contains("date"))?;
    let cleaned = re_non_alnum().replace_all(line, "");
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// First labelled total anywhere in the raw text.
pub fn total_rule(text: &str) -> Option<Money> {
    let c = re_total().captures(text)?;
    c.get(1)?.as_str().parse().ok()
}

/// A single item line: trailing price, leading name.
pub fn item_rule(line: &str) -> Option<ReceiptItem> {
    let lower = line.to_lowercase();
    if NOISE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return None;
    }

    let c = re_trailing_price().captures(line)?;
    let raw_name = c.get(1)?.as_str().trim();
    let name = re_leading_bullets().replace(raw_name, "");
    let name = re_trailing_punct().replace(&name, "").into_owned();
    let price: Money = c.get(2)?.as_str().parse().ok()?;

    (price.is_positive() && name.chars().count() > 1).then(|| ReceiptItem { name, price })
}

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Extract location, total and line items from raw OCR text.
    ///
    /// Never fails: each rule that finds nothing leaves its field at the
    /// conservative default.
    pub fn extract(ocr_text: &str) -> ExtractedReceipt {
        let lines = prepare_lines(ocr_text);

        let location = merchant_rule(&lines).unwrap_or_else(|| UNKNOWN_MERCHANT.to_string());
        let total = total_rule(ocr_text).unwrap_or_else(Money::zero);
        let items: Vec<ReceiptItem> = lines.iter().filter_map(|l| item_rule(l)).collect();

        tracing::debug!(
            lines = lines.len(),
            items = items.len(),
            total = %total,
            "extracted receipt fields"
        );

        ExtractedReceipt { location, total, items }
    }
}

/// Free-function form of [`Extractor::extract`].
pub fn extract_details_from_text(text: &str) -> ExtractedReceipt {
    Extractor::extract(text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
