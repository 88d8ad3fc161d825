use serde::{Deserialize, Serialize};

/// Recognition settings, read from the `[ocr]` table of the app config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language code.
    pub language: String,
    /// Directory holding `*.traineddata`; `None` uses the engine default.
    pub data_path: Option<String>,
    /// Photos larger than this on either side are downscaled before OCR.
    pub max_dimension: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            data_path: None,
            max_dimension: 2800,
        }
    }
}

impl OcrConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, String> {
        toml::from_str(toml_content).map_err(|e| format!("Failed to parse TOML: {e}"))
    }
}
