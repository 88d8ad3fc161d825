use std::path::{Path, PathBuf};

use receiptart_ocr::OcrConfig;
use receiptart_redact::EditorConfig;
use serde::{Deserialize, Serialize};

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "RECEIPTART_CONFIG";

/// Top-level settings: an `[editor]` table and an `[ocr]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub editor: EditorConfig,
    pub ocr: OcrConfig,
}

impl AppConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, String> {
        let config: AppConfig =
            toml::from_str(toml_content).map_err(|e| format!("Failed to parse TOML: {e}"))?;
        config.editor.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// `<config dir>/config.toml` for this platform, if a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "receiptart", "ReceiptArt")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(format!("Failed to read {}: {e}", path.display())),
        }
    }

    /// Load from `$RECEIPTART_CONFIG` when set, otherwise from [`default_path`](Self::default_path).
    pub fn load() -> Result<Self, String> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(Self::default_path);
        match path {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }
}
