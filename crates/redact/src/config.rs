use serde::{Deserialize, Serialize};

use crate::error::RedactError;

/// Editor tuning, read from the `[editor]` table of the app config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Freehand brush radius in image pixels.
    pub brush_radius: f32,
    /// Gaussian blur standard deviation in image pixels.
    pub blur_sigma: f32,
    /// Opacity of the preview tint over each layer.
    pub tint_opacity: f32,
    /// Height of each auto-blur band as a fraction of image height.
    pub edge_band_fraction: f32,
    /// Stroke width of the dashed rectangle guide.
    pub outline_width: f32,
    /// Dash and gap length of the rectangle guide.
    pub outline_dash: f32,
    /// Snapshots kept in the undo log.
    pub max_history: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            brush_radius: 25.0,
            blur_sigma: 15.0,
            tint_opacity: 0.2,
            edge_band_fraction: 0.15,
            outline_width: 4.0,
            outline_dash: 5.0,
            max_history: 100,
        }
    }
}

impl EditorConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, RedactError> {
        let config: EditorConfig = toml::from_str(toml_content)
            .map_err(|e| RedactError::Config(format!("Failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RedactError> {
        let check = |ok: bool, msg: &str| {
            if ok { Ok(()) } else { Err(RedactError::Config(msg.to_string())) }
        };
        check(self.brush_radius > 0.0, "brush_radius must be positive")?;
        check(self.blur_sigma >= 0.0, "blur_sigma must not be negative")?;
        check((0.0..=1.0).contains(&self.tint_opacity), "tint_opacity must be within 0..=1")?;
        check(
            (0.0..=0.5).contains(&self.edge_band_fraction),
            "edge_band_fraction must be within 0..=0.5",
        )?;
        check(self.outline_width > 0.0, "outline_width must be positive")?;
        check(self.outline_dash > 0.0, "outline_dash must be positive")?;
        check(self.max_history > 0, "max_history must be at least 1")
    }
}
