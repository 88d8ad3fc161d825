//! Dual-layer redaction for bill photos.
//!
//! A [`RedactionEngine`] holds a `sensitive` and a `price` mask over one
//! photo, records every committed edit in an undo log, renders a tinted
//! preview and bakes the masks into two exported composites.

pub mod composite;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod history;
pub mod mask;
pub mod stroke;

pub use config::EditorConfig;
pub use engine::{ExportedBills, RedactionEngine};
pub use error::RedactError;
pub use geometry::{PixelRect, Point, Viewport};
pub use history::History;
pub use mask::{Layer, LayerMasks, Mask};
pub use stroke::{CompletedStroke, StrokeState, Tool};
