use thiserror::Error;

#[derive(Debug, Error)]
pub enum RedactError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Image has no pixels")]
    EmptyImage,
    #[error("Failed to encode composite: {0}")]
    Encode(String),
    #[error("No image loaded")]
    NotInitialized,
    #[error("Invalid editor config: {0}")]
    Config(String),
}
