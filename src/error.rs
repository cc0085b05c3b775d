use thiserror::Error;

/// Failure while watermarking a single image. Never aborts the batch.
#[derive(Debug, Error)]
pub enum WatermarkError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Failed to parse font")]
    InvalidFont,
}
