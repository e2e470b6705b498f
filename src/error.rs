use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqueezeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed data URI: {0}")]
    MalformedDataUri(String),

    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Failed to re-encode compressed payload: {0}")]
    ReencodeFailed(String),

    #[error("Invalid size budget: {0} MB. Must be greater than zero")]
    InvalidSizeBudget(f64),

    #[error("Invalid dimension limit: {0}. Must be greater than zero")]
    InvalidDimensionLimit(u32),

    #[error("Payload too large: {0} bytes. Maximum allowed: {1} bytes")]
    PayloadTooLarge(u64, u64),

    #[error("Invalid image dimensions: {0}x{1}. Maximum allowed: {2}x{2}")]
    InvalidDimensions(u32, u32, u32),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Worker thread failed: {0}")]
    WorkerFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SqueezeError>;
