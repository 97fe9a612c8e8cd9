/// Error types for the announcement pipeline
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnounceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Media error: {0}")]
    Media(String),

    #[error("Email delivery error: {0}")]
    EmailDelivery(String),

    #[error("Email composition error: {0}")]
    EmailComposition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Why a single uploaded slide was rejected
///
/// The display strings are shown to the submitter, prefixed with the
/// offending filename.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideValidationError {
    #[error("Slide must be a PNG or JPG image.")]
    InvalidExtension,

    #[error("Uploaded file is not a valid image.")]
    CorruptImage,

    #[error("Slide must have a 16:9 aspect ratio.")]
    AspectRatioMismatch { width: u32, height: u32 },
}

// Implement conversions for common error types
impl From<sqlx::Error> for AnnounceError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<std::io::Error> for AnnounceError {
    fn from(err: std::io::Error) -> Self {
        Self::Media(err.to_string())
    }
}

impl From<std::env::VarError> for AnnounceError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}
