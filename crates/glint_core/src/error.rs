//! Error types for scene construction and loading.

use thiserror::Error;

/// Errors raised while building shapes or loading scene files.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Shape construction received degenerate geometry.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Scene file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scene file is not valid JSON or does not match the schema.
    #[error("scene parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
