//! Error types for camera construction and render setup.

use thiserror::Error;

/// Failure modes reported when assembling a [`Camera`](crate::Camera).
///
/// Rendering itself never returns these; degenerate geometry encountered
/// mid-trace is treated as a miss instead.
#[derive(Error, Debug)]
pub enum CameraError {
    /// A required argument was never supplied (or left at zero).
    #[error("missing rendering argument: {0}")]
    MissingArgument(&'static str),
    /// All arguments are present but mutually inconsistent.
    #[error("invalid camera configuration: {0}")]
    InvalidConfiguration(String),
}

pub type CameraResult<T> = Result<T, CameraError>;
