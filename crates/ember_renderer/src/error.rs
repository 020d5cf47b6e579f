//! Error types for the renderers and image output.

use thiserror::Error;

/// Errors that can occur while validating input, rendering or writing images.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid transform: {0}")]
    InvalidTransform(String),

    #[error("Invalid render options: {0}")]
    InvalidOptions(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PPM parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Scene error: {0}")]
    Scene(#[from] serde_json::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

impl RenderError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Reject a zero-sized image up front.
pub(crate) fn check_resolution(width: u32, height: u32) -> RenderResult<()> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidOptions(format!(
            "resolution must be non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}
