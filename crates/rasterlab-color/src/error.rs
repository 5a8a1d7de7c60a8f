//! Error types for rasterlab-color

use thiserror::Error;

/// Errors that can occur during thresholding and color processing
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rasterlab_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Histogram without any counts
    #[error("empty histogram: no pixels to process")]
    EmptyHistogram,
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
