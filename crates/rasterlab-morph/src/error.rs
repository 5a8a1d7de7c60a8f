//! Error types for rasterlab-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rasterlab_core::Error),

    /// Invalid structuring element
    #[error("invalid structuring element: {0}")]
    InvalidSel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A binary image was required
    #[error("image is not binary: found sample value {0}")]
    NotBinary(u8),
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
