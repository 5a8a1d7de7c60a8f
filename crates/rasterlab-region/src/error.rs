//! Error types for rasterlab-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rasterlab_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A binary image was required
    #[error("image is not binary: found sample value {0}")]
    NotBinary(u8),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;

/// Reject images with samples other than 0 and 255.
pub(crate) fn check_binary(image: &rasterlab_core::GrayImage) -> RegionResult<()> {
    match image.data().iter().find(|&&v| v != 0 && v != 255) {
        Some(&v) => Err(RegionError::NotBinary(v)),
        None => Ok(()),
    }
}
