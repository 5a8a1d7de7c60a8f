//! Error types for rasterlab-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details. Algorithm crates wrap this type in
//! their own error enums via `#[from]`.

use thiserror::Error;

/// rasterlab core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Raster dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A binary (0/255) raster was required
    #[error("raster is not binary: found sample value {0}")]
    NotBinary(u8),

    /// No samples to work with
    #[error("empty input: {0}")]
    EmptyImage(&'static str),

    /// Singular (non-invertible) matrix
    #[error("singular matrix: determinant {0:e}")]
    SingularMatrix(f64),
}

/// Result type alias for rasterlab core operations
pub type Result<T> = std::result::Result<T, Error>;
