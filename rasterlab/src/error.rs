//! Unified error type for the rasterlab facade

use std::fmt;

use thiserror::Error;

/// Shape of an [`crate::Image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Single-channel byte raster
    Gray,
    /// Three-channel BGR byte raster
    Color,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageKind::Gray => f.write_str("grayscale"),
            ImageKind::Color => f.write_str("color"),
        }
    }
}

/// Any error raised by a rasterlab crate
#[derive(Debug, Error)]
pub enum Error {
    /// Raster container error
    #[error(transparent)]
    Core(#[from] rasterlab_core::Error),

    /// Filtering error
    #[error(transparent)]
    Filter(#[from] rasterlab_filter::FilterError),

    /// Thresholding or color conversion error
    #[error(transparent)]
    Color(#[from] rasterlab_color::ColorError),

    /// Morphology error
    #[error(transparent)]
    Morph(#[from] rasterlab_morph::MorphError),

    /// Labeling or Hough error
    #[error(transparent)]
    Region(#[from] rasterlab_region::RegionError),

    /// Geometric transform error
    #[error(transparent)]
    Transform(#[from] rasterlab_transform::TransformError),

    /// An operation was given the wrong kind of image
    #[error("operation expects a {expected} image, got {actual}")]
    KindMismatch {
        expected: ImageKind,
        actual: ImageKind,
    },

    /// A slider value could not be turned into an operation argument
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for facade operations
pub type Result<T> = std::result::Result<T, Error>;
