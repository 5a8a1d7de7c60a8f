//! rasterlab - Image-processing workbench algorithms
//!
//! The algorithm library behind an interactive image workbench. Every
//! operation takes an in-memory raster and concrete parameters and returns
//! a new raster (or a scalar), so stages chain freely: a Gaussian-smoothed
//! image feeds the Canny gradient, which feeds non-maximum suppression,
//! which feeds hysteresis.
//!
//! # Overview
//!
//! - Rasters, histograms, LUTs and integral images ([`rasterlab_core`],
//!   re-exported at the top level)
//! - Filtering and edge detection ([`filter`])
//! - Thresholding and color space conversion ([`color`])
//! - Binary and grayscale morphology, skeletons ([`morph`])
//! - Connected components and Hough transforms ([`region`])
//! - Geometric resampling ([`transform`])
//! - One-knob operation dispatch ([`ParamOp`])
//!
//! # Example
//!
//! ```
//! use rasterlab::{GrayImage, Image, ParamOp, op::builtin};
//!
//! let img = GrayImage::from_fn(32, 32, |x, _| [if x < 16 { 30 } else { 220 }]).unwrap();
//! let sweep = ParamOp::GrayToGray(builtin::mean)
//!     .sweep(&Image::Gray(img), [1.0, 3.0, 5.0])
//!     .unwrap();
//! assert_eq!(sweep.len(), 3);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rasterlab_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rasterlab_color as color;
pub use rasterlab_filter as filter;
pub use rasterlab_morph as morph;
pub use rasterlab_region as region;
pub use rasterlab_transform as transform;

pub mod error;
pub mod op;

pub use error::{Error, ImageKind, Result};
pub use op::{Image, ParamOp};
