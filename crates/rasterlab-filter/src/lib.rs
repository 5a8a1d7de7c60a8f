//! rasterlab-filter - Image filtering operations
//!
//! This crate provides neighbourhood filters over byte rasters:
//!
//! - Convolution with square kernels, Gaussian smoothing, emboss
//! - Mean filtering via integral images
//! - Rank filtering (median, histogram-based fast median, vector median)
//! - Edge-preserving smoothing (bilateral, Kuwahara)
//! - Gradient operators (Prewitt, Sobel, Roberts, color Sobel) and
//!   maximum-variance color gradients
//! - The staged Canny edge detector
//!
//! Every function takes its input by reference and returns a new raster.
//! With the `parallel` feature, per-row work is spread over rayon's pool;
//! results are identical either way.

pub mod bilateral;
pub mod block_conv;
pub mod canny;
pub mod convolve;
pub mod edge;
mod error;
pub mod gradient;
pub mod kernel;
mod maybe_rayon;
pub mod rank;
pub mod windowed;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use bilateral::{BilateralOptions, bilateral_filter, make_range_kernel};
pub use block_conv::mean_filter;
pub use canny::{
    CannyOptions, DirectionMap, NO_DIRECTION, canny, canny_color, canny_magnitude,
    hysteresis_threshold, non_max_suppression, quantize_directions,
};
pub use convolve::{convolve, convolve_float, gaussian_filter};
pub use edge::{
    color_sobel_edges, color_sobel_magnitude, emboss, prewitt_edges, roberts_edges,
    sobel_edges, threshold_magnitude,
};
pub use gradient::{
    GradientField, max_variance_gradient, prewitt_gradient, roberts_gradient, sobel_gradient,
};
pub use rank::{fast_median_filter, median_filter, vector_median_filter};
pub use windowed::kuwahara_filter;
