//! rasterlab-color - Thresholding and color processing
//!
//! This crate provides:
//!
//! - **Thresholding** ([`threshold`]): fixed, quantile, median, intermeans
//!   and adaptive (local mean) binarization
//! - **Two-level Otsu** ([`otsu`]): exhaustive search for the pair of
//!   thresholds maximizing between-class variance
//! - **Color distance thresholding** ([`distance`]): 3D BGR distance and
//!   2D chromaticity distance to a reference color
//! - **Color space conversion** ([`colorspace`]): BGR <-> HSV, BGR -> gray,
//!   channel split and merge
//!
//! Binarized outputs use 0 for background and 255 for foreground.

pub mod colorspace;
pub mod distance;
mod error;
pub mod otsu;
pub mod threshold;

// Re-export error types
pub use error::{ColorError, ColorResult};

pub use colorspace::{
    bgr_to_gray, bgr_to_hsv, gray_to_bgr, hsv_to_bgr, merge_channels, split_channels,
};
pub use distance::{color_threshold_2d, color_threshold_3d};
pub use otsu::{OtsuThresholds, compute_otsu_thresholds, otsu_from_histogram, threshold_otsu};
pub use threshold::{
    AdaptiveThresholdOptions, adaptive_threshold, compute_intermeans_threshold,
    compute_median_threshold, compute_quantile_threshold, intermeans_from_histogram,
    threshold_intermeans, threshold_median, threshold_quantile, threshold_to_binary,
    threshold_two_level,
};
