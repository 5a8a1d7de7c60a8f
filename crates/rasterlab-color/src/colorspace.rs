//! Color space conversion
//!
//! Raster-level wrappers around the pixel conversions in
//! [`rasterlab_core::color`]. HSV uses the byte convention H in [0, 180),
//! S and V in [0, 255]; gray uses the BT.601 luma weights.

use crate::ColorResult;
use rasterlab_core::{ColorImage, GrayImage, color};

/// Convert a BGR image to HSV
pub fn bgr_to_hsv(image: &ColorImage) -> ColorImage {
    image.map_pixels(color::bgr_to_hsv)
}

/// Convert an HSV image back to BGR
pub fn hsv_to_bgr(image: &ColorImage) -> ColorImage {
    image.map_pixels(color::hsv_to_bgr)
}

/// Convert a BGR image to grayscale
pub fn bgr_to_gray(image: &ColorImage) -> GrayImage {
    image.map_pixels(|px| [color::bgr_to_gray(px)])
}

/// Replicate a grayscale image into three equal channels
pub fn gray_to_bgr(image: &GrayImage) -> ColorImage {
    image.map_pixels(|[v]| [v, v, v])
}

/// Split a color image into its B, G and R planes.
pub fn split_channels(image: &ColorImage) -> ColorResult<[GrayImage; 3]> {
    Ok([image.channel(0)?, image.channel(1)?, image.channel(2)?])
}

/// Merge three planes (B, G, R order) into one color image.
///
/// # Errors
///
/// Returns a core dimension mismatch error if the planes differ in size.
pub fn merge_channels(channels: &[GrayImage; 3]) -> ColorResult<ColorImage> {
    Ok(ColorImage::from_channels(channels)?)
}
