//! Image scaling
//!
//! Destination pixel `(x, y)` samples the source at `(x / sx, y / sy)`.
//! Positions past the last interior row or column fall back to the
//! clamped nearest pixel, so the right and bottom edges replicate.

use crate::interp::{Fallback, resample};
use crate::{TransformError, TransformResult};
use rasterlab_core::Raster;

fn check_factor(name: &str, factor: f64) -> TransformResult<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "{name} must be positive and finite, got {factor}"
        )));
    }
    Ok(())
}

/// Scale an image by the given factors
///
/// The output is `round(w * scale_x) x round(h * scale_y)`, at least 1x1.
///
/// # Arguments
/// * `image` - Input image
/// * `scale_x` - Horizontal scale factor (e.g., 2.0 = double width)
/// * `scale_y` - Vertical scale factor
///
/// # Errors
///
/// Returns [`TransformError::InvalidScaleFactor`] unless both factors are
/// positive and finite.
pub fn scale<const C: usize>(
    image: &Raster<u8, C>,
    scale_x: f64,
    scale_y: f64,
) -> TransformResult<Raster<u8, C>> {
    check_factor("scale_x", scale_x)?;
    check_factor("scale_y", scale_y)?;
    let width = (image.width() as f64 * scale_x).round().max(1.0);
    let height = (image.height() as f64 * scale_y).round().max(1.0);
    if width > u32::MAX as f64 || height > u32::MAX as f64 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "output {width}x{height} too large"
        )));
    }
    resample(
        image,
        width as u32,
        height as u32,
        Fallback::ClampToEdge,
        |x, y| Some((x / scale_x, y / scale_y)),
    )
}

/// Scale an image to a specific size
///
/// # Arguments
/// * `image` - Input image
/// * `width` - Target width
/// * `height` - Target height
pub fn scale_to_size<const C: usize>(
    image: &Raster<u8, C>,
    width: u32,
    height: u32,
) -> TransformResult<Raster<u8, C>> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "target size must be positive, got {width}x{height}"
        )));
    }
    let scale_x = width as f64 / image.width() as f64;
    let scale_y = height as f64 / image.height() as f64;
    resample(image, width, height, Fallback::ClampToEdge, |x, y| {
        Some((x / scale_x, y / scale_y))
    })
}
