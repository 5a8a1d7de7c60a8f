//! Rotation about the image center
//!
//! The output keeps the input size. Each destination pixel is rotated
//! back about `((w - 1) / 2, (h - 1) / 2)` into the source; corners that
//! come from outside the source are left black. Positive angles turn the
//! picture clockwise on screen (y grows downward).

use crate::{TransformError, TransformResult};
use crate::interp::{Fallback, resample};
use rasterlab_core::Raster;

/// Rotate an image by `angle_degrees` about its center
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for a non-finite
/// angle.
pub fn rotate<const C: usize>(
    image: &Raster<u8, C>,
    angle_degrees: f64,
) -> TransformResult<Raster<u8, C>> {
    if !angle_degrees.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "angle must be finite, got {angle_degrees}"
        )));
    }
    let (w, h) = image.dimensions();
    let cx = (w as f64 - 1.0) / 2.0;
    let cy = (h as f64 - 1.0) / 2.0;
    let (sin, cos) = angle_degrees.to_radians().sin_cos();

    resample(image, w, h, Fallback::NearestOrBlack, |x, y| {
        let (dx, dy) = (x - cx, y - cy);
        Some((cx + dx * cos + dy * sin, cy - dx * sin + dy * cos))
    })
}
