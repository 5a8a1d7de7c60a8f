//! Color distance thresholding
//!
//! Marks the pixels whose color lies within a given distance of a
//! reference color, either in full BGR space or in the 2D chromaticity
//! plane `(r, g) = (R, G) / (R + G + B)`, which ignores brightness.

use crate::{ColorError, ColorResult};
use rasterlab_core::color::{chromaticity, color_distance};
use rasterlab_core::{ColorImage, GrayImage};

fn check_distance(distance: f64) -> ColorResult<()> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(ColorError::InvalidParameters(format!(
            "distance must be non-negative, got {distance}"
        )));
    }
    Ok(())
}

/// Threshold by Euclidean distance in BGR space
///
/// Pixels within `distance` of `reference` (inclusive) become 255.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] for a negative or non-finite
/// distance.
pub fn color_threshold_3d(
    image: &ColorImage,
    reference: [u8; 3],
    distance: f64,
) -> ColorResult<GrayImage> {
    check_distance(distance)?;
    Ok(image.map_pixels(|px| [if color_distance(px, reference) <= distance { 255u8 } else { 0 }]))
}

/// Threshold by Euclidean distance in the chromaticity plane
///
/// Both coordinates lie in `[0, 1]`, so useful distances are small
/// (around 0.05 to 0.2). Black pixels have chromaticity `(0, 0)`.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] for a negative or non-finite
/// distance.
pub fn color_threshold_2d(
    image: &ColorImage,
    reference: [u8; 3],
    distance: f64,
) -> ColorResult<GrayImage> {
    check_distance(distance)?;
    let (rr, rg) = chromaticity(reference);
    Ok(image.map_pixels(|px| {
        let (r, g) = chromaticity(px);
        [if (r - rr).hypot(g - rg) <= distance { 255u8 } else { 0 }]
    }))
}
