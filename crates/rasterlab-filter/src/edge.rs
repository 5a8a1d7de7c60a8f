//! Edge detection and enhancement operations
//!
//! The gradient operators produce binary edge maps: 255 where the gradient
//! magnitude exceeds the threshold, 0 elsewhere.

use crate::convolve::{collect_rows, convolve};
use crate::gradient::{GradientField, prewitt_gradient, roberts_gradient, sobel_gradient};
use crate::kernel::check_mask_size;
use crate::{FilterResult, Kernel};
use rasterlab_core::color::color_distance;
use rasterlab_core::{ColorImage, FloatImage, GrayImage, Raster};

/// Neighbour pairs compared by [`color_sobel_magnitude`], as offsets
/// `((dx1, dy1), (dx2, dy2))`: NW-NE, W-E, SW-SE, NW-SW, N-S, NE-SE.
const COLOR_SOBEL_PAIRS: [((i64, i64), (i64, i64)); 6] = [
    ((-1, -1), (1, -1)),
    ((-1, 0), (1, 0)),
    ((-1, 1), (1, 1)),
    ((-1, -1), (-1, 1)),
    ((0, -1), (0, 1)),
    ((1, -1), (1, 1)),
];

/// Binarize a magnitude map: values above `threshold` become 255.
pub fn threshold_magnitude(magnitude: &FloatImage, threshold: f64) -> GrayImage {
    magnitude.map(|m| if m > threshold { 255u8 } else { 0 })
}

fn edges(field: FilterResult<GradientField>, threshold: f64) -> FilterResult<GrayImage> {
    Ok(threshold_magnitude(&field?.magnitude, threshold))
}

/// Prewitt edge map of a grayscale image.
pub fn prewitt_edges(image: &GrayImage, threshold: f64) -> FilterResult<GrayImage> {
    edges(prewitt_gradient(image), threshold)
}

/// Sobel edge map of a grayscale image.
pub fn sobel_edges(image: &GrayImage, threshold: f64) -> FilterResult<GrayImage> {
    edges(sobel_gradient(image), threshold)
}

/// Roberts cross edge map of a grayscale image.
pub fn roberts_edges(image: &GrayImage, threshold: f64) -> FilterResult<GrayImage> {
    edges(roberts_gradient(image), threshold)
}

/// Color gradient strength: the largest Euclidean color distance between
/// the opposite neighbours of each pixel over six directional pairs.
pub fn color_sobel_magnitude(image: &ColorImage) -> FilterResult<FloatImage> {
    let (w, h) = image.dimensions();
    collect_rows(w, h, |y| {
        (0..w)
            .map(|x| {
                let px = |(dx, dy): (i64, i64)| {
                    let (sx, sy) = (x as i64 + dx, y as i64 + dy);
                    [0, 1, 2].map(|c| image.get_clamped(sx, sy, c))
                };
                COLOR_SOBEL_PAIRS
                    .iter()
                    .map(|&(a, b)| color_distance(px(a), px(b)))
                    .fold(0.0, f64::max)
            })
            .collect()
    })
}

/// Color Sobel edge map.
pub fn color_sobel_edges(image: &ColorImage, threshold: f64) -> FilterResult<GrayImage> {
    Ok(threshold_magnitude(&color_sobel_magnitude(image)?, threshold))
}

/// Apply the emboss effect.
///
/// Convolves with [`Kernel::emboss`] of side `mask_size` and adds a bias of
/// 128; the result is clamped to [0, 255]. Color rasters are embossed per
/// channel.
///
/// # Errors
///
/// Returns [`crate::FilterError::InvalidParameters`] if `mask_size` is even
/// or zero.
pub fn emboss<const C: usize>(image: &Raster<u8, C>, mask_size: u32) -> FilterResult<Raster<u8, C>> {
    check_mask_size(mask_size)?;
    let kernel = Kernel::emboss(mask_size)?;
    convolve(image, &kernel, 128.0)
}
