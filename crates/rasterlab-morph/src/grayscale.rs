//! Grayscale morphological operations
//!
//! Implements erosion, dilation, opening, and closing for 8-bit images
//! with a square structuring element, plus the composite gradient and
//! smoothing operators.
//!
//! # Algorithm
//!
//! - **Dilation**: Computes the maximum pixel value in the neighborhood
//! - **Erosion**: Computes the minimum pixel value in the neighborhood
//! - **Opening**: Erosion followed by dilation (removes small bright features)
//! - **Closing**: Dilation followed by erosion (fills small dark features)
//!
//! A square window is separable, so each operation runs as a horizontal
//! pass followed by a vertical one. Borders are replicated.

use crate::MorphResult;
use crate::sel::check_mask_size;
use rasterlab_core::GrayImage;

fn extremum_1d(
    image: &GrayImage,
    half: i64,
    horizontal: bool,
    pick: fn(u8, u8) -> u8,
) -> MorphResult<GrayImage> {
    let (w, h) = image.dimensions();
    let mut out = GrayImage::new(w, h)?;
    for y in 0..h {
        for x in 0..w {
            let (xi, yi) = (x as i64, y as i64);
            let v = (-half..=half)
                .map(|d| {
                    if horizontal {
                        image.get_clamped(xi + d, yi, 0)
                    } else {
                        image.get_clamped(xi, yi + d, 0)
                    }
                })
                .fold(image.value(x, y), pick);
            out.set_value(x, y, v);
        }
    }
    Ok(out)
}

fn extremum(image: &GrayImage, size: u32, pick: fn(u8, u8) -> u8) -> MorphResult<GrayImage> {
    check_mask_size(size)?;
    if size == 1 {
        return Ok(image.clone());
    }
    let half = (size / 2) as i64;
    let rows = extremum_1d(image, half, true, pick)?;
    extremum_1d(&rows, half, false, pick)
}

/// Dilate a grayscale image with a square structuring element
///
/// Dilation computes the maximum pixel value in the SE neighborhood,
/// which expands bright regions and shrinks dark regions.
///
/// # Errors
///
/// Returns [`crate::MorphError::InvalidParameters`] unless `size` is odd.
pub fn dilate_gray(image: &GrayImage, size: u32) -> MorphResult<GrayImage> {
    extremum(image, size, u8::max)
}

/// Erode a grayscale image with a square structuring element
///
/// Erosion computes the minimum pixel value in the SE neighborhood,
/// which shrinks bright regions and expands dark regions.
pub fn erode_gray(image: &GrayImage, size: u32) -> MorphResult<GrayImage> {
    extremum(image, size, u8::min)
}

/// Open a grayscale image (erosion followed by dilation)
pub fn open_gray(image: &GrayImage, size: u32) -> MorphResult<GrayImage> {
    dilate_gray(&erode_gray(image, size)?, size)
}

/// Close a grayscale image (dilation followed by erosion)
pub fn close_gray(image: &GrayImage, size: u32) -> MorphResult<GrayImage> {
    erode_gray(&dilate_gray(image, size)?, size)
}

/// Grayscale morphological gradient (dilation - erosion)
///
/// Highlights edges and boundaries in the image. Flat regions become 0.
pub fn gradient_gray(image: &GrayImage, size: u32) -> MorphResult<GrayImage> {
    let dilated = dilate_gray(image, size)?;
    let eroded = erode_gray(image, size)?;
    let data = dilated
        .data()
        .iter()
        .zip(eroded.data())
        .map(|(&d, &e)| d - e)
        .collect();
    Ok(GrayImage::from_data(image.width(), image.height(), data)?)
}

/// Morphological smoothing: opening followed by closing
///
/// Removes bright and then dark features smaller than the mask.
pub fn smooth_gray(image: &GrayImage, size: u32) -> MorphResult<GrayImage> {
    close_gray(&open_gray(image, size)?, size)
}
