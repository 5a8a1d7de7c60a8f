//! Block convolution using integral images (summed area tables)
//!
//! Mean filter that runs in O(1) per pixel regardless of mask size, by
//! precomputing an integral image of the border-replicated input.

use crate::convolve::{collect_rows, per_channel};
use crate::kernel::{check_mask_size, window_area};
use crate::FilterResult;
use rasterlab_core::{GrayImage, IntegralImage, Raster};

/// Mean (box) filter.
///
/// Each output sample is the mean of the `mask_size x mask_size` window
/// centered on it, rounded to nearest. The input is padded by
/// `mask_size / 2` replicated pixels on every side first. Color rasters are
/// filtered per channel.
///
/// # Errors
///
/// Returns [`crate::FilterError::InvalidParameters`] if `mask_size` is even
/// or zero.
pub fn mean_filter<const C: usize>(image: &Raster<u8, C>, mask_size: u32) -> FilterResult<Raster<u8, C>> {
    check_mask_size(mask_size)?;
    if mask_size == 1 {
        return Ok(image.clone());
    }
    per_channel(image, |gray| mean_filter_gray(gray, mask_size))
}

fn mean_filter_gray(image: &GrayImage, mask_size: u32) -> FilterResult<GrayImage> {
    let (w, h) = image.dimensions();
    let padded = image.border_replicate(mask_size / 2)?;
    let acc = IntegralImage::new(&padded, 0)?;
    let area = window_area(mask_size)? as i64;

    collect_rows(w, h, |y| {
        (0..w)
            .map(|x| {
                // window [x, x + mask) in padded coordinates is centered on (x, y)
                let sum = acc.sum_area_unchecked(x, y, x + mask_size - 1, y + mask_size - 1);
                ((sum + area / 2) / area) as u8
            })
            .collect()
    })
}
