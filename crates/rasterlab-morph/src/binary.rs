//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, and closing for binary images
//! (0 = background, 255 = foreground). Borders are replicated, so a
//! foreground region touching the image edge is not eroded from outside.

use crate::grayscale::{dilate_gray, erode_gray};
use crate::{MorphError, MorphResult, Sel};
use rasterlab_core::GrayImage;

/// Reject images with samples other than 0 and 255.
pub fn check_binary(image: &GrayImage) -> MorphResult<()> {
    match image.data().iter().find(|&&v| v != 0 && v != 255) {
        Some(&v) => Err(MorphError::NotBinary(v)),
        None => Ok(()),
    }
}

fn check_sel(sel: &Sel) -> MorphResult<()> {
    if sel.hit_count() == 0 {
        return Err(MorphError::InvalidSel("no hit elements".to_string()));
    }
    Ok(())
}

/// Dilate a binary image
///
/// Dilation expands foreground regions: an output pixel is set when any
/// hit of the reflected SEL lands on foreground.
///
/// # Errors
///
/// Returns [`MorphError::NotBinary`] for non-binary input and
/// [`MorphError::InvalidSel`] for a SEL without hits.
pub fn dilate(image: &GrayImage, sel: &Sel) -> MorphResult<GrayImage> {
    check_binary(image)?;
    check_sel(sel)?;
    let hits: Vec<_> = sel.hit_offsets().collect();
    let (w, h) = image.dimensions();
    let out = GrayImage::from_fn(w, h, |x, y| {
        let set = hits.iter().any(|&(dx, dy)| {
            image.get_clamped(x as i64 - dx as i64, y as i64 - dy as i64, 0) != 0
        });
        [if set { 255 } else { 0 }]
    })?;
    Ok(out)
}

/// Erode a binary image
///
/// Erosion shrinks foreground regions: an output pixel stays set only when
/// every hit of the SEL lands on foreground.
pub fn erode(image: &GrayImage, sel: &Sel) -> MorphResult<GrayImage> {
    check_binary(image)?;
    check_sel(sel)?;
    let hits: Vec<_> = sel.hit_offsets().collect();
    let (w, h) = image.dimensions();
    let out = GrayImage::from_fn(w, h, |x, y| {
        let set = hits.iter().all(|&(dx, dy)| {
            image.get_clamped(x as i64 + dx as i64, y as i64 + dy as i64, 0) != 0
        });
        [if set { 255 } else { 0 }]
    })?;
    Ok(out)
}

/// Open a binary image (erosion followed by dilation)
pub fn open(image: &GrayImage, sel: &Sel) -> MorphResult<GrayImage> {
    dilate(&erode(image, sel)?, sel)
}

/// Close a binary image (dilation followed by erosion)
pub fn close(image: &GrayImage, sel: &Sel) -> MorphResult<GrayImage> {
    erode(&dilate(image, sel)?, sel)
}

/// Dilate with a `size x size` square; `size` must be odd.
pub fn dilate_brick(image: &GrayImage, size: u32) -> MorphResult<GrayImage> {
    check_binary(image)?;
    dilate_gray(image, size)
}

/// Erode with a `size x size` square; `size` must be odd.
pub fn erode_brick(image: &GrayImage, size: u32) -> MorphResult<GrayImage> {
    check_binary(image)?;
    erode_gray(image, size)
}

/// Open with a `size x size` square.
pub fn open_brick(image: &GrayImage, size: u32) -> MorphResult<GrayImage> {
    dilate_brick(&erode_brick(image, size)?, size)
}

/// Close with a `size x size` square.
pub fn close_brick(image: &GrayImage, size: u32) -> MorphResult<GrayImage> {
    erode_brick(&dilate_brick(image, size)?, size)
}

/// Hit-or-miss transform
///
/// Sets the pixels where the SEL matches: hits on foreground and misses
/// on background, with pixels outside the image counting as background.
pub fn hit_miss_transform(image: &GrayImage, sel: &Sel) -> MorphResult<GrayImage> {
    check_binary(image)?;
    let (w, h) = image.dimensions();
    Ok(GrayImage::from_fn(w, h, |x, y| {
        [if sel.matches(image, x, y) { 255 } else { 0 }]
    })?)
}

/// Boundary extraction by XOR
///
/// Erodes with a 3x3 square and XORs the result with the input, leaving
/// the foreground pixels that touch background.
pub fn xor_edges(image: &GrayImage) -> MorphResult<GrayImage> {
    let eroded = erode_brick(image, 3)?;
    let data = image
        .data()
        .iter()
        .zip(eroded.data())
        .map(|(&a, &b)| a ^ b)
        .collect();
    Ok(GrayImage::from_data(image.width(), image.height(), data)?)
}
