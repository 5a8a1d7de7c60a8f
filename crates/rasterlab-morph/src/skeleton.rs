//! Skeletonization with eight hit-or-miss templates
//!
//! Two 3x3 base templates and their three clockwise rotations:
//!
//! ```text
//!   A        B
//! o o o    . o o
//! . x .    x x o
//! x x x    . x .
//! ```
//!
//! (`x` foreground, `o` background, `.` don't care). Each pass marks every
//! foreground pixel matched by any template and clears all marks at the
//! end of the pass. Passes repeat until one marks nothing.
//!
//! Deletions within a pass are simultaneous, so a stroke exactly two
//! pixels thick is removed from both sides at once and vanishes.

use crate::binary::check_binary;
use crate::{MorphResult, Sel};
use rasterlab_core::GrayImage;

const TEMPLATE_A: &str = "ooo\n.x.\nxxx";
const TEMPLATE_B: &str = ".oo\nxxo\n.x.";

/// The eight skeletonization templates: A at 0, 90, 180 and 270 degrees,
/// then B at the same rotations.
pub fn skeleton_sels() -> MorphResult<Vec<Sel>> {
    let a = Sel::from_string(TEMPLATE_A, 1, 1)?;
    let b = Sel::from_string(TEMPLATE_B, 1, 1)?;
    Ok([a, b]
        .iter()
        .flat_map(|base| (0..4).map(move |r| base.rotate_orth(r)))
        .collect())
}

/// Skeletonize a binary image
///
/// # Errors
///
/// Returns [`crate::MorphError::NotBinary`] for non-binary input.
pub fn skeletonize(image: &GrayImage) -> MorphResult<GrayImage> {
    check_binary(image)?;
    let sels = skeleton_sels()?;
    let (w, h) = image.dimensions();
    let mut current = image.clone();
    let mut passes = 0usize;

    loop {
        passes += 1;
        let mut marked = Vec::new();
        for y in 0..h {
            for x in 0..w {
                if current.value(x, y) != 0 && sels.iter().any(|s| s.matches(&current, x, y)) {
                    marked.push((x, y));
                }
            }
        }
        if marked.is_empty() {
            break;
        }
        for (x, y) in marked {
            current.set_value(x, y, 0);
        }
    }

    log::debug!("skeletonize: converged after {passes} passes");
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SelElement;

    fn rect(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| {
            [if (x0..x1).contains(&x) && (y0..y1).contains(&y) { 255 } else { 0 }]
        })
        .unwrap()
    }

    #[test]
    fn test_templates() {
        let sels = skeleton_sels().unwrap();
        assert_eq!(sels.len(), 8);
        assert!(sels[..4].iter().all(|s| s.hit_count() == 4));
        assert!(sels[4..].iter().all(|s| s.hit_count() == 3));
        assert!(sels[..4].iter().all(|s| s.miss_count() == 3));
        // A rotated once has its misses in the right column
        assert_eq!(sels[1].get_element(2, 1), Some(SelElement::Miss));
    }

    #[test]
    fn test_bar_collapses_to_centerline() {
        let out = skeletonize(&rect(20, 11, 2, 4, 18, 7)).unwrap();
        assert_eq!(out.count_nonzero(), 14);
        for x in 3..17 {
            assert_eq!(out.value(x, 5), 255);
        }
    }

    #[test]
    fn test_square_collapses_to_point() {
        let out = skeletonize(&rect(9, 9, 2, 2, 7, 7)).unwrap();
        assert_eq!(out.count_nonzero(), 1);
        assert_eq!(out.value(4, 4), 255);
    }

    #[test]
    fn test_thin_line_is_stable() {
        let line = rect(10, 5, 1, 2, 9, 3);
        assert_eq!(skeletonize(&line).unwrap(), line);
    }
}
