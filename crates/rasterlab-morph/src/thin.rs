//! Zhang-Suen thinning
//!
//! Each iteration runs two sub-passes over the 8-neighborhood
//!
//! ```text
//! P9 P2 P3
//! P8 P1 P4
//! P7 P6 P5
//! ```
//!
//! A foreground pixel is marked when it has between 2 and 6 foreground
//! neighbours, exactly one 0 -> 1 transition in the sequence
//! P2, P3, ..., P9, P2, and
//! - sub-pass 1: `P2 * P4 * P6 == 0` and `P4 * P6 * P8 == 0`
//! - sub-pass 2: `P2 * P4 * P8 == 0` and `P2 * P6 * P8 == 0`
//!
//! Marks are cleared at the end of each sub-pass. Neighbours outside the
//! image count as background. Iteration stops when neither sub-pass marks
//! a pixel.

use crate::MorphResult;
use crate::binary::check_binary;
use rasterlab_core::GrayImage;

/// Neighbour offsets P2..P9, clockwise from north
const RING: [(i64, i64); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

fn neighbours(image: &GrayImage, x: u32, y: u32) -> [u8; 8] {
    let (w, h) = (image.width() as i64, image.height() as i64);
    RING.map(|(dx, dy)| {
        let (sx, sy) = (x as i64 + dx, y as i64 + dy);
        let inside = sx >= 0 && sy >= 0 && sx < w && sy < h;
        u8::from(inside && image.value(sx as u32, sy as u32) != 0)
    })
}

fn deletable(p: &[u8; 8], second: bool) -> bool {
    let count: u8 = p.iter().sum();
    let transitions = (0..8).filter(|&k| p[k] == 0 && p[(k + 1) % 8] == 1).count();
    let [p2, _, p4, _, p6, _, p8, _] = *p;
    let side = if second {
        p2 * p4 * p8 == 0 && p2 * p6 * p8 == 0
    } else {
        p2 * p4 * p6 == 0 && p4 * p6 * p8 == 0
    };
    (2..=6).contains(&count) && transitions == 1 && side
}

/// Thin a binary image with the Zhang-Suen algorithm
///
/// # Errors
///
/// Returns [`crate::MorphError::NotBinary`] for non-binary input.
pub fn thin_zhang_suen(image: &GrayImage) -> MorphResult<GrayImage> {
    check_binary(image)?;
    let (w, h) = image.dimensions();
    let mut current = image.clone();
    let mut iterations = 0usize;

    loop {
        iterations += 1;
        let mut changed = false;
        for second in [false, true] {
            let mut marked = Vec::new();
            for y in 0..h {
                for x in 0..w {
                    if current.value(x, y) != 0 && deletable(&neighbours(&current, x, y), second) {
                        marked.push((x, y));
                    }
                }
            }
            changed |= !marked.is_empty();
            for (x, y) in marked {
                current.set_value(x, y, 0);
            }
        }
        if !changed {
            break;
        }
    }

    log::debug!("thin_zhang_suen: converged after {iterations} iterations");
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| {
            [if (x0..x1).contains(&x) && (y0..y1).contains(&y) { 255 } else { 0 }]
        })
        .unwrap()
    }

    #[test]
    fn test_transitions() {
        // north and south set: two separate runs
        assert!(!deletable(&[1, 0, 0, 0, 1, 0, 0, 0], false));
        // an end point has a single neighbour
        assert!(!deletable(&[0, 0, 1, 0, 0, 0, 0, 0], false));
        // east, south-east, south: one run of three
        assert!(deletable(&[0, 0, 1, 1, 1, 0, 0, 0], false));
    }

    #[test]
    fn test_bar() {
        let out = thin_zhang_suen(&rect(20, 11, 2, 4, 18, 7)).unwrap();
        assert_eq!(out.count_nonzero(), 13);
        for x in 3..16 {
            assert_eq!(out.value(x, 5), 255);
        }
    }

    #[test]
    fn test_block() {
        let out = thin_zhang_suen(&rect(20, 15, 3, 3, 17, 12)).unwrap();
        assert_eq!(out.count_nonzero(), 5);
        for x in 7..12 {
            assert_eq!(out.value(x, 7), 255);
        }
        let square = thin_zhang_suen(&rect(9, 9, 2, 2, 7, 7)).unwrap();
        assert_eq!(square.count_nonzero(), 1);
        assert_eq!(square.value(4, 4), 255);
    }

    #[test]
    fn test_empty_and_non_binary() {
        let empty = GrayImage::new(4, 4).unwrap();
        assert_eq!(thin_zhang_suen(&empty).unwrap(), empty);
        let gray = GrayImage::new_with_value(4, 4, [9]).unwrap();
        assert!(thin_zhang_suen(&gray).is_err());
    }
}
