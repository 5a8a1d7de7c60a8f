//! Windowed statistics using integral images
//!
//! The Kuwahara filter needs the mean and variance of four overlapping
//! 3x3 sub-windows per pixel. Both come from a pair of summed area tables
//! (samples and squared samples), so each sub-window costs O(1).

use crate::convolve::{collect_rows, per_channel};
use crate::FilterResult;
use rasterlab_core::{GrayImage, IntegralImage, Raster};

/// Half-width of the Kuwahara window (the window is 5x5)
const KUWAHARA_HALF: u32 = 2;

/// Quadrant centers relative to the target pixel: NW, NE, SW, SE
const QUADRANTS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Mean and variance of a 3x3 sub-window centered at padded `(cx, cy)`.
fn window_stats(sum: &IntegralImage, sq: &IntegralImage, cx: u32, cy: u32) -> (f64, f64) {
    let s = sum.sum_area_unchecked(cx - 1, cy - 1, cx + 1, cy + 1) as f64;
    let s2 = sq.sum_area_unchecked(cx - 1, cy - 1, cx + 1, cy + 1) as f64;
    let mean = s / 9.0;
    (mean, s2 / 9.0 - mean * mean)
}

/// Kuwahara edge-preserving smoothing.
///
/// The 5x5 window around each pixel is split into four overlapping 3x3
/// quadrants centered on the diagonal neighbours (NW, NE, SW, SE). The
/// output is the rounded mean of the quadrant with the smallest variance;
/// ties go to the earlier quadrant in that order. Color rasters are
/// filtered per channel.
pub fn kuwahara_filter<const C: usize>(image: &Raster<u8, C>) -> FilterResult<Raster<u8, C>> {
    per_channel(image, kuwahara_gray)
}

fn kuwahara_gray(image: &GrayImage) -> FilterResult<GrayImage> {
    let (w, h) = image.dimensions();
    let padded = image.border_replicate(KUWAHARA_HALF)?;
    let sum = IntegralImage::new(&padded, 0)?;
    let sq = IntegralImage::squared(&padded, 0)?;

    collect_rows(w, h, |y| {
        (0..w)
            .map(|x| {
                let (px, py) = ((x + KUWAHARA_HALF) as i32, (y + KUWAHARA_HALF) as i32);
                let mut best = (f64::INFINITY, 0.0);
                for (dx, dy) in QUADRANTS {
                    let (mean, var) = window_stats(&sum, &sq, (px + dx) as u32, (py + dy) as u32);
                    if var < best.0 {
                        best = (var, mean);
                    }
                }
                best.1.round().clamp(0.0, 255.0) as u8
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterlab_core::ColorImage;

    #[test]
    fn test_uniform_unchanged() {
        let img = ColorImage::new_with_value(6, 6, [40, 80, 120]).unwrap();
        assert_eq!(kuwahara_filter(&img).unwrap(), img);
    }

    #[test]
    fn test_step_edge_preserved() {
        let img = GrayImage::from_fn(10, 6, |x, _| [if x < 5 { 20 } else { 220 }]).unwrap();
        let out = kuwahara_filter(&img).unwrap();
        // Each pixel picks a quadrant lying entirely on its own side
        assert_eq!(out, img);
    }

    #[test]
    fn test_removes_isolated_spike() {
        let mut img = GrayImage::new_with_value(7, 7, [50]).unwrap();
        img.set_value(3, 3, 250);
        let out = kuwahara_filter(&img).unwrap();
        // all quadrants contain the spike, so each has the same variance
        // and the NW mean wins
        assert_eq!(out.value(3, 3), ((8.0 * 50.0 + 250.0) / 9.0f64).round() as u8);
        assert_eq!(out.value(0, 0), 50);
    }
}
