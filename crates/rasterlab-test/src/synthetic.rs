//! Synthetic fixtures for regression tests
//!
//! Every generator returns a fresh grayscale raster; [`to_color`] and
//! [`color_blocks`] cover the color-specific tests.

use crate::error::{TestError, TestResult};
use rand::prelude::*;
use rand::rngs::StdRng;
use rasterlab_core::{ColorImage, GrayImage};

/// Constant image.
pub fn uniform(width: u32, height: u32, value: u8) -> TestResult<GrayImage> {
    Ok(GrayImage::new_with_value(width, height, [value])?)
}

/// Horizontal ramp from 0 at the left column to 255 at the right one.
pub fn horizontal_gradient(width: u32, height: u32) -> TestResult<GrayImage> {
    let span = width.saturating_sub(1).max(1) as f64;
    Ok(GrayImage::from_fn(width, height, |x, _| {
        [(x as f64 * 255.0 / span).round() as u8]
    })?)
}

/// Vertical step: columns `< edge_x` are `left`, the rest `right`.
pub fn step_edge(width: u32, height: u32, edge_x: u32, left: u8, right: u8) -> TestResult<GrayImage> {
    Ok(GrayImage::from_fn(width, height, |x, _| {
        [if x < edge_x { left } else { right }]
    })?)
}

/// High-contrast checkerboard with square cells of side `cell`.
pub fn checkerboard(width: u32, height: u32, cell: u32, dark: u8, light: u8) -> TestResult<GrayImage> {
    if cell == 0 {
        return Err(TestError::InvalidFixture("cell size must be positive".into()));
    }
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let sum = x / cell + y / cell;
        [if sum & 1 == 0 { dark } else { light }]
    })?)
}

/// Axis-aligned rectangle `[x0, x1) x [y0, y1)` of `fg` on `bg`.
#[allow(clippy::too_many_arguments)]
pub fn filled_rect(
    width: u32,
    height: u32,
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
    fg: u8,
    bg: u8,
) -> TestResult<GrayImage> {
    if x0 >= x1 || y0 >= y1 {
        return Err(TestError::InvalidFixture(format!(
            "empty rectangle ({x0}, {y0})-({x1}, {y1})"
        )));
    }
    Ok(GrayImage::from_fn(width, height, |x, y| {
        [if (x0..x1).contains(&x) && (y0..y1).contains(&y) { fg } else { bg }]
    })?)
}

/// Disk of radius `r` centered at `(cx, cy)`, 255 on 0.
pub fn filled_disk(width: u32, height: u32, cx: f64, cy: f64, r: f64) -> TestResult<GrayImage> {
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let d = (x as f64 - cx).hypot(y as f64 - cy);
        [if d <= r { 255 } else { 0 }]
    })?)
}

/// One-pixel-wide circle outline of radius `r`, 255 on 0.
///
/// Sampled by angle so the ring is 8-connected for any radius.
pub fn ring(width: u32, height: u32, cx: f64, cy: f64, r: f64) -> TestResult<GrayImage> {
    let mut img = GrayImage::new(width, height)?;
    let steps = (r * 16.0).ceil().max(16.0) as u32;
    for i in 0..steps {
        let t = i as f64 / steps as f64 * std::f64::consts::TAU;
        let x = (cx + r * t.cos()).round();
        let y = (cy + r * t.sin()).round();
        if x >= 0.0 && y >= 0.0 {
            let _ = img.set(x as u32, y as u32, 0, 255);
        }
    }
    Ok(img)
}

/// Straight line from `(x0, y0)` to `(x1, y1)`, 255 on 0.
pub fn line(width: u32, height: u32, x0: i64, y0: i64, x1: i64, y1: i64) -> TestResult<GrayImage> {
    let mut img = GrayImage::new(width, height)?;
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (x0 as f64 + t * (x1 - x0) as f64).round();
        let y = (y0 as f64 + t * (y1 - y0) as f64).round();
        if x >= 0.0 && y >= 0.0 {
            let _ = img.set(x as u32, y as u32, 0, 255);
        }
    }
    Ok(img)
}

/// Left half near `dark`, right half near `light`, with uniform noise of
/// `+-spread` from a seeded generator.
pub fn bimodal(width: u32, height: u32, dark: u8, light: u8, spread: u8, seed: u64) -> TestResult<GrayImage> {
    let mut rng = StdRng::seed_from_u64(seed);
    let s = spread as i32;
    Ok(GrayImage::from_fn(width, height, |x, _| {
        let base = if x < width / 2 { dark } else { light } as i32;
        let noise = if s > 0 { rng.random_range(-s..=s) } else { 0 };
        [(base + noise).clamp(0, 255) as u8]
    })?)
}

/// Replicate a grayscale raster into all three color channels.
pub fn to_color(gray: &GrayImage) -> ColorImage {
    gray.map_pixels(|[v]| [v, v, v])
}

/// Four solid quadrants: blue, green, red and white.
pub fn color_blocks(width: u32, height: u32) -> TestResult<ColorImage> {
    let (hw, hh) = (width / 2, height / 2);
    Ok(ColorImage::from_fn(width, height, |x, y| match (x < hw, y < hh) {
        (true, true) => [255, 0, 0],
        (false, true) => [0, 255, 0],
        (true, false) => [0, 0, 255],
        (false, false) => [255, 255, 255],
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_rect_area() {
        let img = filled_rect(20, 20, 4, 4, 10, 10, 255, 0).unwrap();
        assert_eq!(img.count_nonzero(), 36);
        assert!(filled_rect(20, 20, 4, 4, 4, 10, 255, 0).is_err());
    }

    #[test]
    fn test_checkerboard_alternates() {
        let img = checkerboard(8, 8, 2, 32, 220).unwrap();
        assert_eq!(img.value(0, 0), 32);
        assert_eq!(img.value(2, 0), 220);
        assert_eq!(img.value(2, 2), 32);
    }

    #[test]
    fn test_bimodal_is_seeded() {
        let a = bimodal(16, 16, 50, 200, 10, 3).unwrap();
        let b = bimodal(16, 16, 50, 200, 10, 3).unwrap();
        assert_eq!(a, b);
        assert!(a.value(0, 0) <= 60 && a.value(15, 0) >= 190);
    }

    #[test]
    fn test_ring_on_radius() {
        let img = ring(41, 41, 20.0, 20.0, 10.0).unwrap();
        assert_eq!(img.value(30, 20), 255);
        assert_eq!(img.value(20, 20), 0);
    }
}
