//! Pixel-level color helpers for BGR byte pixels
//!
//! Color rasters store channels in blue, green, red order. HSV follows the
//! common 8-bit convention: hue in `[0, 180)` (degrees halved), saturation
//! and value in `[0, 255]`.

use rand::prelude::*;

/// Blue channel index
pub const BLUE: usize = 0;
/// Green channel index
pub const GREEN: usize = 1;
/// Red channel index
pub const RED: usize = 2;

/// Luma weights (ITU-R BT.601) in B, G, R order
pub const GRAY_WEIGHTS: [f64; 3] = [0.114, 0.587, 0.299];

/// Convert a BGR pixel to 8-bit HSV.
pub fn bgr_to_hsv(bgr: [u8; 3]) -> [u8; 3] {
    let (b, g, r) = (bgr[BLUE] as f64, bgr[GREEN] as f64, bgr[RED] as f64);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v > 0.0 { diff * 255.0 / v } else { 0.0 };
    let mut h = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }
    let mut h = (h / 2.0).round();
    if h >= 180.0 {
        h -= 180.0;
    }
    [h as u8, s.round() as u8, v as u8]
}

/// Convert an 8-bit HSV pixel back to BGR.
pub fn hsv_to_bgr(hsv: [u8; 3]) -> [u8; 3] {
    let h = (hsv[0] as f64 * 2.0) % 360.0;
    let s = hsv[1] as f64 / 255.0;
    let v = hsv[2] as f64;

    let c = v * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    let to_u8 = |f: f64| (f + m).round().clamp(0.0, 255.0) as u8;
    [to_u8(b1), to_u8(g1), to_u8(r1)]
}

/// Luma of a BGR pixel.
pub fn bgr_to_gray(bgr: [u8; 3]) -> u8 {
    let y: f64 = bgr
        .iter()
        .zip(GRAY_WEIGHTS.iter())
        .map(|(&c, &w)| c as f64 * w)
        .sum();
    y.round().clamp(0.0, 255.0) as u8
}

/// Euclidean distance between two pixels in color space.
pub fn color_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&p, &q)| {
            let d = p as f64 - q as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Normalized chromaticity `(r, g) = (R, G) / (R + G + B)`.
///
/// Black maps to `(0, 0)`.
pub fn chromaticity(bgr: [u8; 3]) -> (f64, f64) {
    let sum = bgr.iter().map(|&c| c as f64).sum::<f64>();
    if sum == 0.0 {
        return (0.0, 0.0);
    }
    (bgr[RED] as f64 / sum, bgr[GREEN] as f64 / sum)
}

/// Random non-black BGR color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> [u8; 3] {
    loop {
        let c = [
            rng.random_range(0..=255u8),
            rng.random_range(0..=255u8),
            rng.random_range(0..=255u8),
        ];
        if c != [0, 0, 0] {
            return c;
        }
    }
}
