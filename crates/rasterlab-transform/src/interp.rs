//! Source sampling for inverse-mapped transforms
//!
//! Every transform in this crate walks the destination raster, maps each
//! pixel back to a real-valued source position and samples there. Bilinear
//! interpolation is used when the four neighbours all exist, i.e. when
//! `0 <= fx < w - 1` and `0 <= fy < h - 1`. Positions outside that margin
//! go through a [`Fallback`].

use crate::TransformResult;
use rasterlab_core::Raster;

/// What to sample when bilinear interpolation is not possible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// Round to the nearest pixel and clamp it into the image
    ClampToEdge,
    /// Round to the nearest pixel; black when that pixel is outside
    #[default]
    NearestOrBlack,
}

/// Bilinear interpolation at `(fx, fy)`, `None` outside the interior
/// margin.
pub fn bilinear<const C: usize>(image: &Raster<u8, C>, fx: f64, fy: f64) -> Option<[u8; C]> {
    let (w, h) = image.dimensions();
    let inside = fx >= 0.0 && fy >= 0.0 && fx < (w - 1) as f64 && fy < (h - 1) as f64;
    if !inside {
        return None;
    }
    let (x0, y0) = (fx.floor() as u32, fy.floor() as u32);
    let (dx, dy) = (fx - x0 as f64, fy - y0 as f64);
    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x0 + 1, y0);
    let p01 = image.pixel(x0, y0 + 1);
    let p11 = image.pixel(x0 + 1, y0 + 1);
    Some(std::array::from_fn(|c| {
        let top = p00[c] as f64 * (1.0 - dx) + p10[c] as f64 * dx;
        let bottom = p01[c] as f64 * (1.0 - dx) + p11[c] as f64 * dx;
        (top * (1.0 - dy) + bottom * dy).round().clamp(0.0, 255.0) as u8
    }))
}

/// Nearest pixel to `(fx, fy)`, `None` when it lies outside the image.
pub fn nearest<const C: usize>(image: &Raster<u8, C>, fx: f64, fy: f64) -> Option<[u8; C]> {
    let (x, y) = (fx.round(), fy.round());
    if !(x >= 0.0 && y >= 0.0 && x < image.width() as f64 && y < image.height() as f64) {
        return None;
    }
    Some(image.pixel(x as u32, y as u32))
}

/// Sample at `(fx, fy)`: bilinear inside the margin, else `fallback`.
pub fn sample<const C: usize>(
    image: &Raster<u8, C>,
    fx: f64,
    fy: f64,
    fallback: Fallback,
) -> [u8; C] {
    if let Some(p) = bilinear(image, fx, fy) {
        return p;
    }
    match fallback {
        Fallback::ClampToEdge => {
            let x = (fx.round() as i64).clamp(0, image.width() as i64 - 1);
            let y = (fy.round() as i64).clamp(0, image.height() as i64 - 1);
            image.pixel(x as u32, y as u32)
        }
        Fallback::NearestOrBlack => nearest(image, fx, fy).unwrap_or([0; C]),
    }
}

/// Build a `width x height` raster by inverse mapping every destination
/// pixel through `map`. A `None` from `map` leaves the pixel black.
pub(crate) fn resample<const C: usize>(
    image: &Raster<u8, C>,
    width: u32,
    height: u32,
    fallback: Fallback,
    map: impl Fn(f64, f64) -> Option<(f64, f64)>,
) -> TransformResult<Raster<u8, C>> {
    Ok(Raster::from_fn(width, height, |x, y| {
        match map(x as f64, y as f64) {
            Some((fx, fy)) => sample(image, fx, fy, fallback),
            None => [0; C],
        }
    })?)
}
