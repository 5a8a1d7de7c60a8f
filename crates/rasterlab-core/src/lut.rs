//! Lookup tables for pointwise intensity operators
//!
//! A [`Lut`] maps each of the 256 input levels to an output level. The
//! constructors below cover the pointwise operators of the workbench;
//! [`Lut::apply`] runs any table over every channel of a byte raster.

use crate::error::{Error, Result};
use crate::histogram::{Histogram, LEVELS};
use crate::raster::Raster;

/// 256-entry intensity mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut {
    table: [u8; LEVELS],
}

impl Default for Lut {
    fn default() -> Self {
        Self::identity()
    }
}

fn clamp_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl Lut {
    /// Build a table by evaluating `f` on every level.
    pub fn from_fn(mut f: impl FnMut(u8) -> u8) -> Self {
        let mut table = [0u8; LEVELS];
        for (i, t) in table.iter_mut().enumerate() {
            *t = f(i as u8);
        }
        Lut { table }
    }

    /// Wrap an explicit table.
    pub fn from_table(table: [u8; LEVELS]) -> Self {
        Lut { table }
    }

    /// Output for `v = v`
    pub fn identity() -> Self {
        Self::from_fn(|v| v)
    }

    /// Photographic negative, `255 - v`
    pub fn negate() -> Self {
        Self::from_fn(|v| 255 - v)
    }

    /// Add `offset` to every level, saturating.
    pub fn brightness(offset: i32) -> Self {
        Self::from_fn(|v| (v as i32 + offset).clamp(0, 255) as u8)
    }

    /// Scale the distance from mid-gray (128) by `gain`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `gain` is negative or not finite.
    pub fn contrast(gain: f64) -> Result<Self> {
        if !gain.is_finite() || gain < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "contrast gain must be >= 0, got {gain}"
            )));
        }
        Ok(Self::from_fn(|v| clamp_u8((v as f64 - 128.0) * gain + 128.0)))
    }

    /// Power-law mapping `255 * (v / 255)^gamma`.
    pub fn gamma(gamma: f64) -> Result<Self> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "gamma must be > 0, got {gamma}"
            )));
        }
        Ok(Self::from_fn(|v| clamp_u8(255.0 * (v as f64 / 255.0).powf(gamma))))
    }

    /// Logarithmic compression `c * ln(1 + v)` with `c` chosen so 255 maps
    /// to 255.
    pub fn log() -> Self {
        let c = 255.0 / 256f64.ln();
        Self::from_fn(|v| clamp_u8(c * (1.0 + v as f64).ln()))
    }

    /// Linear stretch of `[low, high]` onto `[0, 255]`, clamping outside.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless `low < high`.
    pub fn stretch(low: u8, high: u8) -> Result<Self> {
        if low >= high {
            return Err(Error::InvalidParameter(format!(
                "stretch range [{low}, {high}] is empty"
            )));
        }
        let span = (high - low) as f64;
        Ok(Self::from_fn(|v| {
            clamp_u8((v as f64 - low as f64) * 255.0 / span)
        }))
    }

    /// Quantize to `levels` evenly spaced output levels spanning 0..=255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless `2 <= levels <= 256`.
    pub fn posterize(levels: u32) -> Result<Self> {
        if !(2..=256).contains(&levels) {
            return Err(Error::InvalidParameter(format!(
                "posterize levels must be in 2..=256, got {levels}"
            )));
        }
        let step = 255.0 / (levels - 1) as f64;
        Ok(Self::from_fn(|v| {
            let bin = v as u32 * levels / 256;
            clamp_u8(bin as f64 * step)
        }))
    }

    /// Binary map: levels above `threshold` become 255, the rest 0.
    pub fn threshold(threshold: u8) -> Self {
        Self::from_fn(|v| if v > threshold { 255 } else { 0 })
    }

    /// Histogram equalization from the cumulative distribution.
    ///
    /// The lowest present level maps to 0 and the highest to 255. A
    /// histogram with a single occupied level yields the identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] for an empty histogram.
    pub fn equalize(hist: &Histogram) -> Result<Self> {
        let total = hist.total();
        if total == 0 {
            return Err(Error::EmptyImage("histogram"));
        }
        let cum = hist.cumulative();
        let cdf_min = hist.min_level().map(|l| cum[l as usize]).unwrap_or(0);
        if cdf_min == total {
            return Ok(Self::identity());
        }
        let denom = (total - cdf_min) as f64;
        Ok(Self::from_fn(|v| {
            let c = cum[v as usize].saturating_sub(cdf_min) as f64;
            clamp_u8(255.0 * c / denom)
        }))
    }

    /// The raw table
    pub fn table(&self) -> &[u8; LEVELS] {
        &self.table
    }

    /// Output level for `v`
    #[inline]
    pub fn map(&self, v: u8) -> u8 {
        self.table[v as usize]
    }

    /// Table equivalent to applying `self` and then `next`.
    pub fn then(&self, next: &Lut) -> Lut {
        Lut::from_fn(|v| next.map(self.map(v)))
    }

    /// Map every sample of every channel through the table.
    pub fn apply<const C: usize>(&self, image: &Raster<u8, C>) -> Raster<u8, C> {
        image.map(|v| self.map(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GrayImage;

    #[test]
    fn test_identity_and_negate() {
        let id = Lut::identity();
        let neg = Lut::negate();
        assert_eq!(id.map(77), 77);
        assert_eq!(neg.map(0), 255);
        assert_eq!(neg.then(&neg), id);
    }

    #[test]
    fn test_brightness_saturates() {
        let up = Lut::brightness(100);
        assert_eq!(up.map(200), 255);
        assert_eq!(up.map(10), 110);
        assert_eq!(Lut::brightness(-50).map(20), 0);
    }

    #[test]
    fn test_contrast_about_midgray() {
        let lut = Lut::contrast(2.0).unwrap();
        assert_eq!(lut.map(128), 128);
        assert_eq!(lut.map(138), 148);
        assert_eq!(lut.map(10), 0);
        assert!(Lut::contrast(-1.0).is_err());
    }

    #[test]
    fn test_gamma_and_log_endpoints() {
        let g = Lut::gamma(2.2).unwrap();
        assert_eq!(g.map(0), 0);
        assert_eq!(g.map(255), 255);
        assert!(g.map(128) < 128);
        let l = Lut::log();
        assert_eq!(l.map(0), 0);
        assert_eq!(l.map(255), 255);
        assert!(Lut::gamma(0.0).is_err());
    }

    #[test]
    fn test_stretch() {
        let s = Lut::stretch(50, 100).unwrap();
        assert_eq!(s.map(40), 0);
        assert_eq!(s.map(50), 0);
        assert_eq!(s.map(100), 255);
        assert_eq!(s.map(200), 255);
        assert!(Lut::stretch(9, 9).is_err());
    }

    #[test]
    fn test_posterize_two_levels() {
        let p = Lut::posterize(2).unwrap();
        assert_eq!(p.map(0), 0);
        assert_eq!(p.map(127), 0);
        assert_eq!(p.map(128), 255);
        assert!(Lut::posterize(1).is_err());
    }

    #[test]
    fn test_equalize_spreads_levels() {
        let img = GrayImage::from_data(4, 1, vec![100, 101, 102, 103]).unwrap();
        let lut = Lut::equalize(&Histogram::from_gray(&img)).unwrap();
        let out = lut.apply(&img);
        assert_eq!(out.data(), &[0, 85, 170, 255]);
    }

    #[test]
    fn test_equalize_single_level_is_identity() {
        let img = GrayImage::new_with_value(3, 3, [42]).unwrap();
        let lut = Lut::equalize(&Histogram::from_gray(&img)).unwrap();
        assert_eq!(lut, Lut::identity());
    }
}
