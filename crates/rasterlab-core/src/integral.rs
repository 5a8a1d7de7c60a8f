//! Integral images (summed-area tables)
//!
//! Entry `(x, y)` of the table holds the sum of every source sample in the
//! rectangle `[0, x] x [0, y]`, built with the recurrence
//!
//! ```text
//! I(x, y) = I(x - 1, y) + I(x, y - 1) - I(x - 1, y - 1) + P(x, y)
//! ```
//!
//! where out-of-range terms are zero. Rectangle sums are then answered in
//! O(1) by four-point inclusion-exclusion.

use crate::error::{Error, Result};
use crate::raster::{IntImage, Raster};

/// Summed-area table over one channel of a byte raster.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegralImage {
    table: IntImage,
}

impl IntegralImage {
    /// Build the integral image of channel `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `channel >= C`.
    pub fn new<const C: usize>(raster: &Raster<u8, C>, channel: usize) -> Result<Self> {
        check_channel::<C>(channel)?;
        Self::build(raster.width(), raster.height(), |x, y| {
            raster.get_unchecked(x, y, channel) as i64
        })
    }

    /// Build the integral image of squared samples of channel `channel`.
    ///
    /// Together with [`IntegralImage::new`] this gives local variance as
    /// `E[p^2] - E[p]^2` in O(1) per window.
    pub fn squared<const C: usize>(raster: &Raster<u8, C>, channel: usize) -> Result<Self> {
        check_channel::<C>(channel)?;
        Self::build(raster.width(), raster.height(), |x, y| {
            let v = raster.get_unchecked(x, y, channel) as i64;
            v * v
        })
    }

    fn build(width: u32, height: u32, sample: impl Fn(u32, u32) -> i64) -> Result<Self> {
        let mut table = IntImage::new(width, height)?;
        let w = width as usize;
        let data = table.data_mut();
        for y in 0..height {
            let mut row_sum = 0i64;
            let base = y as usize * w;
            for x in 0..width {
                row_sum += sample(x, y);
                let above = if y > 0 { data[base - w + x as usize] } else { 0 };
                data[base + x as usize] = row_sum + above;
            }
        }
        Ok(IntegralImage { table })
    }

    /// Table width (same as the source raster)
    pub fn width(&self) -> u32 {
        self.table.width()
    }

    /// Table height (same as the source raster)
    pub fn height(&self) -> u32 {
        self.table.height()
    }

    /// Cumulative sum of the rectangle `[0, x] x [0, y]`.
    pub fn get(&self, x: u32, y: u32) -> Option<i64> {
        self.table.get(x, y, 0)
    }

    /// The underlying table as an integer raster.
    pub fn as_raster(&self) -> &IntImage {
        &self.table
    }

    /// Sum over the inclusive rectangle `[x0, x1] x [y0, y1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the corners are reversed or
    /// the rectangle leaves the table.
    pub fn sum_area(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Result<i64> {
        if x0 > x1 || y0 > y1 || x1 >= self.width() || y1 >= self.height() {
            return Err(Error::InvalidParameter(format!(
                "area ({x0}, {y0})-({x1}, {y1}) not inside {}x{}",
                self.width(),
                self.height()
            )));
        }
        Ok(self.sum_area_unchecked(x0, y0, x1, y1))
    }

    /// Mean over the inclusive rectangle `[x0, x1] x [y0, y1]`.
    pub fn mean_area(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Result<f64> {
        let sum = self.sum_area(x0, y0, x1, y1)?;
        let area = (x1 - x0 + 1) as f64 * (y1 - y0 + 1) as f64;
        Ok(sum as f64 / area)
    }

    /// [`IntegralImage::sum_area`] without validation, for window loops
    /// whose ranges are checked once up front.
    ///
    /// # Panics
    ///
    /// Panics if `x1` or `y1` is outside the table.
    #[inline]
    pub fn sum_area_unchecked(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> i64 {
        let t = &self.table;
        let mut sum = t.value(x1, y1);
        if x0 > 0 {
            sum -= t.value(x0 - 1, y1);
        }
        if y0 > 0 {
            sum -= t.value(x1, y0 - 1);
        }
        if x0 > 0 && y0 > 0 {
            sum += t.value(x0 - 1, y0 - 1);
        }
        sum
    }
}

fn check_channel<const C: usize>(channel: usize) -> Result<()> {
    if channel >= C {
        Err(Error::IndexOutOfBounds {
            index: channel,
            len: C,
        })
    } else {
        Ok(())
    }
}
