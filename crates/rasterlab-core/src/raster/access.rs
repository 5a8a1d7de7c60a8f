//! Pixel access functions
//!
//! Bounds-checked accessors return `Option`/`Result`. The `_unchecked`
//! variants skip the coordinate test and rely on slice indexing, so an
//! out-of-range coordinate panics instead of reading a neighbouring row.
//! Algorithms use them only inside loops whose ranges were validated
//! against the raster dimensions up front.

use super::{Raster, Sample};
use crate::error::{Error, Result};

impl<T: Sample, const C: usize> Raster<T, C> {
    #[inline]
    fn offset(&self, x: u32, y: u32, c: usize) -> usize {
        (y as usize * self.width as usize + x as usize) * C + c
    }

    #[inline]
    fn contains(&self, x: u32, y: u32, c: usize) -> bool {
        x < self.width && y < self.height && c < C
    }

    /// Get channel `c` of the pixel at (x, y).
    ///
    /// Returns `None` if any coordinate is out of bounds.
    pub fn get(&self, x: u32, y: u32, c: usize) -> Option<T> {
        if self.contains(x, y, c) {
            Some(self.data[self.offset(x, y, c)])
        } else {
            None
        }
    }

    /// Set channel `c` of the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if any coordinate is out of bounds.
    pub fn set(&mut self, x: u32, y: u32, c: usize, value: T) -> Result<()> {
        if !self.contains(x, y, c) {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize * self.width as usize + x as usize) * C + c,
                len: self.data.len(),
            });
        }
        let idx = self.offset(x, y, c);
        self.data[idx] = value;
        Ok(())
    }

    /// Get a sample without the coordinate test.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the sample buffer.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32, c: usize) -> T {
        self.data[self.offset(x, y, c)]
    }

    /// Set a sample without the coordinate test.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the sample buffer.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, c: usize, value: T) {
        let idx = self.offset(x, y, c);
        self.data[idx] = value;
    }

    /// All channels of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the raster.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [T; C] {
        let base = self.offset(x, y, 0);
        std::array::from_fn(|c| self.data[base + c])
    }

    /// Overwrite all channels of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the raster.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: [T; C]) {
        let base = self.offset(x, y, 0);
        self.data[base..base + C].copy_from_slice(&value);
    }

    /// Sample at signed coordinates with replicate (clamp) border handling.
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64, c: usize) -> T {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.get_unchecked(cx, cy, c)
    }
}

impl<T: Sample> Raster<T, 1> {
    /// Single-channel shorthand for `get_unchecked(x, y, 0)`.
    #[inline]
    pub fn value(&self, x: u32, y: u32) -> T {
        self.get_unchecked(x, y, 0)
    }

    /// Single-channel shorthand for `set_unchecked(x, y, 0, value)`.
    #[inline]
    pub fn set_value(&mut self, x: u32, y: u32, value: T) {
        self.set_unchecked(x, y, 0, value);
    }
}
