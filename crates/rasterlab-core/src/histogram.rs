//! Intensity histograms for 8-bit rasters
//!
//! A [`Histogram`] is a 256-bucket count array. The relative and
//! cumulative forms are derived on demand; thresholding and LUT
//! equalization are built on top of them.

use crate::error::{Error, Result};
use crate::raster::{GrayImage, Raster};

/// Number of intensity levels in an 8-bit raster
pub const LEVELS: usize = 256;

/// 256-bucket intensity histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; LEVELS],
}

impl Histogram {
    /// Histogram of a grayscale raster.
    pub fn from_gray(image: &GrayImage) -> Self {
        let mut counts = [0u64; LEVELS];
        for &v in image.data() {
            counts[v as usize] += 1;
        }
        Histogram { counts }
    }

    /// Histogram of one channel of a multi-channel raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `channel >= C`.
    pub fn from_channel<const C: usize>(image: &Raster<u8, C>, channel: usize) -> Result<Self> {
        if channel >= C {
            return Err(Error::IndexOutOfBounds {
                index: channel,
                len: C,
            });
        }
        let mut counts = [0u64; LEVELS];
        for &v in image.data().iter().skip(channel).step_by(C) {
            counts[v as usize] += 1;
        }
        Ok(Histogram { counts })
    }

    /// One histogram per channel.
    pub fn per_channel<const C: usize>(image: &Raster<u8, C>) -> [Self; C] {
        let mut counts = [[0u64; LEVELS]; C];
        for px in image.data().chunks_exact(C) {
            for (c, &v) in px.iter().enumerate() {
                counts[c][v as usize] += 1;
            }
        }
        counts.map(|counts| Histogram { counts })
    }

    /// Wrap a precomputed count array.
    pub fn from_counts(counts: [u64; LEVELS]) -> Self {
        Histogram { counts }
    }

    /// Raw counts
    pub fn counts(&self) -> &[u64; LEVELS] {
        &self.counts
    }

    /// Count of one intensity level
    pub fn count(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    /// Total number of samples
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Probability of each level. All zeros for an empty histogram.
    pub fn relative(&self) -> [f64; LEVELS] {
        let total = self.total();
        let mut rel = [0.0; LEVELS];
        if total == 0 {
            return rel;
        }
        for (r, &c) in rel.iter_mut().zip(self.counts.iter()) {
            *r = c as f64 / total as f64;
        }
        rel
    }

    /// Running count up to and including each level.
    pub fn cumulative(&self) -> [u64; LEVELS] {
        let mut cum = [0u64; LEVELS];
        let mut acc = 0u64;
        for (c, &n) in cum.iter_mut().zip(self.counts.iter()) {
            acc += n;
            *c = acc;
        }
        cum
    }

    /// Cumulative probability of each level.
    pub fn cumulative_relative(&self) -> [f64; LEVELS] {
        let total = self.total();
        let mut out = [0.0; LEVELS];
        if total == 0 {
            return out;
        }
        for (o, &c) in out.iter_mut().zip(self.cumulative().iter()) {
            *o = c as f64 / total as f64;
        }
        out
    }

    /// Mean intensity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] if the histogram is empty.
    pub fn mean(&self) -> Result<f64> {
        let total = self.total();
        if total == 0 {
            return Err(Error::EmptyImage("histogram"));
        }
        let weighted: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| i as f64 * c as f64)
            .sum();
        Ok(weighted / total as f64)
    }

    /// Lowest level with a nonzero count
    pub fn min_level(&self) -> Option<u8> {
        self.counts.iter().position(|&c| c > 0).map(|i| i as u8)
    }

    /// Highest level with a nonzero count
    pub fn max_level(&self) -> Option<u8> {
        self.counts.iter().rposition(|&c| c > 0).map(|i| i as u8)
    }

    /// Smallest level whose cumulative count reaches `fraction * total`.
    ///
    /// Only levels that are actually present can be returned, so a
    /// fraction of 0 gives the minimum present level and a fraction of 1
    /// the maximum.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `fraction` is outside `[0, 1]`
    /// and [`Error::EmptyImage`] for an empty histogram.
    pub fn quantile_level(&self, fraction: f64) -> Result<u8> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(Error::InvalidParameter(format!(
                "quantile fraction {fraction} not in [0, 1]"
            )));
        }
        let total = self.total();
        if total == 0 {
            return Err(Error::EmptyImage("histogram"));
        }
        let target = fraction * total as f64;
        let mut acc = 0u64;
        for (level, &c) in self.counts.iter().enumerate() {
            acc += c;
            if c > 0 && acc as f64 >= target {
                return Ok(level as u8);
            }
        }
        // acc == total >= target on the last present level
        Ok(self.max_level().unwrap_or(u8::MAX))
    }
}
