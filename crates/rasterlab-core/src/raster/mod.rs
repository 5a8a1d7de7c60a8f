//! Raster - The main image container
//!
//! `Raster<T, C>` is a 2D buffer of `C` interleaved channels per pixel with
//! sample type `T`. Byte rasters hold displayable images (grayscale with
//! `C = 1`, BGR color with `C = 3`); integer and floating-point rasters hold
//! intermediate results such as integral images, gradient magnitudes and
//! component labels.
//!
//! # Memory layout
//!
//! Data is stored in row-major order with no padding. Channel `c` of the
//! pixel at column `x`, row `y` is at index `(y * width + x) * C + c`.
//!
//! # Ownership model
//!
//! A raster owns its samples exclusively. Every algorithm in the workspace
//! takes `&Raster` and returns a freshly allocated raster; no operation
//! modifies its input.
//!
//! # Examples
//!
//! ```
//! use rasterlab_core::{ColorImage, GrayImage};
//!
//! let mut gray = GrayImage::new(64, 48).unwrap();
//! gray.set(10, 20, 0, 200).unwrap();
//! assert_eq!(gray.get(10, 20, 0), Some(200));
//!
//! let color = ColorImage::new_with_value(4, 4, [255, 0, 0]).unwrap();
//! assert_eq!(color.pixel(3, 3), [255, 0, 0]);
//! ```

mod access;
mod border;

use crate::error::{Error, Result};

/// Numeric sample stored in a [`Raster`].
///
/// Conversions go through `f64`, which represents every sample type used
/// in the workspace exactly except the upper range of `i64`.
pub trait Sample:
    Copy + Default + PartialEq + PartialOrd + Send + Sync + std::fmt::Debug + 'static
{
    /// Widen to `f64`.
    fn to_f64(self) -> f64;

    /// Narrow from `f64`.
    ///
    /// Integer types round to nearest and saturate at their bounds;
    /// NaN maps to zero.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_integer_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value.round() as $t
                }
            }
        )*
    };
}

impl_integer_sample!(u8, u16, u32, i32, i64);

impl Sample for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

/// 2D raster with `C` interleaved channels of sample type `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T, const C: usize> {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples (row-major, channels interleaved, no padding)
    data: Vec<T>,
}

/// 8-bit grayscale image.
pub type GrayImage = Raster<u8, 1>;

/// 8-bit color image, channel order blue, green, red.
pub type ColorImage = Raster<u8, 3>;

/// 64-bit integer accumulator image.
pub type IntImage = Raster<i64, 1>;

/// Double precision image for intermediate math.
pub type FloatImage = Raster<f64, 1>;

/// Component label image.
pub type LabelImage = Raster<u32, 1>;

impl<T: Sample, const C: usize> Raster<T, C> {
    /// Create a new raster with every sample set to the default (zero).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0 or the
    /// sample count overflows `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = sample_count(width, height, C)?;
        Ok(Raster {
            width,
            height,
            data: vec![T::default(); len],
        })
    }

    /// Create a new raster with every pixel set to `value`.
    pub fn new_with_value(width: u32, height: u32, value: [T; C]) -> Result<Self> {
        let len = sample_count(width, height, C)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / C {
            data.extend_from_slice(&value);
        }
        Ok(Raster {
            width,
            height,
            data,
        })
    }

    /// Create a raster from raw interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the data length does
    /// not equal `width * height * C`.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let len = sample_count(width, height, C)?;
        if data.len() != len {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                C,
                len
            )));
        }
        Ok(Raster {
            width,
            height,
            data,
        })
    }

    /// Create a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [T; C]) -> Result<Self> {
        let len = sample_count(width, height, C)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Raster {
            width,
            height,
            data,
        })
    }

    /// Get the raster width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the raster height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the raster dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of interleaved channels per pixel
    #[inline]
    pub fn channels(&self) -> usize {
        C
    }

    /// Check whether `other` has the same width and height.
    pub fn same_dimensions<U, const D: usize>(&self, other: &Raster<U, D>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Fail with [`Error::DimensionMismatch`] unless dimensions agree.
    pub fn check_same_dimensions<U, const D: usize>(&self, other: &Raster<U, D>) -> Result<()> {
        if self.same_dimensions(other) {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: (other.width, other.height),
            })
        }
    }

    /// Get the raw sample data.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Get mutable access to the raw sample data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the raster and return its samples.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        let stride = self.width as usize * C;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Mutable samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [T] {
        let stride = self.width as usize * C;
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Apply `f` to every sample, keeping the channel count.
    pub fn map<U: Sample>(&self, f: impl FnMut(T) -> U) -> Raster<U, C> {
        Raster {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Apply `f` to every pixel, possibly changing the channel count.
    pub fn map_pixels<U: Sample, const D: usize>(
        &self,
        mut f: impl FnMut([T; C]) -> [U; D],
    ) -> Raster<U, D> {
        let mut data = Vec::with_capacity(self.data.len() / C * D);
        for chunk in self.data.chunks_exact(C) {
            let px: [T; C] = std::array::from_fn(|c| chunk[c]);
            data.extend_from_slice(&f(px));
        }
        Raster {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Numeric conversion of every sample through `f64`.
    pub fn convert<U: Sample>(&self) -> Raster<U, C> {
        self.map(|v| U::from_f64(v.to_f64()))
    }

    /// Extract one channel as a single-channel raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `channel >= C`.
    pub fn channel(&self, channel: usize) -> Result<Raster<T, 1>> {
        if channel >= C {
            return Err(Error::IndexOutOfBounds {
                index: channel,
                len: C,
            });
        }
        Ok(Raster {
            width: self.width,
            height: self.height,
            data: self.data.iter().skip(channel).step_by(C).copied().collect(),
        })
    }

    /// Interleave `C` single-channel rasters of equal size.
    pub fn from_channels(channels: &[Raster<T, 1>; C]) -> Result<Self> {
        let first = &channels[0];
        for ch in channels.iter().skip(1) {
            first.check_same_dimensions(ch)?;
        }
        let n = first.data.len();
        let mut data = Vec::with_capacity(n * C);
        for i in 0..n {
            for ch in channels {
                data.push(ch.data[i]);
            }
        }
        Ok(Raster {
            width: first.width,
            height: first.height,
            data,
        })
    }

    /// Minimum and maximum sample over all channels.
    pub fn min_max(&self) -> (T, T) {
        let mut lo = self.data[0];
        let mut hi = self.data[0];
        for &v in &self.data[1..] {
            if v < lo {
                lo = v;
            }
            if v > hi {
                hi = v;
            }
        }
        (lo, hi)
    }
}

impl<const C: usize> Raster<u8, C> {
    /// Check whether every sample is either 0 or 255.
    pub fn is_binary(&self) -> bool {
        self.data.iter().all(|&v| v == 0 || v == 255)
    }

    /// Fail with [`Error::NotBinary`] unless [`Raster::is_binary`] holds.
    pub fn ensure_binary(&self) -> Result<()> {
        match self.data.iter().find(|&&v| v != 0 && v != 255) {
            Some(&v) => Err(Error::NotBinary(v)),
            None => Ok(()),
        }
    }

    /// Count samples that are nonzero.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

fn sample_count(width: u32, height: u32, channels: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(Error::InvalidDimension { width, height })
}
