//! Convolution kernels
//!
//! Square kernels with odd side length, centered on the middle cell.
//! Values are stored row-major; `get(x, y)` addresses column `x`, row `y`.

use crate::{FilterError, FilterResult};

/// Largest accepted side for kernels and sliding windows
pub const MAX_MASK_SIZE: u32 = 4095;

/// Check that a window size is odd, at least 1 and at most
/// [`MAX_MASK_SIZE`].
pub fn check_mask_size(size: u32) -> FilterResult<()> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "mask size must be odd and >= 1, got {size}"
        )));
    }
    if size > MAX_MASK_SIZE {
        return Err(FilterError::InvalidParameters(format!(
            "mask size {size} exceeds {MAX_MASK_SIZE}"
        )));
    }
    Ok(())
}

/// Number of samples in a `size x size` window.
pub(crate) fn window_area(size: u32) -> FilterResult<usize> {
    (size as usize)
        .checked_mul(size as usize)
        .ok_or_else(|| FilterError::InvalidKernel(format!("{size}x{size} window overflows")))
}

/// A square 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Side length (odd)
    size: u32,
    /// Kernel data (row-major order)
    data: Vec<f64>,
}

impl Kernel {
    /// Create a zero kernel of the given odd size.
    pub fn new(size: u32) -> FilterResult<Self> {
        check_mask_size(size).map_err(|e| match e {
            FilterError::InvalidParameters(msg) => FilterError::InvalidKernel(msg),
            other => other,
        })?;
        Ok(Kernel {
            size,
            data: vec![0.0; window_area(size)?],
        })
    }

    /// Create a kernel from row-major values.
    pub fn from_slice(size: u32, data: &[f64]) -> FilterResult<Self> {
        let mut k = Self::new(size)?;
        if data.len() != k.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values for a {size}x{size} kernel, got {}",
                k.data.len(),
                data.len()
            )));
        }
        k.data.copy_from_slice(data);
        Ok(k)
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        let mut k = Self::new(size)?;
        let v = 1.0 / k.data.len() as f64;
        k.data.fill(v);
        Ok(k)
    }

    /// Side length for a Gaussian of the given variance: `ceil(4 * variance)`,
    /// bumped to the next odd number.
    pub fn gaussian_size(variance: f64) -> u32 {
        let size = (4.0 * variance).ceil().max(1.0) as u32;
        if size % 2 == 0 { size + 1 } else { size }
    }

    /// Create a normalized Gaussian kernel.
    ///
    /// Weights are `exp(-(i^2 + j^2) / (2 * variance^2))` for offsets `(i, j)`
    /// from the center, scaled to sum to 1. The size comes from
    /// [`Kernel::gaussian_size`].
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `variance` is not
    /// positive and finite.
    pub fn gaussian(variance: f64) -> FilterResult<Self> {
        if !variance.is_finite() || variance <= 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "variance must be > 0, got {variance}"
            )));
        }
        let mut k = Self::spatial_gaussian(variance)?;
        k.normalize();
        Ok(k)
    }

    /// Unnormalized Gaussian weights with center weight 1.
    pub(crate) fn spatial_gaussian(variance: f64) -> FilterResult<Self> {
        let size = Self::gaussian_size(variance);
        let mut k = Self::new(size)?;
        let half = (size / 2) as i64;
        let denom = 2.0 * variance * variance;
        for y in 0..size {
            for x in 0..size {
                let (i, j) = (x as i64 - half, y as i64 - half);
                k.set(x, y, (-((i * i + j * j) as f64) / denom).exp());
            }
        }
        Ok(k)
    }

    /// Emboss kernel: 0 on the anti-diagonal, +1 above-left of it and -1
    /// below-right of it.
    pub fn emboss(size: u32) -> FilterResult<Self> {
        let mut k = Self::new(size)?;
        let diag = size - 1;
        for y in 0..size {
            for x in 0..size {
                let v = match (x + y).cmp(&diag) {
                    std::cmp::Ordering::Less => 1.0,
                    std::cmp::Ordering::Equal => 0.0,
                    std::cmp::Ordering::Greater => -1.0,
                };
                k.set(x, y, v);
            }
        }
        Ok(k)
    }

    /// Horizontal-derivative Sobel kernel (responds to vertical edges).
    pub fn sobel_x() -> Self {
        Kernel {
            size: 3,
            data: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
        }
    }

    /// Vertical-derivative Sobel kernel (responds to horizontal edges).
    pub fn sobel_y() -> Self {
        Kernel {
            size: 3,
            data: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
        }
    }

    /// Horizontal-derivative Prewitt kernel.
    pub fn prewitt_x() -> Self {
        Kernel {
            size: 3,
            data: vec![-1.0, 0.0, 1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0],
        }
    }

    /// Vertical-derivative Prewitt kernel.
    pub fn prewitt_y() -> Self {
        Kernel {
            size: 3,
            data: vec![-1.0, -1.0, -1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        }
    }

    /// Get the side length.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Offset from the border to the center cell.
    #[inline]
    pub fn half(&self) -> u32 {
        self.size / 2
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x < self.size && y < self.size {
            Some(self.data[(y * self.size + x) as usize])
        } else {
            None
        }
    }

    /// Set a value at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        if x < self.size && y < self.size {
            self.data[(y * self.size + x) as usize] = value;
        }
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel summing to zero is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum.abs() > f64::EPSILON {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}
