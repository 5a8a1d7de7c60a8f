//! Bilateral filtering (edge-preserving smoothing)
//!
//! Bilateral filtering is a non-linear, edge-preserving smoothing filter.
//! It combines a spatial Gaussian filter with a range (intensity) Gaussian
//! filter.
//!
//! # Algorithm
//!
//! For each pixel, the output is a weighted average of neighboring pixels
//! where:
//! - Spatial weight: Gaussian based on distance from center pixel
//! - Range weight: Gaussian based on intensity difference from center pixel
//!
//! # Example
//!
//! ```
//! use rasterlab_core::GrayImage;
//! use rasterlab_filter::{BilateralOptions, bilateral_filter};
//!
//! let img = GrayImage::new_with_value(16, 16, [90]).unwrap();
//! let smoothed = bilateral_filter(&img, &BilateralOptions::default()).unwrap();
//! assert_eq!(smoothed, img);
//! ```

use crate::convolve::collect_rows;
use crate::{FilterError, FilterResult, Kernel};
use rasterlab_core::GrayImage;

/// Parameters for [`bilateral_filter`]
#[derive(Debug, Clone, PartialEq)]
pub struct BilateralOptions {
    /// Spread of the spatial Gaussian; also sets the mask size
    pub variance_d: f64,
    /// Spread of the range Gaussian over intensity differences
    pub variance_r: f64,
}

impl Default for BilateralOptions {
    fn default() -> Self {
        Self {
            variance_d: 2.0,
            variance_r: 30.0,
        }
    }
}

impl BilateralOptions {
    /// Set the spatial spread.
    pub fn with_variance_d(mut self, variance_d: f64) -> Self {
        self.variance_d = variance_d;
        self
    }

    /// Set the range spread.
    pub fn with_variance_r(mut self, variance_r: f64) -> Self {
        self.variance_r = variance_r;
        self
    }

    fn validate(&self) -> FilterResult<()> {
        for (name, v) in [("variance_d", self.variance_d), ("variance_r", self.variance_r)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(FilterError::InvalidParameters(format!(
                    "{name} must be positive, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Create a range kernel for bilateral filtering
///
/// Creates a 256-element array where element `i` is the weight
/// `exp(-i^2 / (2 * variance_r^2))` for an intensity difference of `i`.
///
/// # Arguments
/// * `variance_r` - Spread of the range Gaussian (must be > 0.0)
pub fn make_range_kernel(variance_r: f64) -> FilterResult<[f64; 256]> {
    if !variance_r.is_finite() || variance_r <= 0.0 {
        return Err(FilterError::InvalidParameters(
            "variance_r must be positive".to_string(),
        ));
    }

    let mut kernel = [0.0f64; 256];
    let denom = 2.0 * variance_r * variance_r;

    for (i, val) in kernel.iter_mut().enumerate() {
        *val = (-(i as f64 * i as f64) / denom).exp();
    }

    Ok(kernel)
}

/// Apply the bilateral filter to a grayscale image
///
/// The spatial mask is the Gaussian of [`Kernel::gaussian`] for
/// `variance_d`; each neighbour's spatial weight is multiplied by the range
/// weight of its intensity difference to the center pixel, and the output
/// is the weighted average normalized by the sum of weights. Borders are
/// replicated.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if either variance is not
/// positive.
pub fn bilateral_filter(image: &GrayImage, options: &BilateralOptions) -> FilterResult<GrayImage> {
    options.validate()?;

    let spatial = Kernel::spatial_gaussian(options.variance_d)?;
    let range = make_range_kernel(options.variance_r)?;
    let size = spatial.size();
    let (w, h) = image.dimensions();
    let padded = image.border_replicate(spatial.half())?;
    log::trace!("bilateral_filter: mask {size}");

    collect_rows(w, h, |y| {
        (0..w)
            .map(|x| {
                let center = image.value(x, y) as i32;
                let mut sum = 0.0;
                let mut weight_sum = 0.0;

                for ky in 0..size {
                    for kx in 0..size {
                        let neighbor = padded.value(x + kx, y + ky) as i32;
                        let diff = (center - neighbor).unsigned_abs() as usize;
                        let weight = spatial.data()[(ky * size + kx) as usize] * range[diff];
                        sum += neighbor as f64 * weight;
                        weight_sum += weight;
                    }
                }

                // the center cell always contributes weight 1
                (sum / weight_sum).round().clamp(0.0, 255.0) as u8
            })
            .collect()
    })
}
