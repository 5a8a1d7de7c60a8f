//! Binary thresholding
//!
//! Provides global methods that pick one threshold for the whole image
//! and an adaptive method that compares each pixel with its local mean:
//! - Fixed threshold binarization
//! - Quantile and median thresholds (histogram walk)
//! - Intermeans (iterative two-cluster refinement)
//! - Adaptive thresholding against a scaled local mean
//!
//! Throughout, a pixel strictly above the threshold becomes 255 and
//! everything else 0.

use crate::{ColorError, ColorResult};
use rasterlab_core::{GrayImage, Histogram, IntegralImage, Lut};

/// Upper bound on intermeans refinement steps
const MAX_INTERMEANS_ITERATIONS: usize = 256;

/// Options for adaptive thresholding
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveThresholdOptions {
    /// Side of the square local window (must be odd)
    pub mask_size: u32,
    /// Factor applied to the local mean before comparison
    pub factor: f64,
}

impl Default for AdaptiveThresholdOptions {
    fn default() -> Self {
        Self {
            mask_size: 15,
            factor: 0.85,
        }
    }
}

impl AdaptiveThresholdOptions {
    /// Set the window side.
    pub fn with_mask_size(mut self, mask_size: u32) -> Self {
        self.mask_size = mask_size;
        self
    }

    /// Set the mean factor.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    fn validate(&self) -> ColorResult<()> {
        if self.mask_size == 0 || self.mask_size % 2 == 0 {
            return Err(ColorError::InvalidParameters(format!(
                "mask size must be odd, got {}",
                self.mask_size
            )));
        }
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(ColorError::InvalidParameters(format!(
                "factor must be positive, got {}",
                self.factor
            )));
        }
        Ok(())
    }
}

/// Convert a grayscale image to binary using a fixed threshold
///
/// Pixels > threshold become 255, the rest 0.
pub fn threshold_to_binary(image: &GrayImage, threshold: u8) -> GrayImage {
    Lut::threshold(threshold).apply(image)
}

/// Map a grayscale image to three levels.
///
/// Pixels `<= k1` become 0, pixels in `(k1, k2]` become 128 and the rest
/// 255.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] if `k1 > k2`.
pub fn threshold_two_level(image: &GrayImage, k1: u8, k2: u8) -> ColorResult<GrayImage> {
    if k1 > k2 {
        return Err(ColorError::InvalidParameters(format!(
            "k1 ({k1}) must not exceed k2 ({k2})"
        )));
    }
    let lut = Lut::from_fn(|v| {
        if v <= k1 {
            0
        } else if v <= k2 {
            128
        } else {
            255
        }
    });
    Ok(lut.apply(image))
}

/// Compute the quantile threshold of a grayscale image
///
/// Returns the smallest intensity present in the image whose cumulative
/// count reaches `fraction` of all pixels. A fraction of 1 gives the
/// maximum intensity present.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] if `fraction` is outside
/// `[0, 1]`.
pub fn compute_quantile_threshold(image: &GrayImage, fraction: f64) -> ColorResult<u8> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(ColorError::InvalidParameters(format!(
            "fraction {fraction} not in [0, 1]"
        )));
    }
    Ok(Histogram::from_gray(image).quantile_level(fraction)?)
}

/// Binarize at the quantile threshold.
pub fn threshold_quantile(image: &GrayImage, fraction: f64) -> ColorResult<GrayImage> {
    let t = compute_quantile_threshold(image, fraction)?;
    Ok(threshold_to_binary(image, t))
}

/// Compute the median intensity of a grayscale image.
pub fn compute_median_threshold(image: &GrayImage) -> ColorResult<u8> {
    compute_quantile_threshold(image, 0.5)
}

/// Binarize at the median intensity.
pub fn threshold_median(image: &GrayImage) -> ColorResult<GrayImage> {
    let t = compute_median_threshold(image)?;
    Ok(threshold_to_binary(image, t))
}

/// Intermeans threshold of a histogram
///
/// Starts from the rounded mean intensity, then repeatedly splits the
/// histogram into `<= t` and `> t`, and moves `t` to the rounded average
/// of the two cluster means. Stops when `t` no longer changes or when one
/// cluster becomes empty.
///
/// # Errors
///
/// Returns [`ColorError::EmptyHistogram`] if the histogram has no counts.
pub fn intermeans_from_histogram(hist: &Histogram) -> ColorResult<u8> {
    if hist.total() == 0 {
        return Err(ColorError::EmptyHistogram);
    }
    let counts = hist.counts();
    let mut t = hist.mean()?.round() as usize;

    for iteration in 0..MAX_INTERMEANS_ITERATIONS {
        let cluster_mean = |levels: std::ops::Range<usize>| {
            let (n, s) = levels.fold((0u64, 0.0f64), |(n, s), i| {
                (n + counts[i], s + i as f64 * counts[i] as f64)
            });
            (n > 0).then(|| s / n as f64)
        };
        let (Some(m1), Some(m2)) = (cluster_mean(0..t + 1), cluster_mean(t + 1..256)) else {
            log::debug!("intermeans: empty cluster at t={t} after {iteration} iterations");
            break;
        };
        let next = ((m1 + m2) / 2.0).round() as usize;
        if next == t {
            log::debug!("intermeans: converged at t={t} after {iteration} iterations");
            break;
        }
        t = next;
    }

    Ok(t.min(255) as u8)
}

/// Compute the intermeans threshold of a grayscale image.
pub fn compute_intermeans_threshold(image: &GrayImage) -> ColorResult<u8> {
    intermeans_from_histogram(&Histogram::from_gray(image))
}

/// Binarize at the intermeans threshold.
pub fn threshold_intermeans(image: &GrayImage) -> ColorResult<GrayImage> {
    let t = compute_intermeans_threshold(image)?;
    Ok(threshold_to_binary(image, t))
}

/// Apply adaptive thresholding
///
/// The local mean over a `mask_size x mask_size` window (borders
/// replicated) is read from an integral image; a pixel becomes 255 when it
/// is brighter than `factor` times its local mean.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] for an even mask size or a
/// non-positive factor.
pub fn adaptive_threshold(
    image: &GrayImage,
    options: &AdaptiveThresholdOptions,
) -> ColorResult<GrayImage> {
    options.validate()?;

    let (w, h) = image.dimensions();
    let mask = options.mask_size;
    let padded = image.border_replicate(mask / 2)?;
    let integral = IntegralImage::new(&padded, 0)?;
    let area = (mask as f64) * (mask as f64);

    let mut out = GrayImage::new(w, h)?;
    for y in 0..h {
        for x in 0..w {
            let sum = integral.sum_area_unchecked(x, y, x + mask - 1, y + mask - 1);
            let local_mean = sum as f64 / area;
            if image.value(x, y) as f64 > options.factor * local_mean {
                out.set_value(x, y, 255);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spikes(a: u8, b: u8) -> GrayImage {
        GrayImage::from_fn(10, 10, |x, _| [if x < 5 { a } else { b }]).unwrap()
    }

    #[test]
    fn test_threshold_to_binary() {
        let img = GrayImage::from_data(4, 1, vec![0, 100, 101, 255]).unwrap();
        let b = threshold_to_binary(&img, 100);
        assert_eq!(b.data(), &[0, 0, 255, 255]);
    }

    #[test]
    fn test_two_level() {
        let img = GrayImage::from_data(5, 1, vec![0, 50, 51, 150, 151]).unwrap();
        let out = threshold_two_level(&img, 50, 150).unwrap();
        assert_eq!(out.data(), &[0, 0, 128, 128, 255]);
        assert!(threshold_two_level(&img, 150, 50).is_err());
    }

    #[test]
    fn test_quantile_extremes() {
        let img = GrayImage::from_data(4, 1, vec![10, 40, 40, 200]).unwrap();
        assert_eq!(compute_quantile_threshold(&img, 1.0).unwrap(), 200);
        assert_eq!(compute_quantile_threshold(&img, 0.0).unwrap(), 10);
        assert_eq!(compute_quantile_threshold(&img, 0.5).unwrap(), 40);
        assert!(compute_quantile_threshold(&img, 1.5).is_err());
        assert!(compute_quantile_threshold(&img, -0.1).is_err());
    }

    #[test]
    fn test_median() {
        let img = GrayImage::from_data(5, 1, vec![9, 1, 5, 7, 3]).unwrap();
        assert_eq!(compute_median_threshold(&img).unwrap(), 5);
        let b = threshold_median(&img).unwrap();
        assert_eq!(b.data(), &[255, 0, 0, 255, 0]);
    }

    #[test]
    fn test_intermeans_bimodal() {
        assert_eq!(compute_intermeans_threshold(&spikes(50, 200)).unwrap(), 125);
        let b = threshold_intermeans(&spikes(50, 200)).unwrap();
        assert_eq!(b.value(0, 0), 0);
        assert_eq!(b.value(9, 0), 255);
    }

    #[test]
    fn test_intermeans_single_level() {
        let img = GrayImage::new_with_value(3, 3, [77]).unwrap();
        assert_eq!(compute_intermeans_threshold(&img).unwrap(), 77);
    }

    #[test]
    fn test_intermeans_empty_histogram() {
        let hist = Histogram::from_counts([0; 256]);
        assert!(matches!(
            intermeans_from_histogram(&hist),
            Err(ColorError::EmptyHistogram)
        ));
    }

    #[test]
    fn test_adaptive_uniform_is_foreground() {
        let img = GrayImage::new_with_value(8, 8, [100]).unwrap();
        let out = adaptive_threshold(&img, &AdaptiveThresholdOptions::default()).unwrap();
        assert!(out.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_adaptive_dark_spot() {
        let mut img = GrayImage::new_with_value(9, 9, [200]).unwrap();
        img.set_value(4, 4, 20);
        let opts = AdaptiveThresholdOptions::default().with_mask_size(3);
        let out = adaptive_threshold(&img, &opts).unwrap();
        assert_eq!(out.value(4, 4), 0);
        assert_eq!(out.value(0, 0), 255);
    }

    #[test]
    fn test_adaptive_invalid() {
        let img = GrayImage::new(4, 4).unwrap();
        let even = AdaptiveThresholdOptions::default().with_mask_size(4);
        assert!(adaptive_threshold(&img, &even).is_err());
        let zero = AdaptiveThresholdOptions::default().with_factor(0.0);
        assert!(adaptive_threshold(&img, &zero).is_err());
    }
}
