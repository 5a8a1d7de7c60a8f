//! Two-level Otsu thresholding
//!
//! Splits the intensity range into three classes `[0, k1]`, `(k1, k2]`
//! and `(k2, 255]` and searches every pair `k1 < k2` for the largest
//! between-class variance
//!
//! ```text
//! sigma_b^2 = sum_j w_j * (mu_j - mu_T)^2
//! ```
//!
//! where `w_j` is the class probability, `mu_j` the class mean and `mu_T`
//! the global mean. Class statistics come from prefix sums, so each pair
//! is evaluated in constant time.
//!
//! When several pairs reach the same maximum, the result is the average
//! of all of them (integer division), not the first one found.

use crate::threshold::threshold_two_level;
use crate::{ColorError, ColorResult};
use rasterlab_core::{GrayImage, Histogram};

/// Relative tolerance under which two variances count as tied
const TIE_TOLERANCE: f64 = 1e-9;

/// The pair of thresholds found by [`otsu_from_histogram`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtsuThresholds {
    /// Upper bound of the dark class
    pub k1: u8,
    /// Upper bound of the middle class
    pub k2: u8,
}

/// Two-level Otsu thresholds of a histogram
///
/// # Errors
///
/// Returns [`ColorError::EmptyHistogram`] if the histogram has no counts.
pub fn otsu_from_histogram(hist: &Histogram) -> ColorResult<OtsuThresholds> {
    let total = hist.total();
    if total == 0 {
        return Err(ColorError::EmptyHistogram);
    }

    let probs = hist.relative();
    let mut omega = [0.0f64; 256];
    let mut mu = [0.0f64; 256];
    let (mut w_acc, mut m_acc) = (0.0, 0.0);
    for (i, &p) in probs.iter().enumerate() {
        w_acc += p;
        m_acc += i as f64 * p;
        omega[i] = w_acc;
        mu[i] = m_acc;
    }
    let mu_t = mu[255];

    // An empty class contributes nothing
    let class_term = |w: f64, m: f64| {
        if w > 1e-12 {
            let d = m / w - mu_t;
            w * d * d
        } else {
            0.0
        }
    };

    // variances are never negative, so the first pair always wins
    let mut best = -1.0f64;
    let (mut sum_k1, mut sum_k2, mut ties) = (0usize, 0usize, 0usize);

    for k1 in 0..254usize {
        for k2 in (k1 + 1)..255usize {
            let variance = class_term(omega[k1], mu[k1])
                + class_term(omega[k2] - omega[k1], mu[k2] - mu[k1])
                + class_term(1.0 - omega[k2], mu_t - mu[k2]);

            let tolerance = TIE_TOLERANCE * best.abs().max(1.0);
            if variance > best + tolerance {
                best = variance;
                sum_k1 = k1;
                sum_k2 = k2;
                ties = 1;
            } else if (variance - best).abs() <= tolerance {
                sum_k1 += k1;
                sum_k2 += k2;
                ties += 1;
            }
        }
    }

    log::debug!("otsu: max variance {best:.3} shared by {ties} pairs");

    Ok(OtsuThresholds {
        k1: (sum_k1 / ties) as u8,
        k2: (sum_k2 / ties) as u8,
    })
}

/// Compute the two-level Otsu thresholds of a grayscale image.
pub fn compute_otsu_thresholds(image: &GrayImage) -> ColorResult<OtsuThresholds> {
    otsu_from_histogram(&Histogram::from_gray(image))
}

/// Map a grayscale image to {0, 128, 255} at its Otsu thresholds.
pub fn threshold_otsu(image: &GrayImage) -> ColorResult<GrayImage> {
    let OtsuThresholds { k1, k2 } = compute_otsu_thresholds(image)?;
    threshold_two_level(image, k1, k2)
}
