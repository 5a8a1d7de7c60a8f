//! Canny edge detection
//!
//! The pipeline runs in five stages, each exposed as its own function so
//! intermediate maps can be inspected:
//!
//! 1. Gaussian smoothing (variance 1)
//! 2. Gradient magnitude ([`canny_magnitude`]), zeroed at or below the low
//!    threshold
//! 3. Direction quantization ([`quantize_directions`]) into four bins
//! 4. Non-maximum suppression ([`non_max_suppression`])
//! 5. Hysteresis thresholding ([`hysteresis_threshold`])
//!
//! Grayscale input uses the Sobel gradient, color input the
//! maximum-variance gradient.
//!
//! # Example
//!
//! ```
//! use rasterlab_core::GrayImage;
//! use rasterlab_filter::{CannyOptions, canny};
//!
//! let img = GrayImage::from_fn(20, 20, |x, _| [if x < 10 { 0 } else { 200 }]).unwrap();
//! let edges = canny(&img, &CannyOptions::default()).unwrap();
//! assert!(edges.is_binary());
//! ```

use std::collections::VecDeque;

use crate::convolve::gaussian_filter;
use crate::gradient::{GradientField, max_variance_gradient, sobel_gradient};
use crate::{FilterError, FilterResult};
use rasterlab_core::{ColorImage, FloatImage, GrayImage, Raster};

/// Quantized gradient direction map. Bins 0..=3 stand for 0, 45, 90 and
/// 135 degrees; [`NO_DIRECTION`] marks pixels at or below the low threshold.
pub type DirectionMap = Raster<i32, 1>;

/// Sentinel direction for suppressed pixels
pub const NO_DIRECTION: i32 = -1;

/// Variance of the pre-smoothing Gaussian
const SMOOTHING_VARIANCE: f64 = 1.0;

/// Neighbour offsets `(prev, next)` along the gradient for each bin.
const NMS_NEIGHBORS: [((i64, i64), (i64, i64)); 4] = [
    ((-1, 0), (1, 0)),
    ((1, -1), (-1, 1)),
    ((0, -1), (0, 1)),
    ((-1, -1), (1, 1)),
];

/// Parameters for [`canny`] and [`canny_color`]
#[derive(Debug, Clone, PartialEq)]
pub struct CannyOptions {
    /// Magnitudes at or below this are never edges
    pub low_threshold: f64,
    /// Magnitudes above this seed edges
    pub high_threshold: f64,
}

impl Default for CannyOptions {
    fn default() -> Self {
        Self {
            low_threshold: 20.0,
            high_threshold: 60.0,
        }
    }
}

impl CannyOptions {
    /// Create options with both thresholds.
    pub fn new(low_threshold: f64, high_threshold: f64) -> Self {
        Self {
            low_threshold,
            high_threshold,
        }
    }

    /// Set the low threshold.
    pub fn with_low_threshold(mut self, low: f64) -> Self {
        self.low_threshold = low;
        self
    }

    /// Set the high threshold.
    pub fn with_high_threshold(mut self, high: f64) -> Self {
        self.high_threshold = high;
        self
    }

    /// Check `0 <= low <= high`.
    pub fn validate(&self) -> FilterResult<()> {
        check_thresholds(self.low_threshold, self.high_threshold)
    }
}

fn check_thresholds(low: f64, high: f64) -> FilterResult<()> {
    if !(low.is_finite() && high.is_finite() && 0.0 <= low && low <= high) {
        return Err(FilterError::InvalidParameters(format!(
            "canny thresholds must satisfy 0 <= low <= high, got low {low}, high {high}"
        )));
    }
    Ok(())
}

/// Stage 2: gradient magnitude with values at or below `low` set to zero.
pub fn canny_magnitude(field: &GradientField, low: f64) -> FloatImage {
    field.magnitude.map(|m| if m <= low { 0.0 } else { m })
}

/// Quantize one direction in degrees into a bin.
///
/// - bin 0: `[-22.5, 22.5)`
/// - bin 1: `[-67.5, -22.5)`
/// - bin 2: `[-90, -67.5)` and `[67.5, 90]`
/// - bin 3: `[22.5, 67.5)`
pub fn direction_bin(degrees: f64) -> i32 {
    if (-22.5..22.5).contains(&degrees) {
        0
    } else if (-67.5..-22.5).contains(&degrees) {
        1
    } else if (22.5..67.5).contains(&degrees) {
        3
    } else {
        2
    }
}

/// Stage 3: quantized directions, [`NO_DIRECTION`] where the magnitude is at
/// or below `low`.
pub fn quantize_directions(field: &GradientField, low: f64) -> FilterResult<DirectionMap> {
    let (w, h) = field.magnitude.dimensions();
    let data = field
        .magnitude
        .data()
        .iter()
        .zip(field.direction.data())
        .map(|(&m, &d)| if m <= low { NO_DIRECTION } else { direction_bin(d) })
        .collect();
    Ok(DirectionMap::from_data(w, h, data)?)
}

/// Stage 4: non-maximum suppression.
///
/// A pixel survives iff its magnitude is `>=` the previous neighbour along
/// its direction bin and strictly `>` the next one; out-of-image neighbours
/// count as 0. Comparisons read the unsuppressed input, so the result does
/// not depend on scan order. Plateaus along the gradient collapse onto
/// their last pixel.
///
/// # Errors
///
/// Returns [`FilterError::Core`] if the two maps differ in size.
pub fn non_max_suppression(magnitude: &FloatImage, directions: &DirectionMap) -> FilterResult<FloatImage> {
    magnitude.check_same_dimensions(directions)?;
    let (w, h) = magnitude.dimensions();
    let at = |x: i64, y: i64| {
        if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
            0.0
        } else {
            magnitude.value(x as u32, y as u32)
        }
    };

    let mut out = FloatImage::new(w, h)?;
    let mut kept = 0usize;
    for y in 0..h {
        for x in 0..w {
            let bin = directions.value(x, y);
            if bin == NO_DIRECTION {
                continue;
            }
            let Some(&((px, py), (nx, ny))) = NMS_NEIGHBORS.get(bin as usize) else {
                continue;
            };
            let (xi, yi) = (x as i64, y as i64);
            let m = magnitude.value(x, y);
            if m >= at(xi + px, yi + py) && m > at(xi + nx, yi + ny) {
                out.set_value(x, y, m);
                kept += 1;
            }
        }
    }
    log::debug!("non_max_suppression: {kept} pixels kept");
    Ok(out)
}

/// Stage 5: hysteresis thresholding.
///
/// Values above `high` are strong edges (255) and seed a breadth-first
/// flood over 8-connected neighbours; any reached pixel with
/// `low < value <= high` is promoted to 255. Everything else is 0.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless `0 <= low <= high`.
pub fn hysteresis_threshold(magnitude: &FloatImage, low: f64, high: f64) -> FilterResult<GrayImage> {
    check_thresholds(low, high)?;
    let (w, h) = magnitude.dimensions();
    let mut out = GrayImage::new(w, h)?;
    let mut queue = VecDeque::new();

    for y in 0..h {
        for x in 0..w {
            if magnitude.value(x, y) > high {
                out.set_value(x, y, 255);
                queue.push_back((x, y));
            }
        }
    }
    let strong = queue.len();

    while let Some((x, y)) = queue.pop_front() {
        let (xi, yi) = (x as i64, y as i64);
        for dy in -1..=1i64 {
            for dx in -1..=1i64 {
                let (sx, sy) = (xi + dx, yi + dy);
                if (dx == 0 && dy == 0) || sx < 0 || sy < 0 || sx >= w as i64 || sy >= h as i64 {
                    continue;
                }
                let (sx, sy) = (sx as u32, sy as u32);
                if out.value(sx, sy) == 0 && magnitude.value(sx, sy) > low {
                    out.set_value(sx, sy, 255);
                    queue.push_back((sx, sy));
                }
            }
        }
    }

    log::debug!(
        "hysteresis_threshold: {strong} strong seeds, {} edge pixels",
        out.count_nonzero()
    );
    Ok(out)
}

fn run_pipeline(field: &GradientField, options: &CannyOptions) -> FilterResult<GrayImage> {
    let low = options.low_threshold;
    let magnitude = canny_magnitude(field, low);
    let directions = quantize_directions(field, low)?;
    let thin = non_max_suppression(&magnitude, &directions)?;
    hysteresis_threshold(&thin, low, options.high_threshold)
}

/// Canny edge detection on a grayscale image.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless
/// `0 <= low_threshold <= high_threshold`.
pub fn canny(image: &GrayImage, options: &CannyOptions) -> FilterResult<GrayImage> {
    options.validate()?;
    let smoothed = gaussian_filter(image, SMOOTHING_VARIANCE)?;
    let field = sobel_gradient(&smoothed)?;
    log::debug!("canny: {}x{} gray", image.width(), image.height());
    run_pipeline(&field, options)
}

/// Canny edge detection on a color image using the maximum-variance
/// gradient.
pub fn canny_color(image: &ColorImage, options: &CannyOptions) -> FilterResult<GrayImage> {
    options.validate()?;
    let smoothed = gaussian_filter(image, SMOOTHING_VARIANCE)?;
    let field = max_variance_gradient(&smoothed)?;
    log::debug!("canny_color: {}x{}", image.width(), image.height());
    run_pipeline(&field, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_bins() {
        assert_eq!(direction_bin(0.0), 0);
        assert_eq!(direction_bin(-22.5), 0);
        assert_eq!(direction_bin(22.5), 3);
        assert_eq!(direction_bin(-22.6), 1);
        assert_eq!(direction_bin(-67.5), 1);
        assert_eq!(direction_bin(-67.6), 2);
        assert_eq!(direction_bin(67.5), 2);
        assert_eq!(direction_bin(90.0), 2);
        assert_eq!(direction_bin(-90.0), 2);
        assert_eq!(direction_bin(45.0), 3);
    }

    #[test]
    fn test_options_validation() {
        assert!(CannyOptions::default().validate().is_ok());
        assert!(CannyOptions::new(50.0, 10.0).validate().is_err());
        assert!(CannyOptions::new(-1.0, 10.0).validate().is_err());
    }

    #[test]
    fn test_nms_tie_breaking() {
        // horizontal plateau of equal magnitudes along bin 0
        let mag = FloatImage::from_data(4, 1, vec![0.0, 50.0, 50.0, 0.0]).unwrap();
        let dirs = DirectionMap::from_data(4, 1, vec![-1, 0, 0, -1]).unwrap();
        let out = non_max_suppression(&mag, &dirs).unwrap();
        // the left pixel equals its next neighbour and is zeroed
        assert_eq!(out.data(), &[0.0, 0.0, 50.0, 0.0]);
    }

    #[test]
    fn test_nms_border_neighbours_are_zero() {
        let mag = FloatImage::from_data(2, 1, vec![30.0, 10.0]).unwrap();
        let dirs = DirectionMap::from_data(2, 1, vec![0, 0]).unwrap();
        let out = non_max_suppression(&mag, &dirs).unwrap();
        assert_eq!(out.data(), &[30.0, 0.0]);
    }

    #[test]
    fn test_hysteresis_chain() {
        let mut mag = FloatImage::new(8, 5).unwrap();
        // strong seed with a diagonal then horizontal weak chain
        mag.set_value(1, 1, 100.0);
        mag.set_value(2, 2, 30.0);
        mag.set_value(3, 2, 30.0);
        mag.set_value(4, 3, 40.0);
        // isolated weak pixel
        mag.set_value(7, 0, 50.0);
        // below low, breaks nothing but stays 0
        mag.set_value(5, 3, 10.0);
        let out = hysteresis_threshold(&mag, 20.0, 60.0).unwrap();
        for (x, y) in [(1, 1), (2, 2), (3, 2), (4, 3)] {
            assert_eq!(out.value(x, y), 255, "({x}, {y})");
        }
        assert_eq!(out.value(7, 0), 0);
        assert_eq!(out.value(5, 3), 0);
        assert_eq!(out.count_nonzero(), 4);
    }

    #[test]
    fn test_canny_step_edge_is_thin() {
        let img = GrayImage::from_fn(20, 12, |x, _| [if x < 10 { 0 } else { 200 }]).unwrap();
        let edges = canny(&img, &CannyOptions::default()).unwrap();
        for y in 2..10 {
            let count = (0..20).filter(|&x| edges.value(x, y) == 255).count();
            assert_eq!(count, 1, "row {y}");
        }
    }

    #[test]
    fn test_canny_flat_has_no_edges() {
        let img = ColorImage::new_with_value(10, 10, [10, 200, 30]).unwrap();
        let edges = canny_color(&img, &CannyOptions::default()).unwrap();
        assert_eq!(edges.count_nonzero(), 0);
    }
}
