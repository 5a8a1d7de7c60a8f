//! Nonlinear warps: twirl and ripple
//!
//! Both keep the input size and resample by inverse mapping with
//! nearest-pixel fallback near the borders.
//!
//! # Twirl
//!
//! Inside `r_max` of the center, the source angle is the destination
//! angle plus `alpha * (r_max - r) / r_max`, so the turn is strongest at
//! the center and fades to zero at the rim. Pixels further out are copied
//! unchanged.
//!
//! # Ripple
//!
//! ```text
//! sx = x + a_x * sin(2 pi y / tau_x)
//! sy = y + a_y * sin(2 pi x / tau_y)
//! ```

use std::f64::consts::TAU;

use crate::interp::{Fallback, resample};
use crate::{TransformError, TransformResult};
use rasterlab_core::Raster;

/// Parameters for [`twirl`]
#[derive(Debug, Clone, PartialEq)]
pub struct TwirlOptions {
    /// Rotation at the center, in degrees
    pub angle_degrees: f64,
    /// Radius of the affected disk (None = half the shorter side)
    pub max_radius: Option<f64>,
}

impl Default for TwirlOptions {
    fn default() -> Self {
        Self {
            angle_degrees: 45.0,
            max_radius: None,
        }
    }
}

impl TwirlOptions {
    /// Set the rotation at the center.
    pub fn with_angle(mut self, angle_degrees: f64) -> Self {
        self.angle_degrees = angle_degrees;
        self
    }

    /// Set the radius of the affected disk.
    pub fn with_max_radius(mut self, radius: f64) -> Self {
        self.max_radius = Some(radius);
        self
    }
}

/// Parameters for [`ripple`]
#[derive(Debug, Clone, PartialEq)]
pub struct RippleOptions {
    /// Wavelength of the horizontal displacement, along y
    pub period_x: f64,
    /// Horizontal displacement amplitude
    pub amplitude_x: f64,
    /// Wavelength of the vertical displacement, along x
    pub period_y: f64,
    /// Vertical displacement amplitude
    pub amplitude_y: f64,
}

impl Default for RippleOptions {
    fn default() -> Self {
        Self {
            period_x: 120.0,
            amplitude_x: 10.0,
            period_y: 250.0,
            amplitude_y: 15.0,
        }
    }
}

impl RippleOptions {
    /// Set the horizontal displacement wave.
    pub fn with_x(mut self, period: f64, amplitude: f64) -> Self {
        self.period_x = period;
        self.amplitude_x = amplitude;
        self
    }

    /// Set the vertical displacement wave.
    pub fn with_y(mut self, period: f64, amplitude: f64) -> Self {
        self.period_y = period;
        self.amplitude_y = amplitude;
        self
    }
}

/// Twirl an image about its center
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for a non-finite angle or
/// a radius that is not positive.
pub fn twirl<const C: usize>(
    image: &Raster<u8, C>,
    options: &TwirlOptions,
) -> TransformResult<Raster<u8, C>> {
    let (w, h) = image.dimensions();
    let r_max = options
        .max_radius
        .unwrap_or(w.min(h) as f64 / 2.0);
    if !(r_max.is_finite() && r_max > 0.0) {
        return Err(TransformError::InvalidParameters(format!(
            "twirl radius must be positive, got {r_max}"
        )));
    }
    if !options.angle_degrees.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "twirl angle must be finite, got {}",
            options.angle_degrees
        )));
    }
    let alpha = options.angle_degrees.to_radians();
    let cx = (w as f64 - 1.0) / 2.0;
    let cy = (h as f64 - 1.0) / 2.0;

    resample(image, w, h, Fallback::NearestOrBlack, |x, y| {
        let (dx, dy) = (x - cx, y - cy);
        let r = dx.hypot(dy);
        if r > r_max {
            return Some((x, y));
        }
        let beta = dy.atan2(dx) + alpha * (r_max - r) / r_max;
        Some((cx + r * beta.cos(), cy + r * beta.sin()))
    })
}

/// Displace an image by two orthogonal sine waves
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] unless both periods are
/// positive and both amplitudes finite.
pub fn ripple<const C: usize>(
    image: &Raster<u8, C>,
    options: &RippleOptions,
) -> TransformResult<Raster<u8, C>> {
    for (name, period) in [("period_x", options.period_x), ("period_y", options.period_y)] {
        if !(period.is_finite() && period > 0.0) {
            return Err(TransformError::InvalidParameters(format!(
                "{name} must be positive, got {period}"
            )));
        }
    }
    if !(options.amplitude_x.is_finite() && options.amplitude_y.is_finite()) {
        return Err(TransformError::InvalidParameters(
            "ripple amplitudes must be finite".to_string(),
        ));
    }
    let RippleOptions {
        period_x,
        amplitude_x,
        period_y,
        amplitude_y,
    } = *options;
    let (w, h) = image.dimensions();

    resample(image, w, h, Fallback::NearestOrBlack, |x, y| {
        Some((
            x + amplitude_x * (TAU * y / period_x).sin(),
            y + amplitude_y * (TAU * x / period_y).sin(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterlab_core::GrayImage;

    fn ramp() -> GrayImage {
        GrayImage::from_fn(21, 21, |x, y| [(x * 10 + y) as u8]).unwrap()
    }

    #[test]
    fn test_twirl_zero_angle_is_identity() {
        let out = twirl(&ramp(), &TwirlOptions::default().with_angle(0.0)).unwrap();
        let diff = out
            .data()
            .iter()
            .zip(ramp().data())
            .map(|(&a, &b)| (a as i32 - b as i32).abs())
            .max()
            .unwrap();
        assert!(diff <= 1, "max diff {diff}");
    }

    #[test]
    fn test_twirl_keeps_center_and_outside() {
        let img = ramp();
        let out = twirl(&img, &TwirlOptions::default().with_angle(90.0).with_max_radius(5.0)).unwrap();
        assert_eq!(out.value(10, 10), img.value(10, 10));
        assert_eq!(out.value(0, 0), img.value(0, 0));
        assert_eq!(out.value(20, 3), img.value(20, 3));
        // inside the disk the content has turned
        assert_ne!(out.value(12, 10), img.value(12, 10));
    }

    #[test]
    fn test_twirl_invalid() {
        assert!(twirl(&ramp(), &TwirlOptions::default().with_max_radius(0.0)).is_err());
        assert!(twirl(&ramp(), &TwirlOptions::default().with_angle(f64::NAN)).is_err());
    }

    #[test]
    fn test_ripple_zero_amplitude_is_identity() {
        let opts = RippleOptions::default().with_x(30.0, 0.0).with_y(30.0, 0.0);
        assert_eq!(ripple(&ramp(), &opts).unwrap(), ramp());
    }

    #[test]
    fn test_ripple_shifts_rows() {
        // a quarter period down, rows are displaced by the full amplitude
        let opts = RippleOptions::default().with_x(20.0, 2.0).with_y(20.0, 0.0);
        let img = ramp();
        let out = ripple(&img, &opts).unwrap();
        assert_eq!(out.value(5, 5), img.value(7, 5));
        assert_eq!(out.value(5, 0), img.value(5, 0));
    }

    #[test]
    fn test_ripple_invalid_period() {
        let opts = RippleOptions::default().with_x(0.0, 1.0);
        assert!(ripple(&ramp(), &opts).is_err());
    }
}
