//! Gradient fields
//!
//! A [`GradientField`] holds per-pixel gradient magnitude and direction.
//! Directions are in degrees within `[-90, 90]`: the angle of the gradient
//! vector folded onto the right half-plane, which is all the Canny
//! direction quantization needs.

use crate::convolve::convolve_float;
use crate::{FilterResult, Kernel};
use rasterlab_core::{ColorImage, FloatImage, GrayImage};

/// Gradient magnitude and direction maps of equal size.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    /// Gradient magnitude
    pub magnitude: FloatImage,
    /// Gradient direction in degrees, within `[-90, 90]`
    pub direction: FloatImage,
}

impl GradientField {
    /// Width of both maps
    pub fn width(&self) -> u32 {
        self.magnitude.width()
    }

    /// Height of both maps
    pub fn height(&self) -> u32 {
        self.magnitude.height()
    }
}

/// Direction of the derivative pair `(fx, fy)` in degrees.
///
/// `atan(fy / fx)` rather than `atan2(fy, fx)`: the angle is folded onto
/// `[-90, 90]`, since opposite gradients share a Canny direction bin. A
/// vertical gradient (`fx == 0`) is -90 when `fy < 0` and +90 otherwise.
pub fn gradient_direction(fx: f64, fy: f64) -> f64 {
    if fx == 0.0 {
        if fy < 0.0 { -90.0 } else { 90.0 }
    } else {
        (fy / fx).atan().to_degrees()
    }
}

fn field_from_derivatives(gx: &FloatImage, gy: &FloatImage) -> FilterResult<GradientField> {
    let (w, h) = gx.dimensions();
    let mut magnitude = FloatImage::new(w, h)?;
    let mut direction = FloatImage::new(w, h)?;
    for (i, (&fx, &fy)) in gx.data().iter().zip(gy.data()).enumerate() {
        magnitude.data_mut()[i] = fx.hypot(fy);
        direction.data_mut()[i] = gradient_direction(fx, fy);
    }
    Ok(GradientField {
        magnitude,
        direction,
    })
}

/// Sobel gradient of a grayscale image.
pub fn sobel_gradient(image: &GrayImage) -> FilterResult<GradientField> {
    let gx = convolve_float(image, &Kernel::sobel_x())?;
    let gy = convolve_float(image, &Kernel::sobel_y())?;
    field_from_derivatives(&gx, &gy)
}

/// Prewitt gradient of a grayscale image.
pub fn prewitt_gradient(image: &GrayImage) -> FilterResult<GradientField> {
    let gx = convolve_float(image, &Kernel::prewitt_x())?;
    let gy = convolve_float(image, &Kernel::prewitt_y())?;
    field_from_derivatives(&gx, &gy)
}

/// Roberts cross gradient of a grayscale image.
///
/// `fx = p(x, y) - p(x+1, y+1)` and `fy = p(x+1, y) - p(x, y+1)`, with the
/// right column and bottom row replicated.
pub fn roberts_gradient(image: &GrayImage) -> FilterResult<GradientField> {
    let (w, h) = image.dimensions();
    let mut gx = FloatImage::new(w, h)?;
    let mut gy = FloatImage::new(w, h)?;
    for y in 0..h {
        for x in 0..w {
            let (xi, yi) = (x as i64, y as i64);
            let p = |dx: i64, dy: i64| image.get_clamped(xi + dx, yi + dy, 0) as f64;
            gx.set_value(x, y, p(0, 0) - p(1, 1));
            gy.set_value(x, y, p(1, 0) - p(0, 1));
        }
    }
    field_from_derivatives(&gx, &gy)
}

/// Maximum-variance gradient of a color image.
///
/// Builds the 2x2 structure tensor from the per-channel Sobel derivatives,
///
/// ```text
/// gxx = sum_c gx_c^2, gyy = sum_c gy_c^2, gxy = sum_c gx_c * gy_c
/// ```
///
/// and reports the square root of its largest eigenvalue as magnitude and
/// the matching eigenvector angle `0.5 * atan2(2 gxy, gxx - gyy)` (degrees)
/// as direction. For a color image whose channels are equal this is
/// `sqrt(3)` times the grayscale Sobel magnitude.
pub fn max_variance_gradient(image: &ColorImage) -> FilterResult<GradientField> {
    let (w, h) = image.dimensions();
    let n = (w * h) as usize;
    let mut gxx = vec![0.0f64; n];
    let mut gyy = vec![0.0f64; n];
    let mut gxy = vec![0.0f64; n];

    for c in 0..3 {
        let channel = image.channel(c)?;
        let gx = convolve_float(&channel, &Kernel::sobel_x())?;
        let gy = convolve_float(&channel, &Kernel::sobel_y())?;
        for i in 0..n {
            let (fx, fy) = (gx.data()[i], gy.data()[i]);
            gxx[i] += fx * fx;
            gyy[i] += fy * fy;
            gxy[i] += fx * fy;
        }
    }

    let mut magnitude = FloatImage::new(w, h)?;
    let mut direction = FloatImage::new(w, h)?;
    for i in 0..n {
        let diff = gxx[i] - gyy[i];
        let lambda = 0.5 * (gxx[i] + gyy[i] + (diff * diff + 4.0 * gxy[i] * gxy[i]).sqrt());
        magnitude.data_mut()[i] = lambda.max(0.0).sqrt();
        direction.data_mut()[i] = 0.5 * (2.0 * gxy[i]).atan2(diff).to_degrees();
    }
    Ok(GradientField {
        magnitude,
        direction,
    })
}
