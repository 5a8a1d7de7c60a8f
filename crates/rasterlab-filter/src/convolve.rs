//! Convolution operations
//!
//! Implements image convolution with arbitrary square kernels. The input is
//! padded by replicating edge pixels, so every window read stays inside the
//! padded buffer, and the result has the size of the input.

use crate::maybe_rayon::*;
use crate::{FilterResult, Kernel};
use rasterlab_core::{FloatImage, GrayImage, Raster, Sample};

/// Evaluate `row(y)` for every output row and stitch the rows into a raster.
///
/// Rows are independent, so with the `parallel` feature they are computed
/// on the rayon pool.
pub(crate) fn collect_rows<T, const C: usize, F>(width: u32, height: u32, row: F) -> FilterResult<Raster<T, C>>
where
    T: Sample,
    F: Fn(u32) -> Vec<T> + Send + Sync,
{
    let data: Vec<T> = (0..height).into_par_iter().flat_map(row).collect();
    Ok(Raster::from_data(width, height, data)?)
}

/// Run a grayscale filter over every channel of a byte raster.
pub(crate) fn per_channel<const C: usize, F>(image: &Raster<u8, C>, filter: F) -> FilterResult<Raster<u8, C>>
where
    F: Fn(&GrayImage) -> FilterResult<GrayImage>,
{
    if C == 1 {
        // single channel: the raster is already laid out as a GrayImage
        let gray = GrayImage::from_data(image.width(), image.height(), image.data().to_vec())?;
        let out = filter(&gray)?;
        return Ok(Raster::from_data(image.width(), image.height(), out.into_data())?);
    }
    let mut out = Raster::<u8, C>::new(image.width(), image.height())?;
    for c in 0..C {
        let filtered = filter(&image.channel(c)?)?;
        for (dst, &src) in out.data_mut().iter_mut().skip(c).step_by(C).zip(filtered.data()) {
            *dst = src;
        }
    }
    Ok(out)
}

/// Convolve a byte raster with a kernel, adding `bias` to every sum.
///
/// Uses replicate border handling: pixels outside the image boundary are
/// treated as having the same value as the nearest edge pixel. Results are
/// rounded and clamped to [0, 255]. Each channel is convolved separately.
pub fn convolve<const C: usize>(image: &Raster<u8, C>, kernel: &Kernel, bias: f64) -> FilterResult<Raster<u8, C>> {
    let (w, h) = image.dimensions();
    let size = kernel.size();
    let padded = image.border_replicate(kernel.half())?;

    collect_rows(w, h, |y| {
        let mut row = Vec::with_capacity(w as usize * C);
        for x in 0..w {
            for c in 0..C {
                let mut sum = bias;
                for ky in 0..size {
                    for kx in 0..size {
                        let k = kernel.data()[(ky * size + kx) as usize];
                        sum += k * padded.get_unchecked(x + kx, y + ky, c) as f64;
                    }
                }
                row.push(sum.round().clamp(0.0, 255.0) as u8);
            }
        }
        row
    })
}

/// Convolve a grayscale raster with a kernel without rounding.
///
/// Used by the gradient operators, which need signed responses.
pub fn convolve_float(image: &GrayImage, kernel: &Kernel) -> FilterResult<FloatImage> {
    let (w, h) = image.dimensions();
    let size = kernel.size();
    let padded = image.border_replicate(kernel.half())?;

    collect_rows(w, h, |y| {
        (0..w)
            .map(|x| {
                let mut sum = 0.0;
                for ky in 0..size {
                    for kx in 0..size {
                        let k = kernel.data()[(ky * size + kx) as usize];
                        sum += k * padded.value(x + kx, y + ky) as f64;
                    }
                }
                sum
            })
            .collect()
    })
}

/// Gaussian smoothing.
///
/// Full 2D convolution with [`Kernel::gaussian`]; the mask side is
/// `ceil(4 * variance)` made odd.
///
/// # Arguments
///
/// * `image` - Grayscale or color raster
/// * `variance` - Spread of the Gaussian (must be > 0)
///
/// # Errors
///
/// Returns [`crate::FilterError::InvalidParameters`] for a non-positive
/// variance.
pub fn gaussian_filter<const C: usize>(image: &Raster<u8, C>, variance: f64) -> FilterResult<Raster<u8, C>> {
    let kernel = Kernel::gaussian(variance)?;
    log::trace!("gaussian_filter: variance {variance}, mask {}", kernel.size());
    convolve(image, &kernel, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterlab_core::ColorImage;

    #[test]
    fn test_identity_kernel() {
        let img = GrayImage::from_fn(7, 5, |x, y| [(x * 30 + y) as u8]).unwrap();
        let k = Kernel::from_slice(3, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(convolve(&img, &k, 0.0).unwrap(), img);
    }

    #[test]
    fn test_box_kernel_on_uniform() {
        let img = ColorImage::new_with_value(6, 6, [10, 100, 250]).unwrap();
        let k = Kernel::box_kernel(5).unwrap();
        assert_eq!(convolve(&img, &k, 0.0).unwrap(), img);
    }

    #[test]
    fn test_bias_and_clamp() {
        let img = GrayImage::new_with_value(3, 3, [200]).unwrap();
        let k = Kernel::box_kernel(3).unwrap();
        let out = convolve(&img, &k, 100.0).unwrap();
        assert!(out.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_convolve_float_signed() {
        let img = GrayImage::from_fn(5, 3, |x, _| [if x < 2 { 200 } else { 0 }]).unwrap();
        let gx = convolve_float(&img, &Kernel::sobel_x()).unwrap();
        assert!(gx.value(2, 1) < 0.0);
        assert_eq!(gx.value(4, 1), 0.0);
    }

    #[test]
    fn test_gaussian_preserves_uniform() {
        let img = GrayImage::new_with_value(9, 9, [77]).unwrap();
        assert_eq!(gaussian_filter(&img, 1.5).unwrap(), img);
        assert!(gaussian_filter(&img, -1.0).is_err());
    }

    #[test]
    fn test_per_channel_matches_channel_filter() {
        let img = ColorImage::from_fn(4, 4, |x, y| [x as u8, y as u8, 9]).unwrap();
        let out = per_channel(&img, |g| Ok(g.map(|v| v + 1))).unwrap();
        assert_eq!(out.pixel(3, 2), [4, 3, 10]);
    }
}
