//! Single-parameter operations
//!
//! A workbench drives most operations through one numeric knob: a mask
//! size, a variance, a threshold, an angle. [`ParamOp`] closes over the
//! four raster signatures such an operation can have, so a caller can hold
//! any of them in one value, apply it to an [`Image`] and sweep the knob
//! across a range.
//!
//! The [`builtin`] module adapts library functions to these signatures.

use rasterlab_core::{ColorImage, GrayImage};

use crate::error::{Error, ImageKind, Result};

/// Grayscale in, grayscale out
pub type GrayToGray = fn(&GrayImage, f64) -> Result<GrayImage>;
/// Grayscale in, color out
pub type GrayToColor = fn(&GrayImage, f64) -> Result<ColorImage>;
/// Color in, grayscale out
pub type ColorToGray = fn(&ColorImage, f64) -> Result<GrayImage>;
/// Color in, color out
pub type ColorToColor = fn(&ColorImage, f64) -> Result<ColorImage>;

/// A raster of either kind
#[derive(Debug, Clone, PartialEq)]
pub enum Image {
    /// Single-channel image
    Gray(GrayImage),
    /// BGR image
    Color(ColorImage),
}

impl Image {
    /// Which kind of raster this is
    pub fn kind(&self) -> ImageKind {
        match self {
            Image::Gray(_) => ImageKind::Gray,
            Image::Color(_) => ImageKind::Color,
        }
    }

    /// Width and height
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Image::Gray(g) => g.dimensions(),
            Image::Color(c) => c.dimensions(),
        }
    }

    /// The grayscale raster, if this is one
    pub fn as_gray(&self) -> Option<&GrayImage> {
        match self {
            Image::Gray(g) => Some(g),
            Image::Color(_) => None,
        }
    }

    /// The color raster, if this is one
    pub fn as_color(&self) -> Option<&ColorImage> {
        match self {
            Image::Color(c) => Some(c),
            Image::Gray(_) => None,
        }
    }
}

impl From<GrayImage> for Image {
    fn from(g: GrayImage) -> Self {
        Image::Gray(g)
    }
}

impl From<ColorImage> for Image {
    fn from(c: ColorImage) -> Self {
        Image::Color(c)
    }
}

/// An operation taking one raster and one numeric parameter
#[derive(Debug, Clone, Copy)]
pub enum ParamOp {
    /// e.g. smoothing, edges, morphology
    GrayToGray(GrayToGray),
    /// e.g. component coloring
    GrayToColor(GrayToColor),
    /// e.g. color edges, color-distance thresholds
    ColorToGray(ColorToGray),
    /// e.g. color smoothing, geometric transforms
    ColorToColor(ColorToColor),
}

impl ParamOp {
    /// Kind of image the operation accepts
    pub fn input_kind(&self) -> ImageKind {
        match self {
            ParamOp::GrayToGray(_) | ParamOp::GrayToColor(_) => ImageKind::Gray,
            ParamOp::ColorToGray(_) | ParamOp::ColorToColor(_) => ImageKind::Color,
        }
    }

    /// Kind of image the operation produces
    pub fn output_kind(&self) -> ImageKind {
        match self {
            ParamOp::GrayToGray(_) | ParamOp::ColorToGray(_) => ImageKind::Gray,
            ParamOp::GrayToColor(_) | ParamOp::ColorToColor(_) => ImageKind::Color,
        }
    }

    /// Run the operation once
    ///
    /// # Errors
    ///
    /// Returns [`Error::KindMismatch`] when `image` is not of
    /// [`ParamOp::input_kind`], otherwise whatever the operation reports.
    pub fn apply(&self, image: &Image, param: f64) -> Result<Image> {
        match (self, image) {
            (ParamOp::GrayToGray(f), Image::Gray(g)) => f(g, param).map(Image::Gray),
            (ParamOp::GrayToColor(f), Image::Gray(g)) => f(g, param).map(Image::Color),
            (ParamOp::ColorToGray(f), Image::Color(c)) => f(c, param).map(Image::Gray),
            (ParamOp::ColorToColor(f), Image::Color(c)) => f(c, param).map(Image::Color),
            _ => Err(Error::KindMismatch {
                expected: self.input_kind(),
                actual: image.kind(),
            }),
        }
    }

    /// Run the operation for every parameter value, in order
    ///
    /// Stops at the first failing value.
    pub fn sweep(
        &self,
        image: &Image,
        params: impl IntoIterator<Item = f64>,
    ) -> Result<Vec<(f64, Image)>> {
        params
            .into_iter()
            .map(|p| {
                log::trace!("sweep: parameter {p}");
                self.apply(image, p).map(|out| (p, out))
            })
            .collect()
    }
}

/// Library functions adapted to [`ParamOp`] signatures
pub mod builtin {
    use super::*;
    use rasterlab_color as color;
    use rasterlab_filter as filter;
    use rasterlab_morph as morph;
    use rasterlab_region as region;
    use rasterlab_transform as transform;

    /// Interpret a parameter as a mask size: a non-negative integer.
    pub fn mask_size(param: f64) -> Result<u32> {
        if !param.is_finite() || param < 0.0 || param.fract() != 0.0 || param > u32::MAX as f64
        {
            return Err(Error::InvalidParameter(format!(
                "mask size must be a non-negative integer, got {param}"
            )));
        }
        Ok(param as u32)
    }

    /// Interpret a parameter as an intensity level in `[0, 255]`.
    pub fn level(param: f64) -> Result<u8> {
        if !(0.0..=255.0).contains(&param) {
            return Err(Error::InvalidParameter(format!(
                "level must be in [0, 255], got {param}"
            )));
        }
        Ok(param.round() as u8)
    }

    /// Mean filter; the parameter is the mask size.
    pub fn mean(image: &GrayImage, size: f64) -> Result<GrayImage> {
        Ok(filter::mean_filter(image, mask_size(size)?)?)
    }

    /// Median filter; the parameter is the mask size.
    pub fn median(image: &GrayImage, size: f64) -> Result<GrayImage> {
        Ok(filter::fast_median_filter(image, mask_size(size)?)?)
    }

    /// Gaussian smoothing; the parameter is the variance.
    pub fn gaussian(image: &GrayImage, variance: f64) -> Result<GrayImage> {
        Ok(filter::gaussian_filter(image, variance)?)
    }

    /// Sobel edges above a magnitude threshold.
    pub fn sobel(image: &GrayImage, threshold: f64) -> Result<GrayImage> {
        Ok(filter::sobel_edges(image, threshold)?)
    }

    /// Global threshold at a level.
    pub fn threshold(image: &GrayImage, t: f64) -> Result<GrayImage> {
        Ok(color::threshold_to_binary(image, level(t)?))
    }

    /// Grayscale dilation; the parameter is the mask size.
    pub fn dilate(image: &GrayImage, size: f64) -> Result<GrayImage> {
        Ok(morph::dilate_gray(image, mask_size(size)?)?)
    }

    /// Morphological gradient; the parameter is the mask size.
    pub fn morph_gradient(image: &GrayImage, size: f64) -> Result<GrayImage> {
        Ok(morph::gradient_gray(image, mask_size(size)?)?)
    }

    /// Rotation about the center by an angle in degrees.
    pub fn rotate_gray(image: &GrayImage, degrees: f64) -> Result<GrayImage> {
        Ok(transform::rotate(image, degrees)?)
    }

    /// Threshold at a level, then color the 8-connected components.
    pub fn components(image: &GrayImage, t: f64) -> Result<ColorImage> {
        let binary = color::threshold_to_binary(image, level(t)?);
        Ok(region::color_components(&binary)?)
    }

    /// Color Sobel edges above a magnitude threshold.
    pub fn color_sobel(image: &ColorImage, threshold: f64) -> Result<GrayImage> {
        Ok(filter::color_sobel_edges(image, threshold)?)
    }

    /// Pixels within a distance of pure red in BGR space.
    pub fn near_red(image: &ColorImage, distance: f64) -> Result<GrayImage> {
        Ok(color::color_threshold_3d(image, [0, 0, 255], distance)?)
    }

    /// Vector median filter; the parameter is the mask size.
    pub fn vector_median(image: &ColorImage, size: f64) -> Result<ColorImage> {
        Ok(filter::vector_median_filter(image, mask_size(size)?)?)
    }

    /// Rotation about the center by an angle in degrees.
    pub fn rotate_color(image: &ColorImage, degrees: f64) -> Result<ColorImage> {
        Ok(transform::rotate(image, degrees)?)
    }

    /// Uniform scaling by a factor.
    pub fn scale_color(image: &ColorImage, factor: f64) -> Result<ColorImage> {
        Ok(transform::scale(image, factor, factor)?)
    }
}
