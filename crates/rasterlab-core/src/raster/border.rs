//! Border operations for rasters
//!
//! Sliding-window filters pad their input with replicated edge pixels so
//! the window never leaves the buffer, then crop the interior back out:
//!
//! - [`Raster::border_replicate`] adds `thickness` pixels on every side
//! - [`Raster::crop`] extracts a half-open rectangle
//!
//! `crop(border_replicate(r, t), t, t, w + t, h + t)` is the identity.

use super::{Raster, Sample};
use crate::error::{Error, Result};

impl<T: Sample, const C: usize> Raster<T, C> {
    /// Pad the raster on all sides, replicating edge pixels outward.
    ///
    /// # Arguments
    ///
    /// * `thickness` - Border width in pixels (0 returns a copy)
    ///
    /// # Returns
    ///
    /// New raster with dimensions `(width + 2*thickness, height + 2*thickness)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the padded size overflows.
    pub fn border_replicate(&self, thickness: u32) -> Result<Self> {
        if thickness == 0 {
            return Ok(self.clone());
        }
        let pad = thickness
            .checked_mul(2)
            .ok_or(Error::InvalidDimension {
                width: self.width,
                height: self.height,
            })?;
        let nw = self.width.checked_add(pad).ok_or(Error::InvalidDimension {
            width: self.width,
            height: self.height,
        })?;
        let nh = self.height.checked_add(pad).ok_or(Error::InvalidDimension {
            width: self.width,
            height: self.height,
        })?;

        let t = thickness as i64;
        let mut data = Vec::with_capacity(nw as usize * nh as usize * C);
        for y in 0..nh as i64 {
            let sy = (y - t).clamp(0, self.height as i64 - 1) as u32;
            let src_row = self.row(sy);
            for x in 0..nw as i64 {
                let sx = (x - t).clamp(0, self.width as i64 - 1) as usize;
                data.extend_from_slice(&src_row[sx * C..sx * C + C]);
            }
        }
        Raster::from_data(nw, nh, data)
    }

    /// Extract the half-open rectangle `[x0, x1) x [y0, y1)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless `x0 < x1 <= width` and
    /// `y0 < y1 <= height`.
    pub fn crop(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Result<Self> {
        if x0 >= x1 || y0 >= y1 || x1 > self.width || y1 > self.height {
            return Err(Error::InvalidParameter(format!(
                "crop rectangle ({x0}, {y0})-({x1}, {y1}) not inside {}x{}",
                self.width, self.height
            )));
        }
        let (a, b) = (x0 as usize * C, x1 as usize * C);
        let mut data = Vec::with_capacity((x1 - x0) as usize * (y1 - y0) as usize * C);
        for y in y0..y1 {
            data.extend_from_slice(&self.row(y)[a..b]);
        }
        Raster::from_data(x1 - x0, y1 - y0, data)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ColorImage, GrayImage};

    #[test]
    fn test_border_replicate_dimensions() {
        let r = GrayImage::new(5, 4).unwrap();
        let p = r.border_replicate(3).unwrap();
        assert_eq!(p.dimensions(), (11, 10));
    }

    #[test]
    fn test_border_replicate_corners_and_edges() {
        let r = GrayImage::from_fn(3, 3, |x, y| [(y * 3 + x) as u8]).unwrap();
        let p = r.border_replicate(2).unwrap();
        assert_eq!(p.value(0, 0), 0);
        assert_eq!(p.value(6, 0), 2);
        assert_eq!(p.value(0, 6), 6);
        assert_eq!(p.value(6, 6), 8);
        assert_eq!(p.value(3, 0), 1);
        assert_eq!(p.value(0, 3), 3);
    }

    #[test]
    fn test_replicate_then_crop_is_identity() {
        let r = ColorImage::from_fn(7, 5, |x, y| [x as u8, y as u8, (x * y) as u8]).unwrap();
        for t in 0..4 {
            let p = r.border_replicate(t).unwrap();
            let back = p.crop(t, t, 7 + t, 5 + t).unwrap();
            assert_eq!(back, r, "thickness {t}");
        }
    }

    #[test]
    fn test_crop_invalid_rectangle() {
        let r = GrayImage::new(4, 4).unwrap();
        assert!(r.crop(2, 0, 2, 4).is_err());
        assert!(r.crop(0, 0, 5, 4).is_err());
        assert!(r.crop(0, 3, 4, 1).is_err());
    }
}
