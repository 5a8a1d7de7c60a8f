//! Hough transforms for lines and fixed-radius circles
//!
//! Both transforms take a binary image and let every foreground pixel vote
//! in an accumulator. The accumulator is kept as a value so callers can
//! render it ([`HoughLines::to_image`]) or read the strongest cell
//! ([`HoughLines::peak`]); no multi-peak extraction is done.
//!
//! # Lines
//!
//! A line is `rho = x cos(theta) + y sin(theta)` with integer `theta` in
//! degrees. Each foreground pixel votes once per `theta` for the rounded
//! `rho`.
//!
//! - Three quadrants: `theta` in `[-90, 180]`, only `rho >= 0` is kept.
//! - Two quadrants: `theta` in `[-90, 90]`, `rho` in `[-D, D]` stored with
//!   an offset of `D`.
//!
//! `D` is the image diagonal rounded up. Accumulator columns are `theta`,
//! rows are `rho`.
//!
//! # Circles
//!
//! For a known radius `r`, each foreground pixel `(x, y)` votes for every
//! candidate center column `a` with `|x - a| <= r` at row
//! `b = round(y - sqrt(r^2 - (x - a)^2))` when `b` lies inside the image.

use crate::error::{RegionError, RegionResult, check_binary};
use rasterlab_core::{GrayImage, Raster};

/// Vote counts
pub type Accumulator = Raster<u32, 1>;

/// Angular range of the line accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoughQuadrants {
    /// `theta` in `[-90, 90]`, signed `rho`
    TwoQuadrant,
    /// `theta` in `[-90, 180]`, non-negative `rho`
    #[default]
    ThreeQuadrant,
}

impl HoughQuadrants {
    fn theta_max(self) -> i32 {
        match self {
            HoughQuadrants::TwoQuadrant => 90,
            HoughQuadrants::ThreeQuadrant => 180,
        }
    }
}

/// Parameters for [`hough_lines`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoughLineOptions {
    /// Angular range and sign convention
    pub quadrants: HoughQuadrants,
}

impl HoughLineOptions {
    /// Set the angular range.
    pub fn with_quadrants(mut self, quadrants: HoughQuadrants) -> Self {
        self.quadrants = quadrants;
        self
    }
}

/// Strongest cell of an accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePeak {
    /// Angle in degrees
    pub theta: i32,
    /// Signed distance from the origin
    pub rho: i64,
    /// Number of votes
    pub votes: u32,
}

/// Line accumulator with its axis metadata
#[derive(Debug, Clone, PartialEq)]
pub struct HoughLines {
    accumulator: Accumulator,
    quadrants: HoughQuadrants,
    rho_offset: i64,
}

const THETA_MIN: i32 = -90;

/// Accumulate line votes over a binary image
///
/// # Errors
///
/// Returns [`RegionError::NotBinary`] for non-binary input.
pub fn hough_lines(image: &GrayImage, options: &HoughLineOptions) -> RegionResult<HoughLines> {
    check_binary(image)?;
    let (w, h) = image.dimensions();
    let diagonal = (w as f64).hypot(h as f64).ceil() as i64;
    let quadrants = options.quadrants;

    let thetas: Vec<(f64, f64)> = (THETA_MIN..=quadrants.theta_max())
        .map(|t| {
            let rad = (t as f64).to_radians();
            (rad.cos(), rad.sin())
        })
        .collect();
    let (rho_offset, rho_rows) = match quadrants {
        HoughQuadrants::TwoQuadrant => (diagonal, 2 * diagonal + 1),
        HoughQuadrants::ThreeQuadrant => (0, diagonal + 1),
    };
    let mut accumulator = Accumulator::new(thetas.len() as u32, rho_rows as u32)?;

    for y in 0..h {
        for x in 0..w {
            if image.value(x, y) == 0 {
                continue;
            }
            for (col, &(cos, sin)) in thetas.iter().enumerate() {
                let rho = (x as f64 * cos + y as f64 * sin).round() as i64;
                let row = rho + rho_offset;
                if row < 0 || row >= rho_rows {
                    continue;
                }
                let votes = accumulator.value(col as u32, row as u32);
                accumulator.set_value(col as u32, row as u32, votes + 1);
            }
        }
    }

    let lines = HoughLines {
        accumulator,
        quadrants,
        rho_offset,
    };
    log::debug!(
        "hough_lines: {}x{} accumulator, max {} votes",
        lines.accumulator.width(),
        lines.accumulator.height(),
        lines.peak().map_or(0, |p| p.votes)
    );
    Ok(lines)
}

impl HoughLines {
    /// Raw votes; column `i` is `theta = -90 + i`, row `j` is
    /// `rho = j - rho_offset`.
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Angular range used
    pub fn quadrants(&self) -> HoughQuadrants {
        self.quadrants
    }

    /// Offset added to `rho` to get a row index
    pub fn rho_offset(&self) -> i64 {
        self.rho_offset
    }

    /// Votes for `(theta, rho)`, `None` outside the accumulator.
    pub fn votes(&self, theta: i32, rho: i64) -> Option<u32> {
        let col = theta - THETA_MIN;
        let row = rho + self.rho_offset;
        if col < 0 || row < 0 || row > u32::MAX as i64 {
            return None;
        }
        self.accumulator.get(col as u32, row as u32, 0)
    }

    /// Cell with the most votes, first in row-major order on ties. `None`
    /// when nothing voted.
    pub fn peak(&self) -> Option<LinePeak> {
        let (col, row, votes) = peak_cell(&self.accumulator)?;
        Some(LinePeak {
            theta: THETA_MIN + col as i32,
            rho: row as i64 - self.rho_offset,
            votes,
        })
    }

    /// Accumulator rendered as gray levels scaled so the maximum is 255.
    pub fn to_image(&self) -> GrayImage {
        normalize(&self.accumulator)
    }
}

/// Circle-center accumulator for one radius
#[derive(Debug, Clone, PartialEq)]
pub struct HoughCircles {
    accumulator: Accumulator,
    radius: u32,
}

/// Strongest circle center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CirclePeak {
    /// Center column
    pub x: u32,
    /// Center row
    pub y: u32,
    /// Number of votes
    pub votes: u32,
}

/// Accumulate circle-center votes for a fixed radius
///
/// The accumulator has the size of the image.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] for a zero radius and
/// [`RegionError::NotBinary`] for non-binary input.
pub fn hough_circles(image: &GrayImage, radius: u32) -> RegionResult<HoughCircles> {
    if radius == 0 {
        return Err(RegionError::InvalidParameters(
            "radius must be positive".to_string(),
        ));
    }
    check_binary(image)?;
    let (w, h) = image.dimensions();
    let r = radius as i64;
    let r2 = (r * r) as f64;
    let mut accumulator = Accumulator::new(w, h)?;

    for y in 0..h {
        for x in 0..w {
            if image.value(x, y) == 0 {
                continue;
            }
            let a_min = (x as i64 - r).max(0);
            let a_max = (x as i64 + r).min(w as i64 - 1);
            for a in a_min..=a_max {
                let dx = (x as i64 - a) as f64;
                let b = (y as f64 - (r2 - dx * dx).sqrt()).round() as i64;
                if b < 0 || b >= h as i64 {
                    continue;
                }
                let votes = accumulator.value(a as u32, b as u32);
                accumulator.set_value(a as u32, b as u32, votes + 1);
            }
        }
    }

    let circles = HoughCircles {
        accumulator,
        radius,
    };
    log::debug!(
        "hough_circles: radius {radius}, max {} votes",
        circles.peak().map_or(0, |p| p.votes)
    );
    Ok(circles)
}

impl HoughCircles {
    /// Raw votes indexed by candidate center
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Radius searched for
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Center with the most votes, first in row-major order on ties.
    pub fn peak(&self) -> Option<CirclePeak> {
        let (x, y, votes) = peak_cell(&self.accumulator)?;
        Some(CirclePeak { x, y, votes })
    }

    /// Accumulator rendered as gray levels scaled so the maximum is 255.
    pub fn to_image(&self) -> GrayImage {
        normalize(&self.accumulator)
    }
}

fn peak_cell(acc: &Accumulator) -> Option<(u32, u32, u32)> {
    let w = acc.width() as usize;
    let (i, &votes) = acc
        .data()
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|&(_, &v)| v)?;
    (votes > 0).then(|| ((i % w) as u32, (i / w) as u32, votes))
}

fn normalize(acc: &Accumulator) -> GrayImage {
    let (_, max) = acc.min_max();
    if max == 0 {
        return acc.map(|_| 0u8);
    }
    let scale = 255.0 / max as f64;
    acc.map(|v| (v as f64 * scale).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal_line() -> GrayImage {
        GrayImage::from_fn(50, 40, |x, y| [if y == 20 && (5..=45).contains(&x) { 255 } else { 0 }])
            .unwrap()
    }

    #[test]
    fn test_three_quadrant_horizontal() {
        let lines = hough_lines(&horizontal_line(), &HoughLineOptions::default()).unwrap();
        assert_eq!(lines.accumulator().width(), 271);
        assert_eq!(lines.accumulator().height(), 66);
        let peak = lines.peak().unwrap();
        assert_eq!((peak.theta, peak.rho, peak.votes), (90, 20, 41));
        // the mirrored (-90, -20) cell does not exist here
        assert_eq!(lines.votes(-90, -20), None);
    }

    #[test]
    fn test_two_quadrant_vertical() {
        let img = GrayImage::from_fn(50, 40, |x, y| [if x == 30 && (5..=35).contains(&y) { 255 } else { 0 }])
            .unwrap();
        let opts = HoughLineOptions::default().with_quadrants(HoughQuadrants::TwoQuadrant);
        let lines = hough_lines(&img, &opts).unwrap();
        assert_eq!(lines.accumulator().width(), 181);
        assert_eq!(lines.accumulator().height(), 131);
        assert_eq!(lines.rho_offset(), 65);
        let peak = lines.peak().unwrap();
        assert_eq!((peak.theta, peak.rho, peak.votes), (0, 30, 31));
    }

    #[test]
    fn test_two_quadrant_negative_rho() {
        let opts = HoughLineOptions::default().with_quadrants(HoughQuadrants::TwoQuadrant);
        let lines = hough_lines(&horizontal_line(), &opts).unwrap();
        assert_eq!(lines.votes(-90, -20), Some(41));
        assert_eq!(lines.votes(90, 20), Some(41));
    }

    #[test]
    fn test_empty_and_image() {
        let empty = GrayImage::new(10, 10).unwrap();
        let lines = hough_lines(&empty, &HoughLineOptions::default()).unwrap();
        assert!(lines.peak().is_none());
        assert!(lines.to_image().data().iter().all(|&v| v == 0));

        let lines = hough_lines(&horizontal_line(), &HoughLineOptions::default()).unwrap();
        let img = lines.to_image();
        assert_eq!(img.value(180, 20), 255);
    }

    #[test]
    fn test_circle_center() {
        let mut img = GrayImage::new(30, 30).unwrap();
        for (x, y) in [(15, 20), (20, 15), (10, 15), (12, 19), (18, 19)] {
            img.set_value(x, y, 255);
        }
        let circles = hough_circles(&img, 5).unwrap();
        let peak = circles.peak().unwrap();
        assert_eq!((peak.x, peak.y), (15, 15));
        assert_eq!(circles.to_image().value(15, 15), 255);
    }

    #[test]
    fn test_invalid_inputs() {
        let img = GrayImage::new(5, 5).unwrap();
        assert!(hough_circles(&img, 0).is_err());
        let gray = GrayImage::new_with_value(5, 5, [3]).unwrap();
        assert!(hough_lines(&gray, &HoughLineOptions::default()).is_err());
    }
}
