//! Projective (perspective) rectification
//!
//! Four source corners, given in the order top-left, top-right,
//! bottom-right, bottom-left, are mapped onto an axis-aligned output
//! rectangle. The output is `W x H` with `W` the longer of the top and
//! bottom edges and `H` the longer of the left and right edges, both
//! rounded. Corners are in pixel-edge coordinates: the rectangle
//! `(0, 0), (w, 0), (w, h), (0, h)` reproduces a `w x h` image.
//!
//! The homography comes from the "basis to points" construction: for
//! four points `p1..p4` in homogeneous form, solve
//! `[p1 p2 p3] * l = p4` and scale the columns by `l`. The resulting
//! matrix maps the canonical basis onto the points, so
//!
//! ```text
//! H = B_src * inverse(B_dst)
//! ```
//!
//! maps destination pixels back into the source.

use crate::interp::{Fallback, resample};
use crate::{TransformError, TransformResult};
use rasterlab_core::{Matrix3, Raster};

/// A 2D point with floating-point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

fn singular(err: rasterlab_core::Error) -> TransformError {
    match err {
        rasterlab_core::Error::SingularMatrix(_) => TransformError::SingularMatrix,
        other => TransformError::Core(other),
    }
}

/// Matrix sending the canonical basis to `points` (up to scale).
fn basis_to_points(points: &[Point; 4]) -> TransformResult<Matrix3> {
    let [p1, p2, p3, p4] = points.map(|p| [p.x, p.y, 1.0]);
    let m = Matrix3::from_columns(p1, p2, p3);
    let l = m.solve(p4).map_err(singular)?;
    Ok(Matrix3::from_columns(
        p1.map(|v| v * l[0]),
        p2.map(|v| v * l[1]),
        p3.map(|v| v * l[2]),
    ))
}

/// Homography taking `dst` points to `src` points.
///
/// # Errors
///
/// Returns [`TransformError::SingularMatrix`] when three of either set of
/// points are collinear.
pub fn homography(src: &[Point; 4], dst: &[Point; 4]) -> TransformResult<Matrix3> {
    let b_src = basis_to_points(src)?;
    let b_dst = basis_to_points(dst)?;
    Ok(b_src.mul(&b_dst.inverse().map_err(singular)?))
}

/// Output size for the given source corners.
pub fn rectified_size(corners: &[Point; 4]) -> (f64, f64) {
    let [tl, tr, br, bl] = *corners;
    let width = tl.distance(tr).max(bl.distance(br)).round();
    let height = tl.distance(bl).max(tr.distance(br)).round();
    (width, height)
}

/// Rectify the quadrilateral `corners` of `image`
///
/// # Arguments
/// * `image` - Input image
/// * `corners` - Source corners: top-left, top-right, bottom-right,
///   bottom-left
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for non-finite corners or
/// an empty output, and [`TransformError::SingularMatrix`] for degenerate
/// corners.
pub fn projective_warp<const C: usize>(
    image: &Raster<u8, C>,
    corners: &[Point; 4],
) -> TransformResult<Raster<u8, C>> {
    if corners.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(TransformError::InvalidParameters(
            "corner coordinates must be finite".to_string(),
        ));
    }
    let (width, height) = rectified_size(corners);
    if width < 1.0 || height < 1.0 || width > u32::MAX as f64 || height > u32::MAX as f64 {
        return Err(TransformError::InvalidParameters(format!(
            "rectified size {width}x{height} is not usable"
        )));
    }
    let dst = [
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ];
    let h = homography(corners, &dst)?;
    log::debug!("projective_warp: {width}x{height} output, homography {:?}", h.m);

    resample(
        image,
        width as u32,
        height as u32,
        Fallback::NearestOrBlack,
        |x, y| h.transform_point(x, y),
    )
}
