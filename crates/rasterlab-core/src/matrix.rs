//! 3x3 matrix helpers for homogeneous 2D geometry

use crate::error::{Error, Result};

/// Determinant magnitude below which a matrix is treated as singular
pub const SINGULAR_EPSILON: f64 = 1e-10;

/// Row-major 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub m: [[f64; 3]; 3],
}

impl Matrix3 {
    /// Create a matrix from rows.
    pub fn from_rows(m: [[f64; 3]; 3]) -> Self {
        Matrix3 { m }
    }

    /// Identity matrix
    pub fn identity() -> Self {
        Matrix3 {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Create a matrix whose columns are `c0`, `c1`, `c2`.
    pub fn from_columns(c0: [f64; 3], c1: [f64; 3], c2: [f64; 3]) -> Self {
        Matrix3 {
            m: [
                [c0[0], c1[0], c2[0]],
                [c0[1], c1[1], c2[1]],
                [c0[2], c1[2], c2[2]],
            ],
        }
    }

    /// Matrix product `self * rhs`.
    pub fn mul(&self, rhs: &Matrix3) -> Matrix3 {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Matrix3 { m: out }
    }

    /// Matrix-vector product `self * v`.
    pub fn mul_vec(&self, v: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (o, row) in out.iter_mut().zip(self.m.iter()) {
            *o = row[0] * v[0] + row[1] * v[1] + row[2] * v[2];
        }
        out
    }

    /// Scale every entry by `s`.
    pub fn scale(&self, s: f64) -> Matrix3 {
        Matrix3 {
            m: self.m.map(|row| row.map(|v| v * s)),
        }
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse via the adjugate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SingularMatrix`] if `|det| < 1e-10`.
    pub fn inverse(&self) -> Result<Matrix3> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return Err(Error::SingularMatrix(det));
        }
        let m = &self.m;
        let adj = [
            [
                m[1][1] * m[2][2] - m[1][2] * m[2][1],
                m[0][2] * m[2][1] - m[0][1] * m[2][2],
                m[0][1] * m[1][2] - m[0][2] * m[1][1],
            ],
            [
                m[1][2] * m[2][0] - m[1][0] * m[2][2],
                m[0][0] * m[2][2] - m[0][2] * m[2][0],
                m[0][2] * m[1][0] - m[0][0] * m[1][2],
            ],
            [
                m[1][0] * m[2][1] - m[1][1] * m[2][0],
                m[0][1] * m[2][0] - m[0][0] * m[2][1],
                m[0][0] * m[1][1] - m[0][1] * m[1][0],
            ],
        ];
        Ok(Matrix3 { m: adj }.scale(1.0 / det))
    }

    /// Solve `self * x = b`.
    pub fn solve(&self, b: [f64; 3]) -> Result<[f64; 3]> {
        Ok(self.inverse()?.mul_vec(b))
    }

    /// Map a 2D point through the matrix with homogeneous division.
    ///
    /// Returns `None` when the point maps to infinity.
    pub fn transform_point(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let [u, v, w] = self.mul_vec([x, y, 1.0]);
        if w.abs() < SINGULAR_EPSILON {
            None
        } else {
            Some((u / w, v / w))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: &Matrix3, b: &Matrix3) -> bool {
        a.m.iter()
            .flatten()
            .zip(b.m.iter().flatten())
            .all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_inverse_roundtrip() {
        let a = Matrix3::from_rows([[2.0, 1.0, 0.0], [0.0, 3.0, 1.0], [1.0, 0.0, 4.0]]);
        let inv = a.inverse().unwrap();
        assert!(approx(&a.mul(&inv), &Matrix3::identity()));
        assert!(approx(&inv.mul(&a), &Matrix3::identity()));
    }

    #[test]
    fn test_singular_detected() {
        let a = Matrix3::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
        assert!(matches!(a.inverse(), Err(Error::SingularMatrix(_))));
        assert!(a.solve([1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_solve() {
        let a = Matrix3::from_rows([[1.0, 1.0, 1.0], [0.0, 2.0, 5.0], [2.0, 5.0, -1.0]]);
        let x = a.solve([6.0, -4.0, 27.0]).unwrap();
        assert!((x[0] - 5.0).abs() < 1e-9);
        assert!((x[1] - 3.0).abs() < 1e-9);
        assert!((x[2] + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_columns_and_transform_point() {
        let t = Matrix3::from_columns([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [3.0, -2.0, 1.0]);
        assert_eq!(t.transform_point(1.0, 1.0), Some((4.0, -1.0)));
        let degenerate = Matrix3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]);
        assert_eq!(degenerate.transform_point(1.0, 1.0), None);
    }
}
