//! 4x4 affine matrix engine
//!
//! Matrices are row-major: element `(r, c)` is row `r`, column `c`, and the
//! translation lives in the last column. Every constructor here keeps the
//! bottom row at `[0, 0, 0, 1]`.
use nalgebra::{Matrix4, Point3};

/// Row-major 4x4 affine transform
pub type Matrix = Matrix4<f64>;

/// Transform builder for 3D transformations
///
/// `rotate_*`, `scale` and `translate` pre-apply the new operation to an
/// accumulated matrix, so chained calls compose in application order.
pub struct Transform;

impl Transform {
    pub fn identity() -> Matrix {
        Matrix::identity()
    }

    /// `a` applied after `b`
    pub fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
        a * b
    }

    /// Rotate about the X axis by whole degrees
    pub fn rotate_x(m: &Matrix, degrees: f64) -> Matrix {
        let (s, c) = to_radians(degrees).sin_cos();
        #[rustfmt::skip]
        let rx = Matrix::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   -s,  0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self::multiply(&rx, m)
    }

    /// Rotate about the Y axis by whole degrees
    pub fn rotate_y(m: &Matrix, degrees: f64) -> Matrix {
        let (s, c) = to_radians(degrees).sin_cos();
        #[rustfmt::skip]
        let ry = Matrix::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
            -s,  0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self::multiply(&ry, m)
    }

    /// Rotate about the Z axis by whole degrees
    pub fn rotate_z(m: &Matrix, degrees: f64) -> Matrix {
        let (s, c) = to_radians(degrees).sin_cos();
        #[rustfmt::skip]
        let rz = Matrix::new(
            c,   -s,  0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self::multiply(&rz, m)
    }

    pub fn scale(m: &Matrix, sx: f64, sy: f64, sz: f64) -> Matrix {
        #[rustfmt::skip]
        let s = Matrix::new(
            sx,  0.0, 0.0, 0.0,
            0.0, sy,  0.0, 0.0,
            0.0, 0.0, sz,  0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self::multiply(&s, m)
    }

    pub fn translate(m: &Matrix, tx: f64, ty: f64, tz: f64) -> Matrix {
        #[rustfmt::skip]
        let t = Matrix::new(
            1.0, 0.0, 0.0, tx,
            0.0, 1.0, 0.0, ty,
            0.0, 0.0, 1.0, tz,
            0.0, 0.0, 0.0, 1.0,
        );
        Self::multiply(&t, m)
    }

    /// Apply `m` to a position using only its top three rows
    pub fn transform_position(m: &Matrix, p: &Point3<f64>) -> Point3<f64> {
        Point3::new(
            m[(0, 0)] * p.x + m[(0, 1)] * p.y + m[(0, 2)] * p.z + m[(0, 3)],
            m[(1, 0)] * p.x + m[(1, 1)] * p.y + m[(1, 2)] * p.z + m[(1, 3)],
            m[(2, 0)] * p.x + m[(2, 1)] * p.y + m[(2, 2)] * p.z + m[(2, 3)],
        )
    }
}

fn to_radians(degrees: f64) -> f64 {
    std::f64::consts::PI / 180.0 * degrees
}
