//! 3x3 matrices for 2D transformations
//!
//! Storage is row-major and vectors are columns: `m * v` dots each row with `v`.
//! A 2D point `(x, y)` is carried as `(x, y, 1)`, translation lives in the
//! third column.

use crate::math1d::Value;
use crate::{Mat4x4, Quat, Vec2, Vec3};
use log::debug;
use std::fmt;
use std::ops::{Mul, MulAssign};

/// Row-major 3x3 matrix
///
/// Layout:
/// ```text
/// [ m[0][0] m[0][1] m[0][2] ]
/// [ m[1][0] m[1][1] m[1][2] ]
/// [ m[2][0] m[2][1] m[2][2] ]
/// ```
///
/// The default matrix is all zeros, use [`Mat3x3::IDENTITY`] or
/// [`Mat3x3::from_diagonal`] as a starting point for transforms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat3x3 {
    pub m: [[Value; 3]; 3],
}

impl Mat3x3 {
    pub const ZERO: Mat3x3 = Mat3x3::from_diagonal(0.0);
    pub const IDENTITY: Mat3x3 = Mat3x3::from_diagonal(1.0);

    pub const fn new(m: [[Value; 3]; 3]) -> Self {
        Self { m }
    }

    /// All zeros except `diagonal` on the main diagonal
    pub const fn from_diagonal(diagonal: Value) -> Self {
        Self::new([
            [diagonal, 0.0, 0.0],
            [0.0, diagonal, 0.0],
            [0.0, 0.0, diagonal],
        ])
    }

    /// Orthographic projection of the rectangle `[left, right] x [bottom, top]` onto `[-1, 1]`
    pub fn init_ortho(right: Value, left: Value, top: Value, bottom: Value) -> Self {
        let rml = 1.0 / (right - left);
        let tmb = 1.0 / (top - bottom);

        let mut res = Self::ZERO;
        res.m[0][0] = 2.0 * rml;
        res.m[1][1] = 2.0 * tmb;
        res.m[2][2] = 1.0;
        res.m[0][2] = -(right + left) * rml;
        res.m[1][2] = -(top + bottom) * tmb;
        res
    }

    /// Orthographic projection of a `width` x `height` rectangle centered on the origin
    pub fn init_ortho_centered(width: Value, height: Value) -> Self {
        let mut res = Self::ZERO;
        res.m[0][0] = 2.0 / width;
        res.m[1][1] = 2.0 / height;
        res.m[2][2] = 1.0;
        res
    }

    /// 3D rotation matrix of a unit quaternion
    pub fn init_rotation_from_quat(q: Quat) -> Self {
        let mut res = Self::ZERO;
        write_rotation(&mut res.m, q);
        res
    }

    /// Upper-left 3x3 block of a 4x4 matrix
    pub fn from_mat4x4(mat: &Mat4x4) -> Self {
        let mut res = Self::ZERO;
        for (row, src) in res.m.iter_mut().zip(mat.m.iter()) {
            row.copy_from_slice(&src[..3]);
        }
        res
    }

    pub fn to_mat4x4(&self) -> Mat4x4 {
        Mat4x4::from_mat3x3(self)
    }

    /// Overwrite the upper-left 2x2 block with a rotation of `radians`
    ///
    /// This sets cells, it does not compose with the current content.
    /// Combine transforms by multiplying separate matrices.
    pub fn rotate(&mut self, radians: Value) -> &mut Self {
        let (sin, cos) = radians.sin_cos();
        self.m[0][0] = cos;
        self.m[0][1] = -sin;
        self.m[1][0] = sin;
        self.m[1][1] = cos;
        self
    }

    /// Overwrite the first two diagonal cells
    ///
    /// On a matrix that already holds a rotation this replaces the cosines.
    pub fn scale(&mut self, scale: Vec2) -> &mut Self {
        self.m[0][0] = scale.x;
        self.m[1][1] = scale.y;
        self
    }

    /// Overwrite the translation column
    pub fn translate(&mut self, translation: Vec2) -> &mut Self {
        self.m[0][2] = translation.x;
        self.m[1][2] = translation.y;
        self
    }

    pub fn transpose(&self) -> Self {
        let mut res = Self::ZERO;
        for (i, row) in res.m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[j][i];
            }
        }
        res
    }

    pub fn determinant(&self) -> Value {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// General inverse through the adjugate, `None` for a singular matrix
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            debug!("Mat3x3::inverse: singular matrix {self}");
            return None;
        }
        let m = &self.m;
        let inv_det = 1.0 / det;
        Some(Self::new([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
            ],
        ]))
    }

    /// Transform a 2D point, carried as `(x, y, 1)`
    ///
    /// There is no perspective divide, the third row is ignored.
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        (*self * Vec3::from_xy_z(p, 1.0)).xy()
    }
}

/// Rotation block of a unit quaternion, shared with [`Mat4x4::rotate`]
pub(crate) fn write_rotation<const N: usize>(m: &mut [[Value; N]; N], q: Quat) {
    let i2 = q.i * q.i * 2.0;
    let j2 = q.j * q.j * 2.0;
    let k2 = q.k * q.k * 2.0;

    let ij = q.i * q.j * 2.0;
    let jk = q.j * q.k * 2.0;
    let ik = q.i * q.k * 2.0;

    let iw = q.i * q.w * 2.0;
    let jw = q.j * q.w * 2.0;
    let kw = q.k * q.w * 2.0;

    m[0][0] = 1.0 - j2 - k2;
    m[0][1] = ij - kw;
    m[0][2] = ik + jw;

    m[1][0] = ij + kw;
    m[1][1] = 1.0 - i2 - k2;
    m[1][2] = jk - iw;

    m[2][0] = ik - jw;
    m[2][1] = jk + iw;
    m[2][2] = 1.0 - i2 - j2;
}

/// Matrix multiplication, `(a * b) * v == a * (b * v)`
impl Mul for Mat3x3 {
    type Output = Mat3x3;

    fn mul(self, other: Mat3x3) -> Mat3x3 {
        let mut result = [[0.0; 3]; 3];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        Mat3x3 { m: result }
    }
}

impl Mul for &Mat3x3 {
    type Output = Mat3x3;

    fn mul(self, other: &Mat3x3) -> Mat3x3 {
        *self * *other
    }
}

impl MulAssign for Mat3x3 {
    fn mul_assign(&mut self, other: Mat3x3) {
        *self = *self * other;
    }
}

impl Mul<Vec3> for Mat3x3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }
}

/// Same as `m * v`, the vector is not treated as a row vector
impl Mul<Mat3x3> for Vec3 {
    type Output = Vec3;

    fn mul(self, m: Mat3x3) -> Vec3 {
        m * self
    }
}

impl MulAssign<Mat3x3> for Vec3 {
    fn mul_assign(&mut self, m: Mat3x3) {
        *self = m * *self;
    }
}

impl From<Mat4x4> for Mat3x3 {
    fn from(mat: Mat4x4) -> Self {
        Mat3x3::from_mat4x4(&mat)
    }
}

impl fmt::Display for Mat3x3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.m.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{}, {}, {}]", row[0], row[1], row[2])?;
        }
        write!(f, "]")
    }
}
