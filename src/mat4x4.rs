//! 4x4 matrices for 3D affine and projective transformations
//!
//! Storage is row-major and vectors are columns: `m * v` dots each row with `v`,
//! translation lives in the fourth column (`m[0][3]`, `m[1][3]`, `m[2][3]`).
//!
//! When matrices are multiplied as `a * b`, the transformation `b` is applied
//! first, then `a`.

use crate::mat3x3::write_rotation;
use crate::math1d::Value;
use crate::{Mat3x3, Quat, Vec3, Vec4};
use std::fmt;
use std::ops::{Mul, MulAssign};

/// Row-major 4x4 matrix
///
/// Layout:
/// ```text
/// [ m[0][0] m[0][1] m[0][2] m[0][3] ]
/// [ m[1][0] m[1][1] m[1][2] m[1][3] ]
/// [ m[2][0] m[2][1] m[2][2] m[2][3] ]
/// [ m[3][0] m[3][1] m[3][2] m[3][3] ]
/// ```
///
/// The default matrix is all zeros, use [`Mat4x4::IDENTITY`] or
/// [`Mat4x4::from_diagonal`] as a starting point for transforms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat4x4 {
    pub m: [[Value; 4]; 4],
}

impl Mat4x4 {
    pub const ZERO: Mat4x4 = Mat4x4::from_diagonal(0.0);
    pub const IDENTITY: Mat4x4 = Mat4x4::from_diagonal(1.0);

    pub const fn new(m: [[Value; 4]; 4]) -> Self {
        Self { m }
    }

    /// All zeros except `diagonal` on the main diagonal
    pub const fn from_diagonal(diagonal: Value) -> Self {
        Self::new([
            [diagonal, 0.0, 0.0, 0.0],
            [0.0, diagonal, 0.0, 0.0],
            [0.0, 0.0, diagonal, 0.0],
            [0.0, 0.0, 0.0, diagonal],
        ])
    }

    /// Orthographic projection of the box `[left, right] x [bottom, top] x [near, far]` onto `[-1, 1]`
    pub fn init_ortho(
        right: Value,
        left: Value,
        top: Value,
        bottom: Value,
        near: Value,
        far: Value,
    ) -> Self {
        let rml = 1.0 / (right - left);
        let tmb = 1.0 / (top - bottom);
        let fmn = 1.0 / (far - near);

        let mut res = Self::ZERO;
        res.m[0][0] = 2.0 * rml;
        res.m[1][1] = 2.0 * tmb;
        res.m[2][2] = 2.0 * fmn;
        res.m[3][3] = 1.0;
        res.m[0][3] = -(right + left) * rml;
        res.m[1][3] = -(top + bottom) * tmb;
        res.m[2][3] = -(far + near) * fmn;
        res
    }

    /// Orthographic projection of a `width` x `height` box centered on the z axis
    pub fn init_ortho_centered(width: Value, height: Value, near: Value, far: Value) -> Self {
        let fmn = 1.0 / (far - near);

        let mut res = Self::ZERO;
        res.m[0][0] = 2.0 / width;
        res.m[1][1] = 2.0 / height;
        res.m[2][2] = 2.0 * fmn;
        res.m[3][3] = 1.0;
        res.m[2][3] = -(far + near) * fmn;
        res
    }

    /// Perspective projection with a vertical field of view of `fov` radians
    ///
    /// The aspect ratio is `width / height`. The camera looks down -z, the
    /// clip space w is the view space `-z`.
    pub fn init_perspective(width: Value, height: Value, fov: Value, near: Value, far: Value) -> Self {
        let cot_fov = 1.0 / (fov / 2.0).tan();
        let fmn = 1.0 / (far - near);
        let aspect = width / height;

        let mut res = Self::ZERO;
        res.m[0][0] = cot_fov / aspect;
        res.m[1][1] = cot_fov;
        res.m[2][2] = -(far + near) * fmn;
        res.m[2][3] = -2.0 * (far * near) * fmn;
        res.m[3][2] = -1.0;
        res
    }

    /// Identity matrix with the rotation of a unit quaternion in the upper 3x3 block
    pub fn init_rotation_from_quat(q: Quat) -> Self {
        let mut res = Self::IDENTITY;
        res.rotate(q);
        res
    }

    /// Right-handed view matrix for a camera at `source` looking at `dest`
    pub fn lookat(source: Vec3, dest: Vec3, up: Vec3) -> Self {
        let f = (dest - source).normalized();
        let s = f.cross(up).normalized();
        let u = s.cross(f);

        Self::new([
            [s.x, s.y, s.z, -s.dot(source)],
            [u.x, u.y, u.z, -u.dot(source)],
            [-f.x, -f.y, -f.z, f.dot(source)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Embed a 3x3 matrix, the fourth row and column follow the identity pattern
    pub fn from_mat3x3(mat: &Mat3x3) -> Self {
        let mut res = Self::IDENTITY;
        for (row, src) in res.m.iter_mut().zip(mat.m.iter()) {
            row[..3].copy_from_slice(src);
        }
        res
    }

    pub fn to_mat3x3(&self) -> Mat3x3 {
        Mat3x3::from_mat4x4(self)
    }

    /// Inverse of a rigid transform, a rotation followed by a translation
    ///
    /// The upper 3x3 block is transposed and the translation becomes
    /// `-R^T * t`. Matrices with scale, shear or a projective bottom row do not
    /// give their inverse here.
    pub fn inverse_homogeneous(&self) -> Self {
        let rotation_t = self.to_mat3x3().transpose();
        let translation = Vec3::new(self.m[0][3], self.m[1][3], self.m[2][3]);
        let inv_translation = -(rotation_t * translation);

        let mut res = Self::from_mat3x3(&rotation_t);
        res.translate(inv_translation);
        res
    }

    /// Overwrite the y/z block with a rotation of `radians` around the x axis
    ///
    /// Like all mutators this sets cells and does not compose with the
    /// current content.
    pub fn rotate_x(&mut self, radians: Value) -> &mut Self {
        let (sin, cos) = radians.sin_cos();
        self.m[1][1] = cos;
        self.m[1][2] = -sin;
        self.m[2][1] = sin;
        self.m[2][2] = cos;
        self
    }

    /// Overwrite the x/z block with a rotation of `radians` around the y axis
    pub fn rotate_y(&mut self, radians: Value) -> &mut Self {
        let (sin, cos) = radians.sin_cos();
        self.m[0][0] = cos;
        self.m[0][2] = sin;
        self.m[2][0] = -sin;
        self.m[2][2] = cos;
        self
    }

    /// Overwrite the x/y block with a rotation of `radians` around the z axis
    pub fn rotate_z(&mut self, radians: Value) -> &mut Self {
        let (sin, cos) = radians.sin_cos();
        self.m[0][0] = cos;
        self.m[0][1] = -sin;
        self.m[1][0] = sin;
        self.m[1][1] = cos;
        self
    }

    /// Overwrite the upper 3x3 block with the rotation of a unit quaternion
    pub fn rotate(&mut self, rotation: Quat) -> &mut Self {
        let mut block = [[0.0; 3]; 3];
        write_rotation(&mut block, rotation);
        for (row, src) in self.m.iter_mut().zip(block.iter()) {
            row[..3].copy_from_slice(src);
        }
        self
    }

    /// Overwrite the first three diagonal cells
    ///
    /// Calling this after a rotation replaces the rotation's diagonal.
    pub fn scale(&mut self, scale: Vec3) -> &mut Self {
        self.m[0][0] = scale.x;
        self.m[1][1] = scale.y;
        self.m[2][2] = scale.z;
        self
    }

    /// Overwrite the translation column
    pub fn translate(&mut self, translation: Vec3) -> &mut Self {
        self.m[0][3] = translation.x;
        self.m[1][3] = translation.y;
        self.m[2][3] = translation.z;
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

    /// Transform a point (w = 1) with perspective divide
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let r = *self * Vec4::from_vec3(p);
        let inv_w = 1.0 / r.w;
        r.xyz() * inv_w
    }

    /// Transform a direction (w = 0), translation does not apply
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3_w(v, 0.0)).xyz()
    }
}

/// Matrix multiplication, `(a * b) * v == a * (b * v)`
impl Mul for Mat4x4 {
    type Output = Mat4x4;

    fn mul(self, other: Mat4x4) -> Mat4x4 {
        let mut result = [[0.0; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j]
                    + self.m[i][3] * other.m[3][j];
            }
        }
        Mat4x4 { m: result }
    }
}

impl Mul for &Mat4x4 {
    type Output = Mat4x4;

    fn mul(self, other: &Mat4x4) -> Mat4x4 {
        *self * *other
    }
}

impl MulAssign for Mat4x4 {
    fn mul_assign(&mut self, other: Mat4x4) {
        *self = *self * other;
    }
}

impl Mul<Vec4> for Mat4x4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3] * v.w,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3] * v.w,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3] * v.w,
            m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3] * v.w,
        )
    }
}

/// Same as `m * v`, the vector is not treated as a row vector
impl Mul<Mat4x4> for Vec4 {
    type Output = Vec4;

    fn mul(self, m: Mat4x4) -> Vec4 {
        m * self
    }
}

impl MulAssign<Mat4x4> for Vec4 {
    fn mul_assign(&mut self, m: Mat4x4) {
        *self = m * *self;
    }
}

impl From<Mat3x3> for Mat4x4 {
    fn from(mat: Mat3x3) -> Self {
        Mat4x4::from_mat3x3(&mat)
    }
}

impl fmt::Display for Mat4x4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.m.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{}, {}, {}, {}]", row[0], row[1], row[2], row[3])?;
        }
        write!(f, "]")
    }
}
