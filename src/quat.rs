//! Quaternions for 3D rotations
//!
//! Only unit quaternions represent rotations. Apart from
//! [`Quat::from_angle_axis`] nothing normalizes on construction, call
//! [`Quat::normalized`] when needed.
//!
//! Composition follows the sandwich product used by [`Quat::rotate_vec3`]:
//! `a * b` rotates by `b` first, then by `a`.

use crate::math1d::{TO_RADS, Value};
use crate::{Mat4x4, Vec3};
use log::trace;
use std::fmt;
use std::ops::{Mul, MulAssign, Neg};

/// Cosine above which [`Quat::slerp`] falls back to normalized linear interpolation
const SLERP_DOT_THRESHOLD: Value = 0.9995;

/// Tolerance for treating two directions as parallel in [`Quat::angle_vec3`]
const PARALLEL_EPSILON: Value = 0.000001;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    pub i: Value,
    pub j: Value,
    pub k: Value,
    pub w: Value,
}

impl_additive_ops!(Quat { i, j, k, w });
impl_scalar_ops!(Quat { i, j, k, w });

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(i: Value, j: Value, k: Value, w: Value) -> Self {
        Self { i, j, k, w }
    }

    /// Rotation of `angle` radians around `axis`, which must already be normalized
    pub fn from_angle_axis(angle: Value, axis: Vec3) -> Self {
        let (sin, cos) = (angle / 2.0).sin_cos();
        Self {
            i: axis.x * sin,
            j: axis.y * sin,
            k: axis.z * sin,
            w: cos,
        }
    }

    /// Extract the rotation of the upper 3x3 block with the trace based branch select
    ///
    /// The block is read transposed, the layout [`Mat4x4::lookat`] produces.
    /// For a matrix built with [`Mat4x4::rotate`] this gives the conjugate
    /// rotation (possibly with all four signs flipped).
    pub fn from_mat4x4(mat: &Mat4x4) -> Self {
        let m = &mat.m;
        let trace = m[0][0] + m[1][1] + m[2][2];
        let res = if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Quat {
                i: (m[1][2] - m[2][1]) * s,
                j: (m[2][0] - m[0][2]) * s,
                k: (m[0][1] - m[1][0]) * s,
                w: 0.25 / s,
            }
        } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
            let s = 2.0 * (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt();
            Quat {
                i: 0.25 * s,
                j: (m[1][0] + m[0][1]) / s,
                k: (m[2][0] + m[0][2]) / s,
                w: (m[1][2] - m[2][1]) / s,
            }
        } else if m[1][1] > m[2][2] {
            let s = 2.0 * (1.0 + m[1][1] - m[0][0] - m[2][2]).sqrt();
            Quat {
                i: (m[1][0] + m[0][1]) / s,
                j: 0.25 * s,
                k: (m[2][1] + m[1][2]) / s,
                w: (m[2][0] - m[0][2]) / s,
            }
        } else {
            let s = 2.0 * (1.0 + m[2][2] - m[0][0] - m[1][1]).sqrt();
            Quat {
                i: (m[2][0] + m[0][2]) / s,
                j: (m[2][1] + m[1][2]) / s,
                k: 0.25 * s,
                w: (m[0][1] - m[1][0]) / s,
            }
        };
        res.normalized()
    }

    /// Orientation looking from `source` towards `dest`, see [`Quat::forward`]
    pub fn lookat(source: Vec3, dest: Vec3, up: Vec3) -> Self {
        Self::from_mat4x4(&Mat4x4::lookat(source, dest, up))
    }

    /// Shortest arc rotation turning direction `a` onto direction `b`
    ///
    /// Both directions are expected to be normalized. Opposite directions
    /// turn half a circle around `up`.
    pub fn angle_vec3(a: Vec3, b: Vec3, up: Vec3) -> Self {
        let dot = a.dot(b);
        if (dot + 1.0).abs() < PARALLEL_EPSILON {
            trace!("angle_vec3: opposite directions {a} and {b}, turning around {up}");
            return Self::from_angle_axis(180.0 * TO_RADS, up);
        }
        if (dot - 1.0).abs() < PARALLEL_EPSILON {
            trace!("angle_vec3: {a} and {b} already aligned");
            return Self::IDENTITY;
        }
        let axis = a.cross(b).normalized();
        Self::from_angle_axis(dot.acos(), axis)
    }

    /// Rotation turning the +Z axis towards `dir`
    pub fn face(dir: Vec3, up: Vec3) -> Self {
        Self::angle_vec3(Vec3::Z, dir, up)
    }

    /// Angular distance in radians between two rotations
    pub fn angle(a: Quat, b: Quat) -> Value {
        2.0 * (a.conjugate() * b).w.acos()
    }

    pub fn conjugate(self) -> Self {
        Self::new(-self.i, -self.j, -self.k, self.w)
    }

    pub fn dot(self, other: Quat) -> Value {
        self.i * other.i + self.j * other.j + self.k * other.k + self.w * other.w
    }

    pub fn length_sqr(self) -> Value {
        self.dot(self)
    }

    pub fn length(self) -> Value {
        self.length_sqr().sqrt()
    }

    /// No zero-length guard, a zero quaternion yields NaN
    pub fn normalized(self) -> Self {
        self / self.length()
    }

    /// Rotate `v` with the sandwich product `q * (v, 0) * conjugate(q)`
    ///
    /// The quaternion is expected to be a unit quaternion.
    pub fn rotate_vec3(self, v: Vec3) -> Vec3 {
        let p = Quat::new(v.x, v.y, v.z, 0.0);
        let r = self * p * self.conjugate();
        Vec3::new(r.i, r.j, r.k)
    }

    /// Roll, pitch and yaw in radians around x, y and z
    ///
    /// The pitch `asin` argument is not clamped, close to +-90 degrees
    /// rounding can make it NaN.
    pub fn euler(self) -> Vec3 {
        let i2 = self.i * self.i;
        let j2 = self.j * self.j;
        let k2 = self.k * self.k;
        Vec3 {
            x: (2.0 * (self.w * self.i + self.j * self.k)).atan2(1.0 - 2.0 * (i2 + j2)),
            y: (2.0 * (self.w * self.j - self.k * self.i)).asin(),
            z: (2.0 * (self.w * self.k + self.i * self.j)).atan2(1.0 - 2.0 * (j2 + k2)),
        }
    }

    /// Component-wise interpolation, the result is not normalized
    pub fn lerp(a: Quat, b: Quat, t: Value) -> Quat {
        a + (b - a) * t
    }

    /// Spherical interpolation along the shortest path
    ///
    /// Inputs are normalized first. Nearly identical rotations use a
    /// normalized linear interpolation because the spherical formula
    /// divides by `sin` of a vanishing angle.
    pub fn slerp(a: Quat, b: Quat, t: Value) -> Quat {
        let v0 = a.normalized();
        let mut v1 = b.normalized();

        let mut dot = v0.dot(v1);
        // q and q * -1 are the same rotation, flip one to stay on the short arc
        if dot < 0.0 {
            v1 = v1 * -1.0;
            dot = -dot;
        }

        if dot > SLERP_DOT_THRESHOLD {
            trace!("slerp: nearly parallel (dot {dot}), using linear interpolation");
            return (v0 + (v1 - v0) * t).normalized();
        }

        let theta_0 = dot.acos();
        let theta = theta_0 * t;
        let (sin_theta, cos_theta) = theta.sin_cos();
        let sin_theta_0 = theta_0.sin();

        let s0 = cos_theta - dot * sin_theta / sin_theta_0;
        let s1 = sin_theta / sin_theta_0;
        (v0 * s0 + v1 * s1).normalized()
    }

    /// Local +X axis after rotation
    pub fn right(self) -> Vec3 {
        self.rotate_vec3(Vec3::X)
    }

    /// Local +Y axis after rotation
    pub fn up(self) -> Vec3 {
        self.rotate_vec3(Vec3::Y)
    }

    /// Local -Z axis after rotation
    pub fn forward(self) -> Vec3 {
        self.rotate_vec3(-Vec3::Z)
    }
}

/// Hamilton product
impl Mul for Quat {
    type Output = Quat;

    fn mul(self, b: Quat) -> Quat {
        let a = self;
        Quat {
            i: a.w * b.i + a.i * b.w + a.j * b.k - a.k * b.j,
            j: a.w * b.j - a.i * b.k + a.j * b.w + a.k * b.i,
            k: a.w * b.k + a.i * b.j - a.j * b.i + a.k * b.w,
            w: a.w * b.w - a.i * b.i - a.j * b.j - a.k * b.k,
        }
    }
}

impl MulAssign for Quat {
    fn mul_assign(&mut self, other: Quat) {
        *self = *self * other;
    }
}

/// Unary minus is the inverse rotation, not a sign flip of all four components
///
/// Use `q * -1.0` for the latter.
impl Neg for Quat {
    type Output = Quat;

    fn neg(self) -> Quat {
        self.conjugate()
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        self.rotate_vec3(v)
    }
}

/// Same as `q * v`, the vector is rotated by the quaternion
impl Mul<Quat> for Vec3 {
    type Output = Vec3;

    fn mul(self, q: Quat) -> Vec3 {
        q.rotate_vec3(self)
    }
}

impl MulAssign<Quat> for Vec3 {
    fn mul_assign(&mut self, q: Quat) {
        *self = q.rotate_vec3(*self);
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{},{},{}", self.i, self.j, self.k, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math1d::PI;
    use crate::math1d::consts::{FRAC_PI_2, FRAC_PI_4};
    use pretty_assertions::assert_eq;

    const EPSILON: Value = 1e-5;

    fn approx_eq(a: Value, b: Value) -> bool {
        (a - b).abs() < EPSILON
    }

    fn assert_vec3_approx_eq(actual: Vec3, expected: Vec3) {
        assert!(
            approx_eq(actual.x, expected.x)
                && approx_eq(actual.y, expected.y)
                && approx_eq(actual.z, expected.z),
            "expected {expected}, got {actual}"
        );
    }

    /// q and q * -1 are the same rotation
    fn assert_same_rotation(actual: Quat, expected: Quat) {
        let close = |a: Quat, b: Quat| {
            approx_eq(a.i, b.i) && approx_eq(a.j, b.j) && approx_eq(a.k, b.k) && approx_eq(a.w, b.w)
        };
        assert!(
            close(actual, expected) || close(actual, expected * -1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_identity() {
        assert_eq!(Quat::default(), Quat::new(0.0, 0.0, 0.0, 1.0));
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Quat::IDENTITY.rotate_vec3(v), v);
    }

    #[test]
    fn test_from_angle_axis() {
        let q = Quat::from_angle_axis(FRAC_PI_2, Vec3::Z);
        let s = FRAC_PI_4.sin();
        assert!(approx_eq(q.i, 0.0));
        assert!(approx_eq(q.j, 0.0));
        assert!(approx_eq(q.k, s));
        assert!(approx_eq(q.w, FRAC_PI_4.cos()));
        assert!(approx_eq(q.length(), 1.0));
    }

    #[test]
    fn test_half_turn_around_y() {
        let q = Quat::from_angle_axis(PI, Vec3::Y);
        assert_vec3_approx_eq(q.rotate_vec3(Vec3::X), Vec3::new(-1.0, 0.0, 0.0));
        assert_vec3_approx_eq(q * Vec3::X, Vec3::new(-1.0, 0.0, 0.0));
        assert_vec3_approx_eq(Vec3::X * q, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_quarter_turn_around_z() {
        let q = Quat::from_angle_axis(FRAC_PI_2, Vec3::Z);
        assert_vec3_approx_eq(q * Vec3::X, Vec3::Y);
        let mut v = Vec3::Y;
        v *= q;
        assert_vec3_approx_eq(v, -Vec3::X);
    }

    #[test]
    fn test_composition_order() {
        // rotate around x first, then around z
        let rot_x = Quat::from_angle_axis(FRAC_PI_2, Vec3::X);
        let rot_z = Quat::from_angle_axis(FRAC_PI_2, Vec3::Z);
        let combined = rot_z * rot_x;
        // (0,1,0) -> (0,0,1) around x, z leaves it there
        assert_vec3_approx_eq(combined * Vec3::Y, Vec3::Z);
        // the other order: (0,1,0) -> (-1,0,0) around z, x leaves it there
        let other = rot_x * rot_z;
        assert_vec3_approx_eq(other * Vec3::Y, -Vec3::X);
    }

    #[test]
    fn test_hamilton_product_basis() {
        let i = Quat::new(1.0, 0.0, 0.0, 0.0);
        let j = Quat::new(0.0, 1.0, 0.0, 0.0);
        let k = Quat::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, Quat::new(0.0, 0.0, 0.0, -1.0));
        let mut q = j;
        q *= k;
        assert_eq!(q, i);
    }

    #[test]
    fn test_arithmetic() {
        let a = Quat::new(1.0, 2.0, 3.0, 4.0);
        let b = Quat::new(4.0, 3.0, 2.0, 1.0);
        assert_eq!(a + b, Quat::new(5.0, 5.0, 5.0, 5.0));
        assert_eq!(a - b, Quat::new(-3.0, -1.0, 1.0, 3.0));
        assert_eq!(a * 2.0, Quat::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(a / 2.0, Quat::new(0.5, 1.0, 1.5, 2.0));
        assert_eq!(a * -1.0, Quat::new(-1.0, -2.0, -3.0, -4.0));
        assert_eq!(a.conjugate(), Quat::new(-1.0, -2.0, -3.0, 4.0));
        assert_eq!(a.dot(b), 20.0);
        assert_eq!(a.length_sqr(), 30.0);
    }

    #[test]
    fn test_neg_is_inverse_rotation() {
        let a = Quat::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(-a, a.conjugate());

        let r = Quat::from_angle_axis(1.0, Vec3::Z);
        assert_vec3_approx_eq(-r * Vec3::X, r.conjugate() * Vec3::X);
        assert_vec3_approx_eq((-r) * (r * Vec3::X), Vec3::X);
        assert_same_rotation(r * -r, Quat::IDENTITY);
    }

    #[test]
    fn test_euler_pitch_is_not_clamped() {
        // asin argument 2 * (0.8 * 0.8) = 1.28
        assert!(Quat::new(0.0, 0.8, 0.0, 0.8).euler().y.is_nan());
    }

    #[test]
    fn test_angle_is_not_clamped() {
        assert!(Quat::angle(Quat::IDENTITY * 2.0, Quat::IDENTITY).is_nan());
    }

    #[test]
    fn test_normalized() {
        let q = Quat::new(0.0, 0.0, 3.0, 4.0).normalized();
        assert_eq!(q, Quat::new(0.0, 0.0, 0.6, 0.8));
    }

    #[test]
    fn test_conjugate_is_inverse_of_unit() {
        let q = Quat::from_angle_axis(1.2, Vec3::new(1.0, 2.0, 2.0).normalized());
        assert_same_rotation(q * q.conjugate(), Quat::IDENTITY);
    }

    #[test]
    fn test_angle_between_rotations() {
        let a = Quat::from_angle_axis(0.3, Vec3::Y);
        let b = Quat::from_angle_axis(1.3, Vec3::Y);
        assert!(approx_eq(Quat::angle(a, b), 1.0));
        assert!(approx_eq(Quat::angle(b, a), 1.0));
    }

    #[test]
    fn test_angle_vec3_same_direction_is_identity() {
        let v = Vec3::new(1.0, 1.0, 0.0).normalized();
        assert_eq!(Quat::angle_vec3(v, v, Vec3::Y), Quat::IDENTITY);
    }

    #[test]
    fn test_angle_vec3_opposite_direction_turns_around_up() {
        let v = Vec3::X;
        let q = Quat::angle_vec3(v, -v, Vec3::Y);
        assert_eq!(q, Quat::from_angle_axis(180.0 * TO_RADS, Vec3::Y));
        assert_vec3_approx_eq(q * v, -v);
    }

    #[test]
    fn test_angle_vec3_maps_a_onto_b() {
        let a = Vec3::new(1.0, 0.0, 1.0).normalized();
        let b = Vec3::new(0.0, 1.0, 0.5).normalized();
        let q = Quat::angle_vec3(a, b, Vec3::Y);
        assert_vec3_approx_eq(q * a, b);
    }

    #[test]
    fn test_face() {
        let q = Quat::face(Vec3::X, Vec3::Y);
        assert_vec3_approx_eq(q * Vec3::Z, Vec3::X);
        assert_eq!(Quat::face(Vec3::Z, Vec3::Y), Quat::IDENTITY);
    }

    #[test]
    fn test_euler() {
        let roll = Quat::from_angle_axis(0.5, Vec3::X).euler();
        assert_vec3_approx_eq(roll, Vec3::new(0.5, 0.0, 0.0));
        let pitch = Quat::from_angle_axis(0.5, Vec3::Y).euler();
        assert_vec3_approx_eq(pitch, Vec3::new(0.0, 0.5, 0.0));
        let yaw = Quat::from_angle_axis(-0.7, Vec3::Z).euler();
        assert_vec3_approx_eq(yaw, Vec3::new(0.0, 0.0, -0.7));
    }

    #[test]
    fn test_lerp() {
        let a = Quat::new(0.0, 0.0, 0.0, 1.0);
        let b = Quat::new(1.0, 0.0, 0.0, 0.0);
        assert_eq!(Quat::lerp(a, b, 0.5), Quat::new(0.5, 0.0, 0.0, 0.5));
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Quat::from_angle_axis(0.2, Vec3::Y);
        let b = Quat::from_angle_axis(2.0, Vec3::Y);
        assert_same_rotation(Quat::slerp(a, b, 0.0), a);
        assert_same_rotation(Quat::slerp(a, b, 1.0), b);
        assert_same_rotation(Quat::slerp(a, b, 0.5), Quat::from_angle_axis(1.1, Vec3::Y));
    }

    #[test]
    fn test_slerp_same_rotation() {
        let q = Quat::from_angle_axis(0.8, Vec3::new(0.0, 0.6, 0.8));
        for t in [0.0, 0.25, 0.5, 1.0] {
            assert_same_rotation(Quat::slerp(q, q, t), q);
        }
    }

    #[test]
    fn test_slerp_takes_short_path() {
        let a = Quat::from_angle_axis(0.1, Vec3::Z);
        // same rotation as `from_angle_axis(0.5, Z)` but in the other hemisphere
        let b = Quat::from_angle_axis(0.5, Vec3::Z) * -1.0;
        let half = Quat::slerp(a, b, 0.5);
        assert_same_rotation(half, Quat::from_angle_axis(0.3, Vec3::Z));
    }

    #[test]
    fn test_slerp_nearly_parallel_is_unit() {
        let a = Quat::from_angle_axis(0.5, Vec3::X);
        let b = Quat::from_angle_axis(0.501, Vec3::X);
        let q = Quat::slerp(a, b, 0.5);
        assert!(approx_eq(q.length(), 1.0));
        assert_same_rotation(q, Quat::from_angle_axis(0.5005, Vec3::X));
    }

    #[test]
    fn test_slerp_normalizes_inputs() {
        let a = Quat::IDENTITY * 3.0;
        let b = Quat::from_angle_axis(1.0, Vec3::X) * 0.5;
        assert_same_rotation(Quat::slerp(a, b, 0.5), Quat::from_angle_axis(0.5, Vec3::X));
    }

    #[test]
    fn test_orientation_axes() {
        let q = Quat::from_angle_axis(FRAC_PI_2, Vec3::Y);
        assert_vec3_approx_eq(q.right(), -Vec3::Z);
        assert_vec3_approx_eq(q.up(), Vec3::Y);
        assert_vec3_approx_eq(q.forward(), -Vec3::X);
    }

    #[test]
    fn test_from_mat4x4_reads_transposed_rotation() {
        let q = Quat::from_angle_axis(0.9, Vec3::new(1.0, 2.0, 3.0).normalized());
        let mut m = Mat4x4::IDENTITY;
        m.rotate(q);
        assert_same_rotation(Quat::from_mat4x4(&m), q.conjugate());
    }

    #[test]
    fn test_from_mat4x4_all_branches() {
        // half turns put the largest diagonal element on x, y and z in turn
        for axis in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(0.0, 0.6, 0.8)] {
            let q = Quat::from_angle_axis(3.0, axis);
            let mut m = Mat4x4::IDENTITY;
            m.rotate(q);
            assert_same_rotation(Quat::from_mat4x4(&m), q.conjugate());
        }
    }

    #[test]
    fn test_from_mat4x4_diagonal_ties_fall_through() {
        // m00 == m11 skips the x branch, the off-diagonals make the branches disagree
        let m = Mat4x4::new([
            [0.0, 1.0, 0.0, 0.0],
            [3.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, -1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_same_rotation(Quat::from_mat4x4(&m), Quat::new(2.0, 1.0, 0.0, 0.0).normalized());

        // m11 == m22 skips the y branch
        let m = Mat4x4::new([
            [-1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 3.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_same_rotation(Quat::from_mat4x4(&m), Quat::new(0.0, 2.0, 1.0, 0.0).normalized());
    }

    #[test]
    fn test_lookat_forward_points_at_target() {
        let source = Vec3::new(1.0, 2.0, 3.0);
        let dest = Vec3::new(4.0, 2.0, -1.0);
        let q = Quat::lookat(source, dest, Vec3::Y);
        assert_vec3_approx_eq(q.forward(), (dest - source).normalized());
        assert!(approx_eq(q.up().y.signum(), 1.0));
        assert!(approx_eq(q.right().dot(Vec3::Y), 0.0));
    }
}
