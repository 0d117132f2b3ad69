//! 3D vector

use crate::Vec2;
use crate::math1d::{self, Value};
use std::fmt;

/// A 3D vector for positions and directions
///
/// Equality is exact float comparison, there is no epsilon involved.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: Value,
    pub y: Value,
    pub z: Value,
}

impl_component_ops!(Vec3 { x, y, z });
impl_scalar_ops!(Vec3 { x, y, z });
impl_elementwise_ops!(Vec3 { x, y, z });

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::splat(0.0);
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub const fn new(x: Value, y: Value, z: Value) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: Value) -> Self {
        Self { x: v, y: v, z: v }
    }

    pub const fn from_xy_z(xy: Vec2, z: Value) -> Self {
        Self::new(xy.x, xy.y, z)
    }

    pub const fn from_x_yz(x: Value, yz: Vec2) -> Self {
        Self::new(x, yz.x, yz.y)
    }

    pub const fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub const fn yz(self) -> Vec2 {
        Vec2::new(self.y, self.z)
    }

    pub const fn xz(self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    pub const fn yx(self) -> Vec2 {
        Vec2::new(self.y, self.x)
    }

    pub const fn zy(self) -> Vec2 {
        Vec2::new(self.z, self.y)
    }

    pub const fn zx(self) -> Vec2 {
        Vec2::new(self.z, self.x)
    }

    pub fn dot(self, other: Vec3) -> Value {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length_sqr(self) -> Value {
        self.dot(self)
    }

    pub fn length(self) -> Value {
        self.length_sqr().sqrt()
    }

    /// Unit vector in the same direction, a zero vector is returned unchanged
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len != 0.0 { self / len } else { self }
    }

    pub fn distance(a: Vec3, b: Vec3) -> Value {
        (b - a).length()
    }

    pub fn distance_sqr(a: Vec3, b: Vec3) -> Value {
        (b - a).length_sqr()
    }

    /// Angle in radians between two vectors
    ///
    /// NaN when either vector has zero length.
    pub fn angle(a: Vec3, b: Vec3) -> Value {
        (a.dot(b) / (a.length() * b.length())).acos()
    }

    /// Mirror `v` on the plane with the given normal, which does not need to be normalized
    pub fn reflect(v: Vec3, normal: Vec3) -> Vec3 {
        let numerator = (v * 2.0).dot(normal);
        v - normal * (numerator / normal.length_sqr())
    }

    pub fn lerp(a: Vec3, b: Vec3, t: Value) -> Vec3 {
        Vec3::new(
            math1d::lerp(a.x, b.x, t),
            math1d::lerp(a.y, b.y, t),
            math1d::lerp(a.z, b.z, t),
        )
    }

    /// Spherical interpolation between two unit directions
    pub fn slerp(a: Vec3, b: Vec3, t: Value) -> Vec3 {
        let dot = math1d::clamp(a.dot(b), -1.0, 1.0);
        let theta = dot.acos() * t;
        let offset = (b - a * dot).normalized();
        a * theta.cos() + offset * theta.sin()
    }

    pub fn min(a: Vec3, b: Vec3) -> Vec3 {
        Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
    }

    pub fn max(a: Vec3, b: Vec3) -> Vec3 {
        Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}
