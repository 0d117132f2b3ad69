//! 4D vector in homogeneous coordinates

use crate::Vec3;
use crate::math1d::Value;
use std::fmt;

/// A homogeneous coordinate carrier
///
/// By convention `w` is 1 for points and 0 for directions, nothing enforces it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec4 {
    pub x: Value,
    pub y: Value,
    pub z: Value,
    pub w: Value,
}

impl_component_ops!(Vec4 { x, y, z, w });
impl_scalar_ops!(Vec4 { x, y, z, w });
impl_elementwise_ops!(Vec4 { x, y, z, w });

impl Vec4 {
    pub const ZERO: Vec4 = Vec4::splat(0.0);

    pub const fn new(x: Value, y: Value, z: Value, w: Value) -> Self {
        Self { x, y, z, w }
    }

    pub const fn splat(v: Value) -> Self {
        Self::new(v, v, v, v)
    }

    /// A point, `w` is set to 1
    pub const fn from_vec3(v: Vec3) -> Self {
        Self::from_vec3_w(v, 1.0)
    }

    pub const fn from_vec3_w(v: Vec3, w: Value) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn dot(self, other: Vec4) -> Value {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn length_sqr(self) -> Value {
        self.dot(self)
    }

    pub fn length(self) -> Value {
        self.length_sqr().sqrt()
    }

    /// Unlike the 2D and 3D vectors a zero vector is not guarded and yields NaN
    pub fn normalized(self) -> Self {
        self / self.length()
    }
}

impl From<Vec3> for Vec4 {
    fn from(v: Vec3) -> Self {
        Vec4::from_vec3(v)
    }
}

impl fmt::Display for Vec4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.z, self.w)
    }
}
