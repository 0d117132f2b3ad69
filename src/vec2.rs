//! 2D vector

use crate::math1d::{self, Value};
use std::fmt;

/// A 2D vector
///
/// Equality is exact float comparison, there is no epsilon involved.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: Value,
    pub y: Value,
}

impl_component_ops!(Vec2 { x, y });
impl_scalar_ops!(Vec2 { x, y });
impl_elementwise_ops!(Vec2 { x, y });

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::splat(0.0);

    pub const fn new(x: Value, y: Value) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: Value) -> Self {
        Self { x: v, y: v }
    }

    pub fn dot(self, other: Vec2) -> Value {
        self.x * other.x + self.y * other.y
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

    pub fn distance(a: Vec2, b: Vec2) -> Value {
        (b - a).length()
    }

    pub fn distance_sqr(a: Vec2, b: Vec2) -> Value {
        (b - a).length_sqr()
    }

    /// Angle in radians between two vectors
    ///
    /// NaN when either vector has zero length.
    pub fn angle(a: Vec2, b: Vec2) -> Value {
        (a.dot(b) / (a.length() * b.length())).acos()
    }

    /// Mirror `v` on the line with the given normal, which does not need to be normalized
    pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
        let numerator = (v * 2.0).dot(normal);
        v - normal * (numerator / normal.length_sqr())
    }

    pub fn lerp(a: Vec2, b: Vec2, t: Value) -> Vec2 {
        Vec2::new(math1d::lerp(a.x, b.x, t), math1d::lerp(a.y, b.y, t))
    }

    /// Spherical interpolation between two unit directions
    pub fn slerp(a: Vec2, b: Vec2, t: Value) -> Vec2 {
        // rounding can push the dot product of unit vectors just outside acos' domain
        let dot = math1d::clamp(a.dot(b), -1.0, 1.0);
        let theta = dot.acos() * t;
        let offset = (b - a * dot).normalized();
        a * theta.cos() + offset * theta.sin()
    }

    pub fn min(a: Vec2, b: Vec2) -> Vec2 {
        Vec2::new(a.x.min(b.x), a.y.min(b.y))
    }

    pub fn max(a: Vec2, b: Vec2) -> Vec2 {
        Vec2::new(a.x.max(b.x), a.y.max(b.y))
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
