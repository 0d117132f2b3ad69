//! Scalar utilities shared by all vector, quaternion and matrix types
//!
//! The scalar type is selected at compile time: `f32` by default, `f64`
//! when the `double` feature is enabled. Every type in this crate stores
//! [`Value`] so switching precision is a rebuild, never a runtime cost.

#[cfg(not(feature = "double"))]
pub type Value = f32;
#[cfg(feature = "double")]
pub type Value = f64;

/// Mathematical constants in the configured precision
#[cfg(not(feature = "double"))]
pub use std::f32::consts;
#[cfg(feature = "double")]
pub use std::f64::consts;

pub const PI: Value = consts::PI;
/// Multiply degrees by this to get radians
pub const TO_RADS: Value = PI / 180.0;
/// Multiply radians by this to get degrees
pub const TO_DEGS: Value = 180.0 / PI;

/// Clamp `v` into `[low, high]` as `min(max(low, v), high)`
///
/// Follows IEEE `fmax`/`fmin`: a NaN `v` yields `low`, and `low > high`
/// yields `high` instead of panicking like [`f32::clamp`] would.
#[inline]
pub fn clamp(v: Value, low: Value, high: Value) -> Value {
    low.max(v).min(high)
}

/// Linear interpolation, `t` outside `[0, 1]` extrapolates
#[inline]
pub fn lerp(a: Value, b: Value, t: Value) -> Value {
    (1.0 - t) * a + b * t
}
