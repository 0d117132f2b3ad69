//!
//! M3d is a small vector, matrix and quaternion library for graphics and game engines.
//!
//! It provides 2D/3D/4D vectors, 3x3/4x4 row-major matrices and quaternions with
//! the operations needed to build transforms, projections and orientations.
//!
//! All types are plain `Copy` values. The scalar type is [`Value`], `f32` unless
//! the `double` feature selects `f64`.
//!
//! Equality is always exact float comparison. Degenerate input follows IEEE
//! semantics and produces NaN or infinity, only a few documented geometric
//! edge cases are guarded.

#[macro_use]
mod macros;

pub mod math1d;

mod mat3x3;
mod mat4x4;
mod quat;
mod vec2;
mod vec3;
mod vec4;

pub use mat3x3::Mat3x3;
pub use mat4x4::Mat4x4;
pub use math1d::{Value, clamp, lerp};
pub use quat::Quat;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
