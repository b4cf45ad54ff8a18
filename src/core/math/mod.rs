//! Linear algebra primitives for the rigid body kernel
//!
//! Column-major 2x2 / 3x3 matrices and their vectors. Singular matrices
//! never panic: inverses and solves return zero so the solver loop keeps
//! running.

mod vec2;
mod vec3;
mod mat22;
mod mat33;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use mat22::Mat22;
pub use mat33::Mat33;

pub const PI: f32 = std::f32::consts::PI;
