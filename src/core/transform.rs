//! Transform - position + rotation frame of a body
//!
//! The rotation is always built from an angle, so its columns stay
//! orthonormal and `mul_t` can use the transpose as the inverse.

use crate::core::math::{Mat22, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub r: Mat22,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec2::ZERO,
        r: Mat22::IDENTITY,
    };

    pub fn new(position: Vec2, r: Mat22) -> Self {
        Self { position, r }
    }

    pub fn from_angle(position: Vec2, angle: f32) -> Self {
        Self { position, r: Mat22::from_angle(angle) }
    }

    pub fn set(&mut self, position: Vec2, angle: f32) {
        self.position = position;
        self.r.set_angle(angle);
    }

    pub fn set_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    pub fn angle(&self) -> f32 {
        self.r.angle()
    }

    /// Local point -> world point
    #[inline]
    pub fn mul(&self, v: Vec2) -> Vec2 {
        self.position + self.r.mul_v(v)
    }

    /// World point -> local point
    #[inline]
    pub fn mul_t(&self, v: Vec2) -> Vec2 {
        self.r.mul_tv(v - self.position)
    }

    /// Local direction -> world direction (no translation)
    #[inline]
    pub fn rotate(&self, v: Vec2) -> Vec2 {
        self.r.mul_v(v)
    }

    #[inline]
    pub fn inv_rotate(&self, v: Vec2) -> Vec2 {
        self.r.mul_tv(v)
    }
}
