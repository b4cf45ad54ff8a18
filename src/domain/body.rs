//! Body - the per-body state the solver reads and writes
//!
//! Holds the transform, the motion sweep, velocities and mass data.
//! Shapes and contacts live outside the kernel; a body here is just a
//! mass point with rotational inertia.

use serde::{Deserialize, Serialize};

use crate::core::math::Vec2;
use crate::core::sweep::Sweep;
use crate::core::transform::Transform;

/// Non-owning reference to a body stored in the world
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Body construction parameters.
/// `mass == 0` creates a static body.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDef {
    #[serde(default)]
    pub position: Vec2,
    #[serde(default)]
    pub angle: f32,
    #[serde(default)]
    pub linear_velocity: Vec2,
    #[serde(default)]
    pub angular_velocity: f32,
    #[serde(default)]
    pub mass: f32,
    /// Rotational inertia about the center of mass
    #[serde(default)]
    pub inertia: f32,
    /// Center of mass relative to the body origin
    #[serde(default)]
    pub local_center: Vec2,
    #[serde(default)]
    pub linear_damping: f32,
    #[serde(default)]
    pub angular_damping: f32,
    #[serde(default = "default_gravity_scale")]
    pub gravity_scale: f32,
}

fn default_gravity_scale() -> f32 {
    1.0
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass: 0.0,
            inertia: 0.0,
            local_center: Vec2::ZERO,
            linear_damping: 0.0,
            angular_damping: 0.0,
            gravity_scale: 1.0,
        }
    }
}

impl BodyDef {
    /// Dynamic body at `(x, y)`
    pub fn dynamic(x: f32, y: f32, mass: f32, inertia: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            mass,
            inertia,
            ..Self::default()
        }
    }

    pub fn fixed(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.position.is_valid() || !self.angle.is_finite() {
            return Err(format!(
                "body pose must be finite: position=({}, {}) angle={}",
                self.position.x, self.position.y, self.angle
            ));
        }
        if !self.linear_velocity.is_valid() || !self.angular_velocity.is_finite() {
            return Err("body velocity must be finite".to_string());
        }
        if !self.mass.is_finite() || self.mass < 0.0 {
            return Err(format!("body mass must be >= 0: {}", self.mass));
        }
        if !self.inertia.is_finite() || self.inertia < 0.0 {
            return Err(format!("body inertia must be >= 0: {}", self.inertia));
        }
        if !self.local_center.is_valid() {
            return Err("body localCenter must be finite".to_string());
        }
        if !self.linear_damping.is_finite() || self.linear_damping < 0.0 {
            return Err(format!("body linearDamping must be >= 0: {}", self.linear_damping));
        }
        if !self.angular_damping.is_finite() || self.angular_damping < 0.0 {
            return Err(format!("body angularDamping must be >= 0: {}", self.angular_damping));
        }
        if !self.gravity_scale.is_finite() {
            return Err(format!("body gravityScale must be finite: {}", self.gravity_scale));
        }
        Ok(())
    }
}

/// Rigid body - moves as a single unit
#[derive(Clone, Debug)]
pub struct Body {
    /// Handle value this body was stored under
    pub id: u32,
    xf: Transform,
    pub sweep: Sweep,

    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    /// Accumulated force for the current step (cleared after integration)
    pub force: Vec2,
    pub torque: f32,

    pub mass: f32,
    pub inv_mass: f32,
    /// Rotational inertia about the center of mass
    pub inertia: f32,
    pub inv_inertia: f32,

    pub linear_damping: f32,
    pub angular_damping: f32,
    pub gravity_scale: f32,
}

impl Body {
    pub fn new(def: &BodyDef, id: u32) -> Self {
        let xf = Transform::from_angle(def.position, def.angle);
        let mut sweep = Sweep {
            local_center: def.local_center,
            ..Sweep::default()
        };
        sweep.reset(xf.mul(def.local_center), def.angle);

        let (mass, inv_mass) = if def.mass > 0.0 { (def.mass, 1.0 / def.mass) } else { (0.0, 0.0) };
        // Static bodies never rotate, whatever inertia was requested
        let (inertia, inv_inertia) = if mass > 0.0 && def.inertia > 0.0 {
            (def.inertia, 1.0 / def.inertia)
        } else {
            (0.0, 0.0)
        };

        let is_static = inv_mass == 0.0;
        Self {
            id,
            xf,
            sweep,
            linear_velocity: if is_static { Vec2::ZERO } else { def.linear_velocity },
            angular_velocity: if is_static { 0.0 } else { def.angular_velocity },
            force: Vec2::ZERO,
            torque: 0.0,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
            linear_damping: def.linear_damping,
            angular_damping: def.angular_damping,
            gravity_scale: def.gravity_scale,
        }
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0 && self.inv_inertia == 0.0
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.xf
    }

    /// Body origin in world space
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.xf.position
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.sweep.a
    }

    #[inline]
    pub fn world_center(&self) -> Vec2 {
        self.sweep.c
    }

    #[inline]
    pub fn local_center(&self) -> Vec2 {
        self.sweep.local_center
    }

    pub fn world_point(&self, local: Vec2) -> Vec2 {
        self.xf.mul(local)
    }

    pub fn local_point(&self, world: Vec2) -> Vec2 {
        self.xf.mul_t(world)
    }

    pub fn world_vector(&self, local: Vec2) -> Vec2 {
        self.xf.rotate(local)
    }

    /// Velocity of a world point attached to the body
    pub fn velocity_at(&self, world: Vec2) -> Vec2 {
        self.linear_velocity + Vec2::cross_sv(self.angular_velocity, world - self.sweep.c)
    }

    /// Teleport: the sweep collapses onto the new pose.
    pub fn set_transform(&mut self, position: Vec2, angle: f32) {
        self.xf.set(position, angle);
        let center = self.xf.mul(self.sweep.local_center);
        self.sweep.reset(center, angle);
    }

    /// Rebuild the origin transform from the sweep end pose.
    pub fn synchronize_transform(&mut self) {
        self.xf.r.set_angle(self.sweep.a);
        self.xf.position = self.sweep.c - self.xf.r.mul_v(self.sweep.local_center);
    }

    /// Rewind to time `t` of the current step window (time of impact).
    /// The sweep now starts at `t` and the body sits at that pose.
    pub fn advance(&mut self, t: f32) {
        self.sweep.advance(t);
        self.sweep.c = self.sweep.c0;
        self.sweep.a = self.sweep.a0;
        self.synchronize_transform();
    }

    /// Force at the center of mass, applied at the next step
    pub fn apply_force(&mut self, force: Vec2) {
        if self.is_static() {
            return;
        }
        self.force += force;
    }

    /// Force at a world point: also produces torque about the center of mass
    pub fn apply_force_at(&mut self, force: Vec2, point: Vec2) {
        if self.is_static() {
            return;
        }
        self.force += force;
        self.torque += (point - self.sweep.c).cross(force);
    }

    pub fn apply_torque(&mut self, torque: f32) {
        if self.is_static() {
            return;
        }
        self.torque += torque;
    }

    /// Immediate velocity change from an impulse at a world point
    pub fn apply_linear_impulse(&mut self, impulse: Vec2, point: Vec2) {
        if self.is_static() {
            return;
        }
        self.linear_velocity += impulse * self.inv_mass;
        self.angular_velocity += self.inv_inertia * (point - self.sweep.c).cross(impulse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_mass_body_is_static() {
        let body = Body::new(&BodyDef::fixed(1.0, 2.0), 0);
        assert!(body.is_static());
        assert_eq!(body.inv_mass, 0.0);
        assert_eq!(body.inv_inertia, 0.0);
        assert_eq!(body.world_center(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn sweep_starts_collapsed_on_the_center_of_mass() {
        let def = BodyDef {
            position: Vec2::new(3.0, 0.0),
            angle: std::f32::consts::FRAC_PI_2,
            local_center: Vec2::new(1.0, 0.0),
            mass: 2.0,
            inertia: 0.5,
            ..BodyDef::default()
        };
        let body = Body::new(&def, 4);
        assert!((body.world_center() - Vec2::new(3.0, 1.0)).length() < 1e-6);
        assert_eq!(body.sweep.c0, body.sweep.c);
        assert_eq!(body.sweep.t0, 0.0);
        assert_eq!(body.inv_mass, 0.5);
        assert_eq!(body.inv_inertia, 2.0);
    }

    #[test]
    fn synchronize_transform_follows_sweep_end() {
        let mut def = BodyDef::dynamic(0.0, 0.0, 1.0, 1.0);
        def.local_center = Vec2::new(0.5, 0.0);
        let mut body = Body::new(&def, 0);
        body.sweep.c = Vec2::new(2.0, 2.0);
        body.sweep.a = std::f32::consts::PI;
        body.synchronize_transform();
        // Origin sits half a unit behind the center after the half turn
        assert!((body.position() - Vec2::new(2.5, 2.0)).length() < 1e-5);
        assert!((body.world_point(def.local_center) - body.world_center()).length() < 1e-5);
    }

    #[test]
    fn advance_rewinds_to_the_time_of_impact() {
        let mut body = Body::new(&BodyDef::dynamic(0.0, 0.0, 1.0, 1.0), 0);
        body.sweep.c = Vec2::new(4.0, 0.0);
        body.sweep.a = 1.0;
        body.advance(0.25);
        assert_eq!(body.sweep.t0, 0.25);
        assert!((body.world_center() - Vec2::new(1.0, 0.0)).length() < 1e-6);
        assert!((body.angle() - 0.25).abs() < 1e-6);
        assert!((body.position() - Vec2::new(1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn off_center_impulse_spins_the_body() {
        let mut body = Body::new(&BodyDef::dynamic(0.0, 0.0, 2.0, 1.0), 0);
        body.apply_linear_impulse(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0));
        assert_eq!(body.linear_velocity, Vec2::new(0.0, 0.5));
        assert_eq!(body.angular_velocity, 1.0);
    }

    #[test]
    fn validate_rejects_bad_mass_and_pose() {
        assert!(BodyDef::dynamic(0.0, 0.0, -1.0, 1.0).validate().is_err());
        assert!(BodyDef::dynamic(f32::NAN, 0.0, 1.0, 1.0).validate().is_err());
        assert!(BodyDef::dynamic(0.0, 0.0, 1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_finite_damping_and_scale() {
        let base = BodyDef::dynamic(0.0, 0.0, 1.0, 1.0);

        let def = BodyDef { linear_damping: f32::NAN, ..base.clone() };
        assert!(def.validate().is_err());
        let def = BodyDef { linear_damping: -0.5, ..base.clone() };
        assert!(def.validate().is_err());
        let def = BodyDef { angular_damping: f32::NAN, ..base.clone() };
        assert!(def.validate().is_err());
        let def = BodyDef { angular_damping: f32::INFINITY, ..base.clone() };
        assert!(def.validate().is_err());
        let def = BodyDef { gravity_scale: f32::NAN, ..base.clone() };
        assert!(def.validate().is_err());
        let def = BodyDef { local_center: Vec2::new(f32::NAN, 0.0), ..base.clone() };
        assert!(def.validate().is_err());

        // Negative gravity scale is a valid buoyant body
        let def = BodyDef { gravity_scale: -1.0, ..base };
        assert!(def.validate().is_ok());
    }

    #[test]
    fn body_def_parses_from_camel_case_json() {
        let def: BodyDef = serde_json::from_str(
            r#"{"position":{"x":1.0,"y":2.0},"mass":3.0,"inertia":0.5,"gravityScale":0.0}"#,
        )
        .expect("body def should parse");
        assert_eq!(def.position, Vec2::new(1.0, 2.0));
        assert_eq!(def.mass, 3.0);
        assert_eq!(def.gravity_scale, 0.0);
        assert_eq!(def.linear_damping, 0.0);
    }
}
