//! Weld joint - glues two bodies together at a shared anchor
//!
//! Three rows solved as one block: the anchor point (x, y) and the
//! relative angle. The block is solved with `Mat33::solve33` both at the
//! velocity and at the position level.

use serde::{Deserialize, Serialize};

use crate::core::math::{Mat33, Vec2, Vec3};
use crate::domain::body::{Body, BodyHandle};
use crate::systems::solver::TimeStep;

use super::{pair_mut, ANGULAR_SLOP, LINEAR_SLOP};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeldJointDef {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Shared world anchor
    pub anchor: Vec2,
}

impl WeldJointDef {
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, anchor: Vec2) -> Self {
        Self { body_a, body_b, anchor }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.anchor.is_valid() {
            return Err("weld anchor must be finite".to_string());
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct WeldJoint {
    body_a: BodyHandle,
    body_b: BodyHandle,
    local_anchor_a: Vec2,
    local_anchor_b: Vec2,
    reference_angle: f32,

    /// Accumulated (point x, point y, angle) impulse
    impulse: Vec3,
    /// Constraint block K (solved, never inverted)
    mass: Mat33,
}

/// Point + angle block for lever arms `r_a`, `r_b`
fn block_matrix(a: &Body, b: &Body, r_a: Vec2, r_b: Vec2) -> Mat33 {
    let (m_a, m_b) = (a.inv_mass, b.inv_mass);
    let (i_a, i_b) = (a.inv_inertia, b.inv_inertia);

    let col1 = Vec3::new(
        m_a + m_b + r_a.y * r_a.y * i_a + r_b.y * r_b.y * i_b,
        -r_a.y * r_a.x * i_a - r_b.y * r_b.x * i_b,
        -r_a.y * i_a - r_b.y * i_b,
    );
    let col2 = Vec3::new(
        col1.y,
        m_a + m_b + r_a.x * r_a.x * i_a + r_b.x * r_b.x * i_b,
        r_a.x * i_a + r_b.x * i_b,
    );
    let col3 = Vec3::new(col1.z, col2.z, i_a + i_b);
    Mat33::new(col1, col2, col3)
}

impl WeldJoint {
    pub fn new(def: &WeldJointDef, body_a: &Body, body_b: &Body) -> Self {
        Self {
            body_a: def.body_a,
            body_b: def.body_b,
            local_anchor_a: body_a.local_point(def.anchor),
            local_anchor_b: body_b.local_point(def.anchor),
            reference_angle: body_b.angle() - body_a.angle(),
            impulse: Vec3::ZERO,
            mass: Mat33::ZERO,
        }
    }

    pub fn body_a(&self) -> BodyHandle {
        self.body_a
    }

    pub fn body_b(&self) -> BodyHandle {
        self.body_b
    }

    pub fn reference_angle(&self) -> f32 {
        self.reference_angle
    }

    pub fn anchor_a(&self, bodies: &[Body]) -> Vec2 {
        bodies[self.body_a.index()].world_point(self.local_anchor_a)
    }

    pub fn anchor_b(&self, bodies: &[Body]) -> Vec2 {
        bodies[self.body_b.index()].world_point(self.local_anchor_b)
    }

    pub fn reaction_force(&self, inv_dt: f32) -> Vec2 {
        Vec2::new(self.impulse.x, self.impulse.y) * inv_dt
    }

    pub fn reaction_torque(&self, inv_dt: f32) -> f32 {
        inv_dt * self.impulse.z
    }

    fn lever_arms(&self, a: &Body, b: &Body) -> (Vec2, Vec2) {
        (
            a.transform().rotate(self.local_anchor_a - a.local_center()),
            b.transform().rotate(self.local_anchor_b - b.local_center()),
        )
    }

    pub fn init_velocity_constraints(&mut self, bodies: &mut [Body], step: &TimeStep) {
        let (a, b) = pair_mut(bodies, self.body_a, self.body_b);
        let (r_a, r_b) = self.lever_arms(a, b);

        self.mass = block_matrix(a, b, r_a, r_b);

        if step.warm_starting {
            self.impulse = self.impulse * step.dt_ratio;
            apply(a, b, r_a, r_b, self.impulse);
        } else {
            self.impulse.set_zero();
        }
    }

    pub fn solve_velocity_constraints(&mut self, bodies: &mut [Body], _step: &TimeStep) {
        let (a, b) = pair_mut(bodies, self.body_a, self.body_b);
        let (r_a, r_b) = self.lever_arms(a, b);

        let cdot1 = b.linear_velocity + Vec2::cross_sv(b.angular_velocity, r_b)
            - a.linear_velocity
            - Vec2::cross_sv(a.angular_velocity, r_a);
        let cdot2 = b.angular_velocity - a.angular_velocity;
        let cdot = Vec3::new(cdot1.x, cdot1.y, cdot2);

        let impulse = self.mass.solve33(-cdot);
        self.impulse += impulse;

        apply(a, b, r_a, r_b, impulse);
    }

    pub fn solve_position_constraints(&mut self, bodies: &mut [Body]) -> bool {
        let (a, b) = pair_mut(bodies, self.body_a, self.body_b);
        let (r_a, r_b) = self.lever_arms(a, b);

        let c1 = b.world_center() + r_b - a.world_center() - r_a;
        let c2 = b.sweep.a - a.sweep.a - self.reference_angle;

        let position_error = c1.length();
        let angular_error = c2.abs();

        let k = block_matrix(a, b, r_a, r_b);
        let impulse = k.solve33(-Vec3::new(c1.x, c1.y, c2));
        let p = Vec2::new(impulse.x, impulse.y);

        a.sweep.c -= p * a.inv_mass;
        a.sweep.a -= a.inv_inertia * (r_a.cross(p) + impulse.z);
        b.sweep.c += p * b.inv_mass;
        b.sweep.a += b.inv_inertia * (r_b.cross(p) + impulse.z);

        a.synchronize_transform();
        b.synchronize_transform();

        position_error <= LINEAR_SLOP && angular_error <= ANGULAR_SLOP
    }
}

/// Apply a (point, angle) impulse to both bodies
fn apply(a: &mut Body, b: &mut Body, r_a: Vec2, r_b: Vec2, impulse: Vec3) {
    let p = Vec2::new(impulse.x, impulse.y);

    a.linear_velocity -= p * a.inv_mass;
    a.angular_velocity -= a.inv_inertia * (r_a.cross(p) + impulse.z);

    b.linear_velocity += p * b.inv_mass;
    b.angular_velocity += b.inv_inertia * (r_b.cross(p) + impulse.z);
}
