//! Distance joint - keeps two anchor points a fixed distance apart
//!
//! Rigid when `frequency_hz == 0`, otherwise a spring along the axis
//! between the anchors with the same frequency / damping-ratio tuning as
//! the pointer joint.

use serde::{Deserialize, Serialize};

use crate::core::math::{Vec2, PI};
use crate::domain::body::{Body, BodyHandle};
use crate::systems::solver::TimeStep;

use super::jacobian::Jacobian;
use super::{pair_mut, LINEAR_SLOP, MAX_LINEAR_CORRECTION};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceJointDef {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// World anchor on body A
    pub anchor_a: Vec2,
    /// World anchor on body B
    pub anchor_b: Vec2,
    #[serde(default)]
    pub frequency_hz: f32,
    #[serde(default)]
    pub damping_ratio: f32,
}

impl DistanceJointDef {
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, anchor_a: Vec2, anchor_b: Vec2) -> Self {
        Self {
            body_a,
            body_b,
            anchor_a,
            anchor_b,
            frequency_hz: 0.0,
            damping_ratio: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.anchor_a.is_valid() || !self.anchor_b.is_valid() {
            return Err("distance anchors must be finite".to_string());
        }
        if !self.frequency_hz.is_finite() || self.frequency_hz < 0.0 {
            return Err(format!("distance frequencyHz must be >= 0: {}", self.frequency_hz));
        }
        if !self.damping_ratio.is_finite() || self.damping_ratio < 0.0 {
            return Err(format!("distance dampingRatio must be >= 0: {}", self.damping_ratio));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct DistanceJoint {
    body_a: BodyHandle,
    body_b: BodyHandle,
    local_anchor_a: Vec2,
    local_anchor_b: Vec2,
    length: f32,
    frequency_hz: f32,
    damping_ratio: f32,

    /// Unit axis from anchor A to anchor B
    u: Vec2,
    jacobian: Jacobian,
    impulse: f32,
    mass: f32,
    gamma: f32,
    bias: f32,
}

impl DistanceJoint {
    pub fn new(def: &DistanceJointDef, body_a: &Body, body_b: &Body) -> Self {
        Self {
            body_a: def.body_a,
            body_b: def.body_b,
            local_anchor_a: body_a.local_point(def.anchor_a),
            local_anchor_b: body_b.local_point(def.anchor_b),
            length: (def.anchor_b - def.anchor_a).length(),
            frequency_hz: def.frequency_hz,
            damping_ratio: def.damping_ratio,
            u: Vec2::ZERO,
            jacobian: Jacobian::default(),
            impulse: 0.0,
            mass: 0.0,
            gamma: 0.0,
            bias: 0.0,
        }
    }

    pub fn body_a(&self) -> BodyHandle {
        self.body_a
    }

    pub fn body_b(&self) -> BodyHandle {
        self.body_b
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn impulse(&self) -> f32 {
        self.impulse
    }

    pub fn anchor_a(&self, bodies: &[Body]) -> Vec2 {
        bodies[self.body_a.index()].world_point(self.local_anchor_a)
    }

    pub fn anchor_b(&self, bodies: &[Body]) -> Vec2 {
        bodies[self.body_b.index()].world_point(self.local_anchor_b)
    }

    pub fn reaction_force(&self, inv_dt: f32) -> Vec2 {
        self.u * (inv_dt * self.impulse)
    }

    pub fn reaction_torque(&self, _inv_dt: f32) -> f32 {
        0.0
    }

    pub fn init_velocity_constraints(&mut self, bodies: &mut [Body], step: &TimeStep) {
        let (a, b) = pair_mut(bodies, self.body_a, self.body_b);

        let r_a = a.transform().rotate(self.local_anchor_a - a.local_center());
        let r_b = b.transform().rotate(self.local_anchor_b - b.local_center());
        self.u = b.world_center() + r_b - a.world_center() - r_a;

        let current = self.u.length();
        if current > LINEAR_SLOP {
            self.u *= 1.0 / current;
        } else {
            self.u.set_zero();
        }

        let cr_a = r_a.cross(self.u);
        let cr_b = r_b.cross(self.u);
        self.jacobian.set(-self.u, -cr_a, self.u, cr_b);

        let mut inv_mass =
            a.inv_mass + a.inv_inertia * cr_a * cr_a + b.inv_mass + b.inv_inertia * cr_b * cr_b;
        self.mass = if inv_mass != 0.0 { 1.0 / inv_mass } else { 0.0 };

        if self.frequency_hz > 0.0 {
            let c = current - self.length;
            let omega = 2.0 * PI * self.frequency_hz;
            let d = 2.0 * self.mass * self.damping_ratio * omega;
            let k = self.mass * omega * omega;

            let h = step.dt;
            self.gamma = h * (d + h * k);
            self.gamma = if self.gamma != 0.0 { 1.0 / self.gamma } else { 0.0 };
            self.bias = c * h * k * self.gamma;

            inv_mass += self.gamma;
            self.mass = if inv_mass != 0.0 { 1.0 / inv_mass } else { 0.0 };
        } else {
            self.gamma = 0.0;
            self.bias = 0.0;
        }

        if step.warm_starting {
            self.impulse *= step.dt_ratio;
            self.apply(a, b, self.impulse);
        } else {
            self.impulse = 0.0;
        }
    }

    pub fn solve_velocity_constraints(&mut self, bodies: &mut [Body], _step: &TimeStep) {
        let (a, b) = pair_mut(bodies, self.body_a, self.body_b);

        let cdot = self
            .jacobian
            .compute(a.linear_velocity, a.angular_velocity, b.linear_velocity, b.angular_velocity);
        let impulse = -self.mass * (cdot + self.bias + self.gamma * self.impulse);
        self.impulse += impulse;

        self.apply(a, b, impulse);
    }

    pub fn solve_position_constraints(&mut self, bodies: &mut [Body]) -> bool {
        if self.frequency_hz > 0.0 {
            return true;
        }

        let (a, b) = pair_mut(bodies, self.body_a, self.body_b);

        let r_a = a.transform().rotate(self.local_anchor_a - a.local_center());
        let r_b = b.transform().rotate(self.local_anchor_b - b.local_center());
        let mut u = b.world_center() + r_b - a.world_center() - r_a;

        let current = u.normalize();
        let c = (current - self.length).clamp(-MAX_LINEAR_CORRECTION, MAX_LINEAR_CORRECTION);

        let impulse = -self.mass * c;
        let p = u * impulse;

        a.sweep.c -= p * a.inv_mass;
        a.sweep.a -= a.inv_inertia * r_a.cross(p);
        b.sweep.c += p * b.inv_mass;
        b.sweep.a += b.inv_inertia * r_b.cross(p);

        a.synchronize_transform();
        b.synchronize_transform();

        c.abs() < LINEAR_SLOP
    }

    /// Apply `lambda` along the row: `v += M^-1 * J^T * lambda`
    fn apply(&self, a: &mut Body, b: &mut Body, lambda: f32) {
        let j = &self.jacobian;
        a.linear_velocity += j.linear_a * (a.inv_mass * lambda);
        a.angular_velocity += a.inv_inertia * j.angular_a * lambda;
        b.linear_velocity += j.linear_b * (b.inv_mass * lambda);
        b.angular_velocity += b.inv_inertia * j.angular_b * lambda;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::body::BodyDef;
    use crate::systems::solver::integrate;

    const DT: f32 = 1.0 / 60.0;

    /// One solver step for a single joint, mirroring the world loop.
    fn step_once(joint: &mut DistanceJoint, bodies: &mut [Body], gravity: Vec2) {
        let step = TimeStep::new(DT);
        integrate::integrate_velocities(bodies, gravity, &step);
        joint.init_velocity_constraints(bodies, &step);
        for _ in 0..8 {
            joint.solve_velocity_constraints(bodies, &step);
        }
        integrate::integrate_positions(bodies, &step);
        integrate::synchronize_transforms(bodies);
        for _ in 0..3 {
            if joint.solve_position_constraints(bodies) {
                break;
            }
        }
    }

    fn pendulum() -> (Vec<Body>, DistanceJoint) {
        let bodies = vec![
            Body::new(&BodyDef::fixed(0.0, 0.0), 0),
            Body::new(&BodyDef::dynamic(2.0, 0.0, 1.0, 0.1), 1),
        ];
        let def = DistanceJointDef::new(BodyHandle(0), BodyHandle(1), Vec2::ZERO, Vec2::new(2.0, 0.0));
        let joint = DistanceJoint::new(&def, &bodies[0], &bodies[1]);
        (bodies, joint)
    }

    #[test]
    fn rest_length_comes_from_the_anchors() {
        let (_, joint) = pendulum();
        assert!((joint.length() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn rigid_pendulum_keeps_its_length() {
        let (mut bodies, mut joint) = pendulum();
        for i in 0..120 {
            step_once(&mut joint, &mut bodies, Vec2::new(0.0, 10.0));
            if i == 29 {
                // Half a second in it has clearly swung down
                assert!(bodies[1].world_center().y > 0.5);
            }
            let reach = (joint.anchor_b(&bodies) - joint.anchor_a(&bodies)).length();
            assert!((reach - 2.0).abs() < 0.02, "reach drifted to {} at step {}", reach, i);
        }
        assert_eq!(bodies[0].world_center(), Vec2::ZERO);
    }

    #[test]
    fn separating_velocity_is_removed() {
        let (mut bodies, mut joint) = pendulum();
        bodies[1].linear_velocity = Vec2::new(3.0, 0.0);
        let step = TimeStep::new(DT);
        joint.init_velocity_constraints(&mut bodies, &step);
        joint.solve_velocity_constraints(&mut bodies, &step);
        assert!(bodies[1].linear_velocity.x.abs() < 1e-4);
        assert!(joint.reaction_force(step.inv_dt).x < 0.0);
    }

    #[test]
    fn soft_joint_skips_position_correction() {
        let mut bodies = vec![
            Body::new(&BodyDef::fixed(0.0, 0.0), 0),
            Body::new(&BodyDef::dynamic(2.0, 0.0, 1.0, 0.1), 1),
        ];
        let mut def = DistanceJointDef::new(BodyHandle(0), BodyHandle(1), Vec2::ZERO, Vec2::new(1.0, 0.0));
        def.frequency_hz = 2.0;
        def.damping_ratio = 0.5;
        let mut joint = DistanceJoint::new(&def, &bodies[0], &bodies[1]);
        assert!(joint.solve_position_constraints(&mut bodies));
        assert_eq!(bodies[1].world_center(), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn soft_joint_pulls_a_stretched_body_back() {
        let mut bodies = vec![
            Body::new(&BodyDef::fixed(0.0, 0.0), 0),
            Body::new(&BodyDef::dynamic(1.0, 0.0, 1.0, 0.1), 1),
        ];
        let mut def = DistanceJointDef::new(BodyHandle(0), BodyHandle(1), Vec2::ZERO, Vec2::new(1.0, 0.0));
        def.frequency_hz = 4.0;
        def.damping_ratio = 0.5;
        let mut joint = DistanceJoint::new(&def, &bodies[0], &bodies[1]);

        bodies[1].set_transform(Vec2::new(1.5, 0.0), 0.0);
        step_once(&mut joint, &mut bodies, Vec2::ZERO);
        assert!(bodies[1].linear_velocity.x < 0.0);
    }
}
