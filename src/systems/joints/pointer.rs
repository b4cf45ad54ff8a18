//! Pointer joint - soft spring that drags one body point toward a target
//!
//! The anchor is fixed in body B's frame. Each step the joint pushes the
//! anchor toward a world-space target with a spring-damper law (frequency
//! + damping ratio) expressed as a velocity constraint. The accumulated
//! value is a force; its magnitude never exceeds `max_force`.
//!
//! Body A is only a reference (usually a static ground body) and is never
//! touched by the solver.

use serde::{Deserialize, Serialize};

use crate::core::math::{Mat22, Vec2, PI};
use crate::domain::body::{Body, BodyHandle};
use crate::systems::solver::TimeStep;

/// Per-step decay applied to the dragged body's spin
const ANGULAR_DAMPING: f32 = 0.98;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerJointDef {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Initial target; also where the anchor is attached on body B
    pub target: Vec2,
    pub max_force: f32,
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f32,
    #[serde(default = "default_damping_ratio")]
    pub damping_ratio: f32,
    /// Step length the softness coefficients are tuned for.
    /// `None` means the world's step length.
    #[serde(default)]
    pub time_step: Option<f32>,
}

fn default_frequency_hz() -> f32 {
    5.0
}

fn default_damping_ratio() -> f32 {
    0.7
}

/// Step length used when a joint is built outside a world without one
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

impl PointerJointDef {
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, target: Vec2, max_force: f32) -> Self {
        Self {
            body_a,
            body_b,
            target,
            max_force,
            frequency_hz: default_frequency_hz(),
            damping_ratio: default_damping_ratio(),
            time_step: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.target.is_valid() {
            return Err("pointer target must be finite".to_string());
        }
        if !self.max_force.is_finite() || self.max_force <= 0.0 {
            return Err(format!("pointer maxForce must be > 0: {}", self.max_force));
        }
        if !self.frequency_hz.is_finite() || self.frequency_hz <= 0.0 {
            return Err(format!("pointer frequencyHz must be > 0: {}", self.frequency_hz));
        }
        if !self.damping_ratio.is_finite() || self.damping_ratio < 0.0 {
            return Err(format!("pointer dampingRatio must be >= 0: {}", self.damping_ratio));
        }
        if let Some(time_step) = self.time_step {
            if !time_step.is_finite() || time_step <= 0.0 {
                return Err(format!("pointer timeStep must be > 0: {}", time_step));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct PointerJoint {
    body_a: BodyHandle,
    body_b: BodyHandle,
    /// Attachment point in body B's frame
    local_anchor: Vec2,
    target: Vec2,
    /// Accumulated force, warm-started across steps
    impulse: Vec2,
    max_force: f32,

    /// Effective mass, `K^-1`
    mass: Mat22,
    /// Position error at init time
    c: Vec2,
    /// Softness
    gamma: f32,
    /// Fraction of the position error fed back per step
    beta: f32,
}

impl PointerJoint {
    /// Softness is tuned once here from body B's mass; retuning means rebuilding the joint.
    pub fn new(def: &PointerJointDef, body_b: &Body) -> Self {
        let mass = body_b.mass;
        let omega = 2.0 * PI * def.frequency_hz;
        let d = 2.0 * mass * def.damping_ratio * omega;
        let time_step = def.time_step.unwrap_or(DEFAULT_TIME_STEP);
        let k = time_step * mass * (omega * omega);

        Self {
            body_a: def.body_a,
            body_b: def.body_b,
            local_anchor: body_b.local_point(def.target),
            target: def.target,
            impulse: Vec2::ZERO,
            max_force: def.max_force,
            mass: Mat22::ZERO,
            c: Vec2::ZERO,
            gamma: 1.0 / (d + k),
            beta: k / (d + k),
        }
    }

    pub fn body_a(&self) -> BodyHandle {
        self.body_a
    }

    pub fn body_b(&self) -> BodyHandle {
        self.body_b
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn local_anchor(&self) -> Vec2 {
        self.local_anchor
    }

    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    /// Accumulated force from the last solve
    pub fn impulse(&self) -> Vec2 {
        self.impulse
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn beta(&self) -> f32 {
        self.beta
    }

    pub fn anchor_a(&self) -> Vec2 {
        self.target
    }

    pub fn anchor_b(&self, bodies: &[Body]) -> Vec2 {
        bodies[self.body_b.index()].world_point(self.local_anchor)
    }

    /// The accumulated value is already a force
    pub fn reaction_force(&self, _inv_dt: f32) -> Vec2 {
        self.impulse
    }

    pub fn reaction_torque(&self, _inv_dt: f32) -> f32 {
        0.0
    }

    /// Lever arm from body B's center of mass to the anchor, in world space
    fn lever_arm(&self, b: &Body) -> Vec2 {
        b.transform().rotate(self.local_anchor - b.local_center())
    }

    pub fn init_velocity_constraints(&mut self, bodies: &mut [Body], step: &TimeStep) {
        let b = &mut bodies[self.body_b.index()];
        let r = self.lever_arm(b);

        // K = inv_mass * I + inv_i * [[r.y^2, -r.x*r.y], [-r.x*r.y, r.x^2]] + gamma * I
        let inv_mass = b.inv_mass;
        let inv_i = b.inv_inertia;

        let k1 = Mat22::new(Vec2::new(inv_mass, 0.0), Vec2::new(0.0, inv_mass));
        let k2 = Mat22::new(
            Vec2::new(inv_i * r.y * r.y, -inv_i * r.x * r.y),
            Vec2::new(-inv_i * r.x * r.y, inv_i * r.x * r.x),
        );

        let mut k = k1 + k2;
        k.col1.x += self.gamma;
        k.col2.y += self.gamma;

        self.mass = k.inverse();
        self.c = b.world_center() + r - self.target;

        b.angular_velocity *= ANGULAR_DAMPING;

        if step.warm_starting {
            let p = self.impulse * step.dt;
            b.linear_velocity += p * inv_mass;
            b.angular_velocity += inv_i * r.cross(p);
        } else {
            self.impulse.set_zero();
        }
    }

    pub fn solve_velocity_constraints(&mut self, bodies: &mut [Body], step: &TimeStep) {
        let b = &mut bodies[self.body_b.index()];
        let r = self.lever_arm(b);

        // Cdot = v + cross(w, r)
        let cdot = b.linear_velocity + Vec2::cross_sv(b.angular_velocity, r);
        let bias = self.c * (self.beta * step.inv_dt);
        let softness = self.impulse * (self.gamma * step.dt);
        let force = -step.inv_dt * self.mass.mul_v(cdot + bias + softness);

        let old_force = self.impulse;
        self.impulse += force;
        let length = self.impulse.length();
        if length > self.max_force {
            self.impulse *= self.max_force / length;
        }
        let force = self.impulse - old_force;

        let p = force * step.dt;
        b.linear_velocity += p * b.inv_mass;
        b.angular_velocity += b.inv_inertia * r.cross(p);
    }

    /// Fully soft: nothing to correct at the position level.
    pub fn solve_position_constraints(&mut self, _bodies: &mut [Body]) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::body::BodyDef;

    const DT: f32 = 1.0 / 60.0;

    fn ground_and_box(mass: f32, inertia: f32) -> Vec<Body> {
        vec![
            Body::new(&BodyDef::fixed(0.0, 0.0), 0),
            Body::new(&BodyDef::dynamic(0.0, 0.0, mass, inertia), 1),
        ]
    }

    fn joint_at(bodies: &[Body], grab: Vec2, max_force: f32) -> PointerJoint {
        let mut def = PointerJointDef::new(BodyHandle(0), BodyHandle(1), grab, max_force);
        def.frequency_hz = 5.0;
        def.damping_ratio = 0.7;
        def.time_step = Some(DT);
        PointerJoint::new(&def, &bodies[1])
    }

    fn run_step(joint: &mut PointerJoint, bodies: &mut [Body]) {
        let step = TimeStep::new(DT);
        joint.init_velocity_constraints(bodies, &step);
        joint.solve_velocity_constraints(bodies, &step);
    }

    #[test]
    fn softness_coefficients_follow_frequency_and_damping() {
        let bodies = ground_and_box(1.0, 1.0);
        let joint = joint_at(&bodies, Vec2::ZERO, 100.0);

        let omega = 2.0 * PI * 5.0;
        let d = 2.0 * 0.7 * omega;
        let k = DT * omega * omega;
        assert!((joint.gamma() - 1.0 / (d + k)).abs() < 1e-6);
        assert!((joint.beta() - k / (d + k)).abs() < 1e-6);
        assert!(joint.beta() > 0.0 && joint.beta() < 1.0);
    }

    #[test]
    fn anchor_is_attached_where_the_body_was_grabbed() {
        let mut bodies = ground_and_box(1.0, 1.0);
        bodies[1].set_transform(Vec2::new(2.0, 1.0), 0.5);
        let grab = Vec2::new(2.5, 1.5);
        let joint = joint_at(&bodies, grab, 100.0);
        assert!((joint.anchor_b(&bodies) - grab).length() < 1e-5);
        assert_eq!(joint.anchor_a(), grab);
    }

    #[test]
    fn unit_box_is_pulled_toward_the_target() {
        let mut bodies = ground_and_box(1.0, 1.0);
        let max_force = 1000.0;
        let mut joint = joint_at(&bodies, Vec2::ZERO, max_force);
        joint.set_target(Vec2::new(1.0, 0.0));

        run_step(&mut joint, &mut bodies);

        let v = bodies[1].linear_velocity;
        assert!(v.x > 0.0);
        assert!(v.length() <= max_force * DT / bodies[1].mass + 1e-5);
        assert!(joint.impulse().length() <= max_force);
    }

    #[test]
    fn off_center_anchor_moves_toward_target() {
        let mut bodies = ground_and_box(2.0, 0.5);
        let max_force = 500.0;
        let mut joint = joint_at(&bodies, Vec2::new(0.5, 0.25), max_force);
        let target = Vec2::new(-0.5, 1.25);
        joint.set_target(target);

        run_step(&mut joint, &mut bodies);

        assert!(joint.impulse().length() <= max_force + 1e-3);
        let anchor = joint.anchor_b(&bodies);
        let anchor_velocity = bodies[1].velocity_at(anchor);
        assert!(anchor_velocity.dot(target - anchor) > 0.0);
    }

    #[test]
    fn saturated_force_keeps_unclamped_direction() {
        let mut free_bodies = ground_and_box(1.0, 0.25);
        let mut clamped_bodies = free_bodies.clone();
        let grab = Vec2::new(0.3, -0.2);
        let target = Vec2::new(40.0, 30.0);

        let mut free = joint_at(&free_bodies, grab, 1.0e9);
        let mut clamped = joint_at(&clamped_bodies, grab, 0.5);
        free.set_target(target);
        clamped.set_target(target);

        run_step(&mut free, &mut free_bodies);
        run_step(&mut clamped, &mut clamped_bodies);

        let clamped_force = clamped.impulse();
        assert!((clamped_force.length() - 0.5).abs() < 1e-5);

        let a = free.impulse().normalized();
        let b = clamped_force.normalized();
        assert!(a.dot(b) > 0.99999);
    }

    #[test]
    fn repeated_solves_stay_within_max_force() {
        let mut bodies = ground_and_box(1.0, 1.0);
        let mut joint = joint_at(&bodies, Vec2::ZERO, 20.0);
        joint.set_target(Vec2::new(-3.0, 4.0));

        let step = TimeStep::new(DT);
        joint.init_velocity_constraints(&mut bodies, &step);
        for _ in 0..10 {
            joint.solve_velocity_constraints(&mut bodies, &step);
            assert!(joint.impulse().length() <= 20.0 + 1e-4);
        }
        // Saturated: the body gained exactly max_force * dt of momentum
        assert!((bodies[1].linear_velocity.length() - 20.0 * DT).abs() < 1e-4);
    }

    #[test]
    fn warm_start_reapplies_previous_force() {
        let mut bodies = ground_and_box(1.0, 1.0);
        let mut joint = joint_at(&bodies, Vec2::ZERO, 1000.0);
        joint.set_target(Vec2::new(1.0, 0.0));
        run_step(&mut joint, &mut bodies);

        let carried = joint.impulse();
        bodies[1].linear_velocity = Vec2::ZERO;
        bodies[1].angular_velocity = 0.0;

        let step = TimeStep::new(DT);
        joint.init_velocity_constraints(&mut bodies, &step);
        let expected = carried * (DT * bodies[1].inv_mass);
        assert!((bodies[1].linear_velocity - expected).length() < 1e-5);

        let mut cold = step;
        cold.warm_starting = false;
        bodies[1].linear_velocity = Vec2::ZERO;
        joint.init_velocity_constraints(&mut bodies, &cold);
        assert_eq!(joint.impulse(), Vec2::ZERO);
        assert_eq!(bodies[1].linear_velocity, Vec2::ZERO);
    }

    #[test]
    fn init_damps_spin() {
        let mut bodies = ground_and_box(1.0, 1.0);
        bodies[1].angular_velocity = 1.0;
        let mut joint = joint_at(&bodies, Vec2::ZERO, 10.0);
        let step = TimeStep::new(DT);
        joint.init_velocity_constraints(&mut bodies, &step);
        assert!((bodies[1].angular_velocity - ANGULAR_DAMPING).abs() < 1e-6);
    }

    #[test]
    fn position_phase_always_succeeds() {
        let mut bodies = ground_and_box(1.0, 1.0);
        let mut joint = joint_at(&bodies, Vec2::ZERO, 10.0);
        joint.set_target(Vec2::new(100.0, 0.0));
        let before = bodies[1].world_center();
        assert!(joint.solve_position_constraints(&mut bodies));
        assert_eq!(bodies[1].world_center(), before);
    }

    #[test]
    fn ground_body_is_never_touched() {
        let mut bodies = ground_and_box(1.0, 1.0);
        let mut joint = joint_at(&bodies, Vec2::ZERO, 1000.0);
        joint.set_target(Vec2::new(2.0, -1.0));
        run_step(&mut joint, &mut bodies);
        assert_eq!(bodies[0].linear_velocity, Vec2::ZERO);
        assert_eq!(bodies[0].angular_velocity, 0.0);
    }
}
