//! Per-body integration passes
//!
//! Each pass touches one body at a time and never reads another body,
//! so the work can be split across threads with Rayon when the
//! `parallel` feature is on. Joint solving stays serial (see `joints`).

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::math::{Vec2, PI};
use crate::domain::body::Body;

use super::TimeStep;

/// Largest center-of-mass travel allowed in one step
pub const MAX_TRANSLATION: f32 = 2.0;
/// Largest rotation allowed in one step (radians)
pub const MAX_ROTATION: f32 = 0.5 * PI;

/// Forces + gravity -> velocities. Also opens a new sweep window at the
/// current pose and clears the force accumulators.
pub fn integrate_velocities(bodies: &mut [Body], gravity: Vec2, step: &TimeStep) {
    #[cfg(feature = "parallel")]
    {
        bodies
            .par_iter_mut()
            .for_each(|body| integrate_body_velocity(body, gravity, step));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for body in bodies.iter_mut() {
            integrate_body_velocity(body, gravity, step);
        }
    }
}

/// Velocities -> sweep end pose, with per-step travel limits.
pub fn integrate_positions(bodies: &mut [Body], step: &TimeStep) {
    #[cfg(feature = "parallel")]
    {
        bodies
            .par_iter_mut()
            .for_each(|body| integrate_body_position(body, step));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for body in bodies.iter_mut() {
            integrate_body_position(body, step);
        }
    }
}

/// Rebuild every body transform from its sweep end pose.
pub fn synchronize_transforms(bodies: &mut [Body]) {
    #[cfg(feature = "parallel")]
    {
        bodies.par_iter_mut().for_each(|body| body.synchronize_transform());
    }
    #[cfg(not(feature = "parallel"))]
    {
        for body in bodies.iter_mut() {
            body.synchronize_transform();
        }
    }
}

/// Rewind every body to time `t` of the step window (sub-stepping after a time of impact).
pub fn advance_bodies(bodies: &mut [Body], t: f32) {
    #[cfg(feature = "parallel")]
    {
        bodies.par_iter_mut().for_each(|body| body.advance(t));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for body in bodies.iter_mut() {
            body.advance(t);
        }
    }
}

fn integrate_body_velocity(body: &mut Body, gravity: Vec2, step: &TimeStep) {
    let sweep = &mut body.sweep;
    sweep.c0 = sweep.c;
    sweep.a0 = sweep.a;
    sweep.t0 = 0.0;

    if body.is_static() {
        return;
    }

    let h = step.dt;
    body.linear_velocity += (gravity * body.gravity_scale + body.force * body.inv_mass) * h;
    body.angular_velocity += h * body.inv_inertia * body.torque;

    // Pade approximation of exp(-damping * h), stable for large damping
    body.linear_velocity *= 1.0 / (1.0 + h * body.linear_damping);
    body.angular_velocity *= 1.0 / (1.0 + h * body.angular_damping);

    body.force = Vec2::ZERO;
    body.torque = 0.0;
}

fn integrate_body_position(body: &mut Body, step: &TimeStep) {
    if body.is_static() {
        return;
    }

    let h = step.dt;
    let translation = body.linear_velocity * h;
    if translation.length_squared() > MAX_TRANSLATION * MAX_TRANSLATION {
        body.linear_velocity *= MAX_TRANSLATION / translation.length();
    }

    let rotation = h * body.angular_velocity;
    if rotation * rotation > MAX_ROTATION * MAX_ROTATION {
        body.angular_velocity *= MAX_ROTATION / rotation.abs();
    }

    body.sweep.c += body.linear_velocity * h;
    body.sweep.a += h * body.angular_velocity;
}
