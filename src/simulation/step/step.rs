use crate::systems::solver::integrate;
use crate::systems::solver::TimeStep;

use super::{PerfTimer, WorldCore};

pub(super) fn step(world: &mut WorldCore) {
    let time_step = TimeStep::from_settings(&world.settings, world.prev_inv_dt);
    if time_step.dt <= 0.0 {
        return;
    }

    let perf_on = world.perf_enabled;
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };
    let mut lap = step_start;
    if perf_on {
        world.perf_stats.reset();
        world.perf_stats.body_count = world.bodies.len() as u32;
        world.perf_stats.joint_count = world.joint_count() as u32;
    }

    // === VELOCITY PHASE ===
    integrate::integrate_velocities(&mut world.bodies, world.settings.gravity, &time_step);
    if let Some(t) = lap.as_mut() {
        world.perf_stats.integrate_ms += t.lap_ms();
    }

    for joint in world.joints.iter_mut().flatten() {
        joint.init_velocity_constraints(&mut world.bodies, &time_step);
    }
    if let Some(t) = lap.as_mut() {
        world.perf_stats.init_ms = t.lap_ms();
    }

    for _ in 0..time_step.velocity_iterations {
        for joint in world.joints.iter_mut().flatten() {
            joint.solve_velocity_constraints(&mut world.bodies, &time_step);
        }
    }
    if let Some(t) = lap.as_mut() {
        world.perf_stats.velocity_ms = t.lap_ms();
    }

    // === POSITION PHASE ===
    integrate::integrate_positions(&mut world.bodies, &time_step);
    integrate::synchronize_transforms(&mut world.bodies);
    if let Some(t) = lap.as_mut() {
        world.perf_stats.integrate_ms += t.lap_ms();
    }

    let mut used = 0;
    for _ in 0..time_step.position_iterations {
        used += 1;
        let mut solved = true;
        for joint in world.joints.iter_mut().flatten() {
            // Every joint runs each pass, even after one reports an error
            let joint_ok = joint.solve_position_constraints(&mut world.bodies);
            solved = solved && joint_ok;
        }
        if solved {
            break;
        }
    }
    if let Some(t) = lap.as_mut() {
        world.perf_stats.position_ms = t.lap_ms();
        world.perf_stats.position_iterations_used = used;
    }

    world.prev_inv_dt = time_step.inv_dt;
    world.frame += 1;

    if let Some(t) = step_start {
        world.perf_stats.step_ms = t.elapsed_ms();
    }
}

/// Time of impact sub-stepping: every body goes back to its pose at `t`
/// and the sweep windows restart there.
pub(super) fn advance_to(world: &mut WorldCore, t: f32) {
    if !(0.0..=1.0).contains(&t) {
        engine_warn!("advance_to ignored: t={} outside [0, 1]", t);
        return;
    }
    integrate::advance_bodies(&mut world.bodies, t);
}
