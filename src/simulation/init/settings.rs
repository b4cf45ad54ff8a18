use crate::core::math::Vec2;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_gravity(world: &mut WorldCore, x: f32, y: f32) -> Result<(), String> {
    let gravity = Vec2::new(x, y);
    if !gravity.is_valid() {
        return Err(format!("gravity must be finite: ({}, {})", x, y));
    }
    world.settings.gravity = gravity;
    Ok(())
}

/// Velocity passes never drop below one
pub(super) fn set_iterations(world: &mut WorldCore, velocity: u32, position: u32) {
    world.settings.velocity_iterations = velocity.max(1);
    world.settings.position_iterations = position;
}

pub(super) fn set_warm_starting(world: &mut WorldCore, enabled: bool) {
    world.settings.warm_starting = enabled;
}

pub(super) fn set_dt(world: &mut WorldCore, dt: f32) -> Result<(), String> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(format!("dt must be > 0: {}", dt));
    }
    world.settings.dt = dt;
    Ok(())
}
