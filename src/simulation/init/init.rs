use crate::domain::settings::WorldSettings;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn create_world_core(settings: WorldSettings) -> WorldCore {
    engine_log!(
        "world created: gravity=({}, {}) dt={} iterations={}/{}",
        settings.gravity.x,
        settings.gravity.y,
        settings.dt,
        settings.velocity_iterations,
        settings.position_iterations
    );
    WorldCore {
        bodies: Vec::with_capacity(64),
        joints: Vec::with_capacity(16),
        settings,
        prev_inv_dt: 0.0,
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
