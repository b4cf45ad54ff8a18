use crate::domain::settings::WorldSettings;

/// Step descriptor handed to every constraint
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeStep {
    pub dt: f32,
    /// `1 / dt`, or 0 when `dt == 0`
    pub inv_dt: f32,
    /// `dt / previous dt`, rescales warm-start impulses after a dt change
    pub dt_ratio: f32,
    pub velocity_iterations: u32,
    pub position_iterations: u32,
    pub warm_starting: bool,
}

impl TimeStep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            inv_dt: if dt > 0.0 { 1.0 / dt } else { 0.0 },
            dt_ratio: 1.0,
            velocity_iterations: 8,
            position_iterations: 3,
            warm_starting: true,
        }
    }

    pub fn from_settings(settings: &WorldSettings, prev_inv_dt: f32) -> Self {
        let mut step = Self::new(settings.dt);
        step.dt_ratio = prev_inv_dt * settings.dt;
        step.velocity_iterations = settings.velocity_iterations;
        step.position_iterations = settings.position_iterations;
        step.warm_starting = settings.warm_starting;
        step
    }
}
