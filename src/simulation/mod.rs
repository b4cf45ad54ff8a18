//! World - owns bodies and joints and drives the fixed-step solver
//!
//! WorldCore only orchestrates; the math lives in core/, the per-body
//! passes in systems/solver/, the constraints in systems/joints/.
//!
//! Step order:
//! 1. integrate forces + gravity into velocities (opens the sweep window)
//! 2. init every joint, then `velocity_iterations` solve passes
//! 3. integrate velocities into the sweep end pose
//! 4. up to `position_iterations` position passes

use crate::core::math::Vec2;
use crate::core::transform::Transform;
use crate::domain::body::{Body, BodyDef, BodyHandle};
use crate::domain::settings::WorldSettings;
use crate::systems::joints::{Joint, JointDef, JointHandle};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::World;
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// The simulation world
pub struct WorldCore {
    bodies: Vec<Body>,
    /// Slot per handle ever issued; destroyed joints leave `None`
    joints: Vec<Option<Joint>>,

    settings: WorldSettings,
    /// `inv_dt` of the previous step, for warm-start rescaling
    prev_inv_dt: f32,

    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl Default for WorldCore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldCore {
    /// Create an empty world with default settings
    pub fn new() -> Self {
        init::create_world_core(WorldSettings::default())
    }

    pub fn with_settings(settings: WorldSettings) -> Result<Self, String> {
        settings.validate()?;
        Ok(init::create_world_core(settings))
    }

    pub fn from_settings_json(json: &str) -> Result<Self, String> {
        let settings = WorldSettings::from_json(json)?;
        Ok(init::create_world_core(settings))
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Live joints (destroyed slots excluded)
    pub fn joint_count(&self) -> usize {
        self.joints.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.index())
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.index())
    }

    pub fn joint(&self, handle: JointHandle) -> Option<&Joint> {
        self.joints.get(handle.index()).and_then(|slot| slot.as_ref())
    }

    /// World anchors of a joint on body A and body B
    pub fn joint_anchors(&self, handle: JointHandle) -> Option<(Vec2, Vec2)> {
        self.joint(handle)
            .map(|joint| (joint.anchor_a(&self.bodies), joint.anchor_b(&self.bodies)))
    }

    /// Reaction force of a joint over the last step
    pub fn joint_reaction_force(&self, handle: JointHandle) -> Option<Vec2> {
        let inv_dt = self.prev_inv_dt;
        self.joint(handle).map(|joint| joint.reaction_force(inv_dt))
    }

    pub fn joint_reaction_torque(&self, handle: JointHandle) -> Option<f32> {
        let inv_dt = self.prev_inv_dt;
        self.joint(handle).map(|joint| joint.reaction_torque(inv_dt))
    }

    // === COMMANDS ===

    pub fn create_body(&mut self, def: &BodyDef) -> Result<BodyHandle, String> {
        commands::create_body(self, def)
    }

    pub fn create_joint(&mut self, def: &JointDef) -> Result<JointHandle, String> {
        commands::create_joint(self, def)
    }

    /// Joint from a tagged JSON description (`{"type":"pointer", ...}`)
    pub fn create_joint_from_json(&mut self, json: &str) -> Result<JointHandle, String> {
        let def = JointDef::from_json(json)?;
        commands::create_joint(self, &def)
    }

    pub fn destroy_joint(&mut self, handle: JointHandle) -> bool {
        commands::destroy_joint(self, handle)
    }

    /// Move the world target of a pointer joint
    pub fn set_pointer_target(&mut self, handle: JointHandle, target: Vec2) -> Result<(), String> {
        commands::set_pointer_target(self, handle, target)
    }

    // === SETTINGS ===

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) -> Result<(), String> {
        settings::set_gravity(self, x, y)
    }

    pub fn set_iterations(&mut self, velocity: u32, position: u32) {
        settings::set_iterations(self, velocity, position);
    }

    pub fn set_warm_starting(&mut self, enabled: bool) {
        settings::set_warm_starting(self, enabled);
    }

    pub fn set_dt(&mut self, dt: f32) -> Result<(), String> {
        settings::set_dt(self, dt)
    }

    // === STEPPING ===

    /// Step the simulation forward by `settings.dt`
    pub fn step(&mut self) {
        step::step(self);
    }

    /// Rewind every body to time `t` of the last step window
    pub fn advance_to(&mut self, t: f32) {
        step::advance_to(self, t);
    }

    /// Body-origin transform at time `t` of the last step window
    pub fn transform_at(&self, handle: BodyHandle, t: f32) -> Option<Transform> {
        self.body(handle).map(|body| body.sweep.transform_at(t))
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
