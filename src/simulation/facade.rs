use wasm_bindgen::prelude::*;

use crate::core::math::Vec2;
use crate::domain::body::{BodyDef, BodyHandle};
use crate::systems::joints::{
    DistanceJointDef, JointDef, JointHandle, PointerJointDef, WeldJointDef,
};

use super::perf_stats::PerfStats;
use super::WorldCore;

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl World {
    /// Create an empty world with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { core: WorldCore::new() }
    }

    /// Create a world from a `WorldSettings` JSON object
    #[wasm_bindgen(js_name = fromSettingsJson)]
    pub fn from_settings_json(json: String) -> Result<World, JsValue> {
        let core = WorldCore::from_settings_json(&json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.core.body_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn joint_count(&self) -> u32 { self.core.joint_count() as u32 }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) -> Result<(), JsValue> {
        self.core.set_gravity(x, y).map_err(|e| JsValue::from_str(&e))
    }

    pub fn set_iterations(&mut self, velocity: u32, position: u32) {
        self.core.set_iterations(velocity, position);
    }

    pub fn set_warm_starting(&mut self, enabled: bool) {
        self.core.set_warm_starting(enabled);
    }

    pub fn set_dt(&mut self, dt: f32) -> Result<(), JsValue> {
        self.core.set_dt(dt).map_err(|e| JsValue::from_str(&e))
    }

    /// Current settings as JSON
    pub fn settings_json(&self) -> String {
        self.core.settings().to_json()
    }

    // === BODIES ===

    /// Dynamic body; returns its id
    pub fn create_body(&mut self, x: f32, y: f32, angle: f32, mass: f32, inertia: f32) -> Result<u32, JsValue> {
        let def = BodyDef {
            angle,
            ..BodyDef::dynamic(x, y, mass, inertia)
        };
        self.core
            .create_body(&def)
            .map(|handle| handle.0)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Immovable body (ground); returns its id
    pub fn create_static_body(&mut self, x: f32, y: f32) -> Result<u32, JsValue> {
        self.core
            .create_body(&BodyDef::fixed(x, y))
            .map(|handle| handle.0)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Body from a `BodyDef` JSON object
    pub fn create_body_from_json(&mut self, json: String) -> Result<u32, JsValue> {
        let def: BodyDef = serde_json::from_str(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.core
            .create_body(&def)
            .map(|handle| handle.0)
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn body_x(&self, id: u32) -> f32 {
        self.core.body(BodyHandle(id)).map_or(0.0, |b| b.position().x)
    }

    pub fn body_y(&self, id: u32) -> f32 {
        self.core.body(BodyHandle(id)).map_or(0.0, |b| b.position().y)
    }

    pub fn body_angle(&self, id: u32) -> f32 {
        self.core.body(BodyHandle(id)).map_or(0.0, |b| b.angle())
    }

    pub fn body_velocity_x(&self, id: u32) -> f32 {
        self.core.body(BodyHandle(id)).map_or(0.0, |b| b.linear_velocity.x)
    }

    pub fn body_velocity_y(&self, id: u32) -> f32 {
        self.core.body(BodyHandle(id)).map_or(0.0, |b| b.linear_velocity.y)
    }

    pub fn apply_force(&mut self, id: u32, fx: f32, fy: f32) {
        if let Some(body) = self.core.body_mut(BodyHandle(id)) {
            body.apply_force(Vec2::new(fx, fy));
        }
    }

    pub fn apply_impulse(&mut self, id: u32, ix: f32, iy: f32, px: f32, py: f32) {
        if let Some(body) = self.core.body_mut(BodyHandle(id)) {
            body.apply_linear_impulse(Vec2::new(ix, iy), Vec2::new(px, py));
        }
    }

    // === JOINTS ===

    /// Drag `body` toward `(tx, ty)`; the grab point is the initial target
    #[allow(clippy::too_many_arguments)]
    pub fn create_pointer_joint(
        &mut self,
        ground: u32,
        body: u32,
        tx: f32,
        ty: f32,
        max_force: f32,
        frequency_hz: f32,
        damping_ratio: f32,
    ) -> Result<u32, JsValue> {
        let mut def = PointerJointDef::new(BodyHandle(ground), BodyHandle(body), Vec2::new(tx, ty), max_force);
        def.frequency_hz = frequency_hz;
        def.damping_ratio = damping_ratio;
        self.create_joint(JointDef::Pointer(def))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_distance_joint(
        &mut self,
        body_a: u32,
        body_b: u32,
        ax: f32,
        ay: f32,
        bx: f32,
        by: f32,
        frequency_hz: f32,
        damping_ratio: f32,
    ) -> Result<u32, JsValue> {
        let mut def = DistanceJointDef::new(
            BodyHandle(body_a),
            BodyHandle(body_b),
            Vec2::new(ax, ay),
            Vec2::new(bx, by),
        );
        def.frequency_hz = frequency_hz;
        def.damping_ratio = damping_ratio;
        self.create_joint(JointDef::Distance(def))
    }

    pub fn create_weld_joint(&mut self, body_a: u32, body_b: u32, x: f32, y: f32) -> Result<u32, JsValue> {
        let def = WeldJointDef::new(BodyHandle(body_a), BodyHandle(body_b), Vec2::new(x, y));
        self.create_joint(JointDef::Weld(def))
    }

    /// Joint from tagged JSON, e.g. `{"type":"weld","bodyA":0,"bodyB":1,"anchor":{"x":0,"y":0}}`
    pub fn create_joint_from_json(&mut self, json: String) -> Result<u32, JsValue> {
        self.core
            .create_joint_from_json(&json)
            .map(|handle| handle.0)
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn set_pointer_target(&mut self, joint: u32, x: f32, y: f32) -> Result<(), JsValue> {
        self.core
            .set_pointer_target(JointHandle(joint), Vec2::new(x, y))
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn destroy_joint(&mut self, joint: u32) -> bool {
        self.core.destroy_joint(JointHandle(joint))
    }

    pub fn joint_reaction_force_x(&self, joint: u32) -> f32 {
        self.core.joint_reaction_force(JointHandle(joint)).map_or(0.0, |f| f.x)
    }

    pub fn joint_reaction_force_y(&self, joint: u32) -> f32 {
        self.core.joint_reaction_force(JointHandle(joint)).map_or(0.0, |f| f.y)
    }

    pub fn joint_reaction_torque(&self, joint: u32) -> f32 {
        self.core.joint_reaction_torque(JointHandle(joint)).unwrap_or(0.0)
    }

    // === STEPPING ===

    /// Step the simulation forward
    pub fn step(&mut self) {
        self.core.step();
    }

    /// Rewind every body to time `t` of the last step window
    pub fn advance_to(&mut self, t: f32) {
        self.core.advance_to(t);
    }
}

impl World {
    fn create_joint(&mut self, def: JointDef) -> Result<u32, JsValue> {
        self.core
            .create_joint(&def)
            .map(|handle| handle.0)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Native access to the underlying world
    pub fn core(&self) -> &WorldCore {
        &self.core
    }
}
