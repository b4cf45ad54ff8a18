use wasm_bindgen::prelude::*;

/// Timings of the last step, in milliseconds
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) init_ms: f64,
    pub(super) velocity_ms: f64,
    pub(super) position_ms: f64,
    pub(super) position_iterations_used: u32,
    pub(super) body_count: u32,
    pub(super) joint_count: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    /// Velocity + position integration passes combined
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn init_ms(&self) -> f64 { self.init_ms }
    #[wasm_bindgen(getter)]
    pub fn velocity_ms(&self) -> f64 { self.velocity_ms }
    #[wasm_bindgen(getter)]
    pub fn position_ms(&self) -> f64 { self.position_ms }
    #[wasm_bindgen(getter)]
    pub fn position_iterations_used(&self) -> u32 { self.position_iterations_used }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn joint_count(&self) -> u32 { self.joint_count }
}
