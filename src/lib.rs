//! Particula Rigid - 2D rigid-body kernel in WASM
//!
//! Architecture:
//! - core/        - math primitives, transforms, motion sweeps, logging
//! - domain/      - bodies and world settings
//! - systems/     - integration passes and joints
//! - simulation/  - world orchestration and the wasm facade

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    engine_log!("Particula rigid-body kernel initialized (v{})", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::math::{Mat22, Mat33, Vec2, Vec3};
pub use crate::core::sweep::Sweep;
pub use crate::core::transform::Transform;
pub use domain::body::{Body, BodyDef, BodyHandle};
pub use domain::settings::WorldSettings;
pub use simulation::{PerfStats, World, WorldCore};
pub use systems::joints::{Joint, JointDef, JointHandle, PointerJoint, PointerJointDef};
pub use systems::solver::TimeStep;
