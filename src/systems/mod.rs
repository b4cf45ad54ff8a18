//! Systems - the per-step passes over bodies and joints
//!
//! - solver/  - step descriptor and per-body integration
//! - joints/  - constraint variants and their shared contract

pub mod solver;
pub mod joints;
