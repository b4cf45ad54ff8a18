//! Core - math, transforms, sweeps and crate-wide macros

// Logging macros (must be first so later modules see them)
#[macro_use]
pub mod utils;
pub mod math;
pub mod transform;
pub mod sweep;
