//! Solver - step descriptor and the per-body integration helpers

pub mod time_step;
pub mod integrate;

pub use time_step::TimeStep;
