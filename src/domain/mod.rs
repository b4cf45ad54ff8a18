//! Domain - bodies and world configuration

pub mod body;
pub mod settings;
