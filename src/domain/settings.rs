use serde::{Deserialize, Serialize};

use crate::core::math::Vec2;

/// World configuration, loadable from a JSON bundle.
///
/// Missing fields fall back to the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSettings {
    /// Gravity acceleration (y grows downward, like the sandbox grid)
    #[serde(default = "default_gravity")]
    pub gravity: Vec2,
    /// Fixed step length in seconds
    #[serde(default = "default_dt")]
    pub dt: f32,
    #[serde(default = "default_velocity_iterations")]
    pub velocity_iterations: u32,
    #[serde(default = "default_position_iterations")]
    pub position_iterations: u32,
    #[serde(default = "default_warm_starting")]
    pub warm_starting: bool,
}

fn default_gravity() -> Vec2 {
    Vec2::new(0.0, 10.0)
}

fn default_dt() -> f32 {
    1.0 / 60.0
}

fn default_velocity_iterations() -> u32 {
    8
}

fn default_position_iterations() -> u32 {
    3
}

fn default_warm_starting() -> bool {
    true
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            dt: default_dt(),
            velocity_iterations: default_velocity_iterations(),
            position_iterations: default_position_iterations(),
            warm_starting: default_warm_starting(),
        }
    }
}

impl WorldSettings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: WorldSettings = serde_json::from_str(json).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(format!("dt must be > 0: {}", self.dt));
        }
        if !self.gravity.is_valid() {
            return Err("gravity must be finite".to_string());
        }
        if self.velocity_iterations == 0 {
            return Err("velocityIterations must be >= 1".to_string());
        }
        Ok(())
    }
}
