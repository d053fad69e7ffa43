//! Session settings and validation
//!
//! Settings are plain serde data so drivers can read them from JSON. They are
//! validated into a `ScreenConfig` before any session is built.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Axis, ConfigError};

/// What happens to the level when a session restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RestartLevel {
    /// Keep whatever level the session was running at
    Carry,
    /// Go back to the level the settings specify
    #[default]
    Reset,
}

impl RestartLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestartLevel::Carry => "carry",
            RestartLevel::Reset => "reset",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "carry" | "keep" => Some(RestartLevel::Carry),
            "reset" => Some(RestartLevel::Reset),
            _ => None,
        }
    }
}

/// User-facing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play field width in units
    pub width: f32,
    /// Play field height in units
    pub height: f32,
    /// Obstacle durability (hits needed to destroy one)
    pub level: u32,
    /// RNG seed; 0 lets the driver pick one
    pub seed: u64,
    pub restart_level: RestartLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 500.0,
            level: 1,
            seed: 0,
            restart_level: RestartLevel::Reset,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check dimensions and level, producing the screen geometry
    pub fn validate(&self) -> Result<ScreenConfig, ConfigError> {
        if self.level == 0 {
            return Err(ConfigError::ZeroLevel);
        }
        ScreenConfig::new(self.width, self.height)
    }
}

/// Validated play field geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl ScreenConfig {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        check_dimension(Axis::Width, width)?;
        check_dimension(Axis::Height, height)?;
        if width < CRAFT_WIDTH {
            return Err(ConfigError::ScreenTooNarrow {
                width,
                craft_width: CRAFT_WIDTH,
            });
        }
        if height < CRAFT_HEIGHT {
            return Err(ConfigError::ScreenTooShort {
                height,
                craft_height: CRAFT_HEIGHT,
            });
        }
        Ok(Self { width, height })
    }

    /// Obstacles are 5% of each screen axis
    pub fn obstacle_size(&self) -> Vec2 {
        Vec2::new(self.width * OBSTACLE_SCALE, self.height * OBSTACLE_SCALE)
    }

    /// Top edge of the craft, which sits on the bottom of the screen
    pub fn craft_y(&self) -> f32 {
        self.height - CRAFT_HEIGHT
    }

    /// Rightmost legal craft x
    pub fn craft_max_x(&self) -> f32 {
        self.width - CRAFT_WIDTH
    }
}

fn check_dimension(axis: Axis, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFiniteDimension { axis });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositiveDimension { axis, value });
    }
    Ok(())
}
