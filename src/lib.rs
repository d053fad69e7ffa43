//! Craft Dodge - A falling-obstacle arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, session state)
//! - `platform`: Clock and input abstractions consumed by the simulation
//! - `settings`: Session configuration and validation
//! - `autopilot`: Scripted input source for headless runs

pub mod autopilot;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{RestartLevel, ScreenConfig, Settings};

use std::time::Duration;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Session length before the run ends on its own
    pub const TIME_LIMIT: Duration = Duration::from_secs(15);

    /// Craft defaults - anchored to the bottom edge
    pub const CRAFT_WIDTH: f32 = 30.0;
    pub const CRAFT_HEIGHT: f32 = 40.0;
    /// Horizontal distance covered per move event
    pub const CRAFT_MOVE_STEP: f32 = 15.0;

    /// Obstacle size as a fraction of each screen axis
    pub const OBSTACLE_SCALE: f32 = 0.05;
    /// Downward distance per tick
    pub const OBSTACLE_FALL_SPEED: f32 = 1.0;
    /// Ticks between obstacle spawns
    pub const SPAWN_INTERVAL: u64 = 50;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;
    /// Upward distance per tick
    pub const PROJECTILE_SPEED: f32 = 10.0;

    /// Nominal display refresh used by drivers without a real clock
    pub const DEFAULT_FPS: u32 = 60;
}

/// Time left before `consts::TIME_LIMIT`, never negative
#[inline]
pub fn remaining_time(elapsed: Duration) -> Duration {
    consts::TIME_LIMIT.saturating_sub(elapsed)
}
