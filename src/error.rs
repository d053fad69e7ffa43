//! Configuration errors
//!
//! Gameplay outcomes (collisions, time running out) are session state, not
//! errors. The only failure surface is building a session from bad settings.

use std::fmt;

/// Screen axis named in dimension errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => write!(f, "width"),
            Self::Height => write!(f, "height"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveDimension { axis: Axis, value: f32 },
    NonFiniteDimension { axis: Axis },
    /// Screen narrower than the craft itself
    ScreenTooNarrow { width: f32, craft_width: f32 },
    ScreenTooShort { height: f32, craft_height: f32 },
    ZeroLevel,
    Parse(String),
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimension { axis, value } => {
                write!(f, "screen {axis} must be positive, got {value}")
            }
            Self::NonFiniteDimension { axis } => write!(f, "screen {axis} is not a finite number"),
            Self::ScreenTooNarrow { width, craft_width } => write!(
                f,
                "screen width {width} cannot fit the craft (width {craft_width})"
            ),
            Self::ScreenTooShort {
                height,
                craft_height,
            } => write!(
                f,
                "screen height {height} cannot fit the craft (height {craft_height})"
            ),
            Self::ZeroLevel => write!(f, "level must be at least 1"),
            Self::Parse(msg) => write!(f, "invalid settings: {msg}"),
            Self::Io(msg) => write!(f, "could not read settings: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
