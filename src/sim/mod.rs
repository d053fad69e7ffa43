//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per frame, driven from outside
//! - Seeded RNG owned by the session
//! - Time only through the clock reading passed in
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use snapshot::{ObstacleView, Snapshot};
pub use spawn::{new_obstacle, should_spawn};
pub use state::{
    Craft, EndReason, GameEvent, GamePhase, Obstacle, Projectile, Session, StepResult,
};
pub use tick::{InputEvent, TickInput, tick};
