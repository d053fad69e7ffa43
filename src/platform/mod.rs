//! Platform abstraction layer
//!
//! Collaborators the simulation consumes but does not own:
//! - Time (monotonic clock readings)
//! - Input events (raw keys to game commands)

pub mod input;
pub mod time;

pub use input::{InputQueue, map_key};
pub use time::{Clock, ManualClock, SystemClock};
