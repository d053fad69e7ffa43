//! Obstacle spawning
//!
//! Deciding when to spawn is kept apart from building the obstacle; the tick
//! does the insertion.

use glam::Vec2;
use rand::Rng;

use super::state::Obstacle;
use crate::settings::ScreenConfig;

/// True on every `interval`-th frame, starting with frame 0
#[inline]
pub fn should_spawn(frame_count: u64, interval: u64) -> bool {
    interval != 0 && frame_count % interval == 0
}

/// Build an obstacle at the top edge with a random whole-unit x in
/// `[0, screen.width - obstacle width)`
pub fn new_obstacle<R: Rng>(
    rng: &mut R,
    id: u32,
    screen: &ScreenConfig,
    level: u32,
) -> Obstacle {
    let size = screen.obstacle_size();
    let span = screen.width - size.x;
    let x = rng.random_range(0.0..span).floor();
    Obstacle {
        id,
        pos: Vec2::new(x, 0.0),
        size,
        hits_remaining: level,
    }
}
