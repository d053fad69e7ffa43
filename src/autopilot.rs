//! Scripted player for headless and demo runs
//!
//! Reads the same `Snapshot` a renderer gets and produces one tick's worth of
//! input: sidestep obstacles about to land on the craft, otherwise line up
//! under the lowest obstacle and shoot it.

use crate::consts::*;
use crate::sim::{InputEvent, Snapshot, TickInput};

/// How far above the craft an obstacle counts as a threat
const THREAT_DISTANCE: f32 = 120.0;
/// Extra horizontal clearance kept around the craft when dodging
const DODGE_MARGIN: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Ticks between shots
    pub fire_interval: u32,
    cooldown: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(6)
    }
}

impl Autopilot {
    pub fn new(fire_interval: u32) -> Self {
        Self {
            fire_interval,
            cooldown: 0,
        }
    }

    /// Decide this tick's input
    pub fn plan(&mut self, snap: &Snapshot, screen_width: f32) -> TickInput {
        self.cooldown = self.cooldown.saturating_sub(1);
        let craft = snap.craft;
        let craft_left = craft.left() - DODGE_MARGIN;
        let craft_right = craft.right() + DODGE_MARGIN;

        // Lowest obstacle that will land on the craft soon
        let threat = snap
            .obstacles
            .iter()
            .filter(|o| {
                o.rect.right() >= craft_left
                    && o.rect.left() <= craft_right
                    && craft.top() - o.rect.bottom() <= THREAT_DISTANCE
            })
            .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()));

        if let Some(threat) = threat {
            let room_left = threat.rect.left();
            let room_right = screen_width - threat.rect.right();
            let dodge = if room_left > room_right {
                InputEvent::MoveLeft
            } else {
                InputEvent::MoveRight
            };
            return TickInput::new([dodge]);
        }

        let Some(target) = snap
            .obstacles
            .iter()
            .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()))
        else {
            return TickInput::default();
        };

        let aim = craft.center().x;
        let target_x = target.rect.center().x;
        let mut events = Vec::new();
        if target_x < aim - CRAFT_MOVE_STEP / 2.0 {
            events.push(InputEvent::MoveLeft);
        } else if target_x > aim + CRAFT_MOVE_STEP / 2.0 {
            events.push(InputEvent::MoveRight);
        }

        let shot_left = aim - PROJECTILE_WIDTH / 2.0;
        let lined_up = shot_left + PROJECTILE_WIDTH >= target.rect.left() && shot_left <= target.rect.right();
        if lined_up && events.is_empty() && self.cooldown == 0 {
            events.push(InputEvent::Fire);
            self.cooldown = self.fire_interval;
        }
        TickInput { events }
    }
}
