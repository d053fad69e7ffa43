//! Raw key events to game commands
//!
//! Moves apply once per keydown, auto-repeats included. Fire is edge-triggered:
//! holding the key down yields a single projectile.

use crate::sim::{InputEvent, TickInput};

/// Map a DOM-style key name to a game command
pub fn map_key(key: &str) -> Option<InputEvent> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(InputEvent::MoveLeft),
        "ArrowRight" | "d" | "D" => Some(InputEvent::MoveRight),
        " " | "Space" => Some(InputEvent::Fire),
        _ => None,
    }
}

/// Collects commands between ticks
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown. `repeat` is set for OS auto-repeat events.
    /// Returns the command that was queued, if any.
    pub fn key_down(&mut self, key: &str, repeat: bool) -> Option<InputEvent> {
        let event = map_key(key)?;
        if repeat && event == InputEvent::Fire {
            return None;
        }
        self.pending.push(event);
        Some(event)
    }

    /// Queue a command directly (scripted or synthetic input)
    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Hand everything gathered since the last tick to the simulation
    pub fn take(&mut self) -> TickInput {
        TickInput {
            events: std::mem::take(&mut self.pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key("ArrowLeft"), Some(InputEvent::MoveLeft));
        assert_eq!(map_key("a"), Some(InputEvent::MoveLeft));
        assert_eq!(map_key("d"), Some(InputEvent::MoveRight));
        assert_eq!(map_key(" "), Some(InputEvent::Fire));
        assert_eq!(map_key("Escape"), None);
    }

    #[test]
    fn test_fire_ignores_auto_repeat() {
        let mut queue = InputQueue::new();
        assert_eq!(queue.key_down(" ", false), Some(InputEvent::Fire));
        assert_eq!(queue.key_down(" ", true), None);
        assert_eq!(queue.key_down(" ", true), None);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_moves_follow_auto_repeat() {
        let mut queue = InputQueue::new();
        queue.key_down("ArrowRight", false);
        queue.key_down("ArrowRight", true);
        queue.key_down("ArrowRight", true);
        let input = queue.take();
        assert_eq!(input.events, vec![InputEvent::MoveRight; 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_take_preserves_order() {
        let mut queue = InputQueue::new();
        queue.key_down("a", false);
        queue.key_down(" ", false);
        queue.key_down("x", false);
        queue.push(InputEvent::MoveRight);
        assert_eq!(
            queue.take().events,
            vec![InputEvent::MoveLeft, InputEvent::Fire, InputEvent::MoveRight]
        );
    }
}
