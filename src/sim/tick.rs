//! Fixed-step simulation tick
//!
//! Advances a running session by exactly one frame. The driver calls `tick`
//! once per display refresh with the input gathered since the previous call.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::collision::overlaps;
use super::spawn::{new_obstacle, should_spawn};
use super::state::{EndReason, GameEvent, GamePhase, Projectile, Session, StepResult};
use crate::consts::*;

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Fire,
}

/// Input commands for a single tick, applied in order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Advance the session by one frame.
///
/// `now` is a monotonic clock reading on the same timeline that was passed to
/// `Session::start` / `Session::restart`.
pub fn tick(session: &mut Session, input: &TickInput, now: Duration) -> StepResult {
    // Nothing moves before start or after game over
    if session.phase != GamePhase::Running {
        return session.result();
    }
    session.events.clear();

    session.elapsed = now.saturating_sub(session.started_at);
    if session.elapsed >= TIME_LIMIT {
        session.events.push(GameEvent::TimeExpired);
        session.end(EndReason::TimeExpired);
        return session.result();
    }

    apply_input(session, input);

    if should_spawn(session.frame_count, SPAWN_INTERVAL) {
        let id = session.next_entity_id();
        let obstacle = new_obstacle(&mut session.rng, id, &session.screen, session.level);
        log::debug!(
            "Spawned obstacle {} at x={} (hits {})",
            id,
            obstacle.pos.x,
            obstacle.hits_remaining
        );
        session.events.push(GameEvent::ObstacleSpawned {
            id,
            x: obstacle.pos.x,
        });
        session.obstacles.push(obstacle);
    }
    session.frame_count += 1;

    if advance_obstacles(session) {
        return session.result();
    }
    advance_projectiles(session);

    log::trace!(
        "Frame {}: {} obstacles, {} projectiles, score {}",
        session.frame_count,
        session.obstacles.len(),
        session.projectiles.len(),
        session.score
    );
    session.result()
}

/// Apply queued moves (clamped) and fire events
fn apply_input(session: &mut Session, input: &TickInput) {
    for event in &input.events {
        match event {
            InputEvent::MoveLeft => session.craft.move_by(-CRAFT_MOVE_STEP, &session.screen),
            InputEvent::MoveRight => session.craft.move_by(CRAFT_MOVE_STEP, &session.screen),
            InputEvent::Fire => {
                let id = session.next_entity_id();
                session
                    .projectiles
                    .push(Projectile::fired_from(id, &session.craft));
                session.events.push(GameEvent::ProjectileFired { id });
            }
        }
    }
}

/// Drop every obstacle one step, ending the run on the first craft contact.
/// Returns true if the run ended.
fn advance_obstacles(session: &mut Session) -> bool {
    let craft = session.craft.rect();
    let mut crashed = None;
    for obstacle in &mut session.obstacles {
        obstacle.pos.y += OBSTACLE_FALL_SPEED;
        if overlaps(&craft, &obstacle.rect()) {
            crashed = Some(obstacle.id);
            break;
        }
    }
    if let Some(obstacle_id) = crashed {
        session.events.push(GameEvent::CraftHit { obstacle_id });
        session.end(EndReason::Collision);
        return true;
    }

    let screen = session.screen;
    let events = &mut session.events;
    session.obstacles.retain(|o| {
        if o.is_off_screen(&screen) {
            events.push(GameEvent::ObstacleEscaped { id: o.id });
            false
        } else {
            true
        }
    });
    false
}

/// Move projectiles newest first; each is consumed by its first obstacle contact
fn advance_projectiles(session: &mut Session) {
    for i in (0..session.projectiles.len()).rev() {
        let projectile = &mut session.projectiles[i];
        projectile.pos.y -= projectile.speed;

        if projectile.is_off_screen() {
            let id = projectile.id;
            session.projectiles.remove(i);
            session.events.push(GameEvent::ProjectileExpired { id });
            continue;
        }

        let rect = projectile.rect();
        let Some(j) = session
            .obstacles
            .iter()
            .rposition(|o| overlaps(&rect, &o.rect()))
        else {
            continue;
        };

        let obstacle = &mut session.obstacles[j];
        obstacle.hits_remaining = obstacle.hits_remaining.saturating_sub(1);
        let id = obstacle.id;
        if obstacle.hits_remaining == 0 {
            session.obstacles.remove(j);
            session.score += 1;
            log::debug!("Obstacle {} destroyed, score {}", id, session.score);
            session.events.push(GameEvent::ObstacleDestroyed { id });
        } else {
            let hits_remaining = obstacle.hits_remaining;
            log::debug!("Obstacle {} hit, {} hits left", id, hits_remaining);
            session
                .events
                .push(GameEvent::ObstacleHit { id, hits_remaining });
        }
        session.projectiles.remove(i);
    }
}
