//! Read-only view of a session for renderers and HUDs

use serde::Serialize;

use super::collision::Rect;
use super::state::{EndReason, GamePhase, Session};

/// An obstacle as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub rect: Rect,
    pub hits_remaining: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub craft: Rect,
    pub obstacles: Vec<ObstacleView>,
    pub projectiles: Vec<Rect>,
    pub elapsed_secs: f32,
    pub remaining_secs: f32,
    pub score: u32,
    pub level: u32,
    pub frame: u64,
    pub phase: GamePhase,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        Self {
            craft: session.craft.rect(),
            obstacles: session
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    rect: o.rect(),
                    hits_remaining: o.hits_remaining,
                })
                .collect(),
            projectiles: session.projectiles.iter().map(|p| p.rect()).collect(),
            elapsed_secs: session.elapsed.as_secs_f32(),
            remaining_secs: session.remaining().as_secs_f32(),
            score: session.score,
            level: session.level,
            frame: session.frame_count,
            phase: session.phase,
        }
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            GamePhase::GameOver(reason) => Some(reason),
            _ => None,
        }
    }

    /// Top-left HUD text: time left and score
    pub fn hud_lines(&self) -> [String; 2] {
        [
            format!("Time: {:.1}", self.remaining_secs.max(0.0)),
            format!("Score: {}", self.score),
        ]
    }

    /// Centered banner, shown once the run is over
    pub fn banner(&self) -> Option<&'static str> {
        self.end_reason().map(|_| "Game Over!")
    }
}

impl From<&Session> for Snapshot {
    fn from(session: &Session) -> Self {
        Self::capture(session)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::settings::Settings;
    use crate::sim::{InputEvent, TickInput, tick};

    #[test]
    fn test_capture_running_session() {
        let mut session = Session::new(&Settings::default()).unwrap();
        session.start(Duration::ZERO);
        tick(
            &mut session,
            &TickInput::new([InputEvent::Fire]),
            Duration::from_millis(2_500),
        );

        let snap = Snapshot::capture(&session);
        assert_eq!(snap.craft, Rect::new(135.0, 460.0, 30.0, 40.0));
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.obstacles[0].hits_remaining, 1);
        assert_eq!(snap.projectiles, vec![Rect::new(148.0, 450.0, 4.0, 10.0)]);
        assert_eq!(snap.hud_lines(), ["Time: 12.5".to_string(), "Score: 0".to_string()]);
        assert_eq!(snap.banner(), None);
    }

    #[test]
    fn test_game_over_banner_and_clamped_time() {
        let mut session = Session::new(&Settings::default()).unwrap();
        session.start(Duration::ZERO);
        tick(&mut session, &TickInput::default(), Duration::from_secs(40));

        let snap = Snapshot::from(&session);
        assert_eq!(snap.end_reason(), Some(EndReason::TimeExpired));
        assert_eq!(snap.banner(), Some("Game Over!"));
        assert_eq!(snap.remaining_secs, 0.0);
        assert_eq!(snap.hud_lines()[0], "Time: 0.0");
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = Session::new(&Settings::default()).unwrap();
        let json = serde_json::to_value(Snapshot::capture(&session)).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["phase"], "NotStarted");
    }
}
