//! Session state and core simulation types
//!
//! Everything one play-through mutates lives in `Session`. Nothing is global:
//! the RNG is owned here and seeded at construction.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Rect;
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::{RestartLevel, ScreenConfig, Settings};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    TimeExpired,
    Collision,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Built but `start()` not called yet
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended; only `restart()` leaves this phase
    GameOver(EndReason),
}

/// Outcome reported by every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepResult {
    NotStarted,
    Running,
    GameOver { reason: EndReason, score: u32 },
}

/// Things that happened during the last tick, for sound and effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32, x: f32 },
    /// Obstacle took a hit and survived
    ObstacleHit { id: u32, hits_remaining: u32 },
    ObstacleDestroyed { id: u32 },
    /// Obstacle fell past the bottom edge
    ObstacleEscaped { id: u32 },
    ProjectileFired { id: u32 },
    /// Projectile left through the top edge
    ProjectileExpired { id: u32 },
    CraftHit { obstacle_id: u32 },
    TimeExpired,
}

/// The player's craft, pinned to the bottom of the screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Craft {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Craft {
    /// Craft horizontally centered on the bottom edge
    pub fn centered(screen: &ScreenConfig) -> Self {
        Self {
            x: (screen.width - CRAFT_WIDTH) / 2.0,
            y: screen.craft_y(),
            width: CRAFT_WIDTH,
            height: CRAFT_HEIGHT,
        }
    }

    /// Shift horizontally, clamped to `[0, screen.width - width]`
    pub fn move_by(&mut self, dx: f32, screen: &ScreenConfig) {
        self.x = (self.x + dx).clamp(0.0, screen.craft_max_x());
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Hits left before destruction, starts at the session level
    pub hits_remaining: u32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Fell past the bottom edge
    pub fn is_off_screen(&self, screen: &ScreenConfig) -> bool {
        self.pos.y > screen.height
    }
}

/// A projectile fired upward from the craft
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward distance per tick
    pub speed: f32,
}

impl Projectile {
    /// Spawn centered on the craft's top edge
    pub fn fired_from(id: u32, craft: &Craft) -> Self {
        Self {
            id,
            pos: Vec2::new(
                craft.x + craft.width / 2.0 - PROJECTILE_WIDTH / 2.0,
                craft.y,
            ),
            size: Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            speed: PROJECTILE_SPEED,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Entirely above the top edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.y + self.size.y <= 0.0
    }
}

/// Complete state of one play-through
#[derive(Debug, Clone)]
pub struct Session {
    /// Play field geometry
    pub screen: ScreenConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Obstacle durability for new spawns
    pub level: u32,
    pub phase: GamePhase,
    pub craft: Craft,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Live projectiles, oldest first
    pub projectiles: Vec<Projectile>,
    /// Clock reading when the current run started
    pub started_at: Duration,
    /// Time since `started_at` as of the last tick
    pub elapsed: Duration,
    /// Ticks simulated in the current run
    pub frame_count: u64,
    pub score: u32,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    base_level: u32,
    restart_level: RestartLevel,
    next_id: u32,
}

impl Session {
    /// Build a session from settings; fails on invalid geometry or level
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        let screen = settings.validate()?;
        Ok(Self::with_screen(
            screen,
            settings.level,
            settings.seed,
            settings.restart_level,
        ))
    }

    fn with_screen(screen: ScreenConfig, level: u32, seed: u64, restart_level: RestartLevel) -> Self {
        Self {
            screen,
            seed,
            level,
            phase: GamePhase::NotStarted,
            craft: Craft::centered(&screen),
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            started_at: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            score: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            base_level: level,
            restart_level,
            next_id: 1,
        }
    }

    /// Begin the first run. Ignored unless the session has not started yet.
    pub fn start(&mut self, now: Duration) {
        if self.phase != GamePhase::NotStarted {
            log::warn!("start() ignored in phase {:?}", self.phase);
            return;
        }
        self.started_at = now;
        self.elapsed = Duration::ZERO;
        self.phase = GamePhase::Running;
        log::info!(
            "Session started (seed {}, level {}, screen {}x{})",
            self.seed,
            self.level,
            self.screen.width,
            self.screen.height
        );
    }

    /// Reset to a fresh run from any phase.
    ///
    /// The RNG keeps its stream position, so a sequence of runs is still
    /// reproducible from the original seed.
    pub fn restart(&mut self, now: Duration) {
        if self.restart_level == RestartLevel::Reset {
            self.level = self.base_level;
        }
        self.craft = Craft::centered(&self.screen);
        self.obstacles.clear();
        self.projectiles.clear();
        self.events.clear();
        self.frame_count = 0;
        self.score = 0;
        self.started_at = now;
        self.elapsed = Duration::ZERO;
        self.phase = GamePhase::Running;
        log::info!("Session restarted (level {})", self.level);
    }

    /// Change obstacle durability for future spawns
    pub fn set_level(&mut self, level: u32) -> Result<(), ConfigError> {
        if level == 0 {
            return Err(ConfigError::ZeroLevel);
        }
        self.level = level;
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    /// Result matching the current phase
    pub fn result(&self) -> StepResult {
        match self.phase {
            GamePhase::NotStarted => StepResult::NotStarted,
            GamePhase::Running => StepResult::Running,
            GamePhase::GameOver(reason) => StepResult::GameOver {
                reason,
                score: self.score,
            },
        }
    }

    /// Time left in the current run
    pub fn remaining(&self) -> Duration {
        crate::remaining_time(self.elapsed)
    }

    /// Take the events from the last tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Mark the run as over
    pub(crate) fn end(&mut self, reason: EndReason) {
        self.phase = GamePhase::GameOver(reason);
        log::info!(
            "Game over: {:?} after {} frames, score {}",
            reason,
            self.frame_count,
            self.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(&Settings::default()).unwrap()
    }

    #[test]
    fn test_new_session_is_not_started() {
        let s = session();
        assert_eq!(s.phase, GamePhase::NotStarted);
        assert_eq!(s.result(), StepResult::NotStarted);
        assert_eq!(s.craft.x, 135.0);
        assert_eq!(s.craft.y, 460.0);
        assert!(s.obstacles.is_empty());
        assert!(s.projectiles.is_empty());
    }

    #[test]
    fn test_new_rejects_bad_settings() {
        let settings = Settings {
            width: 0.0,
            ..Default::default()
        };
        assert!(Session::new(&settings).is_err());
    }

    #[test]
    fn test_start_only_from_not_started() {
        let mut s = session();
        s.start(Duration::from_secs(3));
        assert_eq!(s.phase, GamePhase::Running);
        assert_eq!(s.started_at, Duration::from_secs(3));

        s.end(EndReason::Collision);
        s.start(Duration::from_secs(9));
        assert_eq!(s.phase, GamePhase::GameOver(EndReason::Collision));
        assert_eq!(s.started_at, Duration::from_secs(3));
    }

    #[test]
    fn test_craft_clamps_both_edges() {
        let screen = ScreenConfig::new(300.0, 500.0).unwrap();
        let mut craft = Craft::centered(&screen);
        for _ in 0..20 {
            craft.move_by(-CRAFT_MOVE_STEP, &screen);
        }
        assert_eq!(craft.x, 0.0);
        for _ in 0..30 {
            craft.move_by(CRAFT_MOVE_STEP, &screen);
        }
        assert_eq!(craft.x, 270.0);
    }

    #[test]
    fn test_projectile_fired_from_craft_center() {
        let screen = ScreenConfig::new(300.0, 500.0).unwrap();
        let craft = Craft::centered(&screen);
        let p = Projectile::fired_from(1, &craft);
        assert_eq!(p.pos, Vec2::new(148.0, 460.0));
        assert_eq!(p.size, Vec2::new(4.0, 10.0));
        assert_eq!(p.speed, 10.0);
    }

    #[test]
    fn test_projectile_off_screen_when_fully_above_top() {
        let screen = ScreenConfig::new(300.0, 500.0).unwrap();
        let mut p = Projectile::fired_from(1, &Craft::centered(&screen));
        p.pos.y = 0.0;
        assert!(!p.is_off_screen());
        p.pos.y = -9.0;
        assert!(!p.is_off_screen());
        p.pos.y = -10.0;
        assert!(p.is_off_screen());
    }

    #[test]
    fn test_restart_level_policy() {
        let mut reset = Session::new(&Settings {
            level: 2,
            ..Default::default()
        })
        .unwrap();
        reset.set_level(5).unwrap();
        reset.restart(Duration::ZERO);
        assert_eq!(reset.level, 2);

        let mut carry = Session::new(&Settings {
            level: 2,
            restart_level: RestartLevel::Carry,
            ..Default::default()
        })
        .unwrap();
        carry.set_level(5).unwrap();
        carry.restart(Duration::ZERO);
        assert_eq!(carry.level, 5);
    }

    #[test]
    fn test_set_level_rejects_zero() {
        let mut s = session();
        assert_eq!(s.set_level(0), Err(ConfigError::ZeroLevel));
        assert_eq!(s.level, 1);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut s = session();
        let a = s.next_entity_id();
        let b = s.next_entity_id();
        assert!(b > a);
    }
}
