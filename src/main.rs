//! Craft Dodge headless driver
//!
//! Runs sessions with the autopilot at a fixed frame rate and reports how each
//! run ended. Time is simulated unless `--realtime` is given.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use craft_dodge::autopilot::Autopilot;
use craft_dodge::consts::DEFAULT_FPS;
use craft_dodge::platform::{Clock, ManualClock, SystemClock};
use craft_dodge::sim::{EndReason, GameEvent, Session, Snapshot, StepResult, tick};
use craft_dodge::{RestartLevel, Settings};

#[derive(Parser, Debug)]
#[command(name = "craft-dodge", about = "Run Craft Dodge sessions with the autopilot")]
struct Args {
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// RNG seed (0 picks one at random)
    #[arg(long)]
    seed: Option<u64>,
    /// Obstacle durability
    #[arg(long)]
    level: Option<u32>,
    #[arg(long)]
    width: Option<f32>,
    #[arg(long)]
    height: Option<f32>,
    /// Level policy on restart (carry | reset)
    #[arg(long, value_parser = parse_restart_level)]
    restart_level: Option<RestartLevel>,
    /// Number of back-to-back runs
    #[arg(short, long, default_value_t = 1)]
    runs: u32,
    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,
    /// Pace frames against the wall clock instead of simulated time
    #[arg(long)]
    realtime: bool,
    /// Print each run's final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn parse_restart_level(s: &str) -> Result<RestartLevel, String> {
    RestartLevel::from_str(s).ok_or_else(|| format!("unknown restart level '{s}'"))
}

impl Args {
    /// File settings (or defaults) with command-line overrides applied
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(level) = self.level {
            settings.level = level;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(policy) = self.restart_level {
            settings.restart_level = policy;
        }
        if settings.seed == 0 {
            settings.seed = rand::random();
        }
        Ok(settings)
    }
}

/// Frame pacing: simulated or wall-clock
enum FrameClock {
    Simulated(ManualClock),
    Real(SystemClock),
}

impl FrameClock {
    fn now(&self) -> Duration {
        match self {
            FrameClock::Simulated(clock) => clock.now(),
            FrameClock::Real(clock) => clock.now(),
        }
    }

    fn wait(&self, frame: Duration) {
        match self {
            FrameClock::Simulated(clock) => clock.advance(frame),
            FrameClock::Real(_) => std::thread::sleep(frame),
        }
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    run: u32,
    seed: u64,
    reason: EndReason,
    score: u32,
    frames: u64,
    elapsed_secs: f32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }
    let frame = Duration::from_secs(1) / args.fps;

    let settings = args.settings()?;
    let mut session = Session::new(&settings).context("invalid settings")?;
    log::info!(
        "Craft Dodge starting: {} run(s), seed {}, restart level {}",
        args.runs,
        settings.seed,
        settings.restart_level.as_str()
    );

    let clock = if args.realtime {
        FrameClock::Real(SystemClock::new())
    } else {
        FrameClock::Simulated(ManualClock::new())
    };
    let mut pilot = Autopilot::default();

    for run in 1..=args.runs {
        if run == 1 {
            session.start(clock.now());
        } else {
            session.restart(clock.now());
        }

        let (reason, score) = loop {
            let snap = Snapshot::capture(&session);
            let input = pilot.plan(&snap, session.screen.width);
            let result = tick(&mut session, &input, clock.now());

            for event in session.drain_events() {
                match event {
                    GameEvent::ObstacleDestroyed { id } => log::debug!("Destroyed obstacle {id}"),
                    GameEvent::CraftHit { obstacle_id } => {
                        log::warn!("Craft hit by obstacle {obstacle_id}")
                    }
                    other => log::trace!("{other:?}"),
                }
            }

            if let StepResult::GameOver { reason, score } = result {
                break (reason, score);
            }
            clock.wait(frame);
        };

        let snap = Snapshot::capture(&session);
        let summary = RunSummary {
            run,
            seed: settings.seed,
            reason,
            score,
            frames: session.frame_count,
            elapsed_secs: snap.elapsed_secs,
        };
        log::info!("Run {run} finished: {reason:?}, score {score}");
        println!("{}", serde_json::to_string(&summary)?);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&snap)?);
        }
    }

    Ok(())
}
