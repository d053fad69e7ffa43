//! Monotonic clocks
//!
//! The simulation never reads the wall clock itself; drivers pass `now()` into
//! every tick.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time source measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Real time since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock advanced by hand, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, dt: Duration) {
        self.now.set(self.now.get() + dt);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
