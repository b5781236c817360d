//! Per-turn countdown.
//!
//! The timer holds no clock of its own. Whoever drives it delivers one
//! [`TurnTimer::tick`] per time-unit, which keeps the countdown
//! deterministic under test and lets the match runner use tokio's clock.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Time-units a player gets per turn unless configured otherwise.
pub const DEFAULT_TURN_UNITS: u32 = 5;

/// Identifies one run of the timer.
///
/// Every restart or stop bumps the generation, so a tick scheduled for an
/// earlier turn can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimerGeneration(u64);

/// Result of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Tick was stale or the timer is stopped.
    Ignored,
    /// Countdown continues with this many units left.
    Running(u32),
    /// Countdown reached zero on this tick.
    Expired,
}

/// Countdown for the active turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTimer")]
pub struct TurnTimer {
    initial: u32,
    remaining: u32,
    running: bool,
    generation: TimerGeneration,
}

/// Unchecked wire form of [`TurnTimer`].
#[derive(Deserialize)]
struct RawTimer {
    initial: u32,
    remaining: u32,
    running: bool,
    generation: TimerGeneration,
}

impl From<RawTimer> for TurnTimer {
    fn from(raw: RawTimer) -> Self {
        let initial = raw.initial.max(1);
        let remaining = raw.remaining.min(initial);
        Self {
            initial,
            remaining,
            running: raw.running && remaining > 0,
            generation: raw.generation,
        }
    }
}

impl TurnTimer {
    /// Creates a stopped timer that restarts at `initial` units.
    ///
    /// A zero budget is raised to one unit so a turn can always be played.
    pub fn new(initial: u32) -> Self {
        let initial = initial.max(1);
        Self {
            initial,
            remaining: initial,
            running: false,
            generation: TimerGeneration::default(),
        }
    }

    /// Units granted at the start of each turn.
    pub fn initial(&self) -> u32 {
        self.initial
    }

    /// Units left in the current turn.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the countdown is live.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Generation of the live (or most recently stopped) countdown.
    pub fn generation(&self) -> TimerGeneration {
        self.generation
    }

    /// Starts a fresh countdown, cancelling any outstanding one.
    #[instrument(skip(self), fields(initial = self.initial))]
    pub fn restart(&mut self) -> TimerGeneration {
        self.remaining = self.initial;
        self.running = true;
        self.generation.0 += 1;
        debug!(generation = self.generation.0, "Turn timer restarted");
        self.generation
    }

    /// Stops the countdown, leaving the remaining value visible.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.generation.0 += 1;
            debug!(remaining = self.remaining, "Turn timer stopped");
        }
    }

    /// Consumes one time-unit for the countdown identified by `generation`.
    pub fn tick(&mut self, generation: TimerGeneration) -> TimerTick {
        if !self.running || generation != self.generation {
            return TimerTick::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TimerTick::Expired
        } else {
            TimerTick::Running(self.remaining)
        }
    }
}

impl Default for TurnTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TURN_UNITS)
    }
}
