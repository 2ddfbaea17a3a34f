//! Per-session countdown.

use serde::{Deserialize, Serialize};

/// Seconds on the clock when the human makes their first move.
pub const COUNTDOWN_START: u32 = 15;

/// The human's countdown.
///
/// Idle until the human's first move, then ticks down once per time unit
/// for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
    running: bool,
}

impl Countdown {
    /// A full, idle countdown.
    pub fn new() -> Self {
        Self {
            remaining: COUNTDOWN_START,
            running: false,
        }
    }

    /// Starts ticking from the current value.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops ticking; the remaining value is kept for display.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Removes one unit and returns what is left.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    /// Units left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether ticks currently count.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True once the clock hit zero.
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}
