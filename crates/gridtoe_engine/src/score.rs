//! Cumulative win counters.

use crate::types::Player;
use serde::{Deserialize, Serialize};

/// Wins per player across the rounds of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    cross_wins: u32,
    nought_wins: u32,
}

impl Scoreboard {
    /// Creates a scoreboard with both counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds won by `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::Cross => self.cross_wins,
            Player::Nought => self.nought_wins,
        }
    }

    /// Counts one more round for `player`.
    pub fn record_win(&mut self, player: Player) {
        let counter = match player {
            Player::Cross => &mut self.cross_wins,
            Player::Nought => &mut self.nought_wins,
        };
        *counter = counter.saturating_add(1);
    }

    /// Zeroes both counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
