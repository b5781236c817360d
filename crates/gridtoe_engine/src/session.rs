//! Match session: rounds, resets, and score bookkeeping.

use crate::error::BoardError;
use crate::score::Scoreboard;
use crate::timer::{DEFAULT_TURN_UNITS, TimerGeneration};
use crate::turn::{Transition, TurnController};
use crate::types::{Board, CellState, GameState, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Read-only copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Side length of the board.
    size: usize,
    /// Cells in row-major order.
    cells: Vec<CellState>,
    /// Player on the clock (or who made the last move once the round is over).
    current_player: Player,
    /// Round state.
    state: GameState,
    /// Rounds won by Cross.
    cross_wins: u32,
    /// Rounds won by Nought.
    nought_wins: u32,
    /// Units left in the current turn.
    remaining: u32,
    /// Whether the countdown is live.
    timer_running: bool,
}

impl SessionSnapshot {
    /// Rounds won by `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::Cross => self.cross_wins,
            Player::Nought => self.nought_wins,
        }
    }
}

/// A sequence of rounds between the same two players on one board size.
///
/// All mutation goes through the command methods, which return the
/// [`Transition`] they caused. Each round adds at most one win: the only
/// place a counter moves is the handling of [`Transition::RoundEnded`].
#[derive(Debug, Clone)]
pub struct MatchSession {
    turn: TurnController,
    score: Scoreboard,
    turn_units: u32,
}

impl MatchSession {
    /// Creates a session on a fresh `size`×`size` board with the default turn budget.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSize`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Self::with_turn_units(size, DEFAULT_TURN_UNITS)
    }

    /// Creates a session with `turn_units` time-units per turn.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSize`] if `size` is zero.
    #[instrument]
    pub fn with_turn_units(size: usize, turn_units: u32) -> Result<Self, BoardError> {
        let board = Board::new(size)?;
        info!(size, turn_units, "Creating match session");
        Ok(Self {
            turn: TurnController::new(board, turn_units),
            score: Scoreboard::new(),
            turn_units,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.turn.board()
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.turn.board().size()
    }

    /// Returns the player on the clock.
    pub fn current_player(&self) -> Player {
        self.turn.current_player()
    }

    /// Returns the round state.
    pub fn state(&self) -> GameState {
        self.turn.state()
    }

    /// Rounds won by `player` since the last new match.
    pub fn wins(&self, player: Player) -> u32 {
        self.score.wins(player)
    }

    /// Returns the scoreboard.
    pub fn score(&self) -> &Scoreboard {
        &self.score
    }

    /// Units left in the current turn.
    pub fn remaining(&self) -> u32 {
        self.turn.timer().remaining()
    }

    /// Whether the countdown is live.
    pub fn timer_running(&self) -> bool {
        self.turn.timer().is_running()
    }

    /// Generation of the live countdown, for tagging scheduled ticks.
    pub fn timer_generation(&self) -> TimerGeneration {
        self.turn.timer().generation()
    }

    /// Time-units granted per turn.
    pub fn turn_units(&self) -> u32 {
        self.turn_units
    }

    /// Copies the observable state for a renderer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            size: self.size(),
            cells: self.board().cells().to_vec(),
            current_player: self.current_player(),
            state: self.state(),
            cross_wins: self.score.wins(Player::Cross),
            nought_wins: self.score.wins(Player::Nought),
            remaining: self.remaining(),
            timer_running: self.timer_running(),
        }
    }

    /// Places the current player's mark at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfRange`] if `index` is not on the board.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, index: usize) -> Result<Transition, BoardError> {
        let transition = self.turn.apply_move(index).inspect_err(|e| {
            warn!(error = %e, "Rejected move");
        })?;
        Ok(self.settle(transition))
    }

    /// Forfeits the round for the player on the clock.
    #[instrument(skip(self))]
    pub fn apply_timeout(&mut self) -> Transition {
        let transition = self.turn.apply_timeout();
        self.settle(transition)
    }

    /// Delivers one time-unit to the countdown identified by `generation`.
    #[instrument(skip(self))]
    pub fn tick(&mut self, generation: TimerGeneration) -> Transition {
        let transition = self.turn.tick(generation);
        self.settle(transition)
    }

    /// Clears the board for another round; scores are kept.
    #[instrument(skip(self))]
    pub fn new_round(&mut self) {
        let mut board = self.turn.board().clone();
        board.clear();
        self.turn.restart(board);
        info!(size = self.size(), "New round");
    }

    /// Starts a new round and zeroes both win counters.
    #[instrument(skip(self))]
    pub fn new_match(&mut self) {
        self.new_round();
        self.score.reset();
        info!("New match, scores cleared");
    }

    /// Stops the countdown; the round stays open and no one forfeits.
    #[instrument(skip(self))]
    pub fn pause(&mut self) {
        self.turn.pause();
        info!("Countdown paused");
    }

    /// Starts a new match on a board of a different size.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSize`] if `size` is zero; the session
    /// is left untouched.
    #[instrument(skip(self))]
    pub fn change_board_size(&mut self, size: usize) -> Result<(), BoardError> {
        let board = Board::new(size)?;
        self.turn.restart(board);
        self.score.reset();
        info!(size, "Board size changed");
        Ok(())
    }

    fn settle(&mut self, transition: Transition) -> Transition {
        if let Transition::RoundEnded(state) = transition {
            match state.winner() {
                Some(winner) => {
                    self.score.record_win(winner);
                    info!(
                        %winner,
                        cross_wins = self.score.wins(Player::Cross),
                        nought_wins = self.score.wins(Player::Nought),
                        "Round won"
                    );
                }
                None => debug!(?state, "Round ended without a winner"),
            }
        }
        transition
    }
}
