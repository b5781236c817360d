//! Turn controller: move application, turn alternation, and timeout forfeiture.

use crate::error::BoardError;
use crate::rules::evaluate;
use crate::timer::{TimerGeneration, TimerTick, TurnTimer};
use crate::types::{Board, GameState, Player};
use tracing::{debug, info, instrument, warn};

/// What a command did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Preconditions did not hold; nothing changed.
    Ignored,
    /// A mark was placed and the turn passed to `next`.
    TurnPassed {
        /// Player now on the clock.
        next: Player,
    },
    /// The countdown advanced without expiring.
    Ticked {
        /// Units left in the turn.
        remaining: u32,
    },
    /// The round left `InProgress` on this command.
    RoundEnded(GameState),
}

impl Transition {
    /// Returns true if the command changed observable state.
    pub fn changed(self) -> bool {
        self != Transition::Ignored
    }
}

/// Owns the board, whose turn it is, the derived state, and the turn timer.
#[derive(Debug, Clone)]
pub struct TurnController {
    board: Board,
    current_player: Player,
    state: GameState,
    timer: TurnTimer,
}

impl TurnController {
    /// Starts a round on `board` with Cross to move and the timer running.
    #[instrument(skip(board), fields(size = board.size()))]
    pub fn new(board: Board, turn_units: u32) -> Self {
        let mut timer = TurnTimer::new(turn_units);
        timer.restart();
        Self {
            state: evaluate(&board),
            board,
            current_player: Player::Cross,
            timer,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player on the clock.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the round state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns the turn timer.
    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    /// Places the current player's mark at `index`.
    ///
    /// Moves on an occupied cell or after the round has ended are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfRange`] if `index` is not on the board.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&mut self, index: usize) -> Result<Transition, BoardError> {
        let cell = self.board.get(index)?;

        if self.state.is_terminal() {
            debug!(state = ?self.state, "Move after round end ignored");
            return Ok(Transition::Ignored);
        }
        if cell.owner().is_some() {
            debug!(?cell, "Move on occupied cell ignored");
            return Ok(Transition::Ignored);
        }

        self.board.set(index, self.current_player.mark())?;
        self.state = evaluate(&self.board);

        if self.state.is_terminal() {
            self.timer.stop();
            info!(state = ?self.state, "Round ended by move");
            return Ok(Transition::RoundEnded(self.state));
        }

        self.current_player = self.current_player.opponent();
        self.timer.restart();
        debug!(next = %self.current_player, "Turn passed");
        Ok(Transition::TurnPassed {
            next: self.current_player,
        })
    }

    /// Forfeits the round for the player on the clock.
    ///
    /// A no-op once the round has ended, so a late expiry can never
    /// overwrite a finished result.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_timeout(&mut self) -> Transition {
        if self.state.is_terminal() {
            debug!(state = ?self.state, "Timeout after round end ignored");
            return Transition::Ignored;
        }

        self.state = self.current_player.opponent().win_state();
        self.timer.stop();
        warn!(state = ?self.state, "Turn timed out");
        Transition::RoundEnded(self.state)
    }

    /// Delivers one time-unit to the countdown identified by `generation`.
    #[instrument(skip(self))]
    pub fn tick(&mut self, generation: TimerGeneration) -> Transition {
        if self.state.is_terminal() {
            return Transition::Ignored;
        }

        match self.timer.tick(generation) {
            TimerTick::Ignored => Transition::Ignored,
            TimerTick::Running(remaining) => Transition::Ticked { remaining },
            TimerTick::Expired => self.apply_timeout(),
        }
    }

    /// Starts a new round on `board` with Cross to move.
    #[instrument(skip(self, board), fields(size = board.size()))]
    pub fn restart(&mut self, board: Board) {
        self.state = evaluate(&board);
        self.board = board;
        self.current_player = Player::Cross;
        self.timer.restart();
        debug!("Round restarted");
    }

    /// Stops the countdown without ending the round.
    ///
    /// Pending ticks become stale. The next move or restart runs a fresh
    /// countdown.
    #[instrument(skip(self))]
    pub fn pause(&mut self) {
        self.timer.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellState;

    fn controller(size: usize) -> TurnController {
        TurnController::new(Board::new(size).unwrap(), 5)
    }

    #[test]
    fn test_move_marks_and_alternates() {
        let mut turn = controller(3);
        assert_eq!(
            turn.apply_move(4),
            Ok(Transition::TurnPassed {
                next: Player::Nought
            })
        );
        assert_eq!(turn.board().get(4), Ok(CellState::Cross));
        assert_eq!(turn.current_player(), Player::Nought);
    }

    #[test]
    fn test_move_restarts_timer() {
        let mut turn = controller(3);
        let generation = turn.timer().generation();
        turn.tick(generation);
        turn.tick(generation);
        assert_eq!(turn.timer().remaining(), 3);

        turn.apply_move(0).unwrap();
        assert_eq!(turn.timer().remaining(), 5);
        assert_ne!(turn.timer().generation(), generation);
    }

    #[test]
    fn test_occupied_cell_is_noop() {
        let mut turn = controller(3);
        turn.apply_move(0).unwrap();
        let before = turn.board().clone();
        assert_eq!(turn.apply_move(0), Ok(Transition::Ignored));
        assert_eq!(turn.board(), &before);
        assert_eq!(turn.current_player(), Player::Nought);
    }

    #[test]
    fn test_out_of_range_is_error() {
        let mut turn = controller(3);
        assert_eq!(
            turn.apply_move(9),
            Err(BoardError::IndexOutOfRange { index: 9, len: 9 })
        );
    }

    #[test]
    fn test_winning_move_keeps_player_and_stops_timer() {
        let mut turn = controller(3);
        for index in [0, 1, 3, 4] {
            turn.apply_move(index).unwrap();
        }
        assert_eq!(
            turn.apply_move(6),
            Ok(Transition::RoundEnded(GameState::CrossWin))
        );
        assert_eq!(turn.current_player(), Player::Cross);
        assert!(!turn.timer().is_running());
        assert_eq!(turn.apply_move(8), Ok(Transition::Ignored));
    }

    #[test]
    fn test_timeout_forfeits_to_opponent() {
        let mut turn = controller(3);
        assert_eq!(
            turn.apply_timeout(),
            Transition::RoundEnded(GameState::NoughtWin)
        );
        assert_eq!(turn.current_player(), Player::Cross);
        assert_eq!(turn.apply_timeout(), Transition::Ignored);
        assert_eq!(turn.state(), GameState::NoughtWin);
    }

    #[test]
    fn test_countdown_expiry_forfeits() {
        let mut turn = controller(2);
        turn.apply_move(0).unwrap();
        let generation = turn.timer().generation();
        for _ in 0..5 {
            turn.tick(generation);
        }
        assert_eq!(turn.state(), GameState::CrossWin);
        assert_eq!(turn.timer().remaining(), 0);
    }

    #[test]
    fn test_single_cell_round_ends_on_first_move() {
        let mut turn = controller(1);
        assert_eq!(
            turn.apply_move(0),
            Ok(Transition::RoundEnded(GameState::CrossWin))
        );
    }

    #[test]
    fn test_pause_drops_pending_ticks() {
        let mut turn = controller(3);
        let generation = turn.timer().generation();
        turn.pause();
        assert!(!turn.timer().is_running());
        assert_eq!(turn.tick(generation), Transition::Ignored);
        assert_eq!(turn.state(), GameState::InProgress);

        turn.apply_move(0).unwrap();
        assert!(turn.timer().is_running());
    }
}
