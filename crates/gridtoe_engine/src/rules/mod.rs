//! Game rules for grid tic-tac-toe.
//!
//! Pure functions that derive the [`GameState`] of a board. Rules are
//! separated from board storage so the turn controller and tests can
//! evaluate any board, including ones that legal play could never reach.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::{check_winner, line_count, winning_lines};

use crate::types::{Board, GameState};
use tracing::instrument;

/// Computes the outcome of a board.
///
/// A fully owned line wins (see [`check_winner`] for the scan order);
/// otherwise a full board is a draw and anything else is still in progress.
#[instrument(skip(board), fields(size = board.size()))]
pub fn evaluate(board: &Board) -> GameState {
    if let Some(winner) = check_winner(board) {
        return winner.win_state();
    }
    if is_draw(board) {
        GameState::Draw
    } else {
        GameState::InProgress
    }
}
