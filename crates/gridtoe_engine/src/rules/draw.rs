//! Draw detection.

use super::win::check_winner;
use crate::types::Board;
use tracing::instrument;

/// A full board with no owned line is a draw.
#[instrument(skip(board), fields(size = board.size()))]
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && check_winner(board).is_none()
}
