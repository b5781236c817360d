//! Core domain types for grid tic-tac-toe.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Player {
    /// Cross (always opens a round).
    #[strum(serialize = "X")]
    Cross,
    /// Nought.
    #[strum(serialize = "O")]
    Nought,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Cross => Player::Nought,
            Player::Nought => Player::Cross,
        }
    }

    /// Returns the cell state this player leaves on the board.
    pub fn mark(self) -> CellState {
        match self {
            Player::Cross => CellState::Cross,
            Player::Nought => CellState::Nought,
        }
    }

    /// Returns the terminal state in which this player has won.
    pub fn win_state(self) -> GameState {
        match self {
            Player::Cross => GameState::CrossWin,
            Player::Nought => GameState::NoughtWin,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// Unclaimed cell.
    #[default]
    Empty,
    /// Cell marked by [`Player::Cross`].
    Cross,
    /// Cell marked by [`Player::Nought`].
    Nought,
}

impl CellState {
    /// Returns the owner of this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            CellState::Empty => None,
            CellState::Cross => Some(Player::Cross),
            CellState::Nought => Some(Player::Nought),
        }
    }

    /// Short symbol used when rendering the cell.
    pub fn symbol(self) -> &'static str {
        match self {
            CellState::Empty => " ",
            CellState::Cross => "X",
            CellState::Nought => "O",
        }
    }
}

/// Outcome of the current round, recomputed from the board after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameState {
    /// Round is ongoing.
    #[default]
    InProgress,
    /// Cross owns a full line (or Nought ran out of time).
    CrossWin,
    /// Nought owns a full line (or Cross ran out of time).
    NoughtWin,
    /// Board is full and nobody owns a line.
    Draw,
}

impl GameState {
    /// Returns true once the round has ended.
    pub fn is_terminal(self) -> bool {
        self != GameState::InProgress
    }

    /// Returns the winning player, if the round ended in a win.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameState::CrossWin => Some(Player::Cross),
            GameState::NoughtWin => Some(Player::Nought),
            GameState::InProgress | GameState::Draw => None,
        }
    }
}

/// Square N×N board stored in row-major order (`index = row * size + col`).
///
/// Deserialization goes through [`Board::new`], so a decoded board always
/// has a non-zero size and exactly `size * size` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    cells: Vec<CellState>,
}

/// Unchecked wire form of [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<CellState>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let mut board = Board::new(raw.size)?;
        if raw.cells.len() != board.len() {
            return Err(BoardError::CellCountMismatch {
                size: raw.size,
                expected: board.len(),
                found: raw.cells.len(),
            });
        }
        board.cells = raw.cells;
        Ok(board)
    }
}

impl Board {
    /// Creates an empty board with `size * size` cells.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSize`] if `size` is zero.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size < 1 {
            return Err(BoardError::InvalidSize { size });
        }
        let len = size
            .checked_mul(size)
            .ok_or(BoardError::InvalidSize { size })?;
        Ok(Self {
            size,
            cells: vec![CellState::Empty; len],
        })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells on the board.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Boards always hold at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Gets the cell at the given index.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfRange`] for an index past the last cell.
    pub fn get(&self, index: usize) -> Result<CellState, BoardError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(BoardError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            })
    }

    /// Sets the cell at the given index.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfRange`] for an index past the last cell.
    pub fn set(&mut self, index: usize, state: CellState) -> Result<(), BoardError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(BoardError::IndexOutOfRange { index, len })?;
        *cell = state;
        Ok(())
    }

    /// Checks if a cell is empty. Out-of-range indices are never empty.
    pub fn is_empty_at(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(CellState::Empty))
    }

    /// Returns true when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != CellState::Empty)
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Converts a (row, column) pair into a cell index.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    /// Indices of every empty cell.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == CellState::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Clears every cell back to [`CellState::Empty`].
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (row, chunk) in self.cells.chunks(self.size).enumerate() {
            if row > 0 {
                result.push('\n');
                result.push_str(&vec!["-"; self.size].join("+"));
                result.push('\n');
            }
            let symbols: Vec<&str> = chunk
                .iter()
                .map(|c| match c {
                    CellState::Empty => ".",
                    other => other.symbol(),
                })
                .collect();
            result.push_str(&symbols.join("|"));
        }
        result
    }
}
