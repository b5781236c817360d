//! Engine error types.

/// Caller errors when building or addressing a board.
///
/// These indicate a bug in the collaborator (a bad size or a stale index),
/// not a recoverable game condition. Illegal moves are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// Board side length below one.
    #[display("Board size must be at least 1, got {size}")]
    InvalidSize {
        /// Requested side length.
        size: usize,
    },

    /// Cell index past the end of the board.
    #[display("Cell index {index} out of range for a board of {len} cells")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of cells on the board.
        len: usize,
    },

    /// Stored cells do not fill a `size`×`size` grid.
    #[display("Board of size {size} needs {expected} cells, got {found}")]
    CellCountMismatch {
        /// Declared side length.
        size: usize,
        /// `size * size`.
        expected: usize,
        /// Number of cells supplied.
        found: usize,
    },
}

/// Errors talking to a match runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RunnerError {
    /// The runner task has shut down and no longer accepts commands.
    #[display("Match runner has stopped")]
    Stopped,
}
