//! Win detection for N×N boards.

use crate::types::{Board, CellState, Player};
use tracing::instrument;

/// Number of winning lines on a board of the given side length.
pub fn line_count(size: usize) -> usize {
    2 * size + 2
}

/// Index of the `step`-th cell on winning line `line`.
///
/// Lines `0..size` are rows, `size..2 * size` columns, then the main
/// diagonal and the anti-diagonal.
fn line_cell(size: usize, line: usize, step: usize) -> usize {
    if line < size {
        line * size + step
    } else if line < 2 * size {
        step * size + (line - size)
    } else if line == 2 * size {
        step * size + step
    } else {
        step * size + (size - 1 - step)
    }
}

/// Builds every winning line for a board of the given side length.
///
/// Order is rows (top to bottom), columns (left to right), the main
/// diagonal, then the anti-diagonal: `2 * size + 2` lines in total.
/// For `size == 1` all four lines are the single cell `0`.
#[instrument]
pub fn winning_lines(size: usize) -> Vec<Vec<usize>> {
    (0..line_count(size))
        .map(|line| (0..size).map(|step| line_cell(size, line, step)).collect())
        .collect()
}

/// Returns the owner of the first fully owned line, if any.
///
/// Lines are scanned in [`winning_lines`] order and Cross is checked
/// before Nought within each line, so a board that somehow holds lines
/// for both players still yields a reproducible answer.
#[instrument(skip(board), fields(size = board.size()))]
pub fn check_winner(board: &Board) -> Option<Player> {
    let size = board.size();
    let cells = board.cells();

    (0..line_count(size)).find_map(|line| {
        [Player::Cross, Player::Nought]
            .into_iter()
            .find(|player| owns_line(cells, size, line, player.mark()))
    })
}

fn owns_line(cells: &[CellState], size: usize, line: usize, mark: CellState) -> bool {
    (0..size).all(|step| cells.get(line_cell(size, line, step)) == Some(&mark))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, indices: &[usize], state: CellState) {
        for &i in indices {
            board.set(i, state).unwrap();
        }
    }

    #[test]
    fn test_line_count_is_two_n_plus_two() {
        for size in 1..=10 {
            assert_eq!(winning_lines(size).len(), 2 * size + 2);
        }
    }

    #[test]
    fn test_lines_for_three_by_three() {
        let lines = winning_lines(3);
        assert_eq!(lines[0], vec![0, 1, 2]);
        assert_eq!(lines[3], vec![0, 3, 6]);
        assert_eq!(lines[6], vec![0, 4, 8]);
        assert_eq!(lines[7], vec![2, 4, 6]);
    }

    #[test]
    fn test_single_cell_lines_collapse() {
        assert_eq!(winning_lines(1), vec![vec![0]; 4]);
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new(3).unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_column_on_four_by_four() {
        let mut board = Board::new(4).unwrap();
        place(&mut board, &[1, 5, 9, 13], CellState::Nought);
        assert_eq!(check_winner(&board), Some(Player::Nought));
    }

    #[test]
    fn test_winner_anti_diagonal_on_five_by_five() {
        let mut board = Board::new(5).unwrap();
        place(&mut board, &[4, 8, 12, 16, 20], CellState::Cross);
        assert_eq!(check_winner(&board), Some(Player::Cross));
    }

    #[test]
    fn test_no_winner_incomplete_line() {
        let mut board = Board::new(5).unwrap();
        place(&mut board, &[0, 1, 2, 3], CellState::Cross);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_tie_break_prefers_earlier_line() {
        // Nought owns row 0, Cross owns row 2: rows scan top to bottom.
        let mut board = Board::new(3).unwrap();
        place(&mut board, &[0, 1, 2], CellState::Nought);
        place(&mut board, &[6, 7, 8], CellState::Cross);
        assert_eq!(check_winner(&board), Some(Player::Nought));
    }

    #[test]
    fn test_tie_break_columns_left_to_right() {
        let mut board = Board::new(3).unwrap();
        place(&mut board, &[2, 5, 8], CellState::Cross);
        place(&mut board, &[0, 3, 6], CellState::Nought);
        assert_eq!(check_winner(&board), Some(Player::Nought));
    }

    #[test]
    fn test_tie_break_main_diagonal_first() {
        // Diagonals only avoid each other on even boards.
        let mut board = Board::new(4).unwrap();
        place(&mut board, &[3, 6, 9, 12], CellState::Nought);
        place(&mut board, &[0, 5, 10, 15], CellState::Cross);
        assert_eq!(check_winner(&board), Some(Player::Cross));
    }

    #[test]
    fn test_every_line_detected_without_building_lines() {
        for size in 1..=6 {
            assert_eq!(line_count(size), winning_lines(size).len());
            for line in winning_lines(size) {
                let mut board = Board::new(size).unwrap();
                place(&mut board, &line, CellState::Nought);
                let winner = check_winner(&board);
                assert_eq!(winner, Some(Player::Nought), "size {size} line {line:?}");
            }
        }
    }
}
