//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;

/// Moves the cursor on a `size`×`size` board based on arrow keys.
///
/// Movement stops at the board edges; other keys leave the cursor alone.
pub fn move_cursor(cursor: usize, size: usize, key: KeyCode) -> usize {
    if size == 0 {
        return 0;
    }
    let cursor = cursor.min(size * size - 1);
    let (row, col) = (cursor / size, cursor % size);

    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(size - 1), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(size - 1)),
        _ => (row, col),
    };

    row * size + col
}

/// Maps a digit key to a cell index on boards small enough to number 1-9.
pub fn digit_cell(key: KeyCode, size: usize) -> Option<usize> {
    let KeyCode::Char(c) = key else {
        return None;
    };
    let digit = c.to_digit(10)? as usize;
    let cells = size * size;
    (cells <= 9 && (1..=cells).contains(&digit)).then(|| digit - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_within_board() {
        assert_eq!(move_cursor(4, 3, KeyCode::Up), 1);
        assert_eq!(move_cursor(4, 3, KeyCode::Down), 7);
        assert_eq!(move_cursor(4, 3, KeyCode::Left), 3);
        assert_eq!(move_cursor(4, 3, KeyCode::Right), 5);
    }

    #[test]
    fn test_clamps_at_edges() {
        assert_eq!(move_cursor(0, 4, KeyCode::Up), 0);
        assert_eq!(move_cursor(0, 4, KeyCode::Left), 0);
        assert_eq!(move_cursor(15, 4, KeyCode::Down), 15);
        assert_eq!(move_cursor(15, 4, KeyCode::Right), 15);
        assert_eq!(move_cursor(3, 4, KeyCode::Right), 3);
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(move_cursor(7, 5, KeyCode::Enter), 7);
    }

    #[test]
    fn test_out_of_range_cursor_clamped() {
        assert_eq!(move_cursor(30, 3, KeyCode::Char('x')), 8);
    }

    #[test]
    fn test_digit_cells_on_small_boards() {
        assert_eq!(digit_cell(KeyCode::Char('1'), 3), Some(0));
        assert_eq!(digit_cell(KeyCode::Char('9'), 3), Some(8));
        assert_eq!(digit_cell(KeyCode::Char('0'), 3), None);
        assert_eq!(digit_cell(KeyCode::Char('5'), 2), None);
        assert_eq!(digit_cell(KeyCode::Char('1'), 4), None);
    }
}
