//! Gravity drop: pieces fall to the lowest unowned cell of a column.

use super::super::{Board, COLUMNS, ROWS, index_of};
use tracing::instrument;

/// Returns the cell a piece dropped into `column` lands on.
///
/// Scans from the bottom row upward. `None` if the column is full or
/// `column` is not on the board.
#[instrument(skip(board))]
pub fn lowest_open(board: &Board, column: usize) -> Option<usize> {
    if column >= COLUMNS {
        return None;
    }
    (0..ROWS)
        .rev()
        .map(|row| index_of(row, column))
        .find(|&index| board.is_empty(index))
}

#[cfg(test)]
mod tests {
    use super::super::super::Side;
    use super::*;

    #[test]
    fn test_empty_column_lands_on_bottom_row() {
        let board = Board::new();
        assert_eq!(lowest_open(&board, 0), Some(40));
        assert_eq!(lowest_open(&board, 7), Some(47));
    }

    #[test]
    fn test_stacks_on_previous_piece() {
        let mut board = Board::new();
        board.place(43, Side::Red).unwrap();
        assert_eq!(lowest_open(&board, 3), Some(35));
    }

    #[test]
    fn test_full_column() {
        let mut board = Board::new();
        for row in 0..ROWS {
            board.place(index_of(row, 2), Side::Blue).unwrap();
        }
        assert_eq!(lowest_open(&board, 2), None);
    }

    #[test]
    fn test_column_off_board() {
        assert_eq!(lowest_open(&Board::new(), COLUMNS), None);
    }
}
