//! Full-board detection for Connect Four.

use super::super::{Board, Square};
use tracing::instrument;

/// Checks if the board is full (all cells owned).
///
/// A full board with no winner is a tie.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}
