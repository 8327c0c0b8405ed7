//! Win detection logic for Connect Four.

use super::super::{Board, COLUMNS, ROWS, Side, Square, index_of};
use tracing::instrument;

/// Length of a winning run.
const RUN: usize = 4;

const HORIZONTAL: usize = ROWS * (COLUMNS - RUN + 1);
const VERTICAL: usize = (ROWS - RUN + 1) * COLUMNS;
const DIAGONAL: usize = (ROWS - RUN + 1) * (COLUMNS - RUN + 1);
const LINE_COUNT: usize = HORIZONTAL + VERTICAL + 2 * DIAGONAL;

/// Every run of four cells that stays on the board.
///
/// Starting bounds keep all four sampled cells on the grid, so edges and
/// corners need no special casing.
const LINES: [[usize; RUN]; LINE_COUNT] = build_lines();

const fn build_lines() -> [[usize; RUN]; LINE_COUNT] {
    let mut lines = [[0; RUN]; LINE_COUNT];
    let mut n = 0;

    // Horizontal
    let mut row = 0;
    while row < ROWS {
        let mut column = 0;
        while column + RUN <= COLUMNS {
            let mut k = 0;
            while k < RUN {
                lines[n][k] = index_of(row, column + k);
                k += 1;
            }
            n += 1;
            column += 1;
        }
        row += 1;
    }

    // Vertical
    let mut row = 0;
    while row + RUN <= ROWS {
        let mut column = 0;
        while column < COLUMNS {
            let mut k = 0;
            while k < RUN {
                lines[n][k] = index_of(row + k, column);
                k += 1;
            }
            n += 1;
            column += 1;
        }
        row += 1;
    }

    // Diagonals, down-right and down-left
    let mut row = 0;
    while row + RUN <= ROWS {
        let mut column = 0;
        while column + RUN <= COLUMNS {
            let mut k = 0;
            while k < RUN {
                lines[n][k] = index_of(row + k, column + k);
                lines[n + 1][k] = index_of(row + k, column + RUN - 1 - k);
                k += 1;
            }
            n += 2;
            column += 1;
        }
        row += 1;
    }

    lines
}

/// Checks if any side owns four cells in an unbroken run.
///
/// Scans the whole board. Returns `Some(side)` for the owner of the first run
/// found, `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Side> {
    let squares = board.squares();
    for [a, rest @ ..] in LINES {
        if let Square::Occupied(side) = squares[a]
            && rest.iter().all(|&i| squares[i] == Square::Occupied(side))
        {
            return Some(side);
        }
    }
    None
}
