//! Core domain types for Connect Four.

use super::rules;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of rows on the board.
pub const ROWS: usize = 6;

/// Number of columns on the board.
pub const COLUMNS: usize = 8;

/// Total number of cells on the board.
pub const CELLS: usize = ROWS * COLUMNS;

/// Returns the absolute cell index for a row and column (row 0 is the top).
pub const fn index_of(row: usize, column: usize) -> usize {
    row * COLUMNS + column
}

/// Side of the table a client plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Side {
    /// Red moves first.
    Red,
    /// Blue moves second.
    Blue,
}

impl Side {
    /// The side that holds the first move of every game.
    pub const FIRST: Side = Side::Red;

    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    /// Stable slot for per-side storage.
    pub fn index(self) -> usize {
        match self {
            Side::Red => 0,
            Side::Blue => 1,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Unowned cell.
    Empty,
    /// Cell owned by a side.
    Occupied(Side),
}

/// Reasons the board refuses a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceError {
    /// Index does not name a cell.
    #[display("cell {index} is out of bounds")]
    OutOfBounds {
        /// Offending index.
        index: usize,
    },
    /// Cell already belongs to a side.
    #[display("cell {index} is already owned by {owner}")]
    Occupied {
        /// Offending index.
        index: usize,
        /// Current owner of the cell.
        owner: Side,
    },
}

/// 6x8 Connect Four board, row-major, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: Vec<Square>,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: vec![Square::Empty; CELLS],
        }
    }

    /// Gets the square at the given cell index.
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if a cell is unowned.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Marks a cell as owned by `side`.
    ///
    /// Ownership is permanent: an owned cell is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::OutOfBounds`] for an index past the board and
    /// [`PlaceError::Occupied`] if the cell already has an owner.
    #[instrument(skip(self))]
    pub fn place(&mut self, index: usize, side: Side) -> Result<(), PlaceError> {
        match self.squares.get_mut(index) {
            None => Err(PlaceError::OutOfBounds { index }),
            Some(Square::Occupied(owner)) => Err(PlaceError::Occupied {
                index,
                owner: *owner,
            }),
            Some(square) => {
                *square = Square::Occupied(side);
                Ok(())
            }
        }
    }

    /// Cell a piece dropped into `column` would land on, if the column has room.
    pub fn lowest_open(&self, column: usize) -> Option<usize> {
        rules::lowest_open(self, column)
    }

    /// Returns the side owning a run of four, if any.
    pub fn winner(&self) -> Option<Side> {
        rules::check_winner(self)
    }

    /// Whether any side owns a run of four anywhere on the board.
    pub fn is_winner(&self) -> bool {
        self.winner().is_some()
    }

    /// Whether every cell is owned.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Number of owned cells.
    pub fn occupied(&self) -> usize {
        self.squares
            .iter()
            .filter(|s| **s != Square::Empty)
            .count()
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..ROWS {
            for column in 0..COLUMNS {
                let symbol = match self.squares[index_of(row, column)] {
                    Square::Empty => '.',
                    Square::Occupied(Side::Red) => 'R',
                    Square::Occupied(Side::Blue) => 'B',
                };
                result.push(symbol);
            }
            if row + 1 < ROWS {
                result.push('\n');
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
