//! Connect Four on a 6x8 board.

mod rules;
mod state;
mod types;

pub use state::{GameState, GameStatus, MoveError, Placement};
pub use types::{Board, CELLS, COLUMNS, PlaceError, ROWS, Side, Square, index_of};
