//! Turn-by-turn game state for Connect Four.

use super::types::{Board, COLUMNS, PlaceError, Side};
use derive_more::{Display, Error, From};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended with a run of four.
    Won(Side),
    /// Board filled up without a run of four.
    Tie,
}

impl GameStatus {
    /// Whether no further moves can change the outcome.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Reasons a move attempt is rejected. None of them change the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum MoveError {
    /// Requester is not the current mover.
    #[display("not {requester}'s turn")]
    NotYourTurn {
        /// Side that asked to move.
        requester: Side,
    },
    /// Column has no unowned cell left.
    #[display("column {column} is full")]
    ColumnFull {
        /// Column derived from the request.
        column: usize,
    },
    /// Game already reached a terminal state.
    #[display("game is already over")]
    GameOver,
    /// Board refused the placement.
    #[display("board rejected placement: {_0}")]
    #[from]
    Board(PlaceError),
}

/// A move that was applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Placement {
    /// Side that moved.
    pub side: Side,
    /// Absolute cell index that was filled.
    pub cell: usize,
    /// Status evaluated once, right after the placement.
    pub status: GameStatus,
}

/// Complete game state: board, mover, status and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    mover: Side,
    status: GameStatus,
    history: Vec<usize>,
}

impl GameState {
    /// Creates a new game with [`Side::FIRST`] to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            mover: Side::FIRST,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side permitted to move.
    pub fn mover(&self) -> Side {
        self.mover
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns filled cells in the order they were played.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Attempts to drop a piece for `requester`.
    ///
    /// `selector` is reduced modulo the board width, so the protocol's cell
    /// range 0..=47 doubles as a column selector. The piece lands on the
    /// lowest unowned cell of that column.
    ///
    /// # Errors
    ///
    /// Rejects moves after the game ended, out of turn, or into a full column.
    /// A rejected attempt leaves the state untouched.
    #[instrument(skip(self), fields(mover = %self.mover))]
    pub fn attempt_move(
        &mut self,
        selector: usize,
        requester: Side,
    ) -> Result<Placement, MoveError> {
        if self.status.is_terminal() {
            debug!("Move after game over");
            return Err(MoveError::GameOver);
        }

        if requester != self.mover {
            debug!("Move out of turn");
            return Err(MoveError::NotYourTurn { requester });
        }

        let column = selector % COLUMNS;
        let cell = self
            .board
            .lowest_open(column)
            .ok_or(MoveError::ColumnFull { column })?;

        self.board.place(cell, requester)?;
        self.history.push(cell);
        self.mover = requester.opponent();
        self.status = self.evaluate();

        info!(
            column,
            cell,
            status = ?self.status,
            moves = self.history.len(),
            "Move applied"
        );
        debug!(board = %self.board.display(), "Board after move");

        Ok(Placement::new(requester, cell, self.status))
    }

    fn evaluate(&self) -> GameStatus {
        if let Some(winner) = self.board.winner() {
            GameStatus::Won(winner)
        } else if self.board.is_full() {
            GameStatus::Tie
        } else {
            GameStatus::InProgress
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
