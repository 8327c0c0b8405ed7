//! Shared game arbitrating moves between two sessions.

use crate::games::connect_four::{GameState, GameStatus, MoveError, Placement, Side};
use crate::outbox::Outbox;
use crate::protocol::{OPPONENT_LEFT_NOTICE, ServerMessage};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// One game shared by exactly two sessions.
///
/// Board and mover live behind a single lock. Every move validates, mutates,
/// evaluates and enqueues its notifications inside that lock, so both clients
/// always hear about moves in the order they were applied and from the same
/// post-move evaluation.
#[derive(Debug)]
pub struct Game {
    state: Mutex<GameState>,
    outboxes: [Outbox; 2],
}

impl Game {
    /// Creates a game delivering notifications to the given outboxes.
    #[instrument(skip_all)]
    pub fn new(red: Outbox, blue: Outbox) -> Self {
        info!("Creating new game");
        Self {
            state: Mutex::new(GameState::new()),
            outboxes: [red, blue],
        }
    }

    /// Attempts a move for `requester` and notifies both sides on success.
    ///
    /// The mover is queued `VALID_MOVE <cell>` followed by `VICTORY` or `TIE`
    /// when the move ended the game; the opponent is queued
    /// `OPPONENT_MOVED <cell>` followed by `DEFEAT` or `TIE`.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] from the game state. Nothing is queued and
    /// nothing changes on rejection.
    #[instrument(skip(self))]
    pub fn attempt_move(&self, selector: usize, requester: Side) -> Result<Placement, MoveError> {
        let mut state = self.lock();
        let placement = state.attempt_move(selector, requester)?;
        self.announce(&placement);
        Ok(placement)
    }

    /// Records that `side` left; an unfinished game tells the opponent.
    #[instrument(skip(self))]
    pub fn leave(&self, side: Side) {
        let state = self.lock();
        if state.status().is_terminal() {
            debug!("Player left finished game");
            return;
        }
        info!("Player left unfinished game");
        self.outbox(side.opponent())
            .send(ServerMessage::notice(OPPONENT_LEFT_NOTICE));
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> GameState {
        self.lock().clone()
    }

    /// Returns the side permitted to move.
    pub fn mover(&self) -> Side {
        self.lock().mover()
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.lock().status()
    }

    fn announce(&self, placement: &Placement) {
        let mover = self.outbox(placement.side);
        let opponent = self.outbox(placement.side.opponent());

        mover.send(ServerMessage::ValidMove(placement.cell));
        opponent.send(ServerMessage::OpponentMoved(placement.cell));

        match placement.status {
            GameStatus::InProgress => {}
            GameStatus::Won(winner) => {
                info!(%winner, "Game won");
                mover.send(ServerMessage::Victory);
                opponent.send(ServerMessage::Defeat);
            }
            GameStatus::Tie => {
                info!("Game tied");
                mover.send(ServerMessage::Tie);
                opponent.send(ServerMessage::Tie);
            }
        }
    }

    fn outbox(&self, side: Side) -> &Outbox {
        &self.outboxes[side.index()]
    }

    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Game lock poisoned, recovering state");
            PoisonError::into_inner(poisoned)
        })
    }
}
