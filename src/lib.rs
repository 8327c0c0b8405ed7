//! Strictly Connect Four library - two-player Connect Four over a text protocol
//!
//! Clients connect over TCP, are paired first-come first-paired, and play on a
//! 6x8 board by sending `MOVE <n>` lines.
//!
//! # Architecture
//!
//! - **Games**: pure board, rules and turn state (no I/O, no locking)
//! - **Game**: one shared game per pair; serializes moves behind a lock and
//!   notifies both clients
//! - **Session**: one task per client translating protocol lines to game calls
//! - **Server**: TCP accept loop pairing clients into games
//!
//! # Example
//!
//! ```no_run
//! use strictly_connect_four::{GameServer, ServerConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let server = GameServer::new(ServerConfig::default());
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod game;
mod games;
mod outbox;
mod protocol;
mod server;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Shared game
pub use game::Game;

// Crate-level exports - Transport plumbing
pub use outbox::{Inbox, Outbox, channel};
pub use protocol::{
    CONNECTED_NOTICE, Command, OPPONENT_LEFT_NOTICE, ProtocolError, REJECTED_NOTICE,
    ServerMessage, WAITING_NOTICE, YOUR_MOVE_NOTICE,
};
pub use server::{GameHandles, GameServer};
pub use session::{Session, SessionEnd, SessionError};

// Crate-level exports - Game types (Connect Four)
pub use games::connect_four::{
    Board, CELLS, COLUMNS, GameState, GameStatus, MoveError, PlaceError, Placement, ROWS,
    Side, Square, index_of,
};
