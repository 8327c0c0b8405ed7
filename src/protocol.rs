//! Plain-text line protocol spoken between clients and the server.
//!
//! One message per line, fields separated by spaces, so a game can be played
//! by hand over telnet.
//!
//! ```text
//!  Client -> Server       Server -> Client
//!  ----------------       ----------------
//!  MOVE <n>               WELCOME <side>
//!  QUIT                   MESSAGE <text>
//!                         VALID_MOVE <cell>
//!                         OPPONENT_MOVED <cell>
//!                         VICTORY
//!                         DEFEAT
//!                         TIE
//! ```

use crate::games::connect_four::Side;
use derive_more::{Display, Error};
use std::str::FromStr;
use tracing::instrument;

/// Notice sent to the first client while it waits for an opponent.
pub const WAITING_NOTICE: &str = "Waiting for opponent to connect";

/// Notice sent to both clients once the game starts.
pub const CONNECTED_NOTICE: &str = "All players connected";

/// Prompt sent to the side holding the first move.
pub const YOUR_MOVE_NOTICE: &str = "Your move";

/// Generic reply to malformed lines and rejected moves.
pub const REJECTED_NOTICE: &str = "?";

/// Notice sent when the other client leaves an unfinished game.
pub const OPPONENT_LEFT_NOTICE: &str = "Opponent left the game";

/// Command sent by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Drop a piece in the column selected by the value.
    Move(usize),
    /// Leave the game.
    Quit,
}

/// Malformed client line.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ProtocolError {
    /// Line had no content.
    #[display("empty line")]
    Empty,
    /// First word is not a known command.
    #[display("unknown command: {keyword}")]
    UnknownCommand {
        /// First word of the line.
        keyword: String,
    },
    /// `MOVE` without a value.
    #[display("MOVE requires a value")]
    MissingArgument,
    /// `MOVE` value is not a non-negative integer.
    #[display("invalid MOVE value: {argument}")]
    InvalidArgument {
        /// Text that failed to parse.
        argument: String,
    },
    /// Extra words after a complete command.
    #[display("unexpected trailing input: {trailing}")]
    TrailingInput {
        /// Everything after the command.
        trailing: String,
    },
}

impl FromStr for Command {
    type Err = ProtocolError;

    #[instrument]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let keyword = words.next().ok_or(ProtocolError::Empty)?;

        let command = match keyword {
            "QUIT" => return Ok(Command::Quit),
            "MOVE" => {
                let argument = words.next().ok_or(ProtocolError::MissingArgument)?;
                let value = argument
                    .parse()
                    .map_err(|_| ProtocolError::InvalidArgument {
                        argument: argument.to_string(),
                    })?;
                Command::Move(value)
            }
            other => {
                return Err(ProtocolError::UnknownCommand {
                    keyword: other.to_string(),
                });
            }
        };

        let trailing: Vec<&str> = words.collect();
        if !trailing.is_empty() {
            return Err(ProtocolError::TrailingInput {
                trailing: trailing.join(" "),
            });
        }

        Ok(command)
    }
}

/// Message sent by the server. `Display` renders the wire form without the
/// line terminator.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ServerMessage {
    /// Assigns the client its side.
    #[display("WELCOME {_0}")]
    Welcome(Side),
    /// Informational text.
    #[display("MESSAGE {_0}")]
    Message(String),
    /// Move accepted; carries the filled cell.
    #[display("VALID_MOVE {_0}")]
    ValidMove(usize),
    /// Opponent filled this cell.
    #[display("OPPONENT_MOVED {_0}")]
    OpponentMoved(usize),
    /// This client won.
    #[display("VICTORY")]
    Victory,
    /// The opponent won.
    #[display("DEFEAT")]
    Defeat,
    /// Board full without a winner.
    #[display("TIE")]
    Tie,
}

impl ServerMessage {
    /// Builds a `MESSAGE` line.
    pub fn notice(text: impl Into<String>) -> Self {
        ServerMessage::Message(text.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!("MOVE 12".parse::<Command>(), Ok(Command::Move(12)));
        assert_eq!("MOVE 0\r".parse::<Command>(), Ok(Command::Move(0)));
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!("QUIT".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("QUIT now".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert_eq!("".parse::<Command>(), Err(ProtocolError::Empty));
        assert_eq!("MOVE".parse::<Command>(), Err(ProtocolError::MissingArgument));
        assert!(matches!(
            "MOVE -1".parse::<Command>(),
            Err(ProtocolError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "MOVE 3 4".parse::<Command>(),
            Err(ProtocolError::TrailingInput { .. })
        ));
        assert!(matches!(
            "move 3".parse::<Command>(),
            Err(ProtocolError::UnknownCommand { .. })
        ));
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(ServerMessage::Welcome(Side::Red).to_string(), "WELCOME RED");
        assert_eq!(ServerMessage::Welcome(Side::Blue).to_string(), "WELCOME BLUE");
        assert_eq!(ServerMessage::ValidMove(40).to_string(), "VALID_MOVE 40");
        assert_eq!(
            ServerMessage::OpponentMoved(7).to_string(),
            "OPPONENT_MOVED 7"
        );
        assert_eq!(
            ServerMessage::notice(REJECTED_NOTICE).to_string(),
            "MESSAGE ?"
        );
        assert_eq!(ServerMessage::Defeat.to_string(), "DEFEAT");
    }
}
