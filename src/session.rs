//! Per-client session: one task per connection translating protocol lines
//! into game calls.

use crate::game::Game;
use crate::games::connect_four::Side;
use crate::outbox::{self, Inbox, Outbox};
use crate::protocol::{
    CONNECTED_NOTICE, Command, REJECTED_NOTICE, ServerMessage, WAITING_NOTICE, YOUR_MOVE_NOTICE,
};
use derive_more::{Display, Error, From};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span, instrument, warn};

/// Transport failure that ended a session.
#[derive(Debug, Display, Error, From)]
#[display("Session I/O error: {_0}")]
pub struct SessionError(std::io::Error);

/// Why a session stopped reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Client sent `QUIT`.
    Quit,
    /// Client closed its end of the stream.
    Disconnected,
}

/// A connected client bound to one side of a game.
#[derive(Debug)]
pub struct Session<S> {
    side: Side,
    stream: S,
    outbox: Outbox,
    inbox: Inbox,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    /// Greets a freshly paired client with its side and a waiting notice.
    ///
    /// # Errors
    ///
    /// Fails if the greeting cannot be written.
    #[instrument(skip(stream))]
    pub async fn open(side: Side, mut stream: S) -> Result<Self, SessionError> {
        info!("Client connected");
        write_line(&mut stream, &ServerMessage::Welcome(side)).await?;
        write_line(&mut stream, &ServerMessage::notice(WAITING_NOTICE)).await?;

        let (outbox, inbox) = outbox::channel();
        Ok(Self {
            side,
            stream,
            outbox,
            inbox,
        })
    }

    /// Queues the start-of-game notices, plus the move prompt for the side
    /// that opens.
    ///
    /// Must run for both sessions before either starts, so no opponent move
    /// can be queued ahead of them.
    pub fn announce_start(&self) {
        self.outbox.send(ServerMessage::notice(CONNECTED_NOTICE));
        if self.side == Side::FIRST {
            self.outbox.send(ServerMessage::notice(YOUR_MOVE_NOTICE));
        }
    }

    /// Handle the game uses to reach this client.
    pub fn outbox(&self) -> Outbox {
        self.outbox.clone()
    }

    /// Runs the session on its own task.
    pub fn start(self, game: Arc<Game>) -> JoinHandle<Result<SessionEnd, SessionError>> {
        let span = info_span!("session", side = %self.side);
        tokio::spawn(
            async move {
                let result = self.run(game).await;
                match &result {
                    Ok(end) => info!(?end, "Session finished"),
                    Err(e) => warn!(error = %e, "Session died"),
                }
                result
            }
            .instrument(span),
        )
    }

    /// Reads commands until the client quits or disconnects, while writing
    /// queued messages as they arrive. The connection is closed on return.
    ///
    /// # Errors
    ///
    /// Returns the read or write failure that ended the session.
    pub async fn run(self, game: Arc<Game>) -> Result<SessionEnd, SessionError> {
        let Session {
            side,
            stream,
            outbox,
            mut inbox,
        } = self;

        let (reader, mut writer) = tokio::io::split(stream);
        let mut lines = BufReader::new(reader).lines();

        let result = loop {
            tokio::select! {
                biased;

                Some(message) = inbox.recv() => {
                    if let Err(e) = write_line(&mut writer, &message).await {
                        break Err(e);
                    }
                }
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if handle_line(&game, side, &outbox, &line) == Flow::Quit {
                            break Ok(SessionEnd::Quit);
                        }
                    }
                    Ok(None) => break Ok(SessionEnd::Disconnected),
                    Err(e) => break Err(SessionError::from(e)),
                },
            }
        };

        game.leave(side);

        if result.is_ok() {
            while let Some(message) = inbox.try_recv() {
                write_line(&mut writer, &message).await?;
            }
            writer.shutdown().await?;
        }

        result
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_line(game: &Game, side: Side, outbox: &Outbox, line: &str) -> Flow {
    match line.parse::<Command>() {
        Ok(Command::Quit) => {
            debug!("Client quit");
            Flow::Quit
        }
        Ok(Command::Move(selector)) => {
            if let Err(e) = game.attempt_move(selector, side) {
                debug!(selector, error = %e, "Move rejected");
                outbox.send(ServerMessage::notice(REJECTED_NOTICE));
            }
            Flow::Continue
        }
        Err(e) => {
            debug!(line, error = %e, "Malformed line");
            outbox.send(ServerMessage::notice(REJECTED_NOTICE));
            Flow::Continue
        }
    }
}

async fn write_line<W>(writer: &mut W, message: &ServerMessage) -> Result<(), SessionError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(format!("{message}\n").as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
