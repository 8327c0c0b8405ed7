//! TCP listener pairing incoming clients into games.

use crate::config::ServerConfig;
use crate::game::Game;
use crate::games::connect_four::Side;
use crate::session::{Session, SessionEnd, SessionError};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::{Instrument, info, info_span, instrument, warn};

/// Handles of the two session tasks of one game, red first.
pub type GameHandles = [JoinHandle<Result<SessionEnd, SessionError>>; 2];

/// Pairs clients first-come, first-paired and starts a game per pair.
#[derive(Debug, Clone)]
pub struct GameServer {
    config: ServerConfig,
}

impl GameServer {
    /// Creates a server for the given configuration.
    #[instrument(skip(config), fields(address = %config.address()))]
    pub fn new(config: ServerConfig) -> Self {
        info!("Creating game server");
        Self { config }
    }

    /// Binds the configured address and serves until the listener fails.
    ///
    /// # Errors
    ///
    /// Fails if the address cannot be bound.
    #[instrument(skip(self), fields(address = %self.config.address()))]
    pub async fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.address()).await?;
        info!(local_addr = ?listener.local_addr()?, "Connect Four server is running");
        Self::serve(listener).await;
        Ok(())
    }

    /// Accepts clients forever. The first of each pair plays red.
    ///
    /// Accept and greeting failures are logged and never stop the loop; a red
    /// client keeps waiting until a blue one is greeted successfully.
    pub async fn serve(listener: TcpListener) {
        let mut game_id: u64 = 0;
        let mut waiting: Option<Session<TcpStream>> = None;
        loop {
            let side = if waiting.is_some() { Side::Blue } else { Side::Red };
            let Some(session) = Self::accept(&listener, side).await else {
                continue;
            };

            let Some(red) = waiting.take() else {
                waiting = Some(session);
                continue;
            };

            game_id += 1;
            let span = info_span!("game", game_id);
            span.in_scope(|| info!("Players paired"));
            let _handles = Self::start_game(red, session, span);
        }
    }

    /// Greets two already-connected streams and starts their game.
    ///
    /// # Errors
    ///
    /// Fails if either greeting cannot be written.
    #[instrument(skip_all)]
    pub async fn pair<S>(red: S, blue: S) -> Result<GameHandles, SessionError>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let red = Session::open(Side::Red, red).await?;
        let blue = Session::open(Side::Blue, blue).await?;
        Ok(Self::start_game(red, blue, info_span!("game")))
    }

    /// Builds the game binding two sessions as opponents, then starts both.
    pub fn start_game<S>(
        red: Session<S>,
        blue: Session<S>,
        span: tracing::Span,
    ) -> GameHandles
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let game = Arc::new(span.in_scope(|| Game::new(red.outbox(), blue.outbox())));
        red.announce_start();
        blue.announce_start();
        let _entered = span.enter();
        [red.start(Arc::clone(&game)), blue.start(game)]
    }

    async fn accept(listener: &TcpListener, side: Side) -> Option<Session<TcpStream>> {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Accept failed");
                return None;
            }
        };

        match Session::open(side, stream)
            .instrument(info_span!("client", %peer))
            .await
        {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(%peer, error = %e, "Greeting failed");
                None
            }
        }
    }
}
