//! Per-client outbound message queue.
//!
//! Each session owns the receiving end. Senders are cheap clones handed to
//! the game, which pushes move acknowledgements and opponent notifications.

use crate::protocol::ServerMessage;
use tokio::sync::mpsc;
use tracing::debug;

/// Creates a connected outbox/inbox pair.
pub fn channel() -> (Outbox, Inbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Outbox { tx }, Inbox { rx })
}

/// Sending half. Safe to use from any number of tasks or threads.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<ServerMessage>,
}

impl Outbox {
    /// Queues a message. Messages for a client that already left are dropped.
    pub fn send(&self, message: ServerMessage) {
        if let Err(mpsc::error::SendError(message)) = self.tx.send(message) {
            debug!(%message, "Outbox closed, dropping message");
        }
    }
}

/// Receiving half, owned by one session.
#[derive(Debug)]
pub struct Inbox {
    rx: mpsc::UnboundedReceiver<ServerMessage>,
}

impl Inbox {
    /// Waits for the next queued message.
    pub async fn recv(&mut self) -> Option<ServerMessage> {
        self.rx.recv().await
    }

    /// Takes a queued message without waiting.
    pub fn try_recv(&mut self) -> Option<ServerMessage> {
        self.rx.try_recv().ok()
    }
}
