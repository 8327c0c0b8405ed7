//! Tests for the TCP accept loop pairing clients into games.

use std::time::Duration;
use strictly_connect_four::GameServer;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(address: std::net::SocketAddr) -> Self {
        let stream = TcpStream::connect(address)
            .await
            .expect("Failed to connect");
        let (reader, writer) = stream.into_split();
        Self {
            lines: BufReader::new(reader).lines(),
            writer,
        }
    }

    async fn send(&mut self, line: &str) {
        self.writer
            .write_all(format!("{line}\n").as_bytes())
            .await
            .expect("Failed to write");
    }

    async fn expect(&mut self, expected: &str) {
        let line = timeout(WAIT, self.lines.next_line())
            .await
            .expect("Timed out waiting for server")
            .expect("Failed to read")
            .expect("Server closed the connection");
        assert_eq!(line, expected);
    }
}

/// Connects one client and checks the side it was assigned.
async fn join(address: std::net::SocketAddr, side: &str) -> Client {
    let mut client = Client::connect(address).await;
    client.expect(&format!("WELCOME {side}")).await;
    client.expect("MESSAGE Waiting for opponent to connect").await;
    client
}

async fn expect_started(red: &mut Client, blue: &mut Client) {
    red.expect("MESSAGE All players connected").await;
    red.expect("MESSAGE Your move").await;
    blue.expect("MESSAGE All players connected").await;
}

#[tokio::test]
async fn test_clients_are_paired_in_arrival_order() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let address = listener.local_addr().expect("No local address");
    let server = tokio::spawn(GameServer::serve(listener));

    let mut red_one = join(address, "RED").await;
    let mut blue_one = join(address, "BLUE").await;
    expect_started(&mut red_one, &mut blue_one).await;

    let mut red_two = join(address, "RED").await;
    let mut blue_two = join(address, "BLUE").await;
    expect_started(&mut red_two, &mut blue_two).await;

    red_one.send("MOVE 0").await;
    red_one.expect("VALID_MOVE 40").await;
    blue_one.expect("OPPONENT_MOVED 40").await;

    // The second game has its own board: column 0 is still empty there.
    red_two.send("MOVE 0").await;
    red_two.expect("VALID_MOVE 40").await;
    blue_two.expect("OPPONENT_MOVED 40").await;

    // Turns are tracked per game as well.
    blue_two.send("MOVE 3").await;
    blue_two.expect("VALID_MOVE 43").await;
    red_two.expect("OPPONENT_MOVED 43").await;

    blue_one.send("MOVE 5").await;
    blue_one.expect("VALID_MOVE 45").await;
    red_one.expect("OPPONENT_MOVED 45").await;

    server.abort();
}
