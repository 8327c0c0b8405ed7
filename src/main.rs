//! Strictly Connect Four - server CLI

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_connect_four::{COLUMNS, GameServer, ROWS, ServerConfig, index_of};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::Board => {
            print_layout();
            Ok(())
        }
    }
}

/// Run the pairing server
#[instrument(skip_all, fields(config_path = %config.display()))]
async fn run_server(
    config: std::path::PathBuf,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    initialize_tracing();

    let config = ServerConfig::load(&config)?.with_overrides(host, port);
    info!(address = %config.address(), "Starting Strictly Connect Four server");

    GameServer::new(config).run().await?;
    Ok(())
}

/// Print the cell index of every square, top row first
fn print_layout() {
    for row in 0..ROWS {
        let line: Vec<String> = (0..COLUMNS)
            .map(|column| format!("{:>2}", index_of(row, column)))
            .collect();
        println!("{}", line.join(" "));
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_connect_four=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Tracing initialized");
}
