//! Command-line interface for strictly_connect_four.

use clap::{Parser, Subcommand};

/// Strictly Connect Four - two-player game server over a text line protocol
#[derive(Parser, Debug)]
#[command(name = "strictly_connect_four")]
#[command(about = "Pairs telnet-friendly clients into Connect Four games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the game server
    Serve {
        /// Path to a TOML config file (defaults are used if it is missing)
        #[arg(short, long, default_value = "connect_four.toml")]
        config: std::path::PathBuf,

        /// Host to bind to, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overrides the config file
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the board layout with the cell index of every square
    Board,
}
