//! Command-line interface for unbeatable.

use clap::{Parser, Subcommand};

/// Tic-tac-toe against a computer that never loses
#[derive(Parser, Debug)]
#[command(name = "unbeatable")]
#[command(about = "Play tic-tac-toe against an exhaustive minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "unbeatable.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a game in the terminal
    Play,

    /// Show the computer's best reply for a board
    Hint {
        /// Nine cells in row-major order, e.g. "OO..X...." (`.` or a digit
        /// for empty cells)
        board: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let the search play both sides from an empty board
    SelfPlay {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}
