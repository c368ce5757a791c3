//! Unbeatable - tic-tac-toe against an exhaustive minimax opponent.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod commands;
mod config;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            let config = AppConfig::load(&cli.config)?;
            initialize_file_tracing(&config)?;
            tui::run_tui(&config)
        }
        Command::Hint { board, json } => {
            initialize_stderr_tracing();
            let config = AppConfig::load(&cli.config)?;
            let report = commands::hint(&config, &board)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", commands::format_hint(&report));
            }
            Ok(())
        }
        Command::SelfPlay { json } => {
            initialize_stderr_tracing();
            let config = AppConfig::load(&cli.config)?;
            let report = commands::self_play()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", commands::format_self_play(&report, &config));
            }
            Ok(())
        }
    }
}

/// Logs to the configured file so the alternate screen stays clean.
fn initialize_file_tracing(config: &AppConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(log_file = %config.log_file().display(), "File tracing initialized");
    Ok(())
}

fn initialize_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
