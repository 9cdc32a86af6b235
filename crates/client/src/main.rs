//! Grid tactics command-line client.
//!
//! Composition root that wires content loading, the turn engine and the
//! solver behind a few subcommands:
//!
//! ```bash
//! tactics list
//! tactics validate first_blood
//! tactics solve frozen_gate --async
//! tactics play first_blood --place knight@3,1
//! ```
mod commands;
mod config;
mod logging;
mod share;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use commands::{Play, Solve, Validate};
use config::ClientConfig;

/// Grid tactics puzzle tools
#[derive(Parser)]
#[command(name = "tactics")]
#[command(about = "Validate, solve and play grid tactics puzzles", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory (overrides TACTICS_CONTENT_DIR)
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List puzzles in the content directory
    List,

    /// Run structural checks on a puzzle
    Validate(Validate),

    /// Search for the smallest winning placement
    Solve(Solve),

    /// Play a puzzle with a fixed placement and print the result
    Play(Play),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(dir) = cli.content_dir {
        config.content_dir = dir;
    }

    let _guard = logging::setup_logging(config.log_dir.as_deref(), cli.verbose)?;
    tracing::debug!("Content directory: {}", config.content_dir.display());

    match cli.command {
        Command::List => commands::list(&config),
        Command::Validate(cmd) => cmd.execute(&config),
        Command::Solve(cmd) => cmd.execute(&config).await,
        Command::Play(cmd) => cmd.execute(&config),
    }
}
