//! Subcommand implementations.
mod play;
mod solve;
mod validate;

pub use play::Play;
pub use solve::Solve;
pub use validate::Validate;

use anyhow::{Context, Result};
use puzzle_content::ContentFactory;
use puzzle_core::{DefinitionSnapshot, GameConfig, Puzzle};

use crate::config::ClientConfig;

/// Everything one subcommand needs from the content directory.
pub(crate) struct Loaded {
    pub puzzle: Puzzle,
    pub catalog: DefinitionSnapshot,
    pub game_config: GameConfig,
}

pub(crate) fn load(config: &ClientConfig, name: &str) -> Result<Loaded> {
    let factory = ContentFactory::new(&config.content_dir);
    let catalog = factory.load_catalog().context("loading catalog")?;
    let game_config = factory.load_config().context("loading config")?;
    let puzzle = factory
        .load_puzzle(name)
        .with_context(|| format!("loading puzzle '{}'", name))?;
    tracing::info!(
        puzzle = %puzzle.id,
        width = puzzle.width,
        height = puzzle.height,
        "puzzle loaded"
    );
    Ok(Loaded {
        puzzle,
        catalog,
        game_config,
    })
}

pub fn list(config: &ClientConfig) -> Result<()> {
    let factory = ContentFactory::new(&config.content_dir);
    for name in factory.list_puzzles()? {
        match factory.load_puzzle(&name) {
            Ok(puzzle) => println!("{:<20} {}", name, puzzle.name),
            Err(e) => println!("{:<20} (unreadable: {})", name, e),
        }
    }
    Ok(())
}
