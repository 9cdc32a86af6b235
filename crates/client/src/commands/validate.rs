use anyhow::Result;
use clap::Parser;

use super::load;
use crate::config::ClientConfig;

/// Run structural checks on a puzzle
#[derive(Parser, Debug)]
pub struct Validate {
    /// Puzzle name (file stem under puzzles/)
    pub puzzle: String,
}

impl Validate {
    pub fn execute(self, config: &ClientConfig) -> Result<()> {
        let loaded = load(config, &self.puzzle)?;
        let report = solver::quick_validate(&loaded.puzzle, &loaded.catalog);

        if report.is_ok() {
            println!("{}: no issues found", loaded.puzzle.name);
            return Ok(());
        }
        println!("{}: {} issue(s)", loaded.puzzle.name, report.issues.len());
        for message in report.messages() {
            println!("  - {}", message);
        }
        anyhow::bail!("puzzle '{}' failed validation", self.puzzle)
    }
}
