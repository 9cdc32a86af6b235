use anyhow::Result;
use clap::Parser;
use solver::{SolverOptions, SolverResult};

use super::load;
use crate::config::ClientConfig;

/// Search for the smallest winning placement
#[derive(Parser, Debug)]
pub struct Solve {
    /// Puzzle name (file stem under puzzles/)
    pub puzzle: String,

    /// Use the cooperative async solver; Ctrl-C cancels the search
    #[arg(long = "async")]
    pub use_async: bool,

    /// Turns simulated per candidate
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Candidate cap for the whole search
    #[arg(long)]
    pub max_combinations: Option<u64>,

    /// Stop at the first solution instead of scanning for the fastest
    #[arg(long, conflicts_with = "fastest")]
    pub first: bool,

    /// Scan the minimum character count for the fastest solution
    #[arg(long)]
    pub fastest: bool,

    /// Skip the structural pre-check
    #[arg(long)]
    pub skip_validation: bool,
}

impl Solve {
    pub async fn execute(self, config: &ClientConfig) -> Result<()> {
        let loaded = load(config, &self.puzzle)?;

        if !self.skip_validation {
            let report = solver::quick_validate(&loaded.puzzle, &loaded.catalog);
            if !report.is_ok() {
                for message in report.messages() {
                    println!("  - {}", message);
                }
                anyhow::bail!("puzzle '{}' failed validation", self.puzzle);
            }
        }

        let mut options = if self.use_async {
            SolverOptions::for_async()
        } else {
            SolverOptions::new()
        }
        .with_game_config(loaded.game_config.clone());
        if let Some(turns) = self.max_turns.or(config.max_simulation_turns) {
            options = options.with_max_simulation_turns(turns);
        }
        if let Some(limit) = self.max_combinations.or(config.max_combinations) {
            options = options.with_max_combinations(limit);
        }
        if self.first {
            options = options.with_find_fastest(false);
        } else if self.fastest {
            options = options.with_find_fastest(true);
        }

        let result = if self.use_async {
            let (handle, token) = solver::cancellation();
            let search = solver::solve_puzzle_async(&loaded.puzzle, &loaded.catalog, &options, &token);
            tokio::pin!(search);
            loop {
                tokio::select! {
                    result = &mut search => break result,
                    signal = tokio::signal::ctrl_c() => {
                        signal?;
                        tracing::info!("Ctrl-C received, cancelling search");
                        handle.cancel();
                    }
                }
            }
        } else {
            solver::solve_puzzle(&loaded.puzzle, &loaded.catalog, &options)
        };

        print_result(&loaded.puzzle.name, &result);
        Ok(())
    }
}

fn print_result(name: &str, result: &SolverResult) {
    println!(
        "{}: {} ({} combinations in {:.2?})",
        name,
        if result.solvable {
            "solvable"
        } else if result.is_proven_unsolvable() {
            "unsolvable"
        } else {
            "undecided"
        },
        result.combinations_tested,
        result.elapsed
    );
    if let Some(error) = &result.error {
        println!("  note: {}", error);
    } else if result.limit_reached {
        println!("  note: search limit reached; a faster solution may exist");
    }
    if let Some(solution) = &result.solution {
        println!(
            "  minimum characters: {}, wins in {} turn(s)",
            solution.placements.len(),
            solution.turns_to_win
        );
        for placement in &solution.placements {
            println!("  - {}", placement);
        }
    }
}
