//! Search loop shared by the blocking and async drivers.
//!
//! [`Search`] advances one candidate per [`Search::step`]. The blocking
//! driver steps until done; the async driver additionally checks its
//! cancellation token before each step and yields every
//! `yield_every` candidates. Both therefore test the same candidates in the
//! same order and return the same result.

use std::time::Instant;

use puzzle_core::{
    DefinitionRepository, Direction, GameError, Position, Puzzle, valid_placement_tiles,
};

use crate::combinatorics::PlacementCandidates;
use crate::simulate::{SimulationOutcome, simulate_placement};
use crate::{
    CancellationToken, CharacterPlacement, PlacementSolution, SolverError, SolverOptions,
    SolverResult,
};

/// Searches for the smallest winning placement, blocking until done.
pub fn solve_puzzle<R>(puzzle: &Puzzle, repo: &R, options: &SolverOptions) -> SolverResult
where
    R: DefinitionRepository + ?Sized,
{
    let mut search = Search::new(puzzle, repo, options);
    loop {
        if let Progress::Done(result) = search.step() {
            return result;
        }
    }
}

/// Same search as [`solve_puzzle`], yielding to the runtime between
/// candidates and stopping early when `cancel` fires.
pub async fn solve_puzzle_async<R>(
    puzzle: &Puzzle,
    repo: &R,
    options: &SolverOptions,
    cancel: &CancellationToken,
) -> SolverResult
where
    R: DefinitionRepository + ?Sized,
{
    let mut search = Search::new(puzzle, repo, options);
    loop {
        if cancel.is_cancelled() {
            return search.cancelled();
        }
        if let Progress::Done(result) = search.step() {
            return result;
        }
        if options.yield_every > 0 && search.tested % options.yield_every == 0 {
            tokio::task::yield_now().await;
        }
    }
}

enum Progress {
    Tested,
    Done(SolverResult),
}

struct Search<'a, R: ?Sized> {
    puzzle: &'a Puzzle,
    repo: &'a R,
    options: &'a SolverOptions,
    roster: Vec<CharacterSlot>,
    tiles: Vec<Position>,
    max_count: usize,
    candidates: PlacementCandidates,
    best: Option<PlacementSolution>,
    tested: u64,
    started: Instant,
}

#[derive(Clone, Debug)]
struct CharacterSlot {
    id: String,
    facing: Direction,
}

impl<'a, R> Search<'a, R>
where
    R: DefinitionRepository + ?Sized,
{
    fn new(puzzle: &'a Puzzle, repo: &'a R, options: &'a SolverOptions) -> Self {
        let started = Instant::now();

        let mut roster: Vec<CharacterSlot> = Vec::new();
        for id in &puzzle.available_characters {
            if roster.iter().any(|slot| &slot.id == id) {
                continue;
            }
            match repo.character(id) {
                Some(def) => roster.push(CharacterSlot {
                    id: def.id.clone(),
                    facing: def.default_facing,
                }),
                None => tracing::warn!(character = %id, "roster entry has no definition; skipped"),
            }
        }

        let tiles = valid_placement_tiles(puzzle, repo);
        let max_count = (puzzle.max_characters as usize).min(roster.len());

        tracing::info!(
            puzzle = %puzzle.id,
            roster = roster.len(),
            tiles = tiles.len(),
            max_count,
            "starting solver search"
        );

        Self {
            candidates: PlacementCandidates::new(roster.len(), tiles.len(), 1),
            puzzle,
            repo,
            options,
            roster,
            tiles,
            max_count,
            best: None,
            tested: 0,
            started,
        }
    }

    fn step(&mut self) -> Progress {
        loop {
            if self.max_count == 0 {
                return Progress::Done(self.finish(None));
            }

            let Some(candidate) = self.candidates.next() else {
                let count = self.candidates.character_count();
                if self.best.is_some() {
                    return Progress::Done(self.finish(None));
                }
                if count >= self.max_count {
                    tracing::debug!(count, "search space exhausted");
                    return Progress::Done(self.finish(None));
                }
                tracing::debug!(count = count + 1, "widening search");
                self.candidates =
                    PlacementCandidates::new(self.roster.len(), self.tiles.len(), count + 1);
                continue;
            };

            if self.tested >= self.options.max_combinations {
                tracing::warn!(
                    limit = self.options.max_combinations,
                    solved = self.best.is_some(),
                    "combination limit reached"
                );
                let error = self.best.is_none().then_some(SolverError::SearchLimitReached {
                    limit: self.options.max_combinations,
                });
                let mut result = self.finish(error);
                result.limit_reached = true;
                return Progress::Done(result);
            }

            self.tested += 1;
            let placements = self.placements(&candidate);
            let outcome = simulate_placement(
                self.puzzle,
                self.repo,
                &self.options.game_config,
                &placements,
                self.options.max_simulation_turns,
            );
            tracing::trace!(tested = self.tested, ?outcome, "candidate simulated");
            if let SimulationOutcome::Rejected(error) = &outcome
                && !error.severity().is_recoverable()
            {
                tracing::warn!(
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    %error,
                    "candidate rejected"
                );
            }

            if let SimulationOutcome::Victory { turns } = outcome {
                let improved = self
                    .best
                    .as_ref()
                    .is_none_or(|best| turns < best.turns_to_win);
                if improved {
                    tracing::debug!(turns, characters = placements.len(), "solution found");
                    self.best = Some(PlacementSolution {
                        placements,
                        turns_to_win: turns,
                    });
                }
                // A first-turn win cannot be beaten.
                if !self.options.find_fastest || turns <= 1 {
                    return Progress::Done(self.finish(None));
                }
            }
            return Progress::Tested;
        }
    }

    fn placements(&self, candidate: &[(usize, usize)]) -> Vec<CharacterPlacement> {
        candidate
            .iter()
            .map(|&(character, tile)| {
                let slot = &self.roster[character];
                CharacterPlacement {
                    character_id: slot.id.clone(),
                    position: self.tiles[tile],
                    facing: slot.facing,
                }
            })
            .collect()
    }

    fn cancelled(&self) -> SolverResult {
        tracing::info!(tested = self.tested, "solver search cancelled");
        self.finish(Some(SolverError::Cancelled {
            tested: self.tested,
        }))
    }

    fn finish(&self, error: Option<SolverError>) -> SolverResult {
        let result = SolverResult {
            solvable: self.best.is_some(),
            min_characters_needed: self
                .best
                .as_ref()
                .map(|solution| solution.placements.len() as u32),
            solution: self.best.clone(),
            combinations_tested: self.tested,
            elapsed: self.started.elapsed(),
            error,
            limit_reached: false,
        };
        tracing::info!(
            puzzle = %self.puzzle.id,
            solvable = result.solvable,
            min_characters = ?result.min_characters_needed,
            tested = result.combinations_tested,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "solver search finished"
        );
        result
    }
}
