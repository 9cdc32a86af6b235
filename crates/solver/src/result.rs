use std::fmt;
use std::time::Duration;

use puzzle_core::{Direction, Position};

use crate::SolverError;

/// One character installed on one tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterPlacement {
    pub character_id: String,
    pub position: Position,
    pub facing: Direction,
}

impl fmt::Display for CharacterPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} facing {}", self.character_id, self.position, self.facing)
    }
}

/// A winning placement and the number of turns it took.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementSolution {
    pub placements: Vec<CharacterPlacement>,
    /// Turns executed up to and including the winning one.
    pub turns_to_win: u32,
}

/// Aggregated outcome of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverResult {
    /// A winning placement was found. `false` is only a proof of
    /// unsolvability when `error` is `None`.
    pub solvable: bool,
    pub min_characters_needed: Option<u32>,
    pub solution: Option<PlacementSolution>,
    pub combinations_tested: u64,
    pub elapsed: Duration,
    pub error: Option<SolverError>,
    /// The combination cap stopped the search, with or without a solution.
    pub limit_reached: bool,
}

impl SolverResult {
    /// Exhaustive search that found nothing.
    pub fn is_proven_unsolvable(&self) -> bool {
        !self.solvable && self.error.is_none()
    }
}
