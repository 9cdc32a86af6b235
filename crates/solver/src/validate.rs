//! Structural checks that need no simulation.
//!
//! Run before a search to reject puzzles that cannot possibly be solved as
//! authored. An empty report does not mean the puzzle is solvable.

use puzzle_core::{
    DefinitionError, DefinitionRepository, GameConfig, Position, Puzzle, WinCondition,
    missing_definitions, overflowing_tiles, valid_placement_tiles,
};
use thiserror::Error;

/// One actionable authoring problem.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("no characters are available to place")]
    EmptyRoster,

    #[error("max characters is 0, so nothing can be placed")]
    MaxCharactersZero,

    #[error(transparent)]
    MissingDefinition(#[from] DefinitionError),

    #[error("tile {at} stacks {count} behaviors; only the first {limit} take effect")]
    TooManyTileBehaviors {
        at: Position,
        count: usize,
        limit: usize,
    },

    #[error("no tile accepts a character placement")]
    NoPlacementTiles,

    #[error("the puzzle has no win conditions")]
    NoWinConditions,

    #[error("'defeat all enemies' needs at least one enemy")]
    NoEnemiesToDefeat,

    #[error("'collect all' needs at least one collectible")]
    NoCollectibles,

    #[error("'reach goal' needs a goal tile")]
    NoGoalTile,

    #[error("surviving {turns} turns is impossible with a {limit}-turn limit")]
    SurviveBeyondLimit { turns: u32, limit: u32 },
}

/// Issues found by [`quick_validate`], in check order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// Human-readable issue list.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

pub fn quick_validate<R>(puzzle: &Puzzle, repo: &R) -> ValidationReport
where
    R: DefinitionRepository + ?Sized,
{
    let mut issues = Vec::new();

    if puzzle.available_characters.is_empty() {
        issues.push(ValidationIssue::EmptyRoster);
    }
    if puzzle.max_characters == 0 {
        issues.push(ValidationIssue::MaxCharactersZero);
    }
    issues.extend(
        missing_definitions(puzzle, repo)
            .into_iter()
            .map(ValidationIssue::from),
    );
    issues.extend(overflowing_tiles(puzzle, repo).into_iter().map(|(at, count)| {
        ValidationIssue::TooManyTileBehaviors {
            at,
            count,
            limit: GameConfig::MAX_BEHAVIORS_PER_TILE,
        }
    }));
    if valid_placement_tiles(puzzle, repo).is_empty() {
        issues.push(ValidationIssue::NoPlacementTiles);
    }

    if puzzle.win_conditions.is_empty() {
        issues.push(ValidationIssue::NoWinConditions);
    }
    for condition in &puzzle.win_conditions {
        let issue = match condition {
            WinCondition::DefeatAllEnemies if puzzle.enemies.is_empty() => {
                Some(ValidationIssue::NoEnemiesToDefeat)
            }
            WinCondition::CollectAll if puzzle.collectibles.is_empty() => {
                Some(ValidationIssue::NoCollectibles)
            }
            WinCondition::ReachGoal if !puzzle.has_goal() => Some(ValidationIssue::NoGoalTile),
            WinCondition::SurviveTurns { turns } => puzzle
                .max_turns
                .filter(|limit| turns > limit)
                .map(|limit| ValidationIssue::SurviveBeyondLimit {
                    turns: *turns,
                    limit,
                }),
            _ => None,
        };
        if let Some(issue) = issue
            && !issues.contains(&issue)
        {
            issues.push(issue);
        }
    }

    if !issues.is_empty() {
        tracing::debug!(puzzle = %puzzle.id, issues = issues.len(), "puzzle failed validation");
    }
    ValidationReport { issues }
}
