//! Single-candidate replay.

use puzzle_core::{
    DefinitionRepository, GameConfig, GameState, GameStatus, PlacementError, Puzzle, execute_turn,
};

use crate::CharacterPlacement;

/// Terminal outcome of one candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimulationOutcome {
    /// Won on the `turns`-th executed turn.
    Victory { turns: u32 },
    /// Lost on the `turns`-th executed turn.
    Defeat { turns: u32 },
    /// Still running after the turn budget.
    Timeout,
    /// The placement could not be installed.
    Rejected(PlacementError),
}

/// Runs `placements` on a fresh headless state for at most `max_turns` turns.
///
/// The puzzle is only read; every call works on its own copy.
pub fn simulate_placement<R>(
    puzzle: &Puzzle,
    repo: &R,
    config: &GameConfig,
    placements: &[CharacterPlacement],
    max_turns: u32,
) -> SimulationOutcome
where
    R: DefinitionRepository + ?Sized,
{
    let mut state = GameState::new(puzzle, repo)
        .with_config(config.clone())
        .headless(true);

    for placement in placements {
        if let Err(error) = state.place_character(
            repo,
            &placement.character_id,
            placement.position,
            Some(placement.facing),
        ) {
            return SimulationOutcome::Rejected(error);
        }
    }

    for turn in 0..max_turns {
        match execute_turn(&mut state, repo) {
            GameStatus::Victory => return SimulationOutcome::Victory { turns: turn + 1 },
            GameStatus::Defeat => return SimulationOutcome::Defeat { turns: turn + 1 },
            GameStatus::Setup | GameStatus::Running => {}
        }
    }
    SimulationOutcome::Timeout
}
