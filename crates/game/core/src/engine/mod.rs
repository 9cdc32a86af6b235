//! Deterministic turn execution.
//!
//! The [`GameEngine`] is the only reducer for a running [`GameState`]. One
//! call to [`GameEngine::execute_turn`] runs the fixed phase order:
//!
//! 1. every living character (placement order), then every active enemy with
//!    an active behavior type (puzzle order), runs one step of its program;
//!    movement lands immediately, attacks and spells are queued as strikes
//! 2. tile effects for every entity, then pressure plates
//! 3. queued strikes resolve; health at or below zero kills
//! 4. win conditions, then defeat
//! 5. the turn counter advances; reaching the puzzle's turn limit while
//!    still running is a defeat
//!
//! Identical inputs always produce identical states. There is no clock, no
//! randomness and no iteration over unordered collections anywhere in a turn.

mod combat;
mod tiles;
mod turns;
mod victory;

pub use combat::{Reach, Strike, StrikeEffect};

use std::collections::BTreeMap;

use crate::env::DefinitionRepository;
use crate::puzzle::Puzzle;
use crate::state::{Direction, EntityRef, GameState, GameStatus, Position};

/// Builds the setup-phase state for `puzzle`.
pub fn initialize_game_state<R>(puzzle: &Puzzle, repo: &R) -> GameState
where
    R: DefinitionRepository + ?Sized,
{
    GameState::new(puzzle, repo)
}

/// Runs one turn on `state` and returns the resulting status.
///
/// A state still in setup is started first; terminal states are left untouched.
pub fn execute_turn<R>(state: &mut GameState, repo: &R) -> GameStatus
where
    R: DefinitionRepository + ?Sized,
{
    GameEngine::new(state, repo).execute_turn()
}

/// Turn reducer over a borrowed state and definition repository.
pub struct GameEngine<'a, R: ?Sized> {
    state: &'a mut GameState,
    repo: &'a R,
}

impl<'a, R> GameEngine<'a, R>
where
    R: DefinitionRepository + ?Sized,
{
    pub fn new(state: &'a mut GameState, repo: &'a R) -> Self {
        Self { state, repo }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }
}

/// Scratch data shared by the phases of one turn.
#[derive(Debug, Default)]
pub struct TurnContext {
    pub strikes: Vec<Strike>,
    /// Entities that moved during the action phase.
    pub movements: BTreeMap<EntityRef, Movement>,
}

/// Tiles an entity entered this turn and the heading of its last step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movement {
    pub entered: Vec<Position>,
    pub heading: Direction,
}

impl TurnContext {
    pub(crate) fn entered(&mut self, entity: EntityRef, tile: Position, heading: Direction) {
        let movement = self.movements.entry(entity).or_insert_with(|| Movement {
            entered: Vec::new(),
            heading,
        });
        movement.entered.push(tile);
        movement.heading = heading;
    }
}
