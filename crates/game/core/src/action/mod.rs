//! Behavior programs and their interpreter.
//!
//! Characters and enemies run the same vocabulary of [`CharacterAction`]
//! steps. The interpreter advances one entity's action pointer per turn,
//! moving it immediately and queueing attacks and spells as strikes that
//! resolve once every entity has acted.
//!
//! # Module Structure
//!
//! - `types`: step vocabulary (moves, turns, attacks, spells, branches)
//! - `interpreter`: action pointer, repeat and parallel execution modes
//! - `movement`: walking, wall policies and short-range teleports
//! - `combat`: basic attacks and spell casts
//! - `targeting`: line tracing, area footprints and auto-targeting
//! - `condition`: board predicates for branches and event triggers

mod combat;
mod condition;
mod interpreter;
mod movement;
mod targeting;
mod types;

pub use condition::evaluate_condition;
pub use types::{
    AutoTarget, CharacterAction, Condition, ExecutionMode, InvalidTurnAngle, RelativeDirection,
    Rotation, SpellCast, TriggerConfig, TurnAngle, WallPolicy,
};

pub(crate) use interpreter::act;
