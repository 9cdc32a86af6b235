//! Deterministic rules of the grid tactics puzzle.
//!
//! `puzzle-core` defines the authored data model (puzzles, tiles, character
//! and enemy definitions), the behavior interpreter, the turn engine and the
//! scoring rules. It is pure: no clock, no randomness, no I/O. The solver,
//! content loaders and clients all depend on the types re-exported here.
//!
//! All mutation of a running game flows through [`engine::GameEngine`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod puzzle;
pub mod scoring;
pub mod state;

pub use action::{
    AutoTarget, CharacterAction, Condition, ExecutionMode, RelativeDirection, Rotation, SpellCast,
    TriggerConfig, TurnAngle, WallPolicy, evaluate_condition,
};
pub use config::GameConfig;
pub use engine::{GameEngine, execute_turn, initialize_game_state};
pub use env::{
    CharacterDefinition, CollectibleDefinition, CollisionFlags, DefinitionRepository,
    DefinitionSnapshot, EnemyBehaviorType, EnemyDefinition, ObjectDefinition, SpellDefinition,
    SpellEffect, SpellShape, TileTypeDefinition, missing_definitions, overflowing_tiles,
};
pub use error::{DefinitionError, ErrorSeverity, GameError, PlacementError};
pub use puzzle::{
    Cadence, CollectiblePlacement, EnemyPlacement, ObjectPlacement, ParTargets, PlateEffect,
    Puzzle, PuzzleBuilder, SideQuest, SideQuestKind, Tile, TileBehavior, TileKind, WinCondition,
    valid_placement_tiles,
};
pub use scoring::{PuzzleScore, RankTier, calculate_score};
pub use state::{
    Direction, EntityRef, Faction, GameState, GameStatus, PlacedCharacter, PlacedEnemy,
    PlacedEntity, Position, RunStats, TurnEvent,
};
