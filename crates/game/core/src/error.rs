//! Common error infrastructure for puzzle-core.
//!
//! The turn executor itself never fails: unresolvable entities are skipped so
//! a single bad reference cannot abort a search. Errors only surface from
//! explicit setup calls such as [`GameState::place_character`].
//!
//! [`GameState::place_character`]: crate::state::GameState::place_character

use crate::state::{GameStatus, Position};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Can retry with a different input (another tile, another character).
    Recoverable,
    /// Invalid input that should not be retried unchanged.
    Validation,
    /// Unexpected state inconsistency; indicates a bug.
    Internal,
    /// State corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all puzzle-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the error variant, for logs and tests.
    fn error_code(&self) -> &'static str;
}

/// Reasons a character cannot be installed on the board.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementError {
    #[error("characters can only be placed during setup (game is {status})")]
    NotInSetup { status: GameStatus },

    #[error("character '{id}' has no definition")]
    UnknownCharacter { id: String },

    #[error("character '{id}' is not in this puzzle's roster")]
    NotInRoster { id: String },

    #[error("character '{id}' is already placed")]
    AlreadyPlaced { id: String },

    #[error("puzzle allows at most {max} characters")]
    TooManyCharacters { max: u32 },

    #[error("tile {position} does not accept placements")]
    InvalidTile { position: Position },

    #[error("tile {position} is already occupied")]
    Occupied { position: Position },
}

impl GameError for PlacementError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidTile { .. } | Self::Occupied { .. } => ErrorSeverity::Recoverable,
            Self::NotInSetup { .. }
            | Self::UnknownCharacter { .. }
            | Self::NotInRoster { .. }
            | Self::AlreadyPlaced { .. }
            | Self::TooManyCharacters { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInSetup { .. } => "PLACEMENT_NOT_IN_SETUP",
            Self::UnknownCharacter { .. } => "PLACEMENT_UNKNOWN_CHARACTER",
            Self::NotInRoster { .. } => "PLACEMENT_NOT_IN_ROSTER",
            Self::AlreadyPlaced { .. } => "PLACEMENT_ALREADY_PLACED",
            Self::TooManyCharacters { .. } => "PLACEMENT_TOO_MANY",
            Self::InvalidTile { .. } => "PLACEMENT_INVALID_TILE",
            Self::Occupied { .. } => "PLACEMENT_OCCUPIED",
        }
    }
}

/// A puzzle references a definition the repository does not know.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefinitionError {
    #[error("character '{id}' is not defined")]
    MissingCharacter { id: String },

    #[error("enemy '{id}' is not defined")]
    MissingEnemy { id: String },

    #[error("tile type '{id}' is not defined")]
    MissingTileType { id: String },

    #[error("collectible '{id}' is not defined")]
    MissingCollectible { id: String },

    #[error("object '{id}' is not defined")]
    MissingObject { id: String },
}

impl GameError for DefinitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCharacter { .. } => "DEFINITION_MISSING_CHARACTER",
            Self::MissingEnemy { .. } => "DEFINITION_MISSING_ENEMY",
            Self::MissingTileType { .. } => "DEFINITION_MISSING_TILE_TYPE",
            Self::MissingCollectible { .. } => "DEFINITION_MISSING_COLLECTIBLE",
            Self::MissingObject { .. } => "DEFINITION_MISSING_OBJECT",
        }
    }
}
