//! Behavior program vocabulary.
//!
//! Every step of a behavior program is a [`CharacterAction`]. Parameters that
//! only make sense for one kind of step live on that variant, so malformed
//! combinations (a turn with a tile count, a move with a spell id) cannot be
//! expressed.

use std::fmt;

use crate::state::Direction;

/// A single step of a behavior program.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterAction {
    /// Walk up to `tiles` tiles relative to the current facing.
    Move {
        direction: RelativeDirection,
        #[cfg_attr(feature = "serde", serde(default = "default_tiles"))]
        tiles: u8,
        #[cfg_attr(feature = "serde", serde(default))]
        on_wall: WallPolicy,
    },

    /// Rotate in place.
    Turn { rotation: Rotation },

    /// Basic attack using the entity's own damage and reach.
    Attack {
        #[cfg_attr(feature = "serde", serde(default))]
        direction: RelativeDirection,
    },

    /// Cast one of the entity's spells.
    Spell(SpellCast),

    /// Branch on board state; either arm may be any other action.
    Conditional {
        condition: Condition,
        then: Box<CharacterAction>,
        #[cfg_attr(feature = "serde", serde(default))]
        otherwise: Option<Box<CharacterAction>>,
    },

    /// Do nothing this turn.
    Wait,

    /// Jump `distance` tiles, ignoring anything in between.
    Teleport {
        #[cfg_attr(feature = "serde", serde(default))]
        direction: RelativeDirection,
        distance: u8,
    },

    /// Loop point: resets the action pointer to the first action.
    Repeat,
}

#[cfg(feature = "serde")]
fn default_tiles() -> u8 {
    1
}

impl CharacterAction {
    pub fn forward() -> Self {
        Self::Move {
            direction: RelativeDirection::Forward,
            tiles: 1,
            on_wall: WallPolicy::Stop,
        }
    }

    pub fn attack_forward() -> Self {
        Self::Attack {
            direction: RelativeDirection::Forward,
        }
    }

    /// Spell steps that run on their own trigger instead of the action pointer.
    pub fn background_cast(&self) -> Option<&SpellCast> {
        match self {
            Self::Spell(cast) if cast.is_background() => Some(cast),
            _ => None,
        }
    }
}

/// Direction relative to the entity's facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelativeDirection {
    #[default]
    Forward,
    Backward,
    Left,
    Right,
    ForwardLeft,
    ForwardRight,
    BackwardLeft,
    BackwardRight,
}

impl RelativeDirection {
    pub const fn offset_degrees(self) -> i32 {
        match self {
            Self::Forward => 0,
            Self::Backward => 180,
            Self::Left => -90,
            Self::Right => 90,
            Self::ForwardLeft => -45,
            Self::ForwardRight => 45,
            Self::BackwardLeft => -135,
            Self::BackwardRight => 135,
        }
    }

    /// Resolves to an absolute direction given the current facing.
    pub fn resolve(self, facing: Direction) -> Direction {
        facing.rotate(self.offset_degrees())
    }
}

/// Rotation increment accepted by turn steps and wall policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u16", into = "u16")
)]
pub enum TurnAngle {
    Eighth,
    #[default]
    Quarter,
    ThreeEighths,
}

impl TurnAngle {
    pub const fn degrees(self) -> i32 {
        match self {
            Self::Eighth => 45,
            Self::Quarter => 90,
            Self::ThreeEighths => 135,
        }
    }
}

/// Rejected rotation increment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("turn angle must be 45, 90 or 135 degrees (got {0})")]
pub struct InvalidTurnAngle(pub u16);

impl TryFrom<u16> for TurnAngle {
    type Error = InvalidTurnAngle;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            45 => Ok(Self::Eighth),
            90 => Ok(Self::Quarter),
            135 => Ok(Self::ThreeEighths),
            other => Err(InvalidTurnAngle(other)),
        }
    }
}

impl From<TurnAngle> for u16 {
    fn from(angle: TurnAngle) -> Self {
        angle.degrees() as u16
    }
}

impl fmt::Display for TurnAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    Left(TurnAngle),
    Right(TurnAngle),
    Around,
}

impl Rotation {
    /// Signed clockwise rotation in degrees.
    pub const fn degrees(self) -> i32 {
        match self {
            Self::Left(angle) => -angle.degrees(),
            Self::Right(angle) => angle.degrees(),
            Self::Around => 180,
        }
    }
}

/// What a moving entity does when the next step is blocked.
///
/// Applied once per blocked step; a multi-tile move keeps going after a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WallPolicy {
    #[default]
    Stop,
    TurnLeft(TurnAngle),
    TurnRight(TurnAngle),
    TurnAround,
    /// Pass through obstacles; the entity lands on the last free tile it crossed.
    Continue,
}

impl WallPolicy {
    /// Facing rotation applied on a blocked step, if the policy turns.
    pub const fn rotation(self) -> Option<Rotation> {
        match self {
            Self::TurnLeft(angle) => Some(Rotation::Left(angle)),
            Self::TurnRight(angle) => Some(Rotation::Right(angle)),
            Self::TurnAround => Some(Rotation::Around),
            Self::Stop | Self::Continue => None,
        }
    }
}

/// Spell step parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellCast {
    pub spell: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: RelativeDirection,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: ExecutionMode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trigger: Option<TriggerConfig>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: AutoTarget,
}

impl SpellCast {
    pub fn new(spell: impl Into<String>) -> Self {
        Self {
            spell: spell.into(),
            direction: RelativeDirection::Forward,
            mode: ExecutionMode::Sequential,
            trigger: None,
            target: AutoTarget::None,
        }
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_trigger(mut self, trigger: TriggerConfig) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn with_target(mut self, target: AutoTarget) -> Self {
        self.target = target;
        self
    }

    /// Parallel casts gated by a trigger fire independently of the action pointer.
    pub fn is_background(&self) -> bool {
        self.mode != ExecutionMode::Sequential && self.trigger.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionMode {
    /// Occupies the turn like any other action.
    #[default]
    Sequential,
    /// Cast, then also run the following action this turn.
    ParallelWithNext,
    /// Cast alongside the action right before it.
    ParallelWithPrevious,
}

/// Gate for parallel casts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerConfig {
    /// Wall-clock interval, mapped onto turns through `GameConfig::turn_duration_ms`.
    Interval { interval_ms: u32 },
    OnEvent(Condition),
}

/// Automatic target selection. The variants are mutually exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutoTarget {
    #[default]
    None,
    NearestEnemy,
    NearestCharacter,
}

/// Board predicates used by conditional steps and event triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    /// A hostile entity stands on one of the eight neighbouring tiles.
    EnemyAdjacent,
    /// The tile straight ahead is a wall, a hole, or off the grid.
    WallAhead,
    HealthBelowHalf,
    /// A hostile entity is visible straight ahead within `range` tiles.
    EnemyInLine { range: u32 },
}
