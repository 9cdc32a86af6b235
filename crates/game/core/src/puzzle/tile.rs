use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::{Direction, Position};

/// Base tile classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Empty,
    Wall,
    Goal,
    /// Teleport pad; joins the implicit unnamed group unless it carries a
    /// [`TileBehavior::Teleport`] of its own.
    Teleport,
}

/// Behaviors stacked on one tile, evaluated in definition order.
pub type TileBehaviors = ArrayVec<TileBehavior, { GameConfig::MAX_BEHAVIORS_PER_TILE }>;

/// Authored grid cell. `None` cells in the grid do not exist at all.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: TileKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub custom_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behaviors: TileBehaviors,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cadence: Option<Cadence>,
    /// Named group toggled together by pressure plates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trigger_group: Option<String>,
    #[cfg_attr(feature = "serde", serde(default = "enabled_by_default"))]
    pub starts_enabled: bool,
}

#[cfg(feature = "serde")]
fn enabled_by_default() -> bool {
    true
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileKind::Empty)
    }
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            custom_type: None,
            behaviors: ArrayVec::new(),
            cadence: None,
            trigger_group: None,
            starts_enabled: true,
        }
    }

    pub fn empty() -> Self {
        Self::new(TileKind::Empty)
    }

    pub fn wall() -> Self {
        Self::new(TileKind::Wall)
    }

    pub fn goal() -> Self {
        Self::new(TileKind::Goal)
    }

    /// Appends a behavior; extra behaviors beyond the per-tile limit are dropped.
    pub fn with_behavior(mut self, behavior: TileBehavior) -> Self {
        if let Err(_overflow) = self.behaviors.try_push(behavior) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                limit = GameConfig::MAX_BEHAVIORS_PER_TILE,
                behavior = ?_overflow.element(),
                "tile behavior limit reached; behavior dropped"
            );
        }
        self
    }

    pub fn with_cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = Some(cadence);
        self
    }

    pub fn with_custom_type(mut self, id: impl Into<String>) -> Self {
        self.custom_type = Some(id.into());
        self
    }

    pub fn in_group(mut self, group: impl Into<String>, starts_enabled: bool) -> Self {
        self.trigger_group = Some(group.into());
        self.starts_enabled = starts_enabled;
        self
    }
}

/// Special tile semantics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileBehavior {
    Damage {
        amount: i32,
        /// Burn each entity only the first time it enters.
        #[cfg_attr(feature = "serde", serde(default))]
        once: bool,
    },
    Teleport {
        group: String,
    },
    Ice,
    DirectionChange {
        direction: Direction,
    },
    PressurePlate {
        effects: Vec<PlateEffect>,
        /// Effects hold only while the plate stays occupied.
        #[cfg_attr(feature = "serde", serde(default))]
        stay_pressed: bool,
    },
}

/// Effect fired by a pressure plate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlateEffect {
    ToggleWall { at: Position },
    SpawnEnemy { at: Position },
    DespawnEnemy { at: Position },
    /// Moves the entity standing on the plate.
    Teleport { to: Position },
    ToggleTriggerGroup { group: String },
}

/// On/off schedule for a tile's behaviors, keyed off the turn counter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cadence {
    /// Flips every turn.
    Alternating { starts_on: bool },
    /// `on_turns` on, then `off_turns` off, shifted by `offset` turns.
    Interval {
        on_turns: u32,
        off_turns: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        offset: u32,
    },
    /// Explicit repeating pattern, one entry per turn.
    Pattern(Vec<bool>),
}

impl Cadence {
    pub fn is_on(&self, turn: u32) -> bool {
        match self {
            Cadence::Alternating { starts_on } => (turn % 2 == 0) == *starts_on,
            Cadence::Interval {
                on_turns,
                off_turns,
                offset,
            } => {
                let cycle = on_turns.saturating_add(*off_turns);
                if cycle == 0 {
                    return true;
                }
                (turn.wrapping_add(*offset)) % cycle < *on_turns
            }
            Cadence::Pattern(steps) => {
                if steps.is_empty() {
                    return true;
                }
                steps[turn as usize % steps.len()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternating_cadence_flips_each_turn() {
        let cadence = Cadence::Alternating { starts_on: false };
        let states: Vec<bool> = (0..4).map(|turn| cadence.is_on(turn)).collect();
        assert_eq!(states, vec![false, true, false, true]);
    }

    #[test]
    fn interval_cadence_respects_offset() {
        let cadence = Cadence::Interval {
            on_turns: 2,
            off_turns: 1,
            offset: 1,
        };
        let states: Vec<bool> = (0..6).map(|turn| cadence.is_on(turn)).collect();
        assert_eq!(states, vec![true, false, true, true, false, true]);
    }

    #[test]
    fn degenerate_cadences_stay_on() {
        assert!(Cadence::Pattern(Vec::new()).is_on(7));
        assert!(
            Cadence::Interval {
                on_turns: 0,
                off_turns: 0,
                offset: 0
            }
            .is_on(3)
        );
    }

    #[test]
    fn behavior_stack_is_capped() {
        let mut tile = Tile::empty();
        for _ in 0..GameConfig::MAX_BEHAVIORS_PER_TILE + 2 {
            tile = tile.with_behavior(TileBehavior::Ice);
        }
        assert_eq!(tile.behaviors.len(), GameConfig::MAX_BEHAVIORS_PER_TILE);
    }
}
