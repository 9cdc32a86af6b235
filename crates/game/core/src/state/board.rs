use std::collections::BTreeSet;

use super::{EntityRef, Position};

/// Runtime overlay on top of the authored grid.
///
/// Ordered sets keep iteration (and therefore serialization) deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    /// Tiles whose wall status was flipped by a plate.
    pub flipped_walls: BTreeSet<Position>,
    /// Trigger groups whose enabled state was flipped.
    pub flipped_groups: BTreeSet<String>,
    /// Plates that were occupied at the end of the previous turn.
    pub pressed_plates: BTreeSet<Position>,
    /// Damage-once ledger: (entity, tile) pairs that already burned.
    pub burned: BTreeSet<(EntityRef, Position)>,
    /// Tiles blocked by static objects.
    pub obstacles: BTreeSet<Position>,
}

impl BoardState {
    pub fn toggle_wall(&mut self, at: Position) {
        if !self.flipped_walls.remove(&at) {
            self.flipped_walls.insert(at);
        }
    }

    pub fn toggle_group(&mut self, group: &str) {
        if !self.flipped_groups.remove(group) {
            self.flipped_groups.insert(group.to_owned());
        }
    }

    /// Records a burn and returns false if the pair had already burned.
    pub fn mark_burned(&mut self, entity: EntityRef, at: Position) -> bool {
        self.burned.insert((entity, at))
    }
}

/// Aggregated statistics consumed by scoring and side quests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// Total damage dealt to characters.
    pub damage_taken: u32,
    pub character_deaths: u32,
    pub enemies_defeated: u32,
    pub collectibles_collected: u32,
}

/// Observable happenings of the most recent turn.
///
/// Only recorded outside headless mode, where a UI replays them as
/// animations. Outcomes never depend on whether they are recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnEvent {
    Moved { entity: EntityRef, from: Position, to: Position },
    Turned { entity: EntityRef, facing: super::Direction },
    Bumped { entity: EntityRef, at: Position },
    Attacked { entity: EntityRef, tiles: Vec<Position> },
    SpellCast { entity: EntityRef, spell: String, tiles: Vec<Position> },
    /// Full flight path of a projectile that resolved this turn.
    Projectile { entity: EntityRef, path: Vec<Position> },
    Damaged { entity: EntityRef, amount: i32, health: i32 },
    Healed { entity: EntityRef, amount: i32, health: i32 },
    Died { entity: EntityRef },
    Teleported { entity: EntityRef, from: Position, to: Position },
    Slid { entity: EntityRef, from: Position, to: Position },
    Collected { entity: EntityRef, collectible: usize },
    PlatePressed { at: Position },
    PlateReleased { at: Position },
    WallToggled { at: Position },
    GroupToggled { group: String },
    EnemySpawned { entity: EntityRef },
    EnemyDespawned { entity: EntityRef },
}
