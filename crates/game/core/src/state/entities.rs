use std::fmt;

use super::{Direction, Position};
use crate::env::CollisionFlags;

/// Which side an entity fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    Character,
    Enemy,
}

impl Faction {
    pub const fn opponent(self) -> Self {
        match self {
            Faction::Character => Faction::Enemy,
            Faction::Enemy => Faction::Character,
        }
    }
}

/// Stable handle to an entity inside one [`GameState`](super::GameState).
///
/// Ordering follows turn order: every character (placement order) before
/// every enemy (puzzle order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityRef {
    pub faction: Faction,
    pub index: usize,
}

impl EntityRef {
    pub const fn character(index: usize) -> Self {
        Self {
            faction: Faction::Character,
            index,
        }
    }

    pub const fn enemy(index: usize) -> Self {
        Self {
            faction: Faction::Enemy,
            index,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.faction, self.index)
    }
}

/// Mutable per-run record of a character or enemy on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedEntity {
    /// Id of the backing character or enemy definition.
    pub definition_id: String,
    pub position: Position,
    pub facing: Direction,
    pub health: i32,
    pub max_health: i32,
    /// Index of the next action in the behavior program.
    pub action_index: usize,
    /// Inactive entities (dormant or unresolved) are off the board.
    pub active: bool,
    pub dead: bool,
    pub collision: CollisionFlags,
}

/// A placed playable character.
pub type PlacedCharacter = PlacedEntity;

/// A placed enemy.
pub type PlacedEnemy = PlacedEntity;

impl PlacedEntity {
    pub fn new(
        definition_id: impl Into<String>,
        position: Position,
        facing: Direction,
        health: i32,
    ) -> Self {
        Self {
            definition_id: definition_id.into(),
            position,
            facing,
            health,
            max_health: health,
            action_index: 0,
            active: true,
            dead: false,
            collision: CollisionFlags::BLOCKS_MOVEMENT,
        }
    }

    /// On the board and still fighting.
    pub fn is_alive(&self) -> bool {
        self.active && !self.dead
    }

    /// Applies damage and returns true if this blow killed the entity.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.is_alive() || amount <= 0 {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.dead = true;
            return true;
        }
        false
    }

    /// Restores health up to the maximum and returns the amount applied.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.is_alive() || amount <= 0 {
            return 0;
        }
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }
}

/// Runtime status of a placed collectible.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectibleState {
    pub collectible_id: String,
    pub position: Position,
    pub collected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_kills_at_zero_health() {
        let mut entity = PlacedEntity::new("knight", Position::ORIGIN, Direction::East, 3);
        assert!(!entity.take_damage(2));
        assert!(entity.take_damage(1));
        assert!(entity.dead);
        assert!(!entity.take_damage(5), "dead entities do not die twice");
    }

    #[test]
    fn healing_is_capped() {
        let mut entity = PlacedEntity::new("cleric", Position::ORIGIN, Direction::North, 5);
        entity.take_damage(1);
        assert_eq!(entity.heal(4), 1);
        assert_eq!(entity.health, 5);
    }

    #[test]
    fn characters_sort_before_enemies() {
        let mut refs = vec![EntityRef::enemy(0), EntityRef::character(2), EntityRef::character(0)];
        refs.sort();
        assert_eq!(
            refs,
            vec![EntityRef::character(0), EntityRef::character(2), EntityRef::enemy(0)]
        );
    }
}
