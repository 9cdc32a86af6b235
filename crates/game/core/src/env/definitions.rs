use crate::action::CharacterAction;
use crate::puzzle::{Cadence, TileBehavior};
use crate::state::Direction;

/// Authored playable character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterDefinition {
    pub id: String,
    pub name: String,
    pub health: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_damage"))]
    pub attack_damage: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_range"))]
    pub attack_range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_facing: Direction,
    pub behavior: Vec<CharacterAction>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<SpellDefinition>,
}

impl CharacterDefinition {
    pub fn new(id: impl Into<String>, health: i32, behavior: Vec<CharacterAction>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            health,
            attack_damage: 1,
            attack_range: 1,
            default_facing: Direction::North,
            behavior,
            spells: Vec::new(),
        }
    }

    pub fn facing(mut self, facing: Direction) -> Self {
        self.default_facing = facing;
        self
    }

    pub fn with_attack(mut self, damage: i32, range: u32) -> Self {
        self.attack_damage = damage;
        self.attack_range = range;
        self
    }

    pub fn with_spell(mut self, spell: SpellDefinition) -> Self {
        self.spells.push(spell);
        self
    }
}

/// Whether an enemy runs its behavior program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyBehaviorType {
    #[default]
    Static,
    Active,
}

bitflags::bitflags! {
    /// How an enemy, alive or dead, interacts with movement.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CollisionFlags: u8 {
        /// A living enemy occupies its tile.
        const BLOCKS_MOVEMENT = 0b0000_0001;
        /// The corpse keeps occupying its tile.
        const BLOCKS_MOVEMENT_DEAD = 0b0000_0010;
        /// The corpse is treated exactly like a wall.
        const BEHAVES_LIKE_WALL_DEAD = 0b0000_0100;
    }
}

impl Default for CollisionFlags {
    fn default() -> Self {
        Self::BLOCKS_MOVEMENT
    }
}

/// Authored enemy archetype.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub id: String,
    pub name: String,
    pub health: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_damage"))]
    pub attack_damage: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_range"))]
    pub attack_range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior_type: EnemyBehaviorType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: Vec<CharacterAction>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<SpellDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub collision: CollisionFlags,
}

impl EnemyDefinition {
    /// A static enemy that never acts.
    pub fn stationary(id: impl Into<String>, health: i32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            health,
            attack_damage: 1,
            attack_range: 1,
            behavior_type: EnemyBehaviorType::Static,
            behavior: Vec::new(),
            spells: Vec::new(),
            collision: CollisionFlags::default(),
        }
    }

    pub fn active(id: impl Into<String>, health: i32, behavior: Vec<CharacterAction>) -> Self {
        Self {
            behavior_type: EnemyBehaviorType::Active,
            behavior,
            ..Self::stationary(id, health)
        }
    }

    pub fn with_collision(mut self, collision: CollisionFlags) -> Self {
        self.collision = collision;
        self
    }

    pub fn with_attack(mut self, damage: i32, range: u32) -> Self {
        self.attack_damage = damage;
        self.attack_range = range;
        self
    }

    pub fn with_spell(mut self, spell: SpellDefinition) -> Self {
        self.spells.push(spell);
        self
    }
}

#[cfg(feature = "serde")]
fn default_damage() -> i32 {
    1
}

#[cfg(feature = "serde")]
fn default_range() -> u32 {
    1
}

/// Footprint of a spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellShape {
    /// The adjacent tile.
    Melee,
    /// Travels in a straight line and stops at the first affected entity.
    Projectile,
    /// Every tile within `radius` of the centre.
    Area { radius: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellEffect {
    /// Hurts hostile entities.
    Damage(i32),
    /// Restores allied entities, capped at their maximum health.
    Heal(i32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: String,
    pub shape: SpellShape,
    pub effect: SpellEffect,
    #[cfg_attr(feature = "serde", serde(default = "default_range"))]
    pub range: u32,
}

impl SpellDefinition {
    pub fn new(id: impl Into<String>, shape: SpellShape, effect: SpellEffect, range: u32) -> Self {
        Self {
            id: id.into(),
            shape,
            effect,
            range,
        }
    }
}

/// Reusable tile archetype referenced by `Tile::custom_type`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileTypeDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behaviors: Vec<TileBehavior>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cadence: Option<Cadence>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocks_movement: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prevents_placement: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectibleDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prevents_placement: bool,
    /// Health restored to the character that picks it up.
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal: i32,
}

/// Static board furniture such as rocks or barrels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocks_movement: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prevents_placement: bool,
}
