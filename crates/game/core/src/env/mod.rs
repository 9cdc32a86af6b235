//! Read-only definition lookups.
//!
//! Authored characters, enemies, tile types, collectibles and objects live
//! outside the puzzle and are reached through [`DefinitionRepository`]. The
//! engine, placement validation and the solver only ever borrow a repository;
//! they never own or mutate definitions.
mod definitions;
mod snapshot;

pub use definitions::{
    CharacterDefinition, CollectibleDefinition, CollisionFlags, EnemyBehaviorType,
    EnemyDefinition, ObjectDefinition, SpellDefinition, SpellEffect, SpellShape,
    TileTypeDefinition,
};
pub use snapshot::DefinitionSnapshot;

use crate::action::CharacterAction;
use crate::config::GameConfig;
use crate::error::DefinitionError;
use crate::puzzle::Puzzle;
use crate::state::{Faction, Position};

/// Side-effect-free lookup of authored definitions by id.
///
/// Called once per entity per turn per candidate during solving, so
/// implementations should be cheap.
pub trait DefinitionRepository: Send + Sync {
    fn character(&self, id: &str) -> Option<&CharacterDefinition>;
    fn enemy(&self, id: &str) -> Option<&EnemyDefinition>;
    fn tile_type(&self, id: &str) -> Option<&TileTypeDefinition>;
    fn collectible(&self, id: &str) -> Option<&CollectibleDefinition>;
    fn object(&self, id: &str) -> Option<&ObjectDefinition>;
}

/// Faction-agnostic view over the fields the interpreter needs.
#[derive(Clone, Copy, Debug)]
pub struct ActorProfile<'a> {
    pub behavior: &'a [CharacterAction],
    pub spells: &'a [SpellDefinition],
    pub attack_damage: i32,
    pub attack_range: u32,
}

impl<'a> ActorProfile<'a> {
    pub fn spell(&self, id: &str) -> Option<&'a SpellDefinition> {
        self.spells.iter().find(|spell| spell.id == id)
    }
}

/// Resolves the behavior profile for an entity's definition.
pub fn actor_profile<'a, R>(repo: &'a R, faction: Faction, id: &str) -> Option<ActorProfile<'a>>
where
    R: DefinitionRepository + ?Sized,
{
    match faction {
        Faction::Character => repo.character(id).map(|def| ActorProfile {
            behavior: &def.behavior,
            spells: &def.spells,
            attack_damage: def.attack_damage,
            attack_range: def.attack_range,
        }),
        Faction::Enemy => repo.enemy(id).map(|def| ActorProfile {
            behavior: &def.behavior,
            spells: &def.spells,
            attack_damage: def.attack_damage,
            attack_range: def.attack_range,
        }),
    }
}

/// Every definition `puzzle` references that `repo` cannot resolve, in
/// roster, enemy, tile, collectible, object order. Duplicates are reported once.
pub fn missing_definitions<R>(puzzle: &Puzzle, repo: &R) -> Vec<DefinitionError>
where
    R: DefinitionRepository + ?Sized,
{
    let mut missing = Vec::new();
    let mut push = |error: DefinitionError| {
        if !missing.contains(&error) {
            missing.push(error);
        }
    };

    for id in &puzzle.available_characters {
        if repo.character(id).is_none() {
            push(DefinitionError::MissingCharacter { id: id.clone() });
        }
    }
    for enemy in &puzzle.enemies {
        if repo.enemy(&enemy.enemy_id).is_none() {
            push(DefinitionError::MissingEnemy {
                id: enemy.enemy_id.clone(),
            });
        }
    }
    for (_, tile) in puzzle.tiles() {
        if let Some(id) = &tile.custom_type
            && repo.tile_type(id).is_none()
        {
            push(DefinitionError::MissingTileType { id: id.clone() });
        }
    }
    for item in &puzzle.collectibles {
        if repo.collectible(&item.collectible_id).is_none() {
            push(DefinitionError::MissingCollectible {
                id: item.collectible_id.clone(),
            });
        }
    }
    for object in &puzzle.objects {
        if repo.object(&object.object_id).is_none() {
            push(DefinitionError::MissingObject {
                id: object.object_id.clone(),
            });
        }
    }
    missing
}

/// Tiles whose own behaviors plus those inherited from their custom tile type
/// exceed [`GameConfig::MAX_BEHAVIORS_PER_TILE`], with the combined count.
/// The surplus is dropped when a game state is built from the puzzle.
pub fn overflowing_tiles<R>(puzzle: &Puzzle, repo: &R) -> Vec<(Position, usize)>
where
    R: DefinitionRepository + ?Sized,
{
    puzzle
        .tiles()
        .filter_map(|(position, tile)| {
            let inherited = tile
                .custom_type
                .as_deref()
                .and_then(|id| repo.tile_type(id))
                .map_or(0, |def| def.behaviors.len());
            let total = tile.behaviors.len() + inherited;
            (total > GameConfig::MAX_BEHAVIORS_PER_TILE).then_some((position, total))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{PuzzleBuilder, Tile, TileBehavior};

    #[test]
    fn reports_each_missing_reference_once() {
        let puzzle = PuzzleBuilder::new("refs", 3, 1)
            .character("knight")
            .character("ghost")
            .enemy("slime", Position::new(1, 0))
            .enemy("slime", Position::new(2, 0))
            .build();
        let repo = DefinitionSnapshot::new()
            .with_character(CharacterDefinition::new("knight", 3, Vec::new()));

        let missing = missing_definitions(&puzzle, &repo);
        assert_eq!(
            missing,
            vec![
                DefinitionError::MissingCharacter { id: "ghost".into() },
                DefinitionError::MissingEnemy { id: "slime".into() },
            ]
        );
    }

    #[test]
    fn inherited_behaviors_can_overflow_a_tile() {
        let repo = DefinitionSnapshot::new().with_tile_type(TileTypeDefinition {
            id: "trap".into(),
            behaviors: vec![TileBehavior::Ice; 3],
            ..TileTypeDefinition::default()
        });
        let crowded = Tile::empty()
            .with_custom_type("trap")
            .with_behavior(TileBehavior::Ice)
            .with_behavior(TileBehavior::Ice);
        let puzzle = PuzzleBuilder::new("crowded", 3, 1)
            .tile(Position::ORIGIN, Some(crowded))
            .tile(Position::new(1, 0), Some(Tile::empty().with_custom_type("trap")))
            .build();

        assert_eq!(overflowing_tiles(&puzzle, &repo), vec![(Position::ORIGIN, 5)]);
    }
}
