//! Owned, serializable repository backed by ordered maps.

use std::collections::BTreeMap;

use super::{
    CharacterDefinition, CollectibleDefinition, DefinitionRepository, EnemyDefinition,
    ObjectDefinition, TileTypeDefinition,
};

/// Complete set of definitions captured in memory.
///
/// Loaders produce one from catalog files; tests build one directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefinitionSnapshot {
    #[cfg_attr(feature = "serde", serde(default))]
    pub characters: BTreeMap<String, CharacterDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies: BTreeMap<String, EnemyDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tile_types: BTreeMap<String, TileTypeDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub collectibles: BTreeMap<String, CollectibleDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub objects: BTreeMap<String, ObjectDefinition>,
}

impl DefinitionSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_character(mut self, definition: CharacterDefinition) -> Self {
        self.characters.insert(definition.id.clone(), definition);
        self
    }

    pub fn with_enemy(mut self, definition: EnemyDefinition) -> Self {
        self.enemies.insert(definition.id.clone(), definition);
        self
    }

    pub fn with_tile_type(mut self, definition: TileTypeDefinition) -> Self {
        self.tile_types.insert(definition.id.clone(), definition);
        self
    }

    pub fn with_collectible(mut self, definition: CollectibleDefinition) -> Self {
        self.collectibles.insert(definition.id.clone(), definition);
        self
    }

    pub fn with_object(mut self, definition: ObjectDefinition) -> Self {
        self.objects.insert(definition.id.clone(), definition);
        self
    }

    /// Merges `other` into `self`; entries in `other` win on id clashes.
    pub fn extend(&mut self, other: DefinitionSnapshot) {
        self.characters.extend(other.characters);
        self.enemies.extend(other.enemies);
        self.tile_types.extend(other.tile_types);
        self.collectibles.extend(other.collectibles);
        self.objects.extend(other.objects);
    }
}

impl DefinitionRepository for DefinitionSnapshot {
    fn character(&self, id: &str) -> Option<&CharacterDefinition> {
        self.characters.get(id)
    }

    fn enemy(&self, id: &str) -> Option<&EnemyDefinition> {
        self.enemies.get(id)
    }

    fn tile_type(&self, id: &str) -> Option<&TileTypeDefinition> {
        self.tile_types.get(id)
    }

    fn collectible(&self, id: &str) -> Option<&CollectibleDefinition> {
        self.collectibles.get(id)
    }

    fn object(&self, id: &str) -> Option<&ObjectDefinition> {
        self.objects.get(id)
    }
}
