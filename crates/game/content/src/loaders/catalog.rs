//! Definition catalog loader.
//!
//! A catalog lists every character, enemy, custom tile type, collectible and
//! object a set of puzzles may reference. Ids must be unique per kind.

use std::collections::BTreeSet;
use std::path::Path;

use puzzle_core::{
    CharacterDefinition, CollectibleDefinition, DefinitionSnapshot, EnemyDefinition,
    ObjectDefinition, TileTypeDefinition,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Catalog structure for RON files.
#[derive(Debug, Default, Deserialize)]
struct CatalogRon {
    #[serde(default)]
    characters: Vec<CharacterDefinition>,
    #[serde(default)]
    enemies: Vec<EnemyDefinition>,
    #[serde(default)]
    tile_types: Vec<TileTypeDefinition>,
    #[serde(default)]
    collectibles: Vec<CollectibleDefinition>,
    #[serde(default)]
    objects: Vec<ObjectDefinition>,
}

/// Loader for definition catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(path: &Path) -> LoadResult<DefinitionSnapshot> {
        let content = read_file(path)?;
        Self::from_ron_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid catalog {}: {}", path.display(), e))
    }

    pub fn from_ron_str(content: &str) -> LoadResult<DefinitionSnapshot> {
        let data: CatalogRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        ensure_unique("character", data.characters.iter().map(|def| def.id.as_str()))?;
        ensure_unique("enemy", data.enemies.iter().map(|def| def.id.as_str()))?;
        ensure_unique("tile type", data.tile_types.iter().map(|def| def.id.as_str()))?;
        ensure_unique("collectible", data.collectibles.iter().map(|def| def.id.as_str()))?;
        ensure_unique("object", data.objects.iter().map(|def| def.id.as_str()))?;

        let snapshot = data
            .characters
            .into_iter()
            .fold(DefinitionSnapshot::new(), DefinitionSnapshot::with_character);
        let snapshot = data
            .enemies
            .into_iter()
            .fold(snapshot, DefinitionSnapshot::with_enemy);
        let snapshot = data
            .tile_types
            .into_iter()
            .fold(snapshot, DefinitionSnapshot::with_tile_type);
        let snapshot = data
            .collectibles
            .into_iter()
            .fold(snapshot, DefinitionSnapshot::with_collectible);
        Ok(data
            .objects
            .into_iter()
            .fold(snapshot, DefinitionSnapshot::with_object))
    }
}

fn ensure_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> LoadResult<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("duplicate {} id '{}'", kind, id);
        }
    }
    Ok(())
}
