//! Content factory for loading puzzles and definitions from a data directory.

use std::path::{Path, PathBuf};

use puzzle_core::{DefinitionSnapshot, GameConfig, Puzzle};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, PuzzleLoader};

/// Content factory that loads all puzzle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── catalog.ron
/// └── puzzles/
///     ├── first_blood.ron
///     └── frozen_gate.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the definition catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<DefinitionSnapshot> {
        CatalogLoader::load(&self.data_dir.join("catalog.ron"))
    }

    /// Load `puzzles/{name}.ron`, falling back to `puzzles/{name}.json`.
    pub fn load_puzzle(&self, name: &str) -> LoadResult<Puzzle> {
        let dir = self.data_dir.join("puzzles");
        let ron = dir.join(format!("{}.ron", name));
        if ron.exists() {
            return PuzzleLoader::load(&ron);
        }
        let json = dir.join(format!("{}.json", name));
        if json.exists() {
            return PuzzleLoader::load(&json);
        }
        anyhow::bail!("puzzle '{}' not found in {}", name, dir.display())
    }

    /// Names of every puzzle file under `puzzles/`, sorted.
    pub fn list_puzzles(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("puzzles");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let supported = matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("ron" | "json")
            );
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
                && supported
            {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
