//! Engine configuration loader.

use std::path::Path;

use puzzle_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> LoadResult<GameConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}
