//! Content loaders for reading puzzle data from files.
//!
//! Puzzles load from RON (authoring layout) or JSON (canonical export),
//! definition catalogs from RON and engine configuration from TOML.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod puzzle;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use puzzle::PuzzleLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
