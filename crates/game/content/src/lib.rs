//! Data-driven puzzle content and loaders.
//!
//! This crate reads authored content from disk:
//! - Puzzles (RON authoring layout or canonical JSON)
//! - Definition catalogs: characters, enemies, tile types, collectibles, objects (RON)
//! - Engine configuration (TOML)
//!
//! Content is handed to the engine and solver as plain `puzzle-core` values;
//! nothing here runs during a simulation.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, LoadResult, PuzzleLoader};
