//! Data-driven content definitions and loaders.
//!
//! This crate ships the game's static tables as data files and the loaders
//! that read them:
//! - Unit catalog: classes, hero variants, ability charge economy (RON)
//! - Roster presets for the lobby (RON)
//! - Game configuration (TOML)
//!
//! Content feeds the engine's [`tactics_core::CatalogOracle`] and
//! [`tactics_core::GameConfig`]; it never appears in game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, RosterBook, RosterLoader};

use std::path::PathBuf;

/// Directory of the data files bundled with this crate.
pub fn bundled_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}
