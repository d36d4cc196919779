//! Lobby roster presets.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{CatalogOracle, GameConfig, UnitSpec};

use crate::loaders::{LoadResult, read_file};

/// Named rosters a player can submit with `LobbyInit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterBook {
    pub presets: BTreeMap<String, Vec<UnitSpec>>,
}

impl RosterBook {
    pub fn get(&self, name: &str) -> Option<&[UnitSpec]> {
        self.presets.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Checks every preset against the catalog the engine will validate with.
    pub fn validate(&self, catalog: &dyn CatalogOracle) -> LoadResult<()> {
        for (name, roster) in &self.presets {
            anyhow::ensure!(
                roster.len() == GameConfig::UNITS_PER_SIDE,
                "roster {} has {} units, expected {}",
                name,
                roster.len(),
                GameConfig::UNITS_PER_SIDE
            );
            for spec in roster {
                let Some(hero) = &spec.hero else { continue };
                let profile = catalog
                    .hero(hero)
                    .ok_or_else(|| anyhow::anyhow!("roster {} uses unknown hero {}", name, hero))?;
                anyhow::ensure!(
                    profile.base == spec.class,
                    "roster {}: hero {} is a {}, not a {}",
                    name,
                    hero,
                    profile.base,
                    spec.class
                );
            }
        }
        Ok(())
    }
}

/// Loader for roster presets from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<RosterBook> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RosterBook> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))
    }
}
