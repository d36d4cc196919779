//! Content factory for building engine inputs from data files.

use std::path::{Path, PathBuf};

use tactics_core::{CatalogSnapshot, GameConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, RosterBook, RosterLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── catalog.ron
/// └── rosters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data files shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(crate::bundled_data_dir())
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the unit catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<CatalogSnapshot> {
        CatalogLoader::load(&self.data_dir.join("catalog.ron"))
    }

    /// Load roster presets from `rosters.ron`, checked against `catalog`.
    pub fn load_rosters(&self, catalog: &CatalogSnapshot) -> LoadResult<RosterBook> {
        let book = RosterLoader::load(&self.data_dir.join("rosters.ron"))?;
        book.validate(catalog)?;
        Ok(book)
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
