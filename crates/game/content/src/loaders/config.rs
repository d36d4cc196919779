//! Game configuration loader.

use std::path::Path;

use tactics_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`GameConfig::default`] value.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            config.dice_per_roll > 0,
            "dice_per_roll must be at least 1"
        );
        anyhow::ensure!(
            (1..=6).contains(&config.search_threshold),
            "search_threshold {} is not a d6 face",
            config.search_threshold
        );
        anyhow::ensure!(
            i32::from(config.back_rows) * 2 <= GameConfig::BOARD_SIZE,
            "back_rows {} overlap on a {}-row board",
            config.back_rows,
            GameConfig::BOARD_SIZE
        );

        Ok(config)
    }
}
