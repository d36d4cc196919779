//! Host session configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};

/// Session settings, read from TOML.
///
/// ```toml
/// seed = 42
/// data_dir = "crates/game/content/data"
/// snapshot_dir = "saves/states"
/// action_log = "saves/actions.log"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Dice seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Content directory; the bundled data when unset.
    pub data_dir: Option<PathBuf>,
    /// Where JSON state snapshots go. Snapshots are disabled when unset.
    pub snapshot_dir: Option<PathBuf>,
    /// Append-only log of accepted commands.
    pub action_log: Option<PathBuf>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            data_dir: None,
            snapshot_dir: None,
            action_log: None,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

impl SessionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| RuntimeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_action_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.action_log = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "seed = 7\nsnapshot_dir = \"saves\"\n").unwrap();

        let config = SessionConfig::load(&path).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.snapshot_dir, Some(PathBuf::from("saves")));
        assert_eq!(config.event_buffer_size, 100);
    }

    #[test]
    fn bad_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "seed = \"seven\"").unwrap();

        let err = SessionConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("session.toml"));
    }
}
