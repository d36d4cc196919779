//! State snapshot repositories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tactics_core::GameState;

use super::{RepositoryError, Result, StateRepository};

/// Stores each snapshot as pretty-printed JSON: `state_<nonce>.json`.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Creates the directory if it does not exist yet.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn path_for(&self, nonce: u64) -> PathBuf {
        self.base_dir.join(format!("state_{nonce:010}.json"))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, nonce: u64, state: &GameState) -> Result<()> {
        let json = serde_json::to_vec_pretty(state)?;
        // Atomic replace.
        let tmp = self.path_for(nonce).with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, self.path_for(nonce))?;
        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<GameState>> {
        let path = self.path_for(nonce);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn exists(&self, nonce: u64) -> bool {
        self.path_for(nonce).exists()
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let mut nonces = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let name = entry?.file_name();
            let nonce = name
                .to_str()
                .and_then(|name| name.strip_prefix("state_"))
                .and_then(|name| name.strip_suffix(".json"))
                .and_then(|digits| digits.parse().ok());
            if let Some(nonce) = nonce {
                nonces.push(nonce);
            }
        }
        nonces.sort_unstable();
        Ok(nonces)
    }
}

/// Keeps snapshots in memory; for tests and short-lived sessions.
#[derive(Default)]
pub struct InMemoryStateRepo {
    states: Mutex<BTreeMap<u64, GameState>>,
}

impl InMemoryStateRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, nonce: u64, state: &GameState) -> Result<()> {
        let mut states = self.states.lock().map_err(|_| RepositoryError::Poisoned)?;
        states.insert(nonce, state.clone());
        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<GameState>> {
        let states = self.states.lock().map_err(|_| RepositoryError::Poisoned)?;
        Ok(states.get(&nonce).cloned())
    }

    fn exists(&self, nonce: u64) -> bool {
        self.states
            .lock()
            .map(|states| states.contains_key(&nonce))
            .unwrap_or(false)
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let states = self.states.lock().map_err(|_| RepositoryError::Poisoned)?;
        Ok(states.keys().copied().collect())
    }
}
