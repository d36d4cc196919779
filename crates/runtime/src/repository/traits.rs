//! Repository contracts for saving and loading session state.

use tactics_core::GameState;

use super::Result;

/// Repository for game state snapshots indexed by nonce.
pub trait StateRepository: Send + Sync {
    /// Save a game state indexed by nonce
    fn save(&self, nonce: u64, state: &GameState) -> Result<()>;

    /// Load a game state by nonce
    fn load(&self, nonce: u64) -> Result<Option<GameState>>;

    /// Check if a state exists
    fn exists(&self, nonce: u64) -> bool;

    /// List all available state nonces, ascending
    fn list_nonces(&self) -> Result<Vec<u64>> {
        Ok(vec![])
    }

    /// Newest stored snapshot, if any.
    fn latest(&self) -> Result<Option<(u64, GameState)>> {
        let Some(nonce) = self.list_nonces()?.into_iter().max() else {
            return Ok(None);
        };
        Ok(self.load(nonce)?.map(|state| (nonce, state)))
    }
}
