use serde::{Deserialize, Serialize};
use tactics_core::Command;

/// One accepted command with everything needed to replay it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    /// Position of the command in the session, starting at 0.
    pub nonce: u64,
    pub command: Command,
    /// d6 faces the engine drew while applying the command.
    pub dice: Vec<u8>,
    /// State digest after the command.
    pub digest: [u8; 32],
}

impl ActionLogEntry {
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}
