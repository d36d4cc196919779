//! Persistence adapters for sessions: the append-only action log and state
//! snapshots.
mod action_log;
mod error;
mod state;
mod traits;
mod types;

pub use action_log::FileActionLog;
pub use error::{RepositoryError, Result};
pub use state::{FileStateRepository, InMemoryStateRepo};
pub use traits::StateRepository;
pub use types::ActionLogEntry;
