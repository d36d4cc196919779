//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine rejections, repository failures, content loading, and worker
//! coordination so hosts can bubble them up with consistent context.
use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::oneshot;

use tactics_core::{DispatchError, GameError};

use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine refused the command; the session state is unchanged.
    #[error("command rejected: {0}")]
    Rejected(#[from] DispatchError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Content(#[from] anyhow::Error),

    #[error("failed to read session config {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse session config {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("session has no snapshot repository configured")]
    SnapshotsDisabled,

    #[error("no snapshot stored for nonce {0}")]
    SnapshotNotFound(u64),

    #[error("replay diverged at nonce {nonce}: expected {expected}, got {actual}")]
    ReplayDiverged {
        nonce: u64,
        expected: String,
        actual: String,
    },

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Stable code of an engine rejection, for logs and counters.
    pub fn rejection_code(&self) -> Option<&'static str> {
        match self {
            RuntimeError::Rejected(error) => Some(error.error_code()),
            _ => None,
        }
    }
}
