//! Async runtime around a [`Session`].
//!
//! The runtime moves the session into a worker task and hands out cloneable
//! [`RuntimeHandle`]s. Several clients (two player seats, a spectator) can
//! submit through their own handles; the worker serializes them.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::config::SessionConfig;
use crate::session::Session;
use crate::workers::SessionWorker;

pub struct Runtime {
    handle: RuntimeHandle,
    worker: JoinHandle<()>,
}

impl Runtime {
    /// Spawns the worker for `session` on the current tokio runtime.
    pub fn start(session: Session, command_buffer_size: usize) -> Self {
        let (command_tx, command_rx) = mpsc::channel(command_buffer_size.max(1));
        let handle = RuntimeHandle::new(command_tx, session.event_bus().clone());
        let worker = tokio::spawn(SessionWorker::new(session, command_rx).run());

        Self { handle, worker }
    }

    /// Builds the session from `config` and starts it.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let session = Session::from_config(config)?;
        Ok(Self::start(session, config.command_buffer_size))
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stops the worker once the commands already queued are applied, even
    /// while cloned handles are still alive.
    pub async fn shutdown(self) -> Result<()> {
        self.handle.stop().await;
        drop(self.handle);
        self.worker.await.map_err(RuntimeError::WorkerJoin)
    }
}
