//! Worker task that owns the [`Session`].
//!
//! Receives commands from [`crate::RuntimeHandle`] and answers each over its
//! own oneshot channel. Commands are applied strictly in arrival order.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use tactics_core::{Command, GameState, Transition};

use crate::api::Result;
use crate::repository::ActionLogEntry;
use crate::session::Session;

/// Commands that can be sent to the session worker
pub(crate) enum WorkerCommand {
    Submit {
        command: Command,
        reply: oneshot::Sender<Result<Transition>>,
    },
    QueryState {
        reply: oneshot::Sender<GameState>,
    },
    History {
        reply: oneshot::Sender<Vec<ActionLogEntry>>,
    },
    Snapshot {
        reply: oneshot::Sender<Result<u64>>,
    },
    /// Stop after the commands queued ahead of it.
    Shutdown,
}

pub(crate) struct SessionWorker {
    session: Session,
    command_rx: mpsc::Receiver<WorkerCommand>,
}

impl SessionWorker {
    pub(crate) fn new(session: Session, command_rx: mpsc::Receiver<WorkerCommand>) -> Self {
        Self {
            session,
            command_rx,
        }
    }

    /// Runs until told to shut down or every handle is dropped.
    pub(crate) async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            if matches!(command, WorkerCommand::Shutdown) {
                break;
            }
            self.handle_command(command);
        }
        debug!(nonce = self.session.nonce(), "session worker stopped");
    }

    fn handle_command(&mut self, command: WorkerCommand) {
        match command {
            WorkerCommand::Submit { command, reply } => {
                let result = self.session.submit(command);
                if reply.send(result).is_err() {
                    debug!("Submit reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::QueryState { reply } => {
                if reply.send(self.session.state().clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::History { reply } => {
                if reply.send(self.session.history().to_vec()).is_err() {
                    debug!("History reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::Snapshot { reply } => {
                if reply.send(self.session.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::Shutdown => {}
        }
    }
}
