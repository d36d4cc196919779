//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! submitting commands or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use tactics_core::{Command, GameState, Transition};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::repository::ActionLogEntry;
use crate::workers::WorkerCommand;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<WorkerCommand>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<WorkerCommand>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> WorkerCommand,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Ask the worker to stop. Later requests from any handle fail with
    /// [`RuntimeError::CommandChannelClosed`].
    pub(crate) async fn stop(&self) {
        if self.command_tx.send(WorkerCommand::Shutdown).await.is_err() {
            debug!("Shutdown sent to a stopped worker");
        }
    }

    /// Submit a command to the session.
    pub async fn submit(&self, command: Command) -> Result<Transition> {
        self.request(|reply| WorkerCommand::Submit { command, reply })
            .await?
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| WorkerCommand::QueryState { reply })
            .await
    }

    /// Accepted commands so far, in order.
    pub async fn history(&self) -> Result<Vec<ActionLogEntry>> {
        self.request(|reply| WorkerCommand::History { reply })
            .await
    }

    /// Persist the current state; returns the nonce it was stored under.
    pub async fn snapshot(&self) -> Result<u64> {
        self.request(|reply| WorkerCommand::Snapshot { reply })
            .await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - Accepted and rejected commands
    /// - `Topic::Turn` - Battle start, turns, rounds, and game end
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
