//! Host runtime for the tactics rules engine.
//!
//! The engine crate is a pure reducer; this crate supplies everything around
//! it: content loading, host dice, logging, persistence, and an async façade.
//!
//! Modules are organized by responsibility:
//! - [`session`] owns the authoritative state and applies commands
//! - [`runtime`] runs a session on a worker task behind [`RuntimeHandle`]
//! - [`events`] routes accepted/rejected commands and turn milestones
//! - [`repository`] stores the action log and JSON state snapshots
//! - [`oracle`] adapts content data and `rand` to the engine's interfaces
pub mod config;
pub mod events;
pub mod logging;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod session;

mod api;
mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use config::SessionConfig;
pub use events::{Event, EventBus, GameStateEvent, Topic, TurnEvent};
pub use logging::init_tracing;
pub use oracle::{ContentBundle, RecordingRng, StdRngOracle};
pub use repository::{
    ActionLogEntry, FileActionLog, FileStateRepository, InMemoryStateRepo, RepositoryError,
    StateRepository,
};
pub use runtime::Runtime;
pub use session::{Session, replay};
