//! Topic-based event routing for session observers.
mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{GameStateEvent, TurnEvent};
