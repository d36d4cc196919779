//! Working copy threaded through handlers, continuations, and hooks.

use crate::config::GameConfig;
use crate::env::{CatalogOracle, GameEnv};
use crate::state::{GameEvent, GameState};

use super::Transition;

/// Mutable scratch space for one dispatch.
///
/// Owns a clone of the input state. A handler that returns an error simply
/// drops the context, so partial mutations never leak into the caller's
/// state.
pub struct ActionContext<'a> {
    pub state: GameState,
    env: GameEnv<'a>,
    events: Vec<GameEvent>,
}

impl<'a> ActionContext<'a> {
    pub fn new(state: GameState, env: GameEnv<'a>) -> Self {
        Self {
            state,
            env,
            events: Vec::new(),
        }
    }

    pub fn env(&self) -> GameEnv<'a> {
        self.env
    }

    pub fn config(&self) -> &'a GameConfig {
        self.env.config()
    }

    pub fn catalog(&self) -> &'a dyn CatalogOracle {
        self.env.catalog()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn into_transition(self) -> Transition {
        Transition {
            state: self.state,
            events: self.events,
        }
    }
}
