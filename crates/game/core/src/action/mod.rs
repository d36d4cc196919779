//! Player actions.
//!
//! # Module Structure
//!
//! - `types`: the [`Command`] envelope, the closed [`Action`] set, and payloads
//! - `error`: [`ActionError`], every reason a command can be refused
//! - `guard`: shared ownership, activity, and slot checks
//! - `lobby`, `placement`, `movement`, `attack`, `stealth`, `turn`: handlers
//!
//! Handlers validate first and mutate last. All of them run on an
//! [`ActionContext`](crate::engine::ActionContext) clone, so a refusal after a
//! partial mutation is still harmless.

pub mod error;
pub mod types;

pub(crate) mod attack;
pub(crate) mod guard;
pub(crate) mod lobby;
pub(crate) mod movement;
pub(crate) mod placement;
pub(crate) mod stealth;
pub(crate) mod turn;

pub use error::ActionError;
pub use types::{
    AbilityPayload, Action, Command, MoveMode, ResolveRoll, RollChoice, SearchMode, UnitSpec,
};
