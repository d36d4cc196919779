//! Deterministic rules engine for a two-player grid tactics game.
//!
//! `tactics-core` defines the canonical rules (actions, rolls, combat,
//! scheduling) and exposes a pure reducer that hosts drive with commands and
//! dice. All state mutation flows through [`engine::GameEngine`]; the crate
//! performs no I/O and owns no randomness.
pub mod abilities;
pub mod action;
pub mod board;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod roll;
pub mod scheduler;
pub mod state;

pub use abilities::{AbilityHandler, AbilityRegistry};
pub use action::{
    AbilityPayload, Action, ActionError, Command, MoveMode, ResolveRoll, RollChoice, SearchMode,
    UnitSpec,
};
pub use combat::{CombatOutcome, Defense, DiceContest, Reveal, RevealScope};
pub use config::GameConfig;
pub use engine::{ActionContext, DispatchError, GameEngine, ReactiveHook, Transition};
pub use env::{
    AbilitySpec, AttackReach, CatalogOracle, CatalogSnapshot, ChargeSpec, ClassProfile, GameEnv,
    HeroProfile, MovementShape, PcgRng, RngOracle, ScriptedDice,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use roll::RollError;
pub use state::{
    AbilityId, GameEvent, GameState, HeroId, PendingRoll, Phase, Player, Position, RollContext,
    RollId, RollKind, ShoveOutcome, TurnSlots, UnitClass, UnitId, UnitState,
};
