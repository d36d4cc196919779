//! Action dispatch pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! command goes through the same steps:
//!
//! 1. reject anything once the game has ended
//! 2. while a roll is pending, accept only its resolution
//! 3. check the phase the action belongs to
//! 4. run the handler on a cloned [`ActionContext`]
//! 5. run the reactive hooks on the events the handler produced
//!
//! A rejection at any step returns the input state untouched and no events.

mod context;
mod errors;
mod hook;

pub use context::ActionContext;
pub use errors::DispatchError;
pub use hook::{ReactiveHook, SentinelWatchHook, VictoryHook, default_hooks};

use std::sync::Arc;

use crate::abilities::{AbilityRegistry, use_ability};
use crate::action::{
    Action, Command, ResolveRoll, attack, lobby, movement, placement, stealth, turn,
};
use crate::env::{GameEnv, RngOracle};
use crate::roll::{RollError, resolve_pending_roll};
use crate::state::{GameEvent, GameState, Phase, RollKind};

/// Result of one dispatch: the next state and what happened, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl Transition {
    /// The unchanged state with no events.
    pub fn rejected(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Pure reducer over [`GameState`].
///
/// Holds only read-only collaborators, so one engine can serve any number of
/// games. Randomness is passed per call.
pub struct GameEngine<'a> {
    env: GameEnv<'a>,
    abilities: AbilityRegistry,
    hooks: Arc<[Arc<dyn ReactiveHook>]>,
}

impl<'a> GameEngine<'a> {
    /// Creates an engine with the built-in abilities and hooks.
    pub fn new(env: GameEnv<'a>) -> Self {
        Self {
            env,
            abilities: AbilityRegistry::standard(),
            hooks: default_hooks(),
        }
    }

    #[must_use]
    pub fn with_registry(mut self, abilities: AbilityRegistry) -> Self {
        self.abilities = abilities;
        self
    }

    /// Replaces the hook set. Hooks are re-sorted by priority.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Vec<Arc<dyn ReactiveHook>>) -> Self {
        let mut hooks = hooks;
        hooks.sort_by_key(|hook| hook.priority());
        self.hooks = hooks.into();
        self
    }

    pub fn env(&self) -> GameEnv<'a> {
        self.env
    }

    /// Applies `command`, folding any rejection into an unchanged state.
    pub fn dispatch(
        &self,
        state: &GameState,
        command: &Command,
        rng: &mut dyn RngOracle,
    ) -> Transition {
        self.try_dispatch(state, command, rng)
            .unwrap_or_else(|_| Transition::rejected(state))
    }

    /// Applies `command`, reporting why it was refused.
    ///
    /// # Errors
    ///
    /// Returns the first failed check. The input state is never modified.
    pub fn try_dispatch(
        &self,
        state: &GameState,
        command: &Command,
        rng: &mut dyn RngOracle,
    ) -> Result<Transition, DispatchError> {
        if state.phase == Phase::Ended {
            return Err(DispatchError::GameEnded);
        }
        if let Some(pending) = &state.pending_roll {
            let resolving = matches!(
                command.action,
                Action::ResolvePendingRoll(_) | Action::RollInitiative
            );
            if !resolving {
                return Err(DispatchError::RollPending(pending.id));
            }
        }
        match command.action.required_phase() {
            Some(expected) if expected != state.phase => {
                return Err(DispatchError::WrongPhase {
                    expected,
                    actual: state.phase,
                });
            }
            _ => {}
        }

        let mut ctx = ActionContext::new(state.clone(), self.env);
        self.route(&mut ctx, command, rng)?;
        self.run_hooks(&mut ctx);
        Ok(ctx.into_transition())
    }

    fn route(
        &self,
        ctx: &mut ActionContext<'_>,
        command: &Command,
        rng: &mut dyn RngOracle,
    ) -> Result<(), DispatchError> {
        let player = command.player;
        match &command.action {
            Action::RollInitiative => {
                let roll = match &ctx.state.pending_roll {
                    Some(pending) if pending.kind() == RollKind::Initiative => pending.id,
                    _ => return Err(RollError::NothingPending.into()),
                };
                resolve_pending_roll(ctx, &ResolveRoll::new(roll, player), rng)?;
            }
            Action::ResolvePendingRoll(resolve) => {
                if resolve.player != player {
                    return Err(RollError::WrongPlayer {
                        roll: resolve.roll,
                        expected: resolve.player,
                    }
                    .into());
                }
                resolve_pending_roll(ctx, resolve, rng)?;
            }
            Action::ChooseArena { arena } => lobby::choose_arena(ctx, arena)?,
            Action::LobbyInit { roster } => lobby::lobby_init(ctx, player, roster)?,
            Action::SetReady { ready } => lobby::set_ready(ctx, player, *ready)?,
            Action::StartGame => lobby::start_game(ctx)?,
            Action::PlaceUnit { unit, position } => {
                placement::place_unit(ctx, player, *unit, *position)?;
            }
            Action::Move { unit, to } => movement::move_unit(ctx, player, *unit, *to)?,
            Action::RequestMoveOptions { unit, mode } => {
                movement::request_move_options(ctx, player, *unit, mode.unwrap_or_default())?;
            }
            Action::Attack { attacker, defender } => {
                attack::attack(ctx, player, *attacker, *defender)?;
            }
            Action::EnterStealth { unit } => stealth::enter_stealth(ctx, player, *unit)?,
            Action::SearchStealth { unit, mode } => {
                stealth::search_stealth(ctx, player, *unit, *mode)?;
            }
            Action::UseAbility {
                unit,
                ability,
                payload,
            } => use_ability(ctx, &self.abilities, player, *unit, *ability, payload)?,
            Action::EndTurn => turn::end_turn(ctx, player)?,
            Action::UnitStartTurn { unit } => turn::unit_start_turn(ctx, player, *unit)?,
        }
        Ok(())
    }

    fn run_hooks(&self, ctx: &mut ActionContext<'_>) {
        let events = ctx.events().to_vec();
        if events.is_empty() {
            return;
        }
        for hook in self.hooks.iter() {
            if hook.should_trigger(&events) {
                hook.apply(ctx, &events);
            }
        }
    }
}

impl std::fmt::Debug for GameEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("env", &self.env)
            .field("abilities", &self.abilities)
            .field("hooks", &self.hooks.iter().map(|h| h.name()).collect::<Vec<_>>())
            .finish()
    }
}
