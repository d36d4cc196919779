//! Reactive hooks run after every accepted command.
//!
//! Hooks inspect the events the command produced and may apply further
//! changes to the same working context. They run in priority order (lower
//! values first) and see only the events emitted before the hook phase
//! started, so a hook never re-triggers on its own output.

use std::sync::Arc;

use crate::engine::ActionContext;
use crate::roll::request_roll;
use crate::scheduler;
use crate::state::{AbilityId, DuelContext, DuelSource, GameEvent, Phase, RollContext, UnitId};

/// A rule that reacts to the events of a dispatch.
pub trait ReactiveHook: Send + Sync {
    /// Lower values execute first. Default priority is 0.
    fn priority(&self) -> i32 {
        0
    }

    fn name(&self) -> &'static str;

    /// Determines whether this hook should run for these events.
    fn should_trigger(&self, events: &[GameEvent]) -> bool;

    fn apply(&self, ctx: &mut ActionContext<'_>, events: &[GameEvent]);
}

/// Ends the game as soon as one side has no living units.
#[derive(Debug)]
pub struct VictoryHook;

impl ReactiveHook for VictoryHook {
    fn priority(&self) -> i32 {
        // Nothing else should react once the game is decided.
        -10
    }

    fn name(&self) -> &'static str {
        "victory"
    }

    fn should_trigger(&self, events: &[GameEvent]) -> bool {
        events
            .iter()
            .any(|event| matches!(event, GameEvent::UnitDied { .. }))
    }

    fn apply(&self, ctx: &mut ActionContext<'_>, _events: &[GameEvent]) {
        scheduler::check_victory(ctx);
    }
}

/// Sentinel watch: a free attack on an enemy that becomes visible nearby.
///
/// Only one reaction fires per dispatch, and only while nothing else is being
/// resolved; a reveal during an open roll or queue is simply missed.
#[derive(Debug)]
pub struct SentinelWatchHook;

impl SentinelWatchHook {
    fn revealed(events: &[GameEvent]) -> impl Iterator<Item = UnitId> + '_ {
        events.iter().filter_map(|event| match event {
            GameEvent::UnitRevealed { unit, .. } | GameEvent::StealthExpired { unit } => {
                Some(*unit)
            }
            _ => None,
        })
    }

    /// First sentinel by id able to react to `target`.
    fn watcher(ctx: &ActionContext<'_>, target: UnitId) -> Option<(UnitId, u32)> {
        let target = ctx.state.living_unit(target)?;
        let position = target.position?;
        let radius = ctx.config().watch_radius;
        let cost = ctx
            .catalog()
            .charge_spec(AbilityId::Watch)
            .map_or(1, |spec| spec.cost);

        ctx.state
            .units
            .values()
            .filter(|unit| unit.is_deployed() && unit.owner != target.owner)
            .filter(|unit| ctx.env().has_ability(unit, AbilityId::Watch))
            .filter(|unit| unit.charges(AbilityId::Watch) >= cost)
            .find(|unit| {
                unit.position
                    .is_some_and(|watcher| watcher.distance(position) <= radius)
            })
            .map(|unit| (unit.id, unit.charges(AbilityId::Watch) - cost))
    }
}

impl ReactiveHook for SentinelWatchHook {
    fn name(&self) -> &'static str {
        "sentinel_watch"
    }

    fn should_trigger(&self, events: &[GameEvent]) -> bool {
        Self::revealed(events).next().is_some()
    }

    fn apply(&self, ctx: &mut ActionContext<'_>, events: &[GameEvent]) {
        if ctx.state.phase != Phase::Battle
            || ctx.state.pending_roll.is_some()
            || ctx.state.is_resolving_queue()
        {
            return;
        }

        for target in Self::revealed(events) {
            let Some((sentinel, remaining)) = Self::watcher(ctx, target) else {
                continue;
            };
            let Some((owner, damage)) = ctx
                .state
                .unit(sentinel)
                .map(|unit| (unit.owner, unit.attack))
            else {
                continue;
            };

            crate::abilities::set_charges(ctx, sentinel, AbilityId::Watch, remaining);
            let duel = DuelContext::new(
                sentinel,
                target,
                DuelSource::Reaction(AbilityId::Watch),
                damage,
            );
            if request_roll(ctx, owner, RollContext::AttackerRoll(duel), Some(sentinel)).is_ok() {
                return;
            }
        }
    }
}

/// Returns the default hook set, sorted by priority.
pub fn default_hooks() -> Arc<[Arc<dyn ReactiveHook>]> {
    let mut hooks: Vec<Arc<dyn ReactiveHook>> =
        vec![Arc::new(VictoryHook), Arc::new(SentinelWatchHook)];
    hooks.sort_by_key(|hook| hook.priority());
    hooks.into()
}
