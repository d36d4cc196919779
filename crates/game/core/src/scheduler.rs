//! Turn and round scheduling.
//!
//! The battle queue is the placement order, fixed for the rest of the game.
//! Dead units stay in the queue and are stepped over, so indices remain stable
//! and the cyclic order never changes.

use crate::combat::release_shelters;
use crate::engine::ActionContext;
use crate::state::{GameEvent, Phase, Player, UnitId, reset_turn_economy};

/// Seeds the turn queue from placement order and enters the battle phase.
pub fn begin_battle(ctx: &mut ActionContext<'_>) {
    let state = &mut ctx.state;
    state.turn.queue = state.placement.order.clone();
    state.turn.index = 0;
    state.turn.round = 1;
    state.turn.active_unit = None;
    state.placement.to_place = None;
    state.phase = Phase::Battle;

    let first = state.turn.queue.first().copied();
    if let Some(first_unit) = first {
        ctx.emit(GameEvent::BattleStarted { first_unit });
    }
}

/// Makes `unit` the active unit and runs its turn-start upkeep.
///
/// Order: `TurnStarted`, charge refills, shelter releases, stealth tick.
pub fn start_turn(ctx: &mut ActionContext<'_>, id: UnitId) {
    let round = ctx.state.turn.round;
    ctx.state.turn.active_unit = Some(id);
    ctx.emit(GameEvent::TurnStarted { unit: id, round });

    let catalog = ctx.catalog();
    let Some(unit) = ctx.state.unit_mut(id) else {
        return;
    };
    reset_turn_economy(unit);

    let mut refilled = Vec::new();
    for (ability, charges) in unit.charges.iter_mut() {
        let Some(spec) = catalog.charge_spec(*ability) else {
            continue;
        };
        let next = spec.recharged(*charges);
        if next != *charges {
            *charges = next;
            refilled.push((*ability, next));
        }
    }
    for (ability, charges) in refilled {
        ctx.emit(GameEvent::ChargesUpdated {
            unit: id,
            ability,
            charges,
        });
    }

    release_shelters(ctx, id);
    tick_stealth(ctx, id);
}

fn tick_stealth(ctx: &mut ActionContext<'_>, id: UnitId) {
    let Some(unit) = ctx.state.unit_mut(id) else {
        return;
    };
    if !unit.stealthed {
        return;
    }
    unit.stealth_turns_left = unit.stealth_turns_left.saturating_sub(1);
    if unit.stealth_turns_left == 0 {
        unit.stealthed = false;
        ctx.state.knowledge.forget(id);
        ctx.emit(GameEvent::StealthExpired { unit: id });
    }
}

/// Closes the active unit's turn and moves the cursor to the next living unit.
pub fn end_turn(ctx: &mut ActionContext<'_>, id: UnitId) {
    ctx.state.turn.active_unit = None;
    ctx.emit(GameEvent::TurnEnded { unit: id });
    advance(ctx);
}

/// Steps the queue cursor to the next living unit, announcing a new round
/// when it wraps past the end.
pub fn advance(ctx: &mut ActionContext<'_>) {
    let len = ctx.state.turn.queue.len();
    if len == 0 {
        return;
    }
    let index = ctx.state.turn.index;
    for step in 1..=len {
        let candidate = (index + step) % len;
        let id = ctx.state.turn.queue[candidate];
        if ctx.state.living_unit(id).is_none() {
            continue;
        }
        ctx.state.turn.index = candidate;
        if index + step >= len {
            ctx.state.turn.round += 1;
            let round = ctx.state.turn.round;
            ctx.emit(GameEvent::RoundStarted { round });
        }
        return;
    }
}

/// Keeps the queue consistent after `id` died.
///
/// A dying active unit ends its turn on the spot; a dead unit sitting next in
/// line is stepped over.
pub fn handle_death(ctx: &mut ActionContext<'_>, id: UnitId) {
    if ctx.state.phase != Phase::Battle {
        return;
    }
    if ctx.state.turn.active_unit == Some(id) {
        end_turn(ctx, id);
    } else if ctx.state.turn.active_unit.is_none() && ctx.state.turn.next_in_queue() == Some(id)
    {
        advance(ctx);
    }
}

/// The side left standing once the other has no living units.
pub fn winner(ctx: &ActionContext<'_>) -> Option<Player> {
    let one = ctx.state.has_living_units(Player::One);
    let two = ctx.state.has_living_units(Player::Two);
    match (one, two) {
        (true, false) => Some(Player::One),
        (false, true) => Some(Player::Two),
        _ => None,
    }
}

/// Ends the game if one side has been wiped out.
///
/// Any outstanding roll and multi-target bookkeeping is dropped.
pub fn check_victory(ctx: &mut ActionContext<'_>) -> Option<Player> {
    if ctx.state.phase != Phase::Battle {
        return None;
    }
    let winner = winner(ctx)?;

    if let Some(pending) = ctx.state.pending_roll.take() {
        ctx.emit(GameEvent::PendingRollCancelled {
            roll: pending.id,
            kind: pending.kind(),
        });
    }
    ctx.state.clear_queues();
    ctx.state.turn.active_unit = None;
    ctx.state.phase = Phase::Ended;
    ctx.state.winner = Some(winner);
    ctx.emit(GameEvent::GameEnded { winner });
    Some(winner)
}
