//! Applying combat outcomes to the working state.
//!
//! Event order for one resolved attack is fixed: `AttackResolved`, then any
//! `UnitRevealed`, then `UnitDied` (with the scheduler fallout of the death).

use crate::abilities::set_charges;
use crate::engine::ActionContext;
use crate::scheduler;
use crate::state::{AbilityId, GameEvent, GameState, UnitId, UnitState};

use super::result::{CombatOutcome, Defense, Reveal, RevealScope};

/// Extra defense die granted by a living warden standing next to the defender.
pub fn shelter_bonus(state: &GameState, defender: &UnitState) -> u8 {
    let Some(source) = defender.shelter else {
        return 0;
    };
    let adjacent = state
        .living_unit(source)
        .and_then(|warden| warden.position)
        .zip(defender.position)
        .is_some_and(|(warden, defender)| warden.distance(defender) == 1);
    u8::from(adjacent)
}

/// Number of dice the defender draws for a fresh contest.
pub fn defense_dice(ctx: &ActionContext<'_>, defender: &UnitState) -> u8 {
    ctx.config()
        .dice_per_roll
        .saturating_add(shelter_bonus(&ctx.state, defender))
}

/// Whether `defender` may skip its dice by spending a full rage stock.
pub fn can_auto_defend(ctx: &ActionContext<'_>, defender: &UnitState) -> bool {
    ctx.env().has_full_stock(defender, AbilityId::BerserkerRage)
}

/// Spends the whole rage stock. Returns the number of charges consumed.
pub fn spend_auto_defense(ctx: &mut ActionContext<'_>, defender: UnitId) -> u32 {
    let spent = ctx
        .state
        .unit(defender)
        .map(|unit| unit.charges(AbilityId::BerserkerRage))
        .unwrap_or(0);
    ctx.emit(GameEvent::AutoDefenseUsed {
        unit: defender,
        charges_spent: spent,
    });
    set_charges(ctx, defender, AbilityId::BerserkerRage, 0);
    spent
}

/// Commits an outcome: HP, reveals, death, and rage gain.
pub fn apply_outcome(ctx: &mut ActionContext<'_>, outcome: &CombatOutcome) {
    if let Some(defender) = ctx.state.unit_mut(outcome.defender) {
        defender.hp = outcome.defender_hp;
    }
    ctx.emit(GameEvent::AttackResolved {
        outcome: outcome.clone(),
    });

    for reveal in &outcome.reveals {
        apply_reveal(ctx, *reveal);
    }

    if outcome.killed {
        kill_unit(ctx, outcome.defender);
    } else if outcome.defense == Defense::Rolled {
        grow_rage(ctx, outcome.defender);
    }
}

/// Exposes a stealthed unit.
///
/// `All` ends stealth outright; `Opponent` only tells the other seat where the
/// unit is, and the unit stays stealthed.
pub fn apply_reveal(ctx: &mut ActionContext<'_>, reveal: Reveal) {
    let Some(unit) = ctx.state.unit_mut(reveal.unit) else {
        return;
    };
    let owner = unit.owner;
    match reveal.scope {
        RevealScope::All => {
            unit.stealthed = false;
            unit.stealth_turns_left = 0;
            ctx.state.knowledge.forget(reveal.unit);
        }
        RevealScope::Opponent => {
            ctx.state
                .knowledge
                .set(owner.opponent(), reveal.unit, true);
        }
    }
    ctx.emit(GameEvent::UnitRevealed {
        unit: reveal.unit,
        scope: reveal.scope,
    });
}

/// Removes a unit from play and lets the scheduler skip it.
pub fn kill_unit(ctx: &mut ActionContext<'_>, id: UnitId) {
    let Some(unit) = ctx.state.unit_mut(id) else {
        return;
    };
    if !unit.alive {
        return;
    }
    unit.kill();
    ctx.state.knowledge.forget(id);
    ctx.emit(GameEvent::UnitDied { unit: id });

    release_shelters(ctx, id);
    scheduler::handle_death(ctx, id);
}

/// Ends every shelter granted by `source`.
pub fn release_shelters(ctx: &mut ActionContext<'_>, source: UnitId) {
    let sheltered: Vec<UnitId> = ctx
        .state
        .units
        .values()
        .filter(|unit| unit.shelter == Some(source))
        .map(|unit| unit.id)
        .collect();
    for id in sheltered {
        if let Some(unit) = ctx.state.unit_mut(id) {
            unit.shelter = None;
        }
        ctx.emit(GameEvent::ShelterReleased { unit: id, source });
    }
}

/// A berserker that lives through a rolled defense gains one rage.
fn grow_rage(ctx: &mut ActionContext<'_>, defender: UnitId) {
    let Some(unit) = ctx.state.living_unit(defender) else {
        return;
    };
    if !ctx.env().has_ability(unit, AbilityId::BerserkerRage) {
        return;
    }
    let Some(spec) = ctx.catalog().charge_spec(AbilityId::BerserkerRage) else {
        return;
    };
    let next = unit
        .charges(AbilityId::BerserkerRage)
        .saturating_add(1)
        .min(spec.max);
    set_charges(ctx, defender, AbilityId::BerserkerRage, next);
}
