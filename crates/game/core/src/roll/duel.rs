//! One attacker against one defender.
//!
//! AttackerRoll -> (DefenseChoice) -> DefenderRoll -> TieBreak* -> outcome.
//! The defense choice is only offered to a defender able to auto-defend, and
//! it is asked before any defender die is drawn.

use crate::action::RollChoice;
use crate::combat::{
    Resolution, apply_outcome, can_auto_defend, defense_dice, resolve_auto_defense,
    resolve_combat, resolve_exhausted_tie, roll_pool, spend_auto_defense,
};
use crate::engine::ActionContext;
use crate::env::RngOracle;
use crate::state::{DuelContext, RollContext, RollKind, UnitState};

use super::{Frame, store_roll};

/// Living, deployed copies of both participants.
fn participants(ctx: &ActionContext<'_>, duel: &DuelContext) -> Option<(UnitState, UnitState)> {
    let attacker = ctx.state.living_unit(duel.attacker)?;
    let defender = ctx.state.living_unit(duel.defender)?;
    if !attacker.is_deployed() || !defender.is_deployed() {
        return None;
    }
    Some((attacker.clone(), defender.clone()))
}

pub(super) fn resume_attacker(
    ctx: &mut ActionContext<'_>,
    frame: Frame,
    mut duel: DuelContext,
    rng: &mut dyn RngOracle,
) {
    let Some((attacker, defender)) = participants(ctx, &duel) else {
        frame.cancel(ctx, RollKind::AttackerRoll);
        return;
    };

    let dice = roll_pool(rng, ctx.config().dice_per_roll);
    frame.dice(ctx, attacker.owner, attacker.id, &dice);
    duel.contest.attacker = dice;

    let next = if can_auto_defend(ctx, &defender) {
        RollContext::DefenseChoice(duel)
    } else {
        RollContext::DefenderRoll(duel)
    };
    store_roll(ctx, defender.owner, next, Some(defender.id));
}

pub(super) fn resume_choice(
    ctx: &mut ActionContext<'_>,
    frame: Frame,
    mut duel: DuelContext,
    rng: &mut dyn RngOracle,
) {
    let Some((attacker, defender)) = participants(ctx, &duel) else {
        frame.cancel(ctx, RollKind::DefenseChoice);
        return;
    };

    if frame.choice == Some(RollChoice::AutoDefense) && can_auto_defend(ctx, &defender) {
        spend_auto_defense(ctx, defender.id);
        let outcome = resolve_auto_defense(&attacker, &defender, &duel.contest);
        apply_outcome(ctx, &outcome);
        return;
    }

    roll_defense(ctx, frame, &mut duel, &defender, rng);
    settle(ctx, duel, &attacker, &defender);
}

pub(super) fn resume_defender(
    ctx: &mut ActionContext<'_>,
    frame: Frame,
    mut duel: DuelContext,
    rng: &mut dyn RngOracle,
) {
    let Some((attacker, defender)) = participants(ctx, &duel) else {
        frame.cancel(ctx, RollKind::DefenderRoll);
        return;
    };

    roll_defense(ctx, frame, &mut duel, &defender, rng);
    settle(ctx, duel, &attacker, &defender);
}

pub(super) fn resume_tie_break(
    ctx: &mut ActionContext<'_>,
    frame: Frame,
    mut duel: DuelContext,
    rng: &mut dyn RngOracle,
) {
    let Some((attacker, defender)) = participants(ctx, &duel) else {
        frame.cancel(ctx, RollKind::TieBreak);
        return;
    };

    let (attack_die, defense_die) = duel.contest.roll_tie_break(rng);
    frame.dice(ctx, attacker.owner, attacker.id, &[attack_die]);
    frame.dice(ctx, defender.owner, defender.id, &[defense_die]);
    settle(ctx, duel, &attacker, &defender);
}

fn roll_defense(
    ctx: &mut ActionContext<'_>,
    frame: Frame,
    duel: &mut DuelContext,
    defender: &UnitState,
    rng: &mut dyn RngOracle,
) {
    let dice = roll_pool(rng, defense_dice(ctx, defender));
    frame.dice(ctx, defender.owner, defender.id, &dice);
    duel.contest.defender = dice;
}

/// Applies a decided contest or chains another tie-break round.
fn settle(
    ctx: &mut ActionContext<'_>,
    duel: DuelContext,
    attacker: &UnitState,
    defender: &UnitState,
) {
    match resolve_combat(attacker, defender, &duel.contest, duel.damage, 0) {
        Resolution::Decided(outcome) => apply_outcome(ctx, &outcome),
        Resolution::Tied
            if duel
                .contest
                .tie_breaks_exhausted(ctx.config().max_tie_break_rounds) =>
        {
            let outcome = resolve_exhausted_tie(attacker, defender, &duel.contest);
            apply_outcome(ctx, &outcome);
        }
        Resolution::Tied => {
            store_roll(
                ctx,
                attacker.owner,
                RollContext::TieBreak(duel),
                Some(attacker.id),
            );
        }
    }
}
