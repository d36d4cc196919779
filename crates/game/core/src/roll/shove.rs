//! Warden shove: opposed roll, then push one cell or crush against a blocker.
//!
//! Unlike attacks the shove has a hard tie-break cap; once it is spent the
//! target holds its ground.

use crate::combat::{
    ContestVerdict, Resolution, apply_outcome, defense_dice, resolve_combat, roll_pool,
};
use crate::engine::ActionContext;
use crate::env::RngOracle;
use crate::state::{GameEvent, RollContext, RollKind, ShoveContext, ShoveOutcome, UnitState};

use super::{Frame, store_roll};

/// Damage dealt when the target cannot be pushed.
const CRUSH_DAMAGE: u32 = 1;

pub(super) fn resume(
    ctx: &mut ActionContext<'_>,
    frame: Frame,
    mut shove: ShoveContext,
    rng: &mut dyn RngOracle,
) {
    let warden = ctx.state.living_unit(shove.warden).cloned();
    let target = ctx.state.living_unit(shove.target).cloned();
    let (Some(warden), Some(target)) = (warden, target) else {
        frame.cancel(ctx, RollKind::Shove);
        return;
    };
    if !warden.is_deployed() || !target.is_deployed() {
        frame.cancel(ctx, RollKind::Shove);
        return;
    }

    if shove.contest.has_attacker_dice() {
        let (push_die, hold_die) = shove.contest.roll_tie_break(rng);
        frame.dice(ctx, warden.owner, warden.id, &[push_die]);
        frame.dice(ctx, target.owner, target.id, &[hold_die]);
    } else {
        let push = roll_pool(rng, ctx.config().dice_per_roll);
        frame.dice(ctx, warden.owner, warden.id, &push);
        let hold = roll_pool(rng, defense_dice(ctx, &target));
        frame.dice(ctx, target.owner, target.id, &hold);
        shove.contest.attacker = push;
        shove.contest.defender = hold;
    }

    let outcome = match shove.contest.verdict() {
        ContestVerdict::AttackerWins => push_or_crush(ctx, &warden, &target, &shove),
        ContestVerdict::DefenderWins => ShoveOutcome::Held,
        ContestVerdict::Tied => {
            let cap = Some(ctx.config().shove_tie_break_rounds);
            if !shove.contest.tie_breaks_exhausted(cap) {
                store_roll(
                    ctx,
                    warden.owner,
                    RollContext::Shove(shove),
                    Some(warden.id),
                );
                return;
            }
            ShoveOutcome::Held
        }
    };

    ctx.emit(GameEvent::ShoveResolved {
        warden: warden.id,
        target: target.id,
        outcome,
    });
}

fn push_or_crush(
    ctx: &mut ActionContext<'_>,
    warden: &UnitState,
    target: &UnitState,
    shove: &ShoveContext,
) -> ShoveOutcome {
    let (Some(from), Some(origin)) = (target.position, warden.position) else {
        return ShoveOutcome::Held;
    };
    let to = from.offset((from.x - origin.x).signum(), (from.y - origin.y).signum());

    if to.is_on_board() && !ctx.state.is_occupied(to) {
        if let Some(unit) = ctx.state.unit_mut(target.id) {
            unit.position = Some(to);
        }
        ctx.emit(GameEvent::UnitDisplaced {
            unit: target.id,
            from,
            to,
        });
        return ShoveOutcome::Pushed;
    }

    if let Resolution::Decided(outcome) =
        resolve_combat(warden, target, &shove.contest, CRUSH_DAMAGE, 0)
    {
        apply_outcome(ctx, &outcome);
    }
    ShoveOutcome::Crushed
}
