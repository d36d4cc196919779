//! Basic attack: validate reach and visibility, then request the attacker roll.

use crate::board::in_reach;
use crate::engine::ActionContext;
use crate::roll::request_roll;
use crate::state::{DuelContext, DuelSource, Player, RollContext, TurnSlots, UnitId, spend_slots};

use super::ActionError;
use super::guard::{acting_unit, ensure_slots, visible_enemy};

pub(crate) fn attack(
    ctx: &mut ActionContext<'_>,
    player: Player,
    attacker: UnitId,
    defender: UnitId,
) -> Result<(), ActionError> {
    let unit = acting_unit(&ctx.state, player, attacker)?;
    ensure_slots(unit, TurnSlots::ATTACK)?;
    let target = visible_enemy(&ctx.state, player, defender)?;
    let profile = ctx
        .env()
        .class_profile(unit)
        .ok_or(ActionError::MissingProfile(unit.class))?;

    let (Some(from), Some(to)) = (unit.position, target.position) else {
        return Err(ActionError::UnitDead(defender));
    };
    if !in_reach(&ctx.state, from, to, profile.reach) {
        return Err(ActionError::OutOfReach {
            unit: attacker,
            target: defender,
        });
    }

    let damage = unit.attack;
    if let Some(unit) = ctx.state.unit_mut(attacker) {
        spend_slots(unit, TurnSlots::ATTACK);
    }
    request_roll(
        ctx,
        player,
        RollContext::AttackerRoll(DuelContext::new(
            attacker,
            defender,
            DuelSource::Attack,
            damage,
        )),
        Some(attacker),
    )?;
    Ok(())
}
