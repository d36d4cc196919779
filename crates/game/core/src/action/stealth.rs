//! Entering stealth and searching for hidden enemies.

use crate::engine::ActionContext;
use crate::roll::request_roll;
use crate::state::{
    GameEvent, Player, RollContext, SearchContext, TurnSlots, UnitId, spend_slots,
};

use super::guard::{acting_unit, ensure_slots};
use super::{ActionError, SearchMode};

pub(crate) fn enter_stealth(
    ctx: &mut ActionContext<'_>,
    player: Player,
    id: UnitId,
) -> Result<(), ActionError> {
    let unit = acting_unit(&ctx.state, player, id)?;
    let capable = ctx
        .env()
        .class_profile(unit)
        .is_some_and(|profile| profile.stealth);
    if !capable {
        return Err(ActionError::CannotStealth(id));
    }
    if unit.stealthed {
        return Err(ActionError::AlreadyStealthed(id));
    }
    ensure_slots(unit, TurnSlots::STEALTH)?;

    let duration = ctx.config().stealth_duration;
    if let Some(unit) = ctx.state.unit_mut(id) {
        spend_slots(unit, TurnSlots::STEALTH);
        unit.stealthed = true;
        unit.stealth_turns_left = duration;
    }
    ctx.state.knowledge.set(player.opponent(), id, false);
    ctx.emit(GameEvent::StealthEntered { unit: id });
    Ok(())
}

pub(crate) fn search_stealth(
    ctx: &mut ActionContext<'_>,
    player: Player,
    id: UnitId,
    mode: SearchMode,
) -> Result<(), ActionError> {
    let cost = match mode {
        SearchMode::Action => TurnSlots::ACTION,
        SearchMode::Move => TurnSlots::MOVE,
    };
    let unit = acting_unit(&ctx.state, player, id)?;
    ensure_slots(unit, cost)?;

    if let Some(unit) = ctx.state.unit_mut(id) {
        spend_slots(unit, cost);
    }
    request_roll(
        ctx,
        player,
        RollContext::StealthSearch(SearchContext { searcher: id }),
        Some(id),
    )?;
    Ok(())
}
