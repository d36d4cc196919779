//! Class movement and move-option queries.

use crate::abilities::rider;
use crate::board::move_options;
use crate::engine::ActionContext;
use crate::state::{AbilityId, GameEvent, Player, Position, TurnSlots, UnitId, spend_slots};

use super::guard::{acting_unit, ensure_slots, owned_unit};
use super::{ActionError, MoveMode};

pub(crate) fn move_unit(
    ctx: &mut ActionContext<'_>,
    player: Player,
    id: UnitId,
    to: Position,
) -> Result<(), ActionError> {
    let unit = acting_unit(&ctx.state, player, id)?;
    ensure_slots(unit, TurnSlots::MOVE)?;
    let profile = ctx
        .env()
        .class_profile(unit)
        .ok_or(ActionError::MissingProfile(unit.class))?;
    let Some(from) = unit.position else {
        return Err(ActionError::NotActiveUnit(id));
    };

    if !to.is_on_board() {
        return Err(ActionError::OffBoard(to));
    }
    if !move_options(&ctx.state, from, profile.movement).contains(&to) {
        return Err(if ctx.state.is_occupied(to) {
            ActionError::Occupied(to)
        } else {
            ActionError::IllegalDestination(to)
        });
    }

    relocate(ctx, id, from, to);
    if let Some(unit) = ctx.state.unit_mut(id) {
        spend_slots(unit, TurnSlots::MOVE);
    }
    Ok(())
}

/// Puts a unit on a new cell, emitting `UnitMoved`.
///
/// A stealthed unit that the opponent had located slips out of sight again.
pub(crate) fn relocate(ctx: &mut ActionContext<'_>, id: UnitId, from: Position, to: Position) {
    let Some(unit) = ctx.state.unit_mut(id) else {
        return;
    };
    unit.position = Some(to);
    let (stealthed, opponent) = (unit.stealthed, unit.owner.opponent());
    ctx.emit(GameEvent::UnitMoved { unit: id, from, to });

    if stealthed && ctx.state.knowledge.knows(opponent, id) {
        ctx.state.knowledge.set(opponent, id, false);
        ctx.emit(GameEvent::StealthEntered { unit: id });
    }
}

/// Lists destinations without changing state.
pub(crate) fn request_move_options(
    ctx: &mut ActionContext<'_>,
    player: Player,
    id: UnitId,
    mode: MoveMode,
) -> Result<(), ActionError> {
    let unit = owned_unit(&ctx.state, player, id)?;
    let Some(origin) = unit.position else {
        return Err(ActionError::UnitDead(id));
    };

    let cells = match mode {
        MoveMode::Move => {
            let profile = ctx
                .env()
                .class_profile(unit)
                .ok_or(ActionError::MissingProfile(unit.class))?;
            move_options(&ctx.state, origin, profile.movement)
        }
        MoveMode::Charge => {
            if !ctx.env().has_ability(unit, AbilityId::RiderCharge) {
                return Err(ActionError::AbilityNotOwned {
                    unit: id,
                    ability: AbilityId::RiderCharge,
                });
            }
            rider::charge_destinations(&ctx.state, origin)
        }
    };

    ctx.emit(GameEvent::MoveOptions {
        unit: id,
        mode,
        cells,
    });
    Ok(())
}
