//! Alternating placement on each side's back rows.

use crate::engine::ActionContext;
use crate::scheduler;
use crate::state::{GameEvent, Player, Position, UnitId};

use super::ActionError;
use super::guard::owned_unit;

pub(crate) fn place_unit(
    ctx: &mut ActionContext<'_>,
    player: Player,
    id: UnitId,
    position: Position,
) -> Result<(), ActionError> {
    if ctx.state.placement.to_place != Some(player) {
        return Err(ActionError::NotYourPlacement(player));
    }
    let unit = owned_unit(&ctx.state, player, id)?;
    if unit.position.is_some() {
        return Err(ActionError::AlreadyPlaced(id));
    }
    if !position.is_on_board() {
        return Err(ActionError::OffBoard(position));
    }
    if !player
        .deployment_rows(ctx.config().back_rows)
        .contains(&position.y)
    {
        return Err(ActionError::OutsideDeployment(position));
    }
    if ctx.state.is_occupied(position) {
        return Err(ActionError::Occupied(position));
    }

    if let Some(unit) = ctx.state.unit_mut(id) {
        unit.position = Some(position);
    }
    ctx.state.placement.order.push(id);
    ctx.emit(GameEvent::UnitPlaced { unit: id, position });

    let opponent = player.opponent();
    if has_unplaced(ctx, opponent) {
        ctx.state.placement.to_place = Some(opponent);
    } else if has_unplaced(ctx, player) {
        ctx.state.placement.to_place = Some(player);
    } else {
        scheduler::begin_battle(ctx);
    }
    Ok(())
}

fn has_unplaced(ctx: &ActionContext<'_>, player: Player) -> bool {
    ctx.state
        .units_of(player)
        .any(|unit| unit.alive && unit.position.is_none())
}
