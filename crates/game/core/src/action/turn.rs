use crate::engine::ActionContext;
use crate::scheduler;
use crate::state::{Player, UnitId};

use super::ActionError;
use super::guard::owned_unit;

/// Activates the unit the queue points at.
pub(crate) fn unit_start_turn(
    ctx: &mut ActionContext<'_>,
    player: Player,
    id: UnitId,
) -> Result<(), ActionError> {
    if let Some(active) = ctx.state.turn.active_unit {
        return Err(ActionError::TurnInProgress(active));
    }
    owned_unit(&ctx.state, player, id)?;
    if ctx.state.turn.next_in_queue() != Some(id) {
        return Err(ActionError::NotNextInQueue(id));
    }
    scheduler::start_turn(ctx, id);
    Ok(())
}

pub(crate) fn end_turn(ctx: &mut ActionContext<'_>, player: Player) -> Result<(), ActionError> {
    let active = ctx.state.turn.active_unit.ok_or(ActionError::NoActiveUnit)?;
    owned_unit(&ctx.state, player, active)?;
    scheduler::end_turn(ctx, active);
    Ok(())
}
