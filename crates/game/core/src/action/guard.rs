//! Shared precondition checks.

use crate::state::{GameState, Player, TurnSlots, UnitId, UnitState, can_spend_slots};

use super::ActionError;

/// A living unit owned by `player`.
pub(crate) fn owned_unit(
    state: &GameState,
    player: Player,
    id: UnitId,
) -> Result<&UnitState, ActionError> {
    let unit = state.unit(id).ok_or(ActionError::UnitNotFound(id))?;
    if unit.owner != player {
        return Err(ActionError::NotOwner { unit: id, player });
    }
    if !unit.alive {
        return Err(ActionError::UnitDead(id));
    }
    Ok(unit)
}

/// The active unit, owned by `player` and standing on the board.
pub(crate) fn acting_unit(
    state: &GameState,
    player: Player,
    id: UnitId,
) -> Result<&UnitState, ActionError> {
    let unit = owned_unit(state, player, id)?;
    if state.turn.active_unit != Some(id) || unit.position.is_none() {
        return Err(ActionError::NotActiveUnit(id));
    }
    Ok(unit)
}

pub(crate) fn ensure_slots(unit: &UnitState, costs: TurnSlots) -> Result<(), ActionError> {
    if can_spend_slots(unit, costs) {
        Ok(())
    } else {
        Err(ActionError::slots_spent(unit.id, costs & unit.slots))
    }
}

/// A living enemy of `player` that `player` is able to see.
pub(crate) fn visible_enemy(
    state: &GameState,
    player: Player,
    id: UnitId,
) -> Result<&UnitState, ActionError> {
    let unit = state.unit(id).ok_or(ActionError::UnitNotFound(id))?;
    if !unit.is_deployed() {
        return Err(ActionError::UnitDead(id));
    }
    if unit.owner == player {
        return Err(ActionError::NotEnemy(id));
    }
    if !state.is_visible_to(player, unit) {
        return Err(ActionError::TargetHidden(id));
    }
    Ok(unit)
}
