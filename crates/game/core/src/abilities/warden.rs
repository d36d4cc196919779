//! Warden hero: shove an adjacent enemy, or shelter an adjacent ally.

use crate::action::guard::visible_enemy;
use crate::action::{AbilityPayload, ActionError};
use crate::combat::DiceContest;
use crate::engine::ActionContext;
use crate::roll::request_roll;
use crate::state::{AbilityId, GameEvent, Position, RollContext, ShoveContext, UnitId};

use super::AbilityHandler;

#[derive(Debug, Clone, Copy)]
pub struct ShoveHandler;

impl AbilityHandler for ShoveHandler {
    fn try_use(
        &self,
        ctx: &mut ActionContext<'_>,
        id: UnitId,
        payload: &AbilityPayload,
    ) -> Result<(), ActionError> {
        let AbilityPayload::Unit(target) = *payload else {
            return Err(ActionError::InvalidPayload(AbilityId::Shove));
        };
        let warden = ctx
            .state
            .living_unit(id)
            .ok_or(ActionError::UnitDead(id))?;
        let owner = warden.owner;
        let enemy = visible_enemy(&ctx.state, owner, target)?;
        if !adjacent(warden.position, enemy.position) {
            return Err(ActionError::OutOfReach { unit: id, target });
        }

        request_roll(
            ctx,
            owner,
            RollContext::Shove(ShoveContext {
                warden: id,
                target,
                contest: DiceContest::default(),
            }),
            Some(id),
        )?;
        Ok(())
    }
}

/// Grants the ally an extra defense die until the warden's next turn, as
/// long as the two stay adjacent.
#[derive(Debug, Clone, Copy)]
pub struct ShelterHandler;

impl AbilityHandler for ShelterHandler {
    fn try_use(
        &self,
        ctx: &mut ActionContext<'_>,
        id: UnitId,
        payload: &AbilityPayload,
    ) -> Result<(), ActionError> {
        let AbilityPayload::Unit(ally) = *payload else {
            return Err(ActionError::InvalidPayload(AbilityId::Shelter));
        };
        if ally == id {
            return Err(ActionError::NotAlly(ally));
        }
        let warden = ctx
            .state
            .living_unit(id)
            .ok_or(ActionError::UnitDead(id))?;
        let target = ctx
            .state
            .unit(ally)
            .ok_or(ActionError::UnitNotFound(ally))?;
        if !target.is_deployed() {
            return Err(ActionError::UnitDead(ally));
        }
        if target.owner != warden.owner {
            return Err(ActionError::NotAlly(ally));
        }
        if !adjacent(warden.position, target.position) {
            return Err(ActionError::OutOfReach {
                unit: id,
                target: ally,
            });
        }

        if let Some(target) = ctx.state.unit_mut(ally) {
            target.shelter = Some(id);
        }
        ctx.emit(GameEvent::ShelterGranted {
            unit: ally,
            source: id,
        });
        Ok(())
    }
}

fn adjacent(a: Option<Position>, b: Option<Position>) -> bool {
    a.zip(b).is_some_and(|(a, b)| a.distance(b) == 1)
}
