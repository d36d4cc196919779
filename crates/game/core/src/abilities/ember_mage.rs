//! Ember mage fireball: an area attack centered on a chosen cell.

use crate::action::{AbilityPayload, ActionError};
use crate::board::units_within;
use crate::engine::ActionContext;
use crate::roll::{QueueRequest, start_queue};
use crate::state::{AbilityId, QueueMode, UnitId};

use super::AbilityHandler;

/// How far from the caster the center may be.
pub const FIREBALL_RANGE: u32 = 4;
pub const FIREBALL_RADIUS: u32 = 1;

#[derive(Debug, Clone, Copy)]
pub struct FireballHandler;

impl AbilityHandler for FireballHandler {
    fn try_use(
        &self,
        ctx: &mut ActionContext<'_>,
        id: UnitId,
        payload: &AbilityPayload,
    ) -> Result<(), ActionError> {
        let AbilityPayload::Cell(center) = *payload else {
            return Err(ActionError::InvalidPayload(AbilityId::Fireball));
        };
        if !center.is_on_board() {
            return Err(ActionError::OffBoard(center));
        }
        let mage = ctx
            .state
            .living_unit(id)
            .ok_or(ActionError::UnitDead(id))?;
        let (Some(origin), damage) = (mage.position, mage.attack) else {
            return Err(ActionError::UnitDead(id));
        };
        if origin.distance(center) > FIREBALL_RANGE {
            return Err(ActionError::IllegalDestination(center));
        }

        let targets = units_within(&ctx.state, center, FIREBALL_RADIUS)
            .into_iter()
            .filter(|target| *target != id)
            .collect();
        start_queue(
            ctx,
            QueueRequest {
                source: id,
                ability: AbilityId::Fireball,
                mode: QueueMode::Area,
                center,
                targets,
                damage,
            },
        )?;
        Ok(())
    }
}
