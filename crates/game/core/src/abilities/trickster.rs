use crate::action::{AbilityPayload, ActionError};
use crate::board::units_within;
use crate::engine::ActionContext;
use crate::roll::{QueueRequest, start_queue};
use crate::state::{AbilityId, QueueMode, UnitId};

use super::AbilityHandler;

pub const BURST_RADIUS: u32 = 1;

/// Trickster burst: strikes every other unit around the trickster, friend
/// or foe.
#[derive(Debug, Clone, Copy)]
pub struct BurstHandler;

impl AbilityHandler for BurstHandler {
    fn try_use(
        &self,
        ctx: &mut ActionContext<'_>,
        id: UnitId,
        payload: &AbilityPayload,
    ) -> Result<(), ActionError> {
        if *payload != AbilityPayload::None {
            return Err(ActionError::InvalidPayload(AbilityId::TricksterBurst));
        }
        let trickster = ctx
            .state
            .living_unit(id)
            .ok_or(ActionError::UnitDead(id))?;
        let (Some(center), damage) = (trickster.position, trickster.attack) else {
            return Err(ActionError::UnitDead(id));
        };

        let targets = units_within(&ctx.state, center, BURST_RADIUS)
            .into_iter()
            .filter(|target| *target != id)
            .collect();
        start_queue(
            ctx,
            QueueRequest {
                source: id,
                ability: AbilityId::TricksterBurst,
                mode: QueueMode::Area,
                center,
                targets,
                damage,
            },
        )?;
        Ok(())
    }
}
