//! Rider charge: a straight orthogonal dash that attacks every enemy it
//! jumps over.

use crate::action::movement::relocate;
use crate::action::{AbilityPayload, ActionError};
use crate::board::charge_lanes;
use crate::engine::ActionContext;
use crate::roll::{QueueRequest, start_queue};
use crate::state::{AbilityId, GameState, Position, QueueMode, UnitId};

use super::AbilityHandler;

pub const CHARGE_MIN: u32 = 2;
pub const CHARGE_MAX: u32 = 4;

/// Landing cells reachable by a charge from `origin`, in reading order.
pub fn charge_destinations(state: &GameState, origin: Position) -> Vec<Position> {
    charge_lanes(state, origin, CHARGE_MIN, CHARGE_MAX)
        .into_iter()
        .map(|lane| lane.destination)
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct ChargeHandler;

impl AbilityHandler for ChargeHandler {
    fn try_use(
        &self,
        ctx: &mut ActionContext<'_>,
        id: UnitId,
        payload: &AbilityPayload,
    ) -> Result<(), ActionError> {
        let AbilityPayload::Cell(destination) = *payload else {
            return Err(ActionError::InvalidPayload(AbilityId::RiderCharge));
        };
        let rider = ctx
            .state
            .living_unit(id)
            .ok_or(ActionError::UnitDead(id))?;
        let (Some(origin), owner, damage) = (rider.position, rider.owner, rider.attack) else {
            return Err(ActionError::UnitDead(id));
        };

        let lane = charge_lanes(&ctx.state, origin, CHARGE_MIN, CHARGE_MAX)
            .into_iter()
            .find(|lane| lane.destination == destination)
            .ok_or(ActionError::IllegalDestination(destination))?;
        let enemies: Vec<UnitId> = lane
            .crossed
            .into_iter()
            .filter(|crossed| {
                ctx.state
                    .unit(*crossed)
                    .is_some_and(|unit| unit.owner != owner)
            })
            .collect();

        relocate(ctx, id, origin, destination);
        start_queue(
            ctx,
            QueueRequest {
                source: id,
                ability: AbilityId::RiderCharge,
                mode: QueueMode::Path,
                center: destination,
                targets: enemies,
                damage,
            },
        )?;
        Ok(())
    }
}
