//! Initiative: Player One rolls, then Player Two; ties roll again.

use crate::engine::ActionContext;
use crate::env::RngOracle;
use crate::state::{GameEvent, InitiativeContext, Player, RollContext};

use super::{Frame, store_roll};

/// Opens the initiative exchange. Called when the game starts.
pub(crate) fn begin(ctx: &mut ActionContext<'_>) {
    store_roll(
        ctx,
        Player::One,
        RollContext::Initiative(InitiativeContext::default()),
        None,
    );
}

pub(super) fn resume(
    ctx: &mut ActionContext<'_>,
    frame: Frame,
    initiative: InitiativeContext,
    rng: &mut dyn RngOracle,
) {
    let roll = rng.roll_d6();
    ctx.emit(GameEvent::InitiativeRolled {
        player: frame.player,
        roll,
    });

    let Some(first_roll) = initiative.first_roll else {
        store_roll(
            ctx,
            Player::Two,
            RollContext::Initiative(InitiativeContext {
                first_roll: Some(roll),
            }),
            None,
        );
        return;
    };

    let first_player = match first_roll.cmp(&roll) {
        std::cmp::Ordering::Greater => Player::One,
        std::cmp::Ordering::Less => Player::Two,
        std::cmp::Ordering::Equal => {
            begin(ctx);
            return;
        }
    };

    ctx.state.placement.first_player = Some(first_player);
    ctx.state.placement.to_place = Some(first_player);
    ctx.emit(GameEvent::InitiativeDecided { first_player });
}
