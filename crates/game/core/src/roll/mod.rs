//! Pending-roll continuation protocol.
//!
//! Any operation that needs dice or a further decision parks itself as a
//! [`PendingRoll`] and returns. The next `ResolvePendingRoll` submission takes
//! the record out of the state and hands its context to the continuation
//! registered for its kind. A continuation either finishes or stores a new
//! request; it never leaves a consumed roll behind.
//!
//! Continuations re-check every unit they reference. When one has vanished
//! they cancel instead of guessing, so the engine can never get stuck on a
//! roll nobody is able to answer.

mod duel;
mod error;
mod initiative;
mod queue;
mod search;
mod shove;

pub use error::RollError;
pub use queue::{QueueRequest, start_queue};

pub(crate) use initiative::begin as begin_initiative;

use crate::action::{ResolveRoll, RollChoice};
use crate::engine::ActionContext;
use crate::env::RngOracle;
use crate::state::{
    GameEvent, PendingRoll, Player, RollContext, RollId, RollKind, TargetStage, UnitId,
};

/// Stores a new pending roll and announces it.
///
/// # Errors
///
/// Refuses while another roll is outstanding.
pub fn request_roll(
    ctx: &mut ActionContext<'_>,
    player: Player,
    context: RollContext,
    actor: Option<UnitId>,
) -> Result<RollId, RollError> {
    if let Some(pending) = &ctx.state.pending_roll {
        return Err(RollError::AlreadyPending(pending.id));
    }
    Ok(store_roll(ctx, player, context, actor))
}

/// Chains a follow-up request from inside a continuation, after the resolved
/// roll has been taken out of the state.
pub(crate) fn store_roll(
    ctx: &mut ActionContext<'_>,
    player: Player,
    context: RollContext,
    actor: Option<UnitId>,
) -> RollId {
    let id = ctx.state.allocate_roll_id();
    let kind = context.kind();
    ctx.state.pending_roll = Some(PendingRoll {
        id,
        player,
        actor,
        context,
    });
    ctx.emit(GameEvent::RollRequested {
        roll: id,
        player,
        kind,
        actor,
    });
    id
}

/// Resumes the outstanding continuation.
///
/// # Errors
///
/// Refuses (leaving the roll in place) when nothing is pending, when the id
/// or player does not match, or when the choice makes no sense for the kind.
pub fn resolve_pending_roll(
    ctx: &mut ActionContext<'_>,
    resolve: &ResolveRoll,
    rng: &mut dyn RngOracle,
) -> Result<(), RollError> {
    let pending = ctx
        .state
        .pending_roll
        .as_ref()
        .ok_or(RollError::NothingPending)?;
    if pending.id != resolve.roll {
        return Err(RollError::StaleRoll {
            submitted: resolve.roll,
            pending: pending.id,
        });
    }
    if pending.player != resolve.player {
        return Err(RollError::WrongPlayer {
            roll: pending.id,
            expected: pending.player,
        });
    }
    if resolve.choice == Some(RollChoice::AutoDefense) && !accepts_auto_defense(pending) {
        return Err(RollError::ChoiceNotAllowed(pending.kind()));
    }

    let Some(PendingRoll {
        id, player, context, ..
    }) = ctx.state.pending_roll.take()
    else {
        return Err(RollError::NothingPending);
    };

    let frame = Frame {
        id,
        player,
        choice: resolve.choice,
    };
    match context {
        RollContext::Initiative(initiative) => initiative::resume(ctx, frame, initiative, rng),
        RollContext::AttackerRoll(duel) => duel::resume_attacker(ctx, frame, duel, rng),
        RollContext::DefenseChoice(duel) => duel::resume_choice(ctx, frame, duel, rng),
        RollContext::DefenderRoll(duel) => duel::resume_defender(ctx, frame, duel, rng),
        RollContext::TieBreak(duel) => duel::resume_tie_break(ctx, frame, duel, rng),
        RollContext::AreaTarget(queue) => queue::advance_queue(ctx, frame, queue, rng),
        RollContext::StealthSearch(search) => search::resume(ctx, frame, search, rng),
        RollContext::Shove(shove) => shove::resume(ctx, frame, shove, rng),
    }
    Ok(())
}

fn accepts_auto_defense(pending: &PendingRoll) -> bool {
    match &pending.context {
        RollContext::DefenseChoice(_) => true,
        RollContext::AreaTarget(queue) => queue.stage == TargetStage::AwaitingChoice,
        _ => false,
    }
}

/// Identity of the roll being resolved, handed to every continuation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Frame {
    pub id: RollId,
    pub player: Player,
    pub choice: Option<RollChoice>,
}

impl Frame {
    pub fn cancel(&self, ctx: &mut ActionContext<'_>, kind: RollKind) {
        cancel(ctx, self.id, kind);
    }

    pub fn dice(&self, ctx: &mut ActionContext<'_>, player: Player, unit: UnitId, dice: &[u8]) {
        ctx.emit(GameEvent::DiceRolled {
            roll: self.id,
            player,
            unit: Some(unit),
            dice: dice.to_vec(),
        });
    }
}

/// Drops a continuation whose references went stale.
pub(crate) fn cancel(ctx: &mut ActionContext<'_>, roll: RollId, kind: RollKind) {
    ctx.state.pending_roll = None;
    ctx.state.clear_queues();
    ctx.emit(GameEvent::PendingRollCancelled { roll, kind });
}
