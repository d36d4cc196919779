//! Multi-target queue resolver.
//!
//! Area effects and path attacks share this control flow. The affected units
//! are fixed up front in reading order; each resolve then settles exactly one
//! attacker/defender pair and either re-requests for the next living target
//! or, once the list is exhausted, emits a single `AreaEffectResolved`.
//!
//! A tie or a pending auto-defense decision re-requests for the same target
//! without moving the cursor.
//!
//! Both modes record their tally in [`PendingAoE`]; path mode additionally
//! consumes one [`PendingCombatEntry`] per target from the FIFO.

use crate::action::RollChoice;
use crate::board::sort_reading_order;
use crate::combat::{
    CombatOutcome, DiceContest, Resolution, apply_outcome, can_auto_defend, defense_dice,
    resolve_auto_defense, resolve_combat, resolve_exhausted_tie, roll_pool, spend_auto_defense,
};
use crate::engine::ActionContext;
use crate::env::RngOracle;
use crate::state::{
    AbilityId, CombatFlags, GameEvent, PendingAoE, PendingCombatEntry, Position, QueueContext,
    QueueMode, RollContext, RollKind, TargetStage, UnitId, UnitState,
};

use super::{Frame, RollError, request_roll, store_roll};

/// What a multi-target ability hands to the resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueRequest {
    pub source: UnitId,
    pub ability: AbilityId,
    pub mode: QueueMode,
    /// Cell the effect is centered on (the landing cell for a path).
    pub center: Position,
    pub targets: Vec<UnitId>,
    pub damage: u32,
}

/// Sets up the ledgers and requests the first per-target roll.
///
/// An empty target list settles immediately with an empty summary.
///
/// # Errors
///
/// Refuses while another roll is pending.
pub fn start_queue(ctx: &mut ActionContext<'_>, request: QueueRequest) -> Result<(), RollError> {
    if let Some(pending) = &ctx.state.pending_roll {
        return Err(RollError::AlreadyPending(pending.id));
    }
    let Some(owner) = ctx.state.unit(request.source).map(|unit| unit.owner) else {
        return Ok(());
    };

    let mut targets = request.targets;
    targets.retain(|id| *id != request.source);
    sort_reading_order(&ctx.state, &mut targets);
    targets.dedup();

    ctx.state.pending_aoe = Some(PendingAoE::new(
        request.source,
        request.ability,
        request.center,
        targets.clone(),
    ));
    if request.mode == QueueMode::Path {
        ctx.state.pending_combat_queue = targets
            .iter()
            .map(|&defender| PendingCombatEntry {
                attacker: request.source,
                defender,
                flags: CombatFlags::PATH | CombatFlags::ABILITY,
            })
            .collect();
    }

    let queue = QueueContext {
        source: request.source,
        ability: request.ability,
        mode: request.mode,
        targets,
        cursor: 0,
        damage: request.damage,
        stage: TargetStage::Fresh,
        contest: DiceContest::default(),
    };

    if queue.targets.is_empty() {
        finish(ctx, &queue);
        return Ok(());
    }
    request_roll(
        ctx,
        owner,
        RollContext::AreaTarget(queue),
        Some(request.source),
    )?;
    Ok(())
}

/// Resolves the target under the cursor, then advances or finishes.
pub(super) fn advance_queue(
    ctx: &mut ActionContext<'_>,
    frame: Frame,
    mut queue: QueueContext,
    rng: &mut dyn RngOracle,
) {
    let Some(source) = ctx
        .state
        .living_unit(queue.source)
        .filter(|unit| unit.is_deployed())
        .cloned()
    else {
        frame.cancel(ctx, RollKind::AreaTarget);
        return;
    };

    skip_fallen(ctx, &mut queue);
    let Some(defender) = queue
        .current_target()
        .and_then(|id| ctx.state.living_unit(id))
        .cloned()
    else {
        finish(ctx, &queue);
        return;
    };

    let Some(outcome) = contest_target(ctx, frame, &mut queue, &source, &defender, rng) else {
        return;
    };
    record(ctx, &queue, &outcome);

    queue.cursor += 1;
    queue.stage = TargetStage::Fresh;
    queue.contest = DiceContest::default();
    skip_fallen(ctx, &mut queue);

    if queue.current_target().is_some() {
        store_roll(
            ctx,
            source.owner,
            RollContext::AreaTarget(queue),
            Some(source.id),
        );
    } else {
        finish(ctx, &queue);
    }
}

/// Runs one step of the current target's contest.
///
/// Returns `None` when the step ended by requesting another roll for the same
/// target (defense choice or tie-break).
fn contest_target(
    ctx: &mut ActionContext<'_>,
    frame: Frame,
    queue: &mut QueueContext,
    source: &UnitState,
    defender: &UnitState,
    rng: &mut dyn RngOracle,
) -> Option<CombatOutcome> {
    match queue.stage {
        TargetStage::Fresh => {
            let dice = roll_pool(rng, ctx.config().dice_per_roll);
            frame.dice(ctx, source.owner, source.id, &dice);
            queue.contest = DiceContest::new(dice, Vec::new());

            if can_auto_defend(ctx, defender) {
                queue.stage = TargetStage::AwaitingChoice;
                store_roll(
                    ctx,
                    defender.owner,
                    RollContext::AreaTarget(queue.clone()),
                    Some(defender.id),
                );
                return None;
            }
            roll_defense(ctx, frame, queue, defender, rng);
        }
        TargetStage::AwaitingChoice => {
            if frame.choice == Some(RollChoice::AutoDefense) && can_auto_defend(ctx, defender) {
                spend_auto_defense(ctx, defender.id);
                return Some(resolve_auto_defense(source, defender, &queue.contest));
            }
            roll_defense(ctx, frame, queue, defender, rng);
        }
        TargetStage::TieBreak => {
            let (attack_die, defense_die) = queue.contest.roll_tie_break(rng);
            frame.dice(ctx, source.owner, source.id, &[attack_die]);
            frame.dice(ctx, defender.owner, defender.id, &[defense_die]);
        }
    }

    match resolve_combat(source, defender, &queue.contest, queue.damage, 0) {
        Resolution::Decided(outcome) => Some(outcome),
        Resolution::Tied
            if queue
                .contest
                .tie_breaks_exhausted(ctx.config().max_tie_break_rounds) =>
        {
            Some(resolve_exhausted_tie(source, defender, &queue.contest))
        }
        Resolution::Tied => {
            queue.stage = TargetStage::TieBreak;
            store_roll(
                ctx,
                source.owner,
                RollContext::AreaTarget(queue.clone()),
                Some(source.id),
            );
            None
        }
    }
}

fn roll_defense(
    ctx: &mut ActionContext<'_>,
    frame: Frame,
    queue: &mut QueueContext,
    defender: &UnitState,
    rng: &mut dyn RngOracle,
) {
    let dice = roll_pool(rng, defense_dice(ctx, defender));
    frame.dice(ctx, defender.owner, defender.id, &dice);
    queue.contest.defender = dice;
}

/// Moves the cursor past targets that died or left the board since the
/// queue was built.
fn skip_fallen(ctx: &mut ActionContext<'_>, queue: &mut QueueContext) {
    while let Some(target) = queue.current_target() {
        if ctx
            .state
            .living_unit(target)
            .is_some_and(|unit| unit.is_deployed())
        {
            break;
        }
        consume(ctx, queue.mode, target);
        queue.cursor += 1;
        queue.stage = TargetStage::Fresh;
        queue.contest = DiceContest::default();
    }
}

fn record(ctx: &mut ActionContext<'_>, queue: &QueueContext, outcome: &CombatOutcome) {
    apply_outcome(ctx, outcome);

    if let Some(aoe) = ctx.state.pending_aoe.as_mut() {
        if outcome.damage > 0 {
            *aoe.damage.entry(outcome.defender).or_insert(0) += outcome.damage;
        }
        for reveal in &outcome.reveals {
            if !aoe.revealed.contains(&reveal.unit) {
                aoe.revealed.push(reveal.unit);
            }
        }
    }
    consume(ctx, queue.mode, outcome.defender);
}

/// Path mode pops the entry of a resolved or skipped target.
fn consume(ctx: &mut ActionContext<'_>, mode: QueueMode, target: UnitId) {
    if mode != QueueMode::Path {
        return;
    }
    let fifo = &mut ctx.state.pending_combat_queue;
    if let Some(index) = fifo.iter().position(|entry| entry.defender == target) {
        fifo.remove(index);
    }
}

fn finish(ctx: &mut ActionContext<'_>, queue: &QueueContext) {
    let (affected, damage, revealed) = match ctx.state.pending_aoe.take() {
        Some(aoe) => (
            aoe.affected,
            aoe.damage.into_iter().collect(),
            aoe.revealed,
        ),
        None => (queue.targets.clone(), Vec::new(), Vec::new()),
    };
    ctx.state.clear_queues();
    ctx.emit(GameEvent::AreaEffectResolved {
        source: queue.source,
        ability: queue.ability,
        mode: queue.mode,
        affected,
        damage,
        revealed,
    });
}
