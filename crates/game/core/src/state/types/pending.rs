//! Serialized continuations and multi-target bookkeeping.
//!
//! A [`PendingRoll`] is the entire suspended frame of an operation waiting
//! for dice or a player decision. Its [`RollContext`] carries everything the
//! matching continuation needs, so resumption never depends on call-stack
//! state and survives a snapshot/restore in between.

use std::collections::BTreeMap;

use bitflags::bitflags;

use super::{AbilityId, Player, Position, RollId, UnitId};
use crate::combat::DiceContest;

/// The single outstanding continuation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingRoll {
    pub id: RollId,
    /// Player who must submit the resolve.
    pub player: Player,
    /// Unit the roll is shown for, if any.
    pub actor: Option<UnitId>,
    pub context: RollContext,
}

impl PendingRoll {
    pub fn kind(&self) -> RollKind {
        self.context.kind()
    }
}

/// Closed set of continuation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum RollKind {
    Initiative,
    AttackerRoll,
    DefenseChoice,
    DefenderRoll,
    TieBreak,
    AreaTarget,
    StealthSearch,
    Shove,
}

/// Continuation payload, one variant per [`RollKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RollContext {
    Initiative(InitiativeContext),
    AttackerRoll(DuelContext),
    DefenseChoice(DuelContext),
    DefenderRoll(DuelContext),
    TieBreak(DuelContext),
    AreaTarget(QueueContext),
    StealthSearch(SearchContext),
    Shove(ShoveContext),
}

impl RollContext {
    pub fn kind(&self) -> RollKind {
        match self {
            RollContext::Initiative(_) => RollKind::Initiative,
            RollContext::AttackerRoll(_) => RollKind::AttackerRoll,
            RollContext::DefenseChoice(_) => RollKind::DefenseChoice,
            RollContext::DefenderRoll(_) => RollKind::DefenderRoll,
            RollContext::TieBreak(_) => RollKind::TieBreak,
            RollContext::AreaTarget(_) => RollKind::AreaTarget,
            RollContext::StealthSearch(_) => RollKind::StealthSearch,
            RollContext::Shove(_) => RollKind::Shove,
        }
    }
}

/// Initiative is rolled by Player One, then Player Two.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitiativeContext {
    /// Player One's roll once it has been made.
    pub first_roll: Option<u8>,
}

/// What started a one-on-one duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DuelSource {
    /// A basic `Attack` action.
    Attack,
    /// A free attack triggered by a reactive ability.
    Reaction(AbilityId),
}

/// Attacker vs. defender contest resolved over several round-trips.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelContext {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub source: DuelSource,
    pub damage: u32,
    pub contest: DiceContest,
}

impl DuelContext {
    pub fn new(attacker: UnitId, defender: UnitId, source: DuelSource, damage: u32) -> Self {
        Self {
            attacker,
            defender,
            source,
            damage,
            contest: DiceContest::default(),
        }
    }
}

/// Where the current queue target is inside its own contest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetStage {
    /// No dice drawn yet for this target.
    #[default]
    Fresh,
    /// Attacker dice drawn; the defender owner must pick auto-defense or roll.
    AwaitingChoice,
    /// Sums tied; one more die per side is due.
    TieBreak,
}

/// Which bookkeeping a queue writes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QueueMode {
    /// Area effect, summarized in [`PendingAoE`].
    Area,
    /// Path attack, consumed from the pending combat queue.
    Path,
}

/// Cursor over a deterministic list of targets.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueContext {
    pub source: UnitId,
    pub ability: AbilityId,
    pub mode: QueueMode,
    /// Sorted by reading order, then id.
    pub targets: Vec<UnitId>,
    pub cursor: usize,
    pub damage: u32,
    pub stage: TargetStage,
    /// Dice for the target under the cursor.
    pub contest: DiceContest,
}

impl QueueContext {
    pub fn current_target(&self) -> Option<UnitId> {
        self.targets.get(self.cursor).copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchContext {
    pub searcher: UnitId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShoveContext {
    pub warden: UnitId,
    pub target: UnitId,
    pub contest: DiceContest,
}

bitflags! {
    /// Origin markers for a queued combat entry.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct CombatFlags: u8 {
        /// Target was crossed by a moving attacker.
        const PATH = 1 << 0;
        /// Attack came from an ability rather than a basic attack.
        const ABILITY = 1 << 1;
    }
}

/// One attacker/defender pair still to be resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingCombatEntry {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub flags: CombatFlags,
}

/// Running summary of one area effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingAoE {
    pub source: UnitId,
    pub ability: AbilityId,
    pub center: Position,
    pub affected: Vec<UnitId>,
    pub revealed: Vec<UnitId>,
    pub damage: BTreeMap<UnitId, u32>,
}

impl PendingAoE {
    pub fn new(source: UnitId, ability: AbilityId, center: Position, affected: Vec<UnitId>) -> Self {
        Self {
            source,
            ability,
            center,
            affected,
            revealed: Vec::new(),
            damage: BTreeMap::new(),
        }
    }
}
