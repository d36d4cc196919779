//! Domain events emitted by the engine.
//!
//! Events are notifications, not a replay log: state is never rebuilt from
//! them. A client that mirrors the game must still apply them in the exact
//! order they were returned, which is why dice are carried alongside
//! outcomes.

use crate::action::MoveMode;
use crate::combat::{CombatOutcome, RevealScope};

use super::{AbilityId, Player, Position, QueueMode, RollId, RollKind, UnitId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameEvent {
    LobbyInitialized {
        player: Player,
        units: Vec<UnitId>,
    },
    ArenaChosen {
        arena: String,
    },
    PlayerReady {
        player: Player,
        ready: bool,
    },
    GameStarted,
    InitiativeRolled {
        player: Player,
        roll: u8,
    },
    InitiativeDecided {
        first_player: Player,
    },
    UnitPlaced {
        unit: UnitId,
        position: Position,
    },
    BattleStarted {
        first_unit: UnitId,
    },
    TurnStarted {
        unit: UnitId,
        round: u32,
    },
    TurnEnded {
        unit: UnitId,
    },
    RoundStarted {
        round: u32,
    },
    UnitMoved {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    MoveOptions {
        unit: UnitId,
        mode: MoveMode,
        cells: Vec<Position>,
    },
    RollRequested {
        roll: RollId,
        player: Player,
        kind: RollKind,
        actor: Option<UnitId>,
    },
    DiceRolled {
        roll: RollId,
        player: Player,
        unit: Option<UnitId>,
        dice: Vec<u8>,
    },
    AttackResolved {
        outcome: CombatOutcome,
    },
    AutoDefenseUsed {
        unit: UnitId,
        charges_spent: u32,
    },
    UnitDied {
        unit: UnitId,
    },
    UnitRevealed {
        unit: UnitId,
        scope: RevealScope,
    },
    StealthEntered {
        unit: UnitId,
    },
    StealthExpired {
        unit: UnitId,
    },
    SearchResolved {
        searcher: UnitId,
        found: Vec<UnitId>,
    },
    ChargesUpdated {
        unit: UnitId,
        ability: AbilityId,
        charges: u32,
    },
    AreaEffectResolved {
        source: UnitId,
        ability: AbilityId,
        mode: QueueMode,
        affected: Vec<UnitId>,
        damage: Vec<(UnitId, u32)>,
        revealed: Vec<UnitId>,
    },
    UnitDisplaced {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    ShoveResolved {
        warden: UnitId,
        target: UnitId,
        outcome: ShoveOutcome,
    },
    ShelterGranted {
        unit: UnitId,
        source: UnitId,
    },
    ShelterReleased {
        unit: UnitId,
        source: UnitId,
    },
    PendingRollCancelled {
        roll: RollId,
        kind: RollKind,
    },
    GameEnded {
        winner: Player,
    },
}

/// How a finished shove ended for its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShoveOutcome {
    Pushed,
    /// Blocked behind; took crush damage instead.
    Crushed,
    /// Won the contest or outlasted the tie-break cap.
    Held,
}
