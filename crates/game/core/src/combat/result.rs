//! Combat outcome types and contest resolution.

use crate::state::{UnitId, UnitState};

use super::dice::{ContestVerdict, DiceContest};

/// Who learns about a revealed unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RevealScope {
    /// Stealth is broken for everyone.
    All,
    /// Only the owner's opponent learns the position; the unit stays stealthed.
    Opponent,
}

/// A stealthed unit exposed by combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reveal {
    pub unit: UnitId,
    pub scope: RevealScope,
}

/// How the defender answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Defense {
    Rolled,
    /// Berserker spent its full rage stock instead of rolling.
    Automatic,
}

/// Result of one attacker/defender resolution.
///
/// `reveals` is kept apart from the hit/miss data so callers can react to
/// exposure independently of damage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatOutcome {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub attacker_dice: Vec<u8>,
    pub defender_dice: Vec<u8>,
    pub defense: Defense,
    pub hit: bool,
    pub damage: u32,
    pub defender_hp: u32,
    pub killed: bool,
    pub reveals: Vec<Reveal>,
}

/// Either a final outcome or a request for another tie-break round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Decided(CombatOutcome),
    Tied,
}

/// Compares the accumulated pools and computes damage.
///
/// `damage` is the base damage for this attack (unit attack or an ability
/// override); `bonus` is added on top. HP is clamped at zero.
pub fn resolve_combat(
    attacker: &UnitState,
    defender: &UnitState,
    contest: &DiceContest,
    damage: u32,
    bonus: u32,
) -> Resolution {
    let hit = match contest.verdict() {
        ContestVerdict::Tied => return Resolution::Tied,
        ContestVerdict::AttackerWins => true,
        ContestVerdict::DefenderWins => false,
    };

    Resolution::Decided(build_outcome(
        attacker,
        defender,
        contest,
        Defense::Rolled,
        hit,
        damage + bonus,
    ))
}

/// Outcome for a defender that chose automatic success.
pub fn resolve_auto_defense(
    attacker: &UnitState,
    defender: &UnitState,
    contest: &DiceContest,
) -> CombatOutcome {
    build_outcome(attacker, defender, contest, Defense::Automatic, false, 0)
}

/// Resolves a contest whose tie-break budget ran out: the defender holds.
pub fn resolve_exhausted_tie(
    attacker: &UnitState,
    defender: &UnitState,
    contest: &DiceContest,
) -> CombatOutcome {
    build_outcome(attacker, defender, contest, Defense::Rolled, false, 0)
}

fn build_outcome(
    attacker: &UnitState,
    defender: &UnitState,
    contest: &DiceContest,
    defense: Defense,
    hit: bool,
    damage: u32,
) -> CombatOutcome {
    let dealt = if hit { damage.min(defender.hp) } else { 0 };
    let defender_hp = defender.hp - dealt;
    let killed = hit && defender_hp == 0;

    CombatOutcome {
        attacker: attacker.id,
        defender: defender.id,
        attacker_dice: contest.attacker.clone(),
        defender_dice: contest.defender.clone(),
        defense,
        hit,
        damage: dealt,
        defender_hp,
        killed,
        reveals: combat_reveals(attacker, defender, hit),
    }
}

/// Stealth exposure caused by taking part in combat.
///
/// - a stealthed attacker gives itself away to everyone
/// - a stealthed defender that is hit is exposed to everyone
/// - a stealthed defender that is missed is only located by the attacker's side
pub fn combat_reveals(attacker: &UnitState, defender: &UnitState, hit: bool) -> Vec<Reveal> {
    let mut reveals = Vec::new();
    if attacker.stealthed {
        reveals.push(Reveal {
            unit: attacker.id,
            scope: RevealScope::All,
        });
    }
    if defender.stealthed {
        let scope = if hit {
            RevealScope::All
        } else {
            RevealScope::Opponent
        };
        reveals.push(Reveal {
            unit: defender.id,
            scope,
        });
    }
    reveals
}
