//! Opposed dice pools with accumulating tie-break rounds.

use crate::env::RngOracle;

/// Verdict of comparing the two accumulated sums.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContestVerdict {
    AttackerWins,
    DefenderWins,
    /// Equal sums: both sides must add one die and compare again.
    Tied,
}

/// Both dice pools of one attacker/defender contest.
///
/// Tie-break dice are appended to the same pools, so the final sums always
/// include every die rolled during the resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceContest {
    pub attacker: Vec<u8>,
    pub defender: Vec<u8>,
    /// Number of completed tie-break rounds.
    pub tie_rounds: u32,
}

impl DiceContest {
    pub fn new(attacker: Vec<u8>, defender: Vec<u8>) -> Self {
        Self {
            attacker,
            defender,
            tie_rounds: 0,
        }
    }

    pub fn attacker_sum(&self) -> u32 {
        self.attacker.iter().map(|&d| u32::from(d)).sum()
    }

    pub fn defender_sum(&self) -> u32 {
        self.defender.iter().map(|&d| u32::from(d)).sum()
    }

    pub fn has_attacker_dice(&self) -> bool {
        !self.attacker.is_empty()
    }

    pub fn has_defender_dice(&self) -> bool {
        !self.defender.is_empty()
    }

    pub fn verdict(&self) -> ContestVerdict {
        let attack = self.attacker_sum();
        let defense = self.defender_sum();
        match attack.cmp(&defense) {
            std::cmp::Ordering::Greater => ContestVerdict::AttackerWins,
            std::cmp::Ordering::Less => ContestVerdict::DefenderWins,
            std::cmp::Ordering::Equal => ContestVerdict::Tied,
        }
    }

    /// Appends one tie-break die to each side.
    pub fn push_tie_break(&mut self, attacker_die: u8, defender_die: u8) {
        self.attacker.push(attacker_die);
        self.defender.push(defender_die);
        self.tie_rounds += 1;
    }

    /// Draws one die per side from `rng` and appends them.
    pub fn roll_tie_break(&mut self, rng: &mut dyn RngOracle) -> (u8, u8) {
        let attacker_die = rng.roll_d6();
        let defender_die = rng.roll_d6();
        self.push_tie_break(attacker_die, defender_die);
        (attacker_die, defender_die)
    }

    /// Returns true once `cap` tie-break rounds have been spent (`None` means
    /// unlimited).
    pub fn tie_breaks_exhausted(&self, cap: Option<u32>) -> bool {
        cap.is_some_and(|cap| self.tie_rounds >= cap)
    }
}

/// Draws `count` d6 from `rng`.
pub fn roll_pool(rng: &mut dyn RngOracle, count: u8) -> Vec<u8> {
    (0..count).map(|_| rng.roll_d6()).collect()
}
