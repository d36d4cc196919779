//! Combat resolution system.
//!
//! Contest evaluation is pure: [`resolve_combat`] only compares dice that
//! were already drawn by a continuation and reports either a decided outcome
//! or a tie. Applying an outcome to the state lives in [`damage`].
//!
//! # Core Functions
//!
//! - `resolve_combat`: sums both pools, flags ties, computes damage
//! - `resolve_auto_defense`: outcome for a defender that skipped its dice
//! - `combat_reveals`: stealth exposure as its own sub-result
//! - `apply_outcome`: HP, reveals, death, rage gain

pub mod damage;
pub mod dice;
pub mod result;

pub use damage::{
    apply_outcome, apply_reveal, can_auto_defend, defense_dice, kill_unit, release_shelters,
    shelter_bonus, spend_auto_defense,
};
pub use dice::{ContestVerdict, DiceContest, roll_pool};
pub use result::{
    CombatOutcome, Defense, Resolution, Reveal, RevealScope, combat_reveals, resolve_auto_defense,
    resolve_combat, resolve_exhausted_tie,
};
