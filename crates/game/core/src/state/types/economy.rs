//! Per-turn slot accounting.
//!
//! Every unit owns four slots (move, attack, action, stealth) that can each be
//! spent once during that unit's own turn. Checking and spending are split on
//! purpose: handlers call [`can_spend_slots`] while validating and
//! [`spend_slots`] once the action is committed.

use bitflags::bitflags;

use super::UnitState;

bitflags! {
    /// Set of turn-economy slots.
    ///
    /// Used both as the "already spent" record on a unit and as the cost of an
    /// action.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct TurnSlots: u8 {
        const MOVE    = 1 << 0;
        const ATTACK  = 1 << 1;
        const ACTION  = 1 << 2;
        const STEALTH = 1 << 3;
    }
}

/// Returns true only if every slot named in `costs` is still unused.
pub fn can_spend_slots(unit: &UnitState, costs: TurnSlots) -> bool {
    !unit.slots.intersects(costs)
}

/// Marks `costs` as used. Spending an already-used slot is a no-op.
pub fn spend_slots(unit: &mut UnitState, costs: TurnSlots) {
    unit.slots |= costs;
}

/// Clears all four slots. Called once, when the unit becomes active.
pub fn reset_turn_economy(unit: &mut UnitState) {
    unit.slots = TurnSlots::empty();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Player, UnitClass, UnitId};

    fn unit() -> UnitState {
        UnitState::new(UnitId(1), Player::One, UnitClass::Spearman, 3, 1)
    }

    #[test]
    fn fresh_unit_can_spend_everything() {
        let unit = unit();
        assert!(can_spend_slots(&unit, TurnSlots::all()));
    }

    #[test]
    fn move_then_attack_and_action_then_move_again_is_refused() {
        let mut unit = unit();

        assert!(can_spend_slots(&unit, TurnSlots::MOVE));
        spend_slots(&mut unit, TurnSlots::MOVE);

        assert!(can_spend_slots(&unit, TurnSlots::ATTACK | TurnSlots::ACTION));
        spend_slots(&mut unit, TurnSlots::ATTACK | TurnSlots::ACTION);

        assert!(!can_spend_slots(&unit, TurnSlots::MOVE));
        assert!(can_spend_slots(&unit, TurnSlots::STEALTH));
    }

    #[test]
    fn partial_overlap_is_refused() {
        let mut unit = unit();
        spend_slots(&mut unit, TurnSlots::ATTACK);
        assert!(!can_spend_slots(&unit, TurnSlots::MOVE | TurnSlots::ATTACK));
    }

    #[test]
    fn spending_twice_is_a_union() {
        let mut unit = unit();
        spend_slots(&mut unit, TurnSlots::MOVE);
        spend_slots(&mut unit, TurnSlots::MOVE);
        assert_eq!(unit.slots, TurnSlots::MOVE);
    }

    #[test]
    fn reset_clears_all_slots() {
        let mut unit = unit();
        spend_slots(&mut unit, TurnSlots::all());
        reset_turn_economy(&mut unit);
        assert!(unit.slots.is_empty());
    }
}
