//! Property-based checks over the dispatcher.

mod common;

use common::{Table, act, begin_battle, start_turn};
use proptest::prelude::*;
use tactics_core::{
    Action, Command, GameEvent, GameState, PcgRng, Player, Position, ResolveRoll, TurnSlots,
    UnitClass, UnitId, UnitSpec, UnitState,
    state::{can_spend_slots, spend_slots},
};

fn slots() -> impl Strategy<Value = TurnSlots> {
    (0u8..16).prop_map(TurnSlots::from_bits_truncate)
}

fn battle_action() -> impl Strategy<Value = Action> {
    let unit = (1u32..4).prop_map(UnitId);
    let cell = (-1i32..10, -1i32..10).prop_map(|(x, y)| Position::new(x, y));
    prop_oneof![
        (unit.clone(), cell).prop_map(|(unit, to)| Action::Move { unit, to }),
        (unit.clone(), unit.clone())
            .prop_map(|(attacker, defender)| Action::Attack { attacker, defender }),
        unit.clone().prop_map(|unit| Action::EnterStealth { unit }),
        unit.prop_map(|unit| Action::UnitStartTurn { unit }),
        Just(Action::EndTurn),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A slot already spent can never be spent again within the turn.
    #[test]
    fn prop_slots_are_never_spent_twice(first in slots(), second in slots()) {
        let mut unit = UnitState::new(UnitId(1), Player::One, UnitClass::Knight, 3, 1);
        spend_slots(&mut unit, first);

        prop_assert_eq!(can_spend_slots(&unit, second), !first.intersects(second));
        spend_slots(&mut unit, second);
        prop_assert_eq!(unit.slots, first | second);
    }

    /// Any seeded duel ends in exactly one resolution and at most one point of damage.
    #[test]
    fn prop_duel_always_resolves(seed in any::<u64>()) {
        let table = Table::new();
        let engine = table.engine();
        let mut state = GameState::new();
        let knight = table.spawn(&mut state, Player::One, UnitSpec::class(UnitClass::Knight), 4, 4);
        let archer = table.spawn(&mut state, Player::Two, UnitSpec::class(UnitClass::Archer), 4, 5);
        let reserve = table.spawn(&mut state, Player::Two, UnitSpec::class(UnitClass::Spearman), 8, 8);
        begin_battle(&mut state, &[knight, archer, reserve]);
        let state = start_turn(&engine, &state, knight);
        let before = state.unit(archer).map(|u| u.hp).unwrap_or_default();

        let mut state = act(&engine, &state, Player::One, Action::Attack { attacker: knight, defender: archer }, &[]).state;
        let mut rng = PcgRng::new(seed);
        let mut resolutions = 0;
        for _ in 0..8 {
            let Some(pending) = state.pending_roll.clone() else { break };
            let command = Command::new(
                pending.player,
                Action::ResolvePendingRoll(ResolveRoll::new(pending.id, pending.player)),
            );
            let transition = engine.try_dispatch(&state, &command, &mut rng).unwrap();
            resolutions += transition
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::AttackResolved { .. }))
                .count();
            state = transition.state;
        }

        prop_assert!(state.pending_roll.is_none());
        prop_assert_eq!(resolutions, 1);
        let after = state.unit(archer).map(|u| u.hp).unwrap_or_default();
        prop_assert!(after == before || after + 1 == before);
    }

    /// Battle commands dispatched in the lobby leave the state untouched.
    #[test]
    fn prop_wrong_phase_is_a_no_op(action in battle_action(), seed in any::<u64>()) {
        let table = Table::new();
        let engine = table.engine();
        let state = GameState::new();

        let mut rng = PcgRng::new(seed);
        let transition = engine.dispatch(&state, &Command::new(Player::One, action), &mut rng);
        prop_assert_eq!(transition.state, state);
        prop_assert!(transition.events.is_empty());
    }
}
