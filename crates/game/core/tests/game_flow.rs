//! Lobby to battle through the public dispatcher only.

mod common;

use common::{Table, act, count, position_of};
use tactics_core::{
    Action, Command, DispatchError, GameEvent, GameState, Phase, Player, Position, RollKind,
    ScriptedDice, UnitClass, UnitId, UnitSpec,
};

fn roster() -> Vec<UnitSpec> {
    vec![
        UnitSpec::class(UnitClass::Spearman),
        UnitSpec::class(UnitClass::Rider),
        UnitSpec::class(UnitClass::Knight),
        UnitSpec::class(UnitClass::Archer),
        UnitSpec::class(UnitClass::Trickster),
        UnitSpec::class(UnitClass::Assassin),
        UnitSpec::class(UnitClass::Berserker),
    ]
}

/// Both rosters submitted, both players ready, game started.
fn started(table: &Table) -> GameState {
    let engine = table.engine();
    let mut state = GameState::new();
    for (player, action) in [
        (
            Player::One,
            Action::ChooseArena {
                arena: "ruins".into(),
            },
        ),
        (Player::One, Action::LobbyInit { roster: roster() }),
        (Player::Two, Action::LobbyInit { roster: roster() }),
        (Player::One, Action::SetReady { ready: true }),
        (Player::Two, Action::SetReady { ready: true }),
        (Player::One, Action::StartGame),
    ] {
        state = act(&engine, &state, player, action, &[]).state;
    }
    state
}

/// Initiative decided for Player One.
fn placing(table: &Table) -> GameState {
    let engine = table.engine();
    let state = started(table);
    let state = act(&engine, &state, Player::One, Action::RollInitiative, &[5]).state;
    act(&engine, &state, Player::Two, Action::RollInitiative, &[2]).state
}

fn slot(id: UnitId) -> Position {
    // Player One owns ids 1..=7, Player Two 8..=14.
    if id.0 <= 7 {
        Position::new(id.0 as i32 - 1, 0)
    } else {
        Position::new(id.0 as i32 - 8, 8)
    }
}

#[test]
fn lobby_builds_rosters_and_starts_initiative() {
    let table = Table::new();
    let state = started(&table);

    assert_eq!(state.phase, Phase::Placement);
    assert_eq!(state.units.len(), 14);
    assert_eq!(state.lobby.arena.as_deref(), Some("ruins"));

    let pending = state.pending_roll.as_ref().expect("initiative roll");
    assert_eq!(pending.kind(), RollKind::Initiative);
    assert_eq!(pending.player, Player::One);

    let berserker = state
        .units
        .values()
        .find(|unit| unit.class == UnitClass::Berserker)
        .expect("berserker");
    assert_eq!(berserker.hp, 4);
    assert_eq!(berserker.charges(tactics_core::AbilityId::BerserkerRage), 0);
}

#[test]
fn roster_must_have_seven_units() {
    let table = Table::new();
    let engine = table.engine();
    let mut roster = roster();
    roster.pop();

    let mut rng = ScriptedDice::new([]);
    let result = engine.try_dispatch(
        &GameState::new(),
        &Command::new(Player::One, Action::LobbyInit { roster }),
        &mut rng,
    );
    assert!(matches!(
        result,
        Err(DispatchError::Action(
            tactics_core::ActionError::RosterSize { .. }
        ))
    ));
}

#[test]
fn hero_must_match_its_base_class() {
    let table = Table::new();
    let engine = table.engine();
    let mut roster = roster();
    roster[0] = UnitSpec::hero(UnitClass::Knight, "warden");

    let mut rng = ScriptedDice::new([]);
    let result = engine.try_dispatch(
        &GameState::new(),
        &Command::new(Player::One, Action::LobbyInit { roster }),
        &mut rng,
    );
    assert!(matches!(
        result,
        Err(DispatchError::Action(
            tactics_core::ActionError::HeroClassMismatch { .. }
        ))
    ));
}

#[test]
fn initiative_tie_rolls_again() {
    let table = Table::new();
    let engine = table.engine();
    let state = started(&table);

    let state = act(&engine, &state, Player::One, Action::RollInitiative, &[4]).state;
    let transition = act(&engine, &state, Player::Two, Action::RollInitiative, &[4]);

    let pending = transition.state.pending_roll.as_ref().expect("re-roll");
    assert_eq!(pending.player, Player::One);
    assert_eq!(transition.state.placement.first_player, None);
    assert_eq!(
        count(&transition.events, |e| matches!(
            e,
            GameEvent::InitiativeDecided { .. }
        )),
        0
    );
}

#[test]
fn higher_initiative_places_first() {
    let table = Table::new();
    let state = placing(&table);

    assert!(state.pending_roll.is_none());
    assert_eq!(state.placement.first_player, Some(Player::One));
    assert_eq!(state.placement.to_place, Some(Player::One));
}

#[test]
fn placement_alternates_and_the_last_unit_starts_the_battle() {
    let table = Table::new();
    let engine = table.engine();
    let mut state = placing(&table);

    let mut order = Vec::new();
    for n in 0..14 {
        let player = state.placement.to_place.expect("someone places");
        let expected = if n % 2 == 0 { Player::One } else { Player::Two };
        assert_eq!(player, expected);

        let unit = if player == Player::One {
            UnitId(n / 2 + 1)
        } else {
            UnitId(n / 2 + 8)
        };
        order.push(unit);
        let transition = act(
            &engine,
            &state,
            player,
            Action::PlaceUnit {
                unit,
                position: slot(unit),
            },
            &[],
        );

        if n == 13 {
            let placed = position_of(&transition.events, |e| {
                matches!(e, GameEvent::UnitPlaced { .. })
            });
            let battle = position_of(&transition.events, |e| {
                matches!(e, GameEvent::BattleStarted { first_unit } if *first_unit == UnitId(1))
            });
            assert!(placed < battle);
        }
        state = transition.state;
    }

    assert_eq!(state.phase, Phase::Battle);
    assert_eq!(state.turn.queue, order);
    assert_eq!(state.turn.round, 1);
    assert_eq!(state.turn.next_in_queue(), Some(UnitId(1)));
}

#[test]
fn placement_outside_the_back_rows_is_refused() {
    let table = Table::new();
    let engine = table.engine();
    let state = placing(&table);

    let mut rng = ScriptedDice::new([]);
    let result = engine.try_dispatch(
        &state,
        &Command::new(
            Player::One,
            Action::PlaceUnit {
                unit: UnitId(1),
                position: Position::new(0, 4),
            },
        ),
        &mut rng,
    );
    assert!(matches!(
        result,
        Err(DispatchError::Action(
            tactics_core::ActionError::OutsideDeployment(_)
        ))
    ));
}

#[test]
fn turns_follow_the_queue_and_rounds_wrap() {
    let table = Table::new();
    let engine = table.engine();
    let mut state = placing(&table);
    for n in 0..14u32 {
        let player = state.placement.to_place.expect("someone places");
        let unit = if player == Player::One {
            UnitId(n / 2 + 1)
        } else {
            UnitId(n / 2 + 8)
        };
        state = act(
            &engine,
            &state,
            player,
            Action::PlaceUnit {
                unit,
                position: slot(unit),
            },
            &[],
        )
        .state;
    }

    // Out of turn.
    let mut rng = ScriptedDice::new([]);
    let refused = engine.try_dispatch(
        &state,
        &Command::new(Player::Two, Action::UnitStartTurn { unit: UnitId(8) }),
        &mut rng,
    );
    assert!(matches!(
        refused,
        Err(DispatchError::Action(
            tactics_core::ActionError::NotNextInQueue(_)
        ))
    ));

    let mut wrapped = false;
    for _ in 0..14 {
        let unit = state.turn.next_in_queue().expect("next unit");
        let owner = state.unit(unit).expect("unit").owner;
        let started = act(&engine, &state, owner, Action::UnitStartTurn { unit }, &[]);
        assert!(matches!(
            started.events.first(),
            Some(GameEvent::TurnStarted { unit: u, round: 1 }) if *u == unit
        ));
        let ended = act(&engine, &started.state, owner, Action::EndTurn, &[]);
        wrapped = ended
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::RoundStarted { round: 2 }));
        state = ended.state;
    }

    assert!(wrapped);
    assert_eq!(state.turn.round, 2);
    assert_eq!(state.turn.next_in_queue(), Some(UnitId(1)));
}

#[test]
fn lobby_actions_are_refused_after_start() {
    let table = Table::new();
    let engine = table.engine();
    let state = placing(&table);

    let mut rng = ScriptedDice::new([]);
    let transition = engine.dispatch(
        &state,
        &Command::new(Player::One, Action::SetReady { ready: false }),
        &mut rng,
    );
    assert_eq!(transition.state, state);
    assert!(transition.events.is_empty());
}
