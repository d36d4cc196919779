//! One-on-one duels through the pending-roll protocol.

mod common;

use common::{Table, act, begin_battle, count, pending_kind, position_of, resolve, start_turn};
use tactics_core::{
    AbilityId, Action, ActionError, Command, Defense, DispatchError, GameConfig, GameEvent,
    GameState, Phase, Player, Position, ResolveRoll, RollChoice, RollError, RollId, RollKind,
    ScriptedDice, UnitClass, UnitId, UnitSpec,
};

struct Duel {
    state: GameState,
    knight: UnitId,
    target: UnitId,
}

/// A Player One knight, active, next to a Player Two unit of `class`.
fn duel(table: &Table, class: UnitClass) -> Duel {
    let mut state = GameState::new();
    let knight = table.spawn(&mut state, Player::One, UnitSpec::class(UnitClass::Knight), 4, 4);
    let target = table.spawn(&mut state, Player::Two, UnitSpec::class(class), 4, 5);
    let reserve_two = table.spawn(&mut state, Player::Two, UnitSpec::class(UnitClass::Archer), 0, 8);
    let reserve_one = table.spawn(&mut state, Player::One, UnitSpec::class(UnitClass::Archer), 0, 0);
    begin_battle(&mut state, &[knight, target, reserve_two, reserve_one]);
    let state = start_turn(&table.engine(), &state, knight);
    Duel {
        state,
        knight,
        target,
    }
}

fn attack(table: &Table, duel: &Duel) -> GameState {
    let transition = act(
        &table.engine(),
        &duel.state,
        Player::One,
        Action::Attack {
            attacker: duel.knight,
            defender: duel.target,
        },
        &[],
    );
    assert_eq!(pending_kind(&transition.state), Some(RollKind::AttackerRoll));
    transition.state
}

fn resolved(events: &[GameEvent]) -> &tactics_core::CombatOutcome {
    events
        .iter()
        .find_map(|event| match event {
            GameEvent::AttackResolved { outcome } => Some(outcome),
            _ => None,
        })
        .expect("attack resolved")
}

#[test]
fn higher_sum_hits_for_unit_damage() {
    let table = Table::new();
    let engine = table.engine();
    let duel = duel(&table, UnitClass::Spearman);

    let state = attack(&table, &duel);
    let after_attacker = resolve(&engine, &state, &[6, 6], None);
    let pending = after_attacker.state.pending_roll.as_ref().expect("defender roll");
    assert_eq!(pending.kind(), RollKind::DefenderRoll);
    assert_eq!(pending.player, Player::Two);

    let done = resolve(&engine, &after_attacker.state, &[1, 1], None);
    let outcome = resolved(&done.events);
    assert!(outcome.hit);
    assert_eq!(outcome.damage, 1);
    assert_eq!(done.state.unit(duel.target).map(|u| u.hp), Some(2));
    assert!(done.state.pending_roll.is_none());
}

#[test]
fn attack_spends_the_attack_slot() {
    let table = Table::new();
    let engine = table.engine();
    let duel = duel(&table, UnitClass::Spearman);
    let state = attack(&table, &duel);
    let state = resolve(&engine, &state, &[1, 1], None).state;
    let state = resolve(&engine, &state, &[6, 6], None).state;

    let mut rng = ScriptedDice::new([]);
    let again = engine.try_dispatch(
        &state,
        &Command::new(
            Player::One,
            Action::Attack {
                attacker: duel.knight,
                defender: duel.target,
            },
        ),
        &mut rng,
    );
    assert!(matches!(
        again,
        Err(DispatchError::Action(ActionError::SlotsSpent { .. }))
    ));
}

#[test]
fn ties_add_one_die_per_side_until_broken() {
    let table = Table::new();
    let engine = table.engine();
    let duel = duel(&table, UnitClass::Spearman);

    let state = attack(&table, &duel);
    let state = resolve(&engine, &state, &[3, 3], None).state;
    let tied = resolve(&engine, &state, &[2, 4], None);
    let pending = tied.state.pending_roll.as_ref().expect("tie-break");
    assert_eq!(pending.kind(), RollKind::TieBreak);
    assert_eq!(pending.player, Player::One);
    assert_eq!(
        count(&tied.events, |e| matches!(e, GameEvent::AttackResolved { .. })),
        0
    );

    let still_tied = resolve(&engine, &tied.state, &[4, 4], None);
    assert_eq!(pending_kind(&still_tied.state), Some(RollKind::TieBreak));

    let done = resolve(&engine, &still_tied.state, &[5, 2], None);
    let outcome = resolved(&done.events);
    assert!(outcome.hit);
    assert_eq!(outcome.attacker_dice, vec![3, 3, 4, 5]);
    assert_eq!(outcome.defender_dice, vec![2, 4, 4, 2]);
}

#[test]
fn capped_tie_break_leaves_the_defender_standing() {
    let table = Table::with_config(GameConfig::default().with_tie_break_cap(Some(1)));
    let engine = table.engine();
    let duel = duel(&table, UnitClass::Spearman);

    let state = attack(&table, &duel);
    let state = resolve(&engine, &state, &[3, 3], None).state;
    let state = resolve(&engine, &state, &[2, 4], None).state;
    let done = resolve(&engine, &state, &[4, 4], None);

    let outcome = resolved(&done.events);
    assert!(!outcome.hit);
    assert_eq!(outcome.defense, Defense::Rolled);
    assert_eq!(done.state.unit(duel.target).map(|u| u.hp), Some(3));
    assert!(done.state.pending_roll.is_none());
}

#[test]
fn only_the_resolution_is_accepted_while_a_roll_is_pending() {
    let table = Table::new();
    let engine = table.engine();
    let duel = duel(&table, UnitClass::Spearman);
    let state = attack(&table, &duel);
    let pending = state.pending_roll.as_ref().expect("pending").id;

    let mut rng = ScriptedDice::new([]);
    let command = Command::new(
        Player::One,
        Action::Move {
            unit: duel.knight,
            to: Position::new(5, 6),
        },
    );
    assert_eq!(
        engine.try_dispatch(&state, &command, &mut rng),
        Err(DispatchError::RollPending(pending))
    );

    let transition = engine.dispatch(&state, &command, &mut rng);
    assert_eq!(transition.state, state);
    assert!(transition.events.is_empty());
}

#[test]
fn mismatched_resolves_leave_the_roll_in_place() {
    let table = Table::new();
    let engine = table.engine();
    let duel = duel(&table, UnitClass::Spearman);
    let state = attack(&table, &duel);
    let pending = state.pending_roll.as_ref().expect("pending").id;

    let mut rng = ScriptedDice::new([6, 6]);
    let stale = engine.try_dispatch(
        &state,
        &Command::new(
            Player::One,
            Action::ResolvePendingRoll(ResolveRoll::new(RollId(999), Player::One)),
        ),
        &mut rng,
    );
    assert!(matches!(
        stale,
        Err(DispatchError::Roll(RollError::StaleRoll { .. }))
    ));

    let wrong_player = engine.try_dispatch(
        &state,
        &Command::new(
            Player::Two,
            Action::ResolvePendingRoll(ResolveRoll::new(pending, Player::Two)),
        ),
        &mut rng,
    );
    assert!(matches!(
        wrong_player,
        Err(DispatchError::Roll(RollError::WrongPlayer { .. }))
    ));

    let not_a_choice = engine.try_dispatch(
        &state,
        &Command::new(
            Player::One,
            Action::ResolvePendingRoll(
                ResolveRoll::new(pending, Player::One).with_choice(RollChoice::AutoDefense),
            ),
        ),
        &mut rng,
    );
    assert!(matches!(
        not_a_choice,
        Err(DispatchError::Roll(RollError::ChoiceNotAllowed(
            RollKind::AttackerRoll
        )))
    ));
    assert_eq!(rng.remaining(), 2);
}

#[test]
fn full_rage_berserker_is_offered_auto_defense() {
    let table = Table::new();
    let engine = table.engine();
    let mut duel = duel(&table, UnitClass::Berserker);
    if let Some(berserker) = duel.state.unit_mut(duel.target) {
        berserker.charges.insert(AbilityId::BerserkerRage, 6);
    }

    let state = attack(&table, &duel);
    let choice = resolve(&engine, &state, &[6, 6], None);
    let pending = choice.state.pending_roll.as_ref().expect("choice");
    assert_eq!(pending.kind(), RollKind::DefenseChoice);
    assert_eq!(pending.player, Player::Two);

    let done = resolve(&engine, &choice.state, &[], Some(RollChoice::AutoDefense));
    let used = position_of(&done.events, |e| {
        matches!(e, GameEvent::AutoDefenseUsed { charges_spent: 6, .. })
    });
    let drained = position_of(&done.events, |e| {
        matches!(
            e,
            GameEvent::ChargesUpdated {
                ability: AbilityId::BerserkerRage,
                charges: 0,
                ..
            }
        )
    });
    let hit = position_of(&done.events, |e| matches!(e, GameEvent::AttackResolved { .. }));
    assert!(used < drained && drained < hit);

    let outcome = resolved(&done.events);
    assert_eq!(outcome.defense, Defense::Automatic);
    assert!(!outcome.hit);
    assert!(outcome.defender_dice.is_empty());
    assert_eq!(
        done.state
            .unit(duel.target)
            .map(|u| u.charges(AbilityId::BerserkerRage)),
        Some(0)
    );
}

#[test]
fn declining_auto_defense_rolls_normally() {
    let table = Table::new();
    let engine = table.engine();
    let mut duel = duel(&table, UnitClass::Berserker);
    if let Some(berserker) = duel.state.unit_mut(duel.target) {
        berserker.charges.insert(AbilityId::BerserkerRage, 6);
    }

    let state = attack(&table, &duel);
    let state = resolve(&engine, &state, &[2, 2], None).state;
    let done = resolve(&engine, &state, &[5, 5], Some(RollChoice::Roll));

    let outcome = resolved(&done.events);
    assert_eq!(outcome.defense, Defense::Rolled);
    assert!(!outcome.hit);
    assert_eq!(
        count(&done.events, |e| matches!(e, GameEvent::AutoDefenseUsed { .. })),
        0
    );
}

#[test]
fn berserker_gains_rage_after_surviving_a_rolled_defense() {
    let table = Table::new();
    let engine = table.engine();
    let duel = duel(&table, UnitClass::Berserker);

    let state = attack(&table, &duel);
    let state = resolve(&engine, &state, &[1, 1], None).state;
    let done = resolve(&engine, &state, &[6, 6], None);

    assert!(done.events.iter().any(|e| matches!(
        e,
        GameEvent::ChargesUpdated {
            ability: AbilityId::BerserkerRage,
            charges: 1,
            ..
        }
    )));
}

#[test]
fn shelter_adds_a_defense_die() {
    let table = Table::new();
    let engine = table.engine();
    let mut duel = duel(&table, UnitClass::Spearman);
    let warden = table.spawn(
        &mut duel.state,
        Player::Two,
        UnitSpec::hero(UnitClass::Spearman, "warden"),
        5,
        6,
    );
    if let Some(target) = duel.state.unit_mut(duel.target) {
        target.shelter = Some(warden);
    }

    let state = attack(&table, &duel);
    let state = resolve(&engine, &state, &[6, 6], None).state;
    let done = resolve(&engine, &state, &[1, 1, 1], None);
    assert_eq!(resolved(&done.events).defender_dice, vec![1, 1, 1]);
}

#[test]
fn shelter_bonus_saturates_at_the_largest_pool() {
    let table = Table::with_config(GameConfig {
        dice_per_roll: u8::MAX,
        ..GameConfig::default()
    });
    let engine = table.engine();
    let mut duel = duel(&table, UnitClass::Spearman);
    let warden = table.spawn(
        &mut duel.state,
        Player::Two,
        UnitSpec::hero(UnitClass::Spearman, "warden"),
        5,
        6,
    );
    if let Some(target) = duel.state.unit_mut(duel.target) {
        target.shelter = Some(warden);
    }

    let state = attack(&table, &duel);
    let state = resolve(&engine, &state, &[6; 255], None).state;
    let done = resolve(&engine, &state, &[], None);
    let outcome = resolved(&done.events);
    assert_eq!(outcome.defender_dice.len(), usize::from(u8::MAX));
    assert_eq!(done.state.unit(duel.target).map(|u| u.hp), Some(2));
}

#[test]
fn roll_for_a_vanished_defender_is_cancelled() {
    let table = Table::new();
    let engine = table.engine();
    let duel = duel(&table, UnitClass::Spearman);

    let mut state = attack(&table, &duel);
    let roll = state.pending_roll.as_ref().map(|p| p.id).expect("roll");
    state.units.remove(&duel.target);

    let done = resolve(&engine, &state, &[6, 6], None);
    assert_eq!(
        done.events,
        vec![GameEvent::PendingRollCancelled {
            roll,
            kind: RollKind::AttackerRoll,
        }]
    );
    assert!(done.state.pending_roll.is_none());
    assert_eq!(done.state.phase, Phase::Battle);
}

#[test]
fn last_kill_ends_the_game() {
    let table = Table::new();
    let engine = table.engine();
    let mut duel = duel(&table, UnitClass::Spearman);
    let reserve = duel
        .state
        .units
        .values()
        .find(|u| u.owner == Player::Two && u.id != duel.target)
        .map(|u| u.id)
        .expect("reserve");
    duel.state.units.remove(&reserve);
    duel.state.turn.queue.retain(|id| *id != reserve);
    if let Some(target) = duel.state.unit_mut(duel.target) {
        target.hp = 1;
    }

    let state = attack(&table, &duel);
    let state = resolve(&engine, &state, &[6, 6], None).state;
    let done = resolve(&engine, &state, &[1, 1], None);

    let resolved_at = position_of(&done.events, |e| matches!(e, GameEvent::AttackResolved { .. }));
    let died = position_of(&done.events, |e| matches!(e, GameEvent::UnitDied { .. }));
    let ended = position_of(&done.events, |e| {
        matches!(e, GameEvent::GameEnded { winner: Player::One })
    });
    assert!(resolved_at < died && died < ended);
    assert_eq!(done.state.phase, Phase::Ended);
    assert_eq!(done.state.winner, Some(Player::One));

    let dead = done.state.unit(duel.target).expect("kept for bookkeeping");
    assert!(!dead.alive);
    assert_eq!(dead.position, None);

    let mut rng = ScriptedDice::new([]);
    assert_eq!(
        engine.try_dispatch(
            &done.state,
            &Command::new(Player::One, Action::EndTurn),
            &mut rng
        ),
        Err(DispatchError::GameEnded)
    );
}

#[test]
fn hidden_enemies_cannot_be_attacked() {
    let table = Table::new();
    let mut duel = duel(&table, UnitClass::Assassin);
    if let Some(assassin) = duel.state.unit_mut(duel.target) {
        assassin.stealthed = true;
        assassin.stealth_turns_left = 2;
    }

    let mut rng = ScriptedDice::new([]);
    let result = table.engine().try_dispatch(
        &duel.state,
        &Command::new(
            Player::One,
            Action::Attack {
                attacker: duel.knight,
                defender: duel.target,
            },
        ),
        &mut rng,
    );
    assert!(matches!(
        result,
        Err(DispatchError::Action(ActionError::TargetHidden(_)))
    ));
}
