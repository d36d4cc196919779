//! The async façade: handles, the worker task, and topic subscriptions.

mod common;

use common::{content, lobby_commands, next_placement_command};
use tactics_core::{Action, Command, GameConfig, Phase, Player};
use tactics_runtime::{
    Event, GameStateEvent, Runtime, RuntimeError, Session, StdRngOracle, Topic, TurnEvent,
};

fn runtime(seed: u64) -> Runtime {
    Runtime::start(Session::new(content(), StdRngOracle::seeded(seed)), 8)
}

#[tokio::test]
async fn handles_drive_a_game_into_battle() {
    let runtime = runtime(17);
    let handle = runtime.handle();
    let mut turns = handle.subscribe(Topic::Turn);

    for command in lobby_commands() {
        handle.submit(command).await.unwrap();
    }
    let config = GameConfig::default();
    for _ in 0..64 {
        let state = handle.query_state().await.unwrap();
        if state.phase == Phase::Battle {
            break;
        }
        let command = next_placement_command(&state, &config).unwrap();
        handle.submit(command).await.unwrap();
    }

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.phase, Phase::Battle);
    match turns.recv().await.unwrap() {
        Event::Turn(TurnEvent::BattleStarted { first_unit }) => {
            assert_eq!(state.turn.next_in_queue(), Some(first_unit));
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let history = handle.history().await.unwrap();
    assert!(history.len() >= lobby_commands().len() + 2 * GameConfig::UNITS_PER_SIDE);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejections_are_returned_and_published() {
    let runtime = runtime(2);
    let handle = runtime.handle();
    let mut states = handle.subscribe(Topic::GameState);

    let err = handle
        .submit(Command::new(Player::Two, Action::StartGame))
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Rejected(_)));

    match states.recv().await.unwrap() {
        Event::GameState(GameStateEvent::ActionRejected { nonce, code, .. }) => {
            assert_eq!(nonce, 0);
            assert_eq!(Some(code.as_str()), err.rejection_code());
        }
        other => panic!("unexpected event: {other:?}"),
    }

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn accepted_commands_carry_their_events() {
    let runtime = runtime(4);
    let handle = runtime.handle();
    let mut states = handle.subscribe(Topic::GameState);

    let init = lobby_commands().remove(0);
    let transition = handle.submit(init).await.unwrap();
    assert_eq!(transition.state.units_of(Player::One).count(), GameConfig::UNITS_PER_SIDE);

    match states.recv().await.unwrap() {
        Event::GameState(GameStateEvent::ActionExecuted {
            nonce,
            events,
            digest,
            ..
        }) => {
            assert_eq!(nonce, 0);
            assert_eq!(events, transition.events);
            assert_eq!(digest, transition.state.digest());
        }
        other => panic!("unexpected event: {other:?}"),
    }

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn snapshot_without_repository_fails_through_the_handle() {
    let runtime = runtime(6);
    let handle = runtime.handle();

    assert!(matches!(
        handle.snapshot().await,
        Err(RuntimeError::SnapshotsDisabled)
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_returns_while_handles_are_still_held() {
    let runtime = runtime(4);
    let handle = runtime.handle();
    handle.submit(lobby_commands().remove(0)).await.unwrap();

    tokio::time::timeout(std::time::Duration::from_secs(5), runtime.shutdown())
        .await
        .expect("worker stopped")
        .unwrap();

    assert!(matches!(
        handle.query_state().await,
        Err(RuntimeError::CommandChannelClosed)
    ));
}
