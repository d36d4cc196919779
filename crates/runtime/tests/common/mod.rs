#![allow(dead_code)]

use tactics_content::ContentFactory;
use tactics_core::{Action, Command, GameConfig, GameState, Player, Position, RollKind, UnitSpec};
use tactics_runtime::ContentBundle;

pub fn content() -> ContentBundle {
    ContentBundle::load(&ContentFactory::bundled()).unwrap()
}

pub fn standard_roster() -> Vec<UnitSpec> {
    let factory = ContentFactory::bundled();
    let catalog = factory.load_catalog().unwrap();
    let book = factory.load_rosters(&catalog).unwrap();
    book.get("standard").unwrap().to_vec()
}

/// Commands that take an empty lobby to the initiative roll.
pub fn lobby_commands() -> Vec<Command> {
    vec![
        Command::new(
            Player::One,
            Action::LobbyInit {
                roster: standard_roster(),
            },
        ),
        Command::new(
            Player::Two,
            Action::LobbyInit {
                roster: standard_roster(),
            },
        ),
        Command::new(Player::One, Action::SetReady { ready: true }),
        Command::new(Player::Two, Action::SetReady { ready: true }),
        Command::new(Player::One, Action::StartGame),
    ]
}

/// The next command that moves placement forward: roll initiative while it is
/// pending, otherwise put the placing player's lowest unplaced unit on the
/// first free back-row cell.
pub fn next_placement_command(state: &GameState, config: &GameConfig) -> Option<Command> {
    if let Some(pending) = &state.pending_roll {
        if pending.kind() == RollKind::Initiative {
            return Some(Command::new(pending.player, Action::RollInitiative));
        }
        return None;
    }

    let player = state.placement.to_place?;
    let unit = state
        .units_of(player)
        .find(|unit| unit.position.is_none())?
        .id;

    let rows: Vec<i32> = match player {
        Player::One => (0..i32::from(config.back_rows)).collect(),
        Player::Two => (GameConfig::BOARD_SIZE - i32::from(config.back_rows)
            ..GameConfig::BOARD_SIZE)
            .rev()
            .collect(),
    };
    let position = rows
        .into_iter()
        .flat_map(|y| (0..GameConfig::BOARD_SIZE).map(move |x| Position::new(x, y)))
        .find(|cell| !state.is_occupied(*cell))?;

    Some(Command::new(player, Action::PlaceUnit { unit, position }))
}
