//! Event types for different topics.

use serde::{Deserialize, Serialize};
use tactics_core::{Command, GameEvent, Player, UnitId};

/// Events related to game state changes (accepted and rejected commands)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// A command was applied.
    ActionExecuted {
        nonce: u64,
        command: Command,
        events: Vec<GameEvent>,
        /// Digest of the state after the command.
        digest: [u8; 32],
    },

    /// The engine refused a command; the state did not change.
    ActionRejected {
        nonce: u64,
        command: Command,
        code: String,
        reason: String,
    },
}

/// Scheduling milestones, lifted out of the engine event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    BattleStarted { first_unit: UnitId },
    TurnStarted { unit: UnitId, round: u32 },
    TurnEnded { unit: UnitId },
    RoundStarted { round: u32 },
    GameEnded { winner: Player },
}

impl TurnEvent {
    pub fn from_game_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::BattleStarted { first_unit } => Some(Self::BattleStarted { first_unit }),
            GameEvent::TurnStarted { unit, round } => Some(Self::TurnStarted { unit, round }),
            GameEvent::TurnEnded { unit } => Some(Self::TurnEnded { unit }),
            GameEvent::RoundStarted { round } => Some(Self::RoundStarted { round }),
            GameEvent::GameEnded { winner } => Some(Self::GameEnded { winner }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_scheduling_events_are_lifted() {
        let turn = GameEvent::TurnStarted {
            unit: UnitId(3),
            round: 2,
        };
        assert_eq!(
            TurnEvent::from_game_event(&turn),
            Some(TurnEvent::TurnStarted {
                unit: UnitId(3),
                round: 2
            })
        );
        assert_eq!(TurnEvent::from_game_event(&GameEvent::GameStarted), None);
    }
}
