use super::{Player, UnitId};

/// Coarse game state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    #[default]
    Lobby,
    Placement,
    Battle,
    Ended,
}

/// Battle scheduling: a cyclic queue of unit ids and a cursor into it.
///
/// `queue[index]` is the unit allowed to start the next turn. While a unit is
/// acting, `active_unit` holds its id and `index` still points at it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub active_unit: Option<UnitId>,
    pub queue: Vec<UnitId>,
    pub index: usize,
    /// Starts at 1 when the battle begins.
    pub round: u32,
}

impl TurnState {
    /// Unit the scheduler expects to start the next turn.
    pub fn next_in_queue(&self) -> Option<UnitId> {
        self.queue.get(self.index).copied()
    }
}

/// Placement bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementState {
    /// Decided by the initiative roll.
    pub first_player: Option<Player>,
    /// Player expected to place the next unit.
    pub to_place: Option<Player>,
    /// Placement order; becomes the battle turn queue.
    pub order: Vec<UnitId>,
}

/// Lobby bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LobbyState {
    pub arena: Option<String>,
    pub ready_one: bool,
    pub ready_two: bool,
}

impl LobbyState {
    pub fn is_ready(&self, player: Player) -> bool {
        match player {
            Player::One => self.ready_one,
            Player::Two => self.ready_two,
        }
    }

    pub fn set_ready(&mut self, player: Player, ready: bool) {
        match player {
            Player::One => self.ready_one = ready,
            Player::Two => self.ready_two = ready,
        }
    }

    pub fn both_ready(&self) -> bool {
        self.ready_one && self.ready_two
    }
}
