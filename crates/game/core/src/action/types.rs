//! Command payloads submitted by players.

use crate::state::{AbilityId, HeroId, Phase, Player, Position, RollId, UnitClass, UnitId};

/// One submission: the acting seat plus what it wants to do.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    pub player: Player,
    pub action: Action,
}

impl Command {
    pub fn new(player: Player, action: Action) -> Self {
        Self { player, action }
    }
}

/// Closed set of player actions.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    /// Shorthand for resolving a pending initiative roll without echoing its id.
    RollInitiative,
    ChooseArena {
        arena: String,
    },
    LobbyInit {
        roster: Vec<UnitSpec>,
    },
    SetReady {
        ready: bool,
    },
    StartGame,
    PlaceUnit {
        unit: UnitId,
        position: Position,
    },
    Move {
        unit: UnitId,
        to: Position,
    },
    RequestMoveOptions {
        unit: UnitId,
        mode: Option<MoveMode>,
    },
    Attack {
        attacker: UnitId,
        defender: UnitId,
    },
    EnterStealth {
        unit: UnitId,
    },
    SearchStealth {
        unit: UnitId,
        mode: SearchMode,
    },
    UseAbility {
        unit: UnitId,
        ability: AbilityId,
        payload: AbilityPayload,
    },
    ResolvePendingRoll(ResolveRoll),
    EndTurn,
    UnitStartTurn {
        unit: UnitId,
    },
}

impl Action {
    /// Phase this action is accepted in. `None` means any live phase.
    pub fn required_phase(&self) -> Option<Phase> {
        match self {
            Action::ChooseArena { .. }
            | Action::LobbyInit { .. }
            | Action::SetReady { .. }
            | Action::StartGame => Some(Phase::Lobby),
            Action::RollInitiative | Action::PlaceUnit { .. } => Some(Phase::Placement),
            Action::Move { .. }
            | Action::RequestMoveOptions { .. }
            | Action::Attack { .. }
            | Action::EnterStealth { .. }
            | Action::SearchStealth { .. }
            | Action::UseAbility { .. }
            | Action::EndTurn
            | Action::UnitStartTurn { .. } => Some(Phase::Battle),
            Action::ResolvePendingRoll(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        self.as_ref()
    }
}

/// A roster entry: a base class, optionally upgraded to a hero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub class: UnitClass,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hero: Option<HeroId>,
}

impl UnitSpec {
    pub fn class(class: UnitClass) -> Self {
        Self { class, hero: None }
    }

    pub fn hero(class: UnitClass, hero: impl Into<String>) -> Self {
        Self {
            class,
            hero: Some(HeroId::new(hero)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MoveMode {
    /// The unit's class movement.
    #[default]
    Move,
    /// Rider charge lanes.
    Charge,
}

/// Which slot a stealth search is paid with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchMode {
    Action,
    Move,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AbilityPayload {
    #[default]
    None,
    Cell(Position),
    Unit(UnitId),
}

/// Answer attached to a resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RollChoice {
    /// Spend the full rage stock instead of rolling.
    AutoDefense,
    Roll,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolveRoll {
    pub roll: RollId,
    pub player: Player,
    #[cfg_attr(feature = "serde", serde(default))]
    pub choice: Option<RollChoice>,
}

impl ResolveRoll {
    pub fn new(roll: RollId, player: Player) -> Self {
        Self {
            roll,
            player,
            choice: None,
        }
    }

    #[must_use]
    pub fn with_choice(mut self, choice: RollChoice) -> Self {
        self.choice = Some(choice);
        self
    }
}
