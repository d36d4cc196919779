//! Action validation errors.

use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::roll::RollError;
use crate::state::{AbilityId, HeroId, Player, Position, UnitClass, UnitId};

/// Reasons a command is rejected by its handler.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    // ===== lobby =====
    #[error("arena name must not be empty")]
    EmptyArena,

    #[error("roster must contain exactly {expected} units, got {found}")]
    RosterSize { expected: usize, found: usize },

    #[error("player {0} already submitted a roster")]
    RosterAlreadySubmitted(Player),

    #[error("player {0} has not submitted a roster")]
    RosterMissing(Player),

    #[error("unknown hero {0}")]
    UnknownHero(HeroId),

    #[error("hero {hero} is based on {base}, not {class}")]
    HeroClassMismatch {
        hero: HeroId,
        base: UnitClass,
        class: UnitClass,
    },

    #[error("class {0} has no catalog profile")]
    MissingProfile(UnitClass),

    #[error("both players must be ready")]
    PlayersNotReady,

    // ===== placement =====
    #[error("it is not player {0}'s turn to place")]
    NotYourPlacement(Player),

    #[error("unit {0} is already on the board")]
    AlreadyPlaced(UnitId),

    #[error("{0} is outside the deployment rows")]
    OutsideDeployment(Position),

    // ===== units and turns =====
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {unit} is not owned by player {player}")]
    NotOwner { unit: UnitId, player: Player },

    #[error("unit {0} is dead")]
    UnitDead(UnitId),

    #[error("unit {0} is not the active unit")]
    NotActiveUnit(UnitId),

    #[error("no unit is active")]
    NoActiveUnit,

    #[error("unit {0} is still acting")]
    TurnInProgress(UnitId),

    #[error("unit {0} is not next in the turn queue")]
    NotNextInQueue(UnitId),

    #[error("unit {unit} already spent {slots}")]
    SlotsSpent { unit: UnitId, slots: String },

    // ===== movement and targeting =====
    #[error("{0} is off the board")]
    OffBoard(Position),

    #[error("{0} is occupied")]
    Occupied(Position),

    #[error("{0} is not a legal destination")]
    IllegalDestination(Position),

    #[error("unit {target} is out of reach of {unit}")]
    OutOfReach { unit: UnitId, target: UnitId },

    #[error("unit {0} is not visible")]
    TargetHidden(UnitId),

    #[error("unit {0} is not an enemy")]
    NotEnemy(UnitId),

    #[error("unit {0} is not an ally")]
    NotAlly(UnitId),

    // ===== stealth =====
    #[error("unit {0} cannot enter stealth")]
    CannotStealth(UnitId),

    #[error("unit {0} is already stealthed")]
    AlreadyStealthed(UnitId),

    // ===== abilities =====
    #[error("unit {unit} does not have {ability}")]
    AbilityNotOwned { unit: UnitId, ability: AbilityId },

    #[error("{0} has no handler")]
    UnknownAbility(AbilityId),

    #[error("{0} is passive")]
    PassiveAbility(AbilityId),

    #[error("{ability} needs {needed} charges, unit has {available}")]
    NotEnoughCharges {
        ability: AbilityId,
        needed: u32,
        available: u32,
    },

    #[error("invalid payload for {0}")]
    InvalidPayload(AbilityId),

    #[error(transparent)]
    Roll(#[from] RollError),
}

impl ActionError {
    /// Builds a [`ActionError::SlotsSpent`] from the requested cost.
    pub fn slots_spent(unit: UnitId, slots: crate::state::TurnSlots) -> Self {
        let names: Vec<&str> = slots.iter_names().map(|(name, _)| name).collect();
        Self::SlotsSpent {
            unit,
            slots: names.join("|").to_lowercase(),
        }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            EmptyArena | RosterSize { .. } | RosterAlreadySubmitted(_) | RosterMissing(_) => {
                ErrorSeverity::Validation
            }
            UnknownHero(_) | HeroClassMismatch { .. } => ErrorSeverity::Validation,
            MissingProfile(_) => ErrorSeverity::Internal,
            PlayersNotReady => ErrorSeverity::Recoverable,
            NotYourPlacement(_) | AlreadyPlaced(_) | OutsideDeployment(_) => {
                ErrorSeverity::Validation
            }
            UnitNotFound(_) | NotOwner { .. } | UnitDead(_) => ErrorSeverity::Validation,
            NotActiveUnit(_) | NoActiveUnit | TurnInProgress(_) | NotNextInQueue(_) => {
                ErrorSeverity::Validation
            }
            SlotsSpent { .. } => ErrorSeverity::Recoverable,
            OffBoard(_) | IllegalDestination(_) => ErrorSeverity::Validation,
            Occupied(_) | OutOfReach { .. } | TargetHidden(_) => ErrorSeverity::Recoverable,
            NotEnemy(_) | NotAlly(_) => ErrorSeverity::Validation,
            CannotStealth(_) | AlreadyStealthed(_) => ErrorSeverity::Validation,
            AbilityNotOwned { .. } | PassiveAbility(_) | InvalidPayload(_) => {
                ErrorSeverity::Validation
            }
            UnknownAbility(_) => ErrorSeverity::Internal,
            NotEnoughCharges { .. } => ErrorSeverity::Recoverable,
            Roll(error) => error.severity(),
        }
    }

    fn context(&self) -> Option<ErrorContext> {
        use ActionError::*;
        let ctx = ErrorContext::new();
        match self {
            AlreadyPlaced(unit)
            | UnitNotFound(unit)
            | UnitDead(unit)
            | NotActiveUnit(unit)
            | TurnInProgress(unit)
            | NotNextInQueue(unit)
            | TargetHidden(unit)
            | NotEnemy(unit)
            | NotAlly(unit)
            | CannotStealth(unit)
            | AlreadyStealthed(unit) => Some(ctx.with_unit(*unit)),
            NotOwner { unit, .. }
            | SlotsSpent { unit, .. }
            | OutOfReach { unit, .. }
            | AbilityNotOwned { unit, .. } => Some(ctx.with_unit(*unit)),
            OutsideDeployment(position)
            | OffBoard(position)
            | Occupied(position)
            | IllegalDestination(position) => Some(ctx.with_position(*position)),
            Roll(error) => error.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            EmptyArena => "ACTION_EMPTY_ARENA",
            RosterSize { .. } => "ACTION_ROSTER_SIZE",
            RosterAlreadySubmitted(_) => "ACTION_ROSTER_ALREADY_SUBMITTED",
            RosterMissing(_) => "ACTION_ROSTER_MISSING",
            UnknownHero(_) => "ACTION_UNKNOWN_HERO",
            HeroClassMismatch { .. } => "ACTION_HERO_CLASS_MISMATCH",
            MissingProfile(_) => "ACTION_MISSING_PROFILE",
            PlayersNotReady => "ACTION_PLAYERS_NOT_READY",
            NotYourPlacement(_) => "ACTION_NOT_YOUR_PLACEMENT",
            AlreadyPlaced(_) => "ACTION_ALREADY_PLACED",
            OutsideDeployment(_) => "ACTION_OUTSIDE_DEPLOYMENT",
            UnitNotFound(_) => "ACTION_UNIT_NOT_FOUND",
            NotOwner { .. } => "ACTION_NOT_OWNER",
            UnitDead(_) => "ACTION_UNIT_DEAD",
            NotActiveUnit(_) => "ACTION_NOT_ACTIVE_UNIT",
            NoActiveUnit => "ACTION_NO_ACTIVE_UNIT",
            TurnInProgress(_) => "ACTION_TURN_IN_PROGRESS",
            NotNextInQueue(_) => "ACTION_NOT_NEXT_IN_QUEUE",
            SlotsSpent { .. } => "ACTION_SLOTS_SPENT",
            OffBoard(_) => "ACTION_OFF_BOARD",
            Occupied(_) => "ACTION_OCCUPIED",
            IllegalDestination(_) => "ACTION_ILLEGAL_DESTINATION",
            OutOfReach { .. } => "ACTION_OUT_OF_REACH",
            TargetHidden(_) => "ACTION_TARGET_HIDDEN",
            NotEnemy(_) => "ACTION_NOT_ENEMY",
            NotAlly(_) => "ACTION_NOT_ALLY",
            CannotStealth(_) => "ACTION_CANNOT_STEALTH",
            AlreadyStealthed(_) => "ACTION_ALREADY_STEALTHED",
            AbilityNotOwned { .. } => "ACTION_ABILITY_NOT_OWNED",
            UnknownAbility(_) => "ACTION_UNKNOWN_ABILITY",
            PassiveAbility(_) => "ACTION_PASSIVE_ABILITY",
            NotEnoughCharges { .. } => "ACTION_NOT_ENOUGH_CHARGES",
            InvalidPayload(_) => "ACTION_INVALID_PAYLOAD",
            Roll(error) => error.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TurnSlots;

    #[test]
    fn slots_spent_lists_flag_names() {
        let error = ActionError::slots_spent(UnitId(2), TurnSlots::MOVE | TurnSlots::ACTION);
        assert_eq!(error.to_string(), "unit #2 already spent move|action");
        assert_eq!(error.error_code(), "ACTION_SLOTS_SPENT");
        assert!(error.severity().is_recoverable());
    }

    #[test]
    fn context_carries_unit_or_position() {
        let error = ActionError::Occupied(Position::new(3, 4));
        assert_eq!(
            error.context().and_then(|ctx| ctx.position),
            Some(Position::new(3, 4))
        );
        assert!(ActionError::PlayersNotReady.context().is_none());
    }
}
