use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{Player, RollId, RollKind};

/// Reasons a roll request or resolve is refused.
///
/// A refused resolve leaves the pending roll untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollError {
    #[error("roll {0} is already pending")]
    AlreadyPending(RollId),

    #[error("no roll is pending")]
    NothingPending,

    #[error("roll {submitted} does not match pending roll {pending}")]
    StaleRoll { submitted: RollId, pending: RollId },

    #[error("roll {roll} must be resolved by player {expected}")]
    WrongPlayer { roll: RollId, expected: Player },

    #[error("choice not accepted for a {0} roll")]
    ChoiceNotAllowed(RollKind),
}

impl GameError for RollError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RollError::AlreadyPending(_) => ErrorSeverity::Internal,
            RollError::NothingPending
            | RollError::StaleRoll { .. }
            | RollError::WrongPlayer { .. }
            | RollError::ChoiceNotAllowed(_) => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<ErrorContext> {
        match self {
            RollError::AlreadyPending(roll)
            | RollError::StaleRoll { pending: roll, .. }
            | RollError::WrongPlayer { roll, .. } => Some(ErrorContext::new().with_roll(*roll)),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RollError::AlreadyPending(_) => "ROLL_ALREADY_PENDING",
            RollError::NothingPending => "ROLL_NOTHING_PENDING",
            RollError::StaleRoll { .. } => "ROLL_STALE",
            RollError::WrongPlayer { .. } => "ROLL_WRONG_PLAYER",
            RollError::ChoiceNotAllowed(_) => "ROLL_CHOICE_NOT_ALLOWED",
        }
    }
}
