//! Error types for the dispatch pipeline.

use crate::action::ActionError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::roll::RollError;
use crate::state::{Phase, RollId};

/// Why a command was refused.
///
/// [`GameEngine::dispatch`](super::GameEngine::dispatch) maps every variant to
/// "unchanged state, no events"; `try_dispatch` hands it to the caller.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DispatchError {
    #[error("game is over")]
    GameEnded,

    #[error("roll {0} must be resolved first")]
    RollPending(RollId),

    #[error("action requires phase {expected}, game is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Roll(#[from] RollError),
}

impl GameError for DispatchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            DispatchError::GameEnded
            | DispatchError::RollPending(_)
            | DispatchError::WrongPhase { .. } => ErrorSeverity::Validation,
            DispatchError::Action(error) => error.severity(),
            DispatchError::Roll(error) => error.severity(),
        }
    }

    fn context(&self) -> Option<ErrorContext> {
        match self {
            DispatchError::RollPending(roll) => Some(ErrorContext::new().with_roll(*roll)),
            DispatchError::Action(error) => error.context(),
            DispatchError::Roll(error) => error.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            DispatchError::GameEnded => "DISPATCH_GAME_ENDED",
            DispatchError::RollPending(_) => "DISPATCH_ROLL_PENDING",
            DispatchError::WrongPhase { .. } => "DISPATCH_WRONG_PHASE",
            DispatchError::Action(error) => error.error_code(),
            DispatchError::Roll(error) => error.error_code(),
        }
    }
}
