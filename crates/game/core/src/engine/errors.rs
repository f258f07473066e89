//! Error types for the action execution pipeline.

use crate::action::{AttackError, BumpError, InventoryError, MoveError, StairsError, TravelError};
use crate::env::{OracleError, TemplateError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

impl<E: GameError> GameError for TransitionPhaseError<E> {
    fn severity(&self) -> ErrorSeverity {
        self.error.severity()
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("bump action failed: {0}")]
    Bump(TransitionPhaseError<BumpError>),

    #[error("attack action failed: {0}")]
    Attack(TransitionPhaseError<AttackError>),

    #[error("travel failed: {0}")]
    Travel(TransitionPhaseError<TravelError>),

    #[error("inventory action failed: {0}")]
    Inventory(TransitionPhaseError<InventoryError>),

    #[error("stairs action failed: {0}")]
    Stairs(TransitionPhaseError<StairsError>),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("actor {0} is dead")]
    ActorDead(EntityId),

    #[error("action belongs to {actor}, not the player")]
    NotPlayerAction { actor: EntityId },
}

impl ExecuteError {
    /// The transition phase that failed, when the failure came from an action.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            ExecuteError::Move(error) => Some(error.phase),
            ExecuteError::Bump(error) => Some(error.phase),
            ExecuteError::Attack(error) => Some(error.phase),
            ExecuteError::Travel(error) => Some(error.phase),
            ExecuteError::Inventory(error) => Some(error.phase),
            ExecuteError::Stairs(error) => Some(error.phase),
            ExecuteError::Oracle(_)
            | ExecuteError::ActorNotFound(_)
            | ExecuteError::ActorDead(_)
            | ExecuteError::NotPlayerAction { .. } => None,
        }
    }

    /// The underlying refusal without pipeline context, e.g. for a player notice.
    pub fn reason(&self) -> String {
        match self {
            ExecuteError::Move(error) => error.error.to_string(),
            ExecuteError::Bump(error) => error.error.to_string(),
            ExecuteError::Attack(error) => error.error.to_string(),
            ExecuteError::Travel(error) => error.error.to_string(),
            ExecuteError::Inventory(error) => error.error.to_string(),
            ExecuteError::Stairs(error) => error.error.to_string(),
            other => other.to_string(),
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::Move(error) => error.severity(),
            ExecuteError::Bump(error) => error.severity(),
            ExecuteError::Attack(error) => error.severity(),
            ExecuteError::Travel(error) => error.severity(),
            ExecuteError::Inventory(error) => error.severity(),
            ExecuteError::Stairs(error) => error.severity(),
            ExecuteError::Oracle(error) => error.severity(),
            ExecuteError::ActorNotFound(_)
            | ExecuteError::ActorDead(_)
            | ExecuteError::NotPlayerAction { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::Move(error) => error.error_code(),
            ExecuteError::Bump(error) => error.error_code(),
            ExecuteError::Attack(error) => error.error_code(),
            ExecuteError::Travel(error) => error.error_code(),
            ExecuteError::Inventory(error) => error.error_code(),
            ExecuteError::Stairs(error) => error.error_code(),
            ExecuteError::Oracle(error) => error.error_code(),
            ExecuteError::ActorNotFound(_) => "EXECUTE_ACTOR_NOT_FOUND",
            ExecuteError::ActorDead(_) => "EXECUTE_ACTOR_DEAD",
            ExecuteError::NotPlayerAction { .. } => "EXECUTE_NOT_PLAYER_ACTION",
        }
    }
}

/// Why an actor could not be placed on the map.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("unknown actor template '{0}'")]
    UnknownTemplate(String),

    #[error("template '{id}' is invalid: {source}")]
    InvalidTemplate { id: String, source: TemplateError },

    #[error("position {0} is outside the map")]
    OutOfBounds(Position),

    #[error("position {0} is not walkable")]
    Blocked(Position),

    #[error("position {0} is already occupied")]
    Occupied(Position),

    #[error("the floor already holds the maximum number of creatures")]
    RosterFull,
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SpawnError::Oracle(error) => error.severity(),
            SpawnError::UnknownTemplate(_) | SpawnError::InvalidTemplate { .. } => {
                ErrorSeverity::Validation
            }
            SpawnError::OutOfBounds(_)
            | SpawnError::Blocked(_)
            | SpawnError::Occupied(_)
            | SpawnError::RosterFull => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SpawnError::Oracle(error) => error.error_code(),
            SpawnError::UnknownTemplate(_) => "SPAWN_UNKNOWN_TEMPLATE",
            SpawnError::InvalidTemplate { source, .. } => source.error_code(),
            SpawnError::OutOfBounds(_) => "SPAWN_OUT_OF_BOUNDS",
            SpawnError::Blocked(_) => "SPAWN_BLOCKED",
            SpawnError::Occupied(_) => "SPAWN_OCCUPIED",
            SpawnError::RosterFull => "SPAWN_ROSTER_FULL",
        }
    }
}
