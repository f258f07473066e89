//! Unified error type surfaced by the runtime API.
//!
//! Wraps engine, placement and layout failures so hosts can bubble them up
//! with consistent context. File loading sits behind `anyhow` instead; see
//! [`crate::config::ConfigLoader`] and [`crate::oracle::GridMap::load`].
use crawl_core::{ErrorSeverity, ExecuteError, GameError, PathError, Position, SpawnError};
use thiserror::Error;

use crate::oracle::MapParseError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Action(#[from] ExecuteError),

    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    MapParse(#[from] MapParseError),

    #[error("the player is dead; the session is over")]
    GameOver,

    #[error("map has no walkable tile to place the player on")]
    NoStartingTile,

    #[error("no creature template '{0}' for spawn marker")]
    UnknownMarker(char),

    #[error("travel target {0} is the player's own tile")]
    AlreadyThere(Position),

    #[error("failed to serialize snapshot")]
    Snapshot(#[source] serde_json::Error),
}

impl RuntimeError {
    /// Whether the failure is an ordinary gameplay refusal that should be
    /// shown to the player as a notice rather than treated as a fault.
    pub fn is_notice(&self) -> bool {
        let severity = match self {
            RuntimeError::Action(error) => error.severity(),
            RuntimeError::Path(error) => error.severity(),
            RuntimeError::AlreadyThere(_) => ErrorSeverity::Recoverable,
            _ => return false,
        };
        matches!(
            severity,
            ErrorSeverity::Recoverable | ErrorSeverity::Validation
        )
    }

    /// Player-facing wording of the failure.
    pub fn notice(&self) -> String {
        match self {
            RuntimeError::Action(error) => error.reason(),
            other => other.to_string(),
        }
    }
}
