//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::ItemHandle;

/// A required oracle or piece of oracle data is missing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("MapOracle not available")]
    MapNotAvailable,

    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    #[error("ActorOracle not available")]
    ActorsNotAvailable,

    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Item definition was not found by handle.
    #[error("item definition {0:?} not found")]
    ItemNotFound(ItemHandle),

    /// Actor template was not found by id.
    #[error("actor template '{0}' not found")]
    ActorTemplateNotFound(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            MapNotAvailable | ItemsNotAvailable | ActorsNotAvailable | ConfigNotAvailable
            | RngNotAvailable => ErrorSeverity::Fatal,
            ItemNotFound(_) | ActorTemplateNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            ActorsNotAvailable => "ORACLE_ACTORS_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
            ActorTemplateNotFound(_) => "ORACLE_ACTOR_TEMPLATE_NOT_FOUND",
        }
    }
}
