//! Host integration for the deterministic crawl core.
//!
//! This crate supplies everything `crawl-core` leaves to its host: concrete
//! oracles over ASCII floor layouts, a field-of-view perception, configuration
//! loading and a [`Session`] that drives the engine one player command at a
//! time while narrating events into a [`MessageLog`].
//!
//! Modules are organized by responsibility:
//! - [`session`] owns the game state and runs commands
//! - [`oracle`] implements the core's oracle traits
//! - [`config`] reads host settings and rule tunables
//! - [`messages`] turns game events into player-facing text
//! - [`presets`] holds the built-in creatures, items and demo floors
pub mod config;
pub mod error;
pub mod messages;
pub mod oracle;
pub mod presets;
pub mod session;

pub use config::{ConfigLoader, RuntimeConfig};
pub use error::{Result, RuntimeError};
pub use messages::{MessageEntry, MessageLevel, MessageLog};
pub use oracle::{
    FieldOfView, GridMap, ItemCatalog, MapParseError, Marker, OracleManager, TemplateCatalog,
};
pub use session::{Catalogs, Session, SessionBuilder};
