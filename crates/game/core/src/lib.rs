//! Deterministic turn-resolution core for a grid dungeon crawler.
//!
//! `crawl-core` defines the canonical rules (actions, combat, navigation,
//! agent controllers and the turn scheduler) and exposes pure APIs that a
//! host drives one player action at a time. All state mutation flows through
//! [`engine::GameEngine`]; everything the core needs to know about the world
//! arrives through the oracle traits in [`env`].
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod navigation;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{
    Action, ActionContext, ActionTransition, AttackAction, AttackStyle, Direction, MoveAction,
    MoveError, RepeatSignal, StairDirection, TravelError,
};
pub use ai::{AiView, AlertState, Controller, ControllerKind, HostileController, IdleBehavior};
pub use config::GameConfig;
pub use engine::{
    EventLog, ExecuteError, GameEngine, GameEvent, RunReport, SpawnError, StopReason, TickKind,
    TransitionPhase, TransitionPhaseError,
};
pub use env::{
    ActorOracle, ActorTemplate, ConfigOracle, Env, GameEnv, ItemDefinition, ItemKind, ItemOracle,
    MapDimensions, MapOracle, OracleError, PcgRng, PerceptionOracle, RngOracle, StaticTile,
    TerrainKind, TileFeature,
};
pub use error::{ErrorSeverity, GameError};
pub use navigation::{Occupancy, Path, PathError, Pathfinder};
pub use state::{
    ActorState, CombatProfile, EffectKind, EntityId, Faction, GameState, ItemHandle, Position,
    ResourceMeter, StatusFlags, Tick,
};
