pub mod actor;
pub mod common;
pub mod entities;
pub mod item;
pub mod status;
pub mod turn;
pub mod world;

pub use actor::{
    ActorState, CombatProfile, Faction, InventorySlot, InventoryState, RangedProfile,
};
pub use common::{EntityId, Position, ResourceMeter, Tick};
pub use entities::EntitiesState;
pub use item::{FloorItem, ItemHandle};
pub use status::{EffectKind, StatusFlags, TimedEffect, TimedEffects};
pub use turn::TurnState;
pub use world::{Corpse, WorldState};
