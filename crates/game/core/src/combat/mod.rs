//! Combat resolution.
//!
//! - `damage`: pure damage arithmetic and the critical roll
//! - `result`: full attack resolution and applying damage to the state
//!
//! Offense and defense are derived on every call from base stats plus
//! equipped items (see [`ActorState::offense`](crate::state::ActorState::offense)),
//! so nothing here caches stats.

pub mod damage;
pub mod result;

pub use damage::{calculate_damage, is_critical};
pub use result::{AttackResult, apply_damage, resolve_attack};
