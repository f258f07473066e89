//! Visibility collaborator.
//!
//! The core never computes field of view. It asks a [`PerceptionOracle`]
//! whether an observer can see a tile, and tells it to recompute once per full
//! tick after every actor has moved.

use super::MapOracle;
use crate::state::{ActorState, GameState, Position};

pub trait PerceptionOracle {
    /// Whether `observer` can currently see `position`.
    ///
    /// Implementations answer `false` for blinded observers.
    fn is_visible(&self, observer: &ActorState, position: Position) -> bool;

    /// Recomputes visibility from the current state.
    fn refresh(&mut self, state: &GameState, map: &dyn MapOracle);
}

/// Ids of the living actors `observer` can see, excluding itself.
pub fn visible_actors(
    perception: &dyn PerceptionOracle,
    state: &GameState,
    observer: &ActorState,
) -> Vec<crate::state::EntityId> {
    state
        .entities
        .all_actors()
        .filter(|actor| actor.id != observer.id && actor.is_alive())
        .filter(|actor| perception.is_visible(observer, actor.position))
        .map(|actor| actor.id)
        .collect()
}
