use super::{ActorState, EntityId, Position};

/// The player plus every living creature on the current floor.
///
/// `npcs` is kept in spawn order, which is also the activation order of a full
/// tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub player: ActorState,
    pub npcs: Vec<ActorState>,
}

impl EntitiesState {
    pub fn new(player: ActorState) -> Self {
        Self {
            player,
            npcs: Vec::new(),
        }
    }

    /// Returns a reference to an actor by ID (player or NPC).
    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        if self.player.id == id {
            return Some(&self.player);
        }
        self.npcs.iter().find(|actor| actor.id == id)
    }

    /// Returns a mutable reference to an actor by ID (player or NPC).
    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        if self.player.id == id {
            return Some(&mut self.player);
        }
        self.npcs.iter_mut().find(|actor| actor.id == id)
    }

    /// Returns an iterator over all actors (player + NPCs).
    pub fn all_actors(&self) -> impl Iterator<Item = &ActorState> {
        std::iter::once(&self.player).chain(self.npcs.iter())
    }

    /// Returns a mutable iterator over all actors (player + NPCs).
    pub fn all_actors_mut(&mut self) -> impl Iterator<Item = &mut ActorState> {
        std::iter::once(&mut self.player).chain(self.npcs.iter_mut())
    }

    /// The living actor standing on `position`, if any. Every living actor blocks.
    pub fn blocking_actor_at(&self, position: Position) -> Option<&ActorState> {
        self.all_actors()
            .find(|actor| actor.position == position && actor.is_alive())
    }

    /// Removes an NPC from the roster, returning its final state.
    pub fn remove_npc(&mut self, id: EntityId) -> Option<ActorState> {
        let index = self.npcs.iter().position(|actor| actor.id == id)?;
        Some(self.npcs.remove(index))
    }
}
