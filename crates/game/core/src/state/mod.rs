//! Authoritative game state representation.
//!
//! This module owns the data structures that describe actors, turn
//! bookkeeping and per-floor world data. Hosts clone or serialize this state
//! but mutate it exclusively through the engine.
pub mod types;

pub use types::{
    ActorState, CombatProfile, Corpse, EffectKind, EntitiesState, EntityId, Faction, FloorItem,
    InventorySlot, InventoryState, ItemHandle, Position, RangedProfile, ResourceMeter,
    StatusFlags, Tick, TimedEffect, TimedEffects, TurnState, WorldState,
};

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified.
    /// Combined with `turn.nonce` to generate unique seeds for each random event.
    pub game_seed: u64,

    /// Sequential entity ID allocator (monotonically increasing).
    ///
    /// Never reused. ID 0 is reserved for the player.
    next_entity_id: u32,

    pub turn: TurnState,
    pub entities: EntitiesState,
    pub world: WorldState,
}

impl GameState {
    /// Creates a fresh state around `player`, whose id is forced to
    /// [`EntityId::PLAYER`].
    pub fn new(game_seed: u64, mut player: ActorState) -> Self {
        player.id = EntityId::PLAYER;
        player.controller = None;
        Self {
            game_seed,
            next_entity_id: 1,
            turn: TurnState::new(),
            entities: EntitiesState::new(player),
            world: WorldState::new(),
        }
    }

    /// Reserves a fresh entity id.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    pub fn player(&self) -> &ActorState {
        &self.entities.player
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.entities.actor(id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.entities.actor_mut(id)
    }

    /// The living actor occupying `position`, if any.
    pub fn blocking_actor_at(&self, position: Position) -> Option<&ActorState> {
        self.entities.blocking_actor_at(position)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.blocking_actor_at(position).is_some()
    }

    /// Ids of the living non-player actors, in activation order.
    pub fn npc_ids(&self) -> Vec<EntityId> {
        self.entities
            .npcs
            .iter()
            .filter(|actor| actor.is_alive())
            .map(|actor| actor.id)
            .collect()
    }

    /// Finalizes the death of an actor whose health reached zero.
    ///
    /// An NPC leaves the roster and a corpse is left on its tile. The player
    /// stays in place with empty health so the host can report the end of the
    /// run. Returns the corpse for NPCs.
    pub(crate) fn slay(&mut self, id: EntityId) -> Option<Corpse> {
        if id.is_player() {
            let player = &mut self.entities.player;
            player.health.current = 0;
            player.energy = 0;
            player.flags = StatusFlags::empty();
            return None;
        }

        let actor = self.entities.remove_npc(id)?;
        let corpse = Corpse {
            former: actor.id,
            name: format!("remains of {}", actor.name),
            position: actor.position,
        };
        self.world.corpses.push(corpse.clone());
        Some(corpse)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0, ActorState::default().with_health(30))
    }
}
