//! Inventory actions: pick up, drop, equip and use.
//!
//! Each is a single atomic transition. Inventory slots are addressed by index
//! into the carrier's inventory, as shown to the player.

use crate::action::{ActionContext, ActionTransition, RepeatSignal};
use crate::combat::apply_damage;
use crate::engine::GameEvent;
use crate::env::{ConsumableEffect, ItemDefinition, ItemOracle, OracleError, PerceptionOracle};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorState, EntityId, GameState, ItemHandle};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("there is nothing here to pick up")]
    NothingToPickUp,

    #[error("inventory is full")]
    InventoryFull,

    #[error("no item in slot {0}")]
    InvalidSlot(usize),

    #[error("unknown item {0:?}")]
    UnknownItem(ItemHandle),

    #[error("{0} cannot be used")]
    NotConsumable(String),

    #[error("{0} cannot be equipped")]
    NotEquippable(String),

    #[error("already at full health")]
    HealthFull,

    #[error("this item needs a target")]
    TargetRequired,

    #[error("{0} is not a valid target")]
    InvalidTarget(EntityId),

    #[error("target is out of range")]
    TargetOutOfRange,

    #[error("no enemy is close enough to strike")]
    NoTargetInRange,
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        use InventoryError::*;
        match self {
            Oracle(error) => error.severity(),
            ActorNotFound(_) => ErrorSeverity::Internal,
            InvalidSlot(_) | UnknownItem(_) | NotConsumable(_) | NotEquippable(_)
            | TargetRequired | InvalidTarget(_) => ErrorSeverity::Validation,
            NothingToPickUp | InventoryFull | HealthFull | TargetOutOfRange | NoTargetInRange => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use InventoryError::*;
        match self {
            Oracle(error) => error.error_code(),
            ActorNotFound(_) => "INVENTORY_ACTOR_NOT_FOUND",
            NothingToPickUp => "INVENTORY_NOTHING_TO_PICK_UP",
            InventoryFull => "INVENTORY_FULL",
            InvalidSlot(_) => "INVENTORY_INVALID_SLOT",
            UnknownItem(_) => "INVENTORY_UNKNOWN_ITEM",
            NotConsumable(_) => "INVENTORY_NOT_CONSUMABLE",
            NotEquippable(_) => "INVENTORY_NOT_EQUIPPABLE",
            HealthFull => "INVENTORY_HEALTH_FULL",
            TargetRequired => "INVENTORY_TARGET_REQUIRED",
            InvalidTarget(_) => "INVENTORY_INVALID_TARGET",
            TargetOutOfRange => "INVENTORY_TARGET_OUT_OF_RANGE",
            NoTargetInRange => "INVENTORY_NO_TARGET_IN_RANGE",
        }
    }
}

fn carrier(state: &GameState, actor: EntityId) -> Result<&ActorState, InventoryError> {
    state
        .actor(actor)
        .ok_or(InventoryError::ActorNotFound(actor))
}

fn carrier_mut(state: &mut GameState, actor: EntityId) -> Result<&mut ActorState, InventoryError> {
    state
        .actor_mut(actor)
        .ok_or(InventoryError::ActorNotFound(actor))
}

/// Handle and definition of the item in `slot`.
fn slot_item(
    actor: &ActorState,
    slot: usize,
    items: &dyn ItemOracle,
) -> Result<(ItemHandle, ItemDefinition), InventoryError> {
    let handle = actor
        .inventory
        .get(slot)
        .ok_or(InventoryError::InvalidSlot(slot))?
        .handle;
    let definition = items
        .definition(handle)
        .ok_or(InventoryError::UnknownItem(handle))?;
    Ok((handle, definition))
}

// ============================================================================
// Pickup / Drop
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickupAction {
    pub actor: EntityId,
}

impl PickupAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for PickupAction {
    type Error = InventoryError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        let actor = carrier(state, self.actor)?;
        if !state.world.has_item_at(actor.position) {
            return Err(InventoryError::NothingToPickUp);
        }
        if actor.inventory.is_full() {
            return Err(InventoryError::InventoryFull);
        }
        Ok(())
    }

    fn apply(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error> {
        let position = carrier(state, self.actor)?.position;
        let handle = state
            .world
            .take_item_at(position)
            .ok_or(InventoryError::NothingToPickUp)?;
        let added = carrier_mut(state, self.actor)?.inventory.add(handle);
        if let Err(handle) = added {
            state.world.drop_item(handle, position);
            return Err(InventoryError::InventoryFull);
        }

        ctx.events.push(GameEvent::PickedUp {
            actor: self.actor,
            item: handle,
        });
        Ok(RepeatSignal::Stop)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropAction {
    pub actor: EntityId,
    pub slot: usize,
}

impl DropAction {
    pub fn new(actor: EntityId, slot: usize) -> Self {
        Self { actor, slot }
    }
}

impl ActionTransition for DropAction {
    type Error = InventoryError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        carrier(state, self.actor)?
            .inventory
            .get(self.slot)
            .map(|_| ())
            .ok_or(InventoryError::InvalidSlot(self.slot))
    }

    fn apply(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error> {
        let actor = carrier_mut(state, self.actor)?;
        let position = actor.position;
        let dropped = actor
            .inventory
            .take(self.slot)
            .ok_or(InventoryError::InvalidSlot(self.slot))?;
        state.world.drop_item(dropped.handle, position);

        ctx.events.push(GameEvent::Dropped {
            actor: self.actor,
            item: dropped.handle,
        });
        Ok(RepeatSignal::Stop)
    }
}

// ============================================================================
// Equip
// ============================================================================

/// Toggles an item between carried and equipped. Equipping replaces whatever
/// occupied the same equipment slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquipAction {
    pub actor: EntityId,
    pub slot: usize,
}

impl EquipAction {
    pub fn new(actor: EntityId, slot: usize) -> Self {
        Self { actor, slot }
    }
}

impl ActionTransition for EquipAction {
    type Error = InventoryError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        let actor = carrier(state, self.actor)?;
        let (_, definition) = slot_item(actor, self.slot, ctx.env.items()?)?;
        match definition.equipment() {
            Some(_) => Ok(()),
            None => Err(InventoryError::NotEquippable(definition.name)),
        }
    }

    fn apply(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error> {
        let items = ctx.env.items()?;
        let actor = carrier_mut(state, self.actor)?;
        let (handle, definition) = slot_item(actor, self.slot, items)?;
        let equipment = definition
            .equipment()
            .ok_or(InventoryError::NotEquippable(definition.name))?;

        let was_equipped = actor
            .inventory
            .get(self.slot)
            .is_some_and(|slot| slot.equipped);
        if was_equipped {
            if let Some(slot) = actor.inventory.get_mut(self.slot) {
                slot.equipped = false;
            }
            ctx.events.push(GameEvent::Unequipped {
                actor: self.actor,
                item: handle,
                slot: equipment.slot,
            });
            return Ok(RepeatSignal::Stop);
        }

        for (index, carried) in actor.inventory.iter_mut().enumerate() {
            if index == self.slot || !carried.equipped {
                continue;
            }
            let same_slot = items
                .definition(carried.handle)
                .and_then(|definition| definition.equipment())
                .is_some_and(|other| other.slot == equipment.slot);
            if same_slot {
                carried.equipped = false;
                ctx.events.push(GameEvent::Unequipped {
                    actor: self.actor,
                    item: carried.handle,
                    slot: equipment.slot,
                });
            }
        }
        if let Some(slot) = actor.inventory.get_mut(self.slot) {
            slot.equipped = true;
        }
        ctx.events.push(GameEvent::Equipped {
            actor: self.actor,
            item: handle,
            slot: equipment.slot,
        });
        Ok(RepeatSignal::Stop)
    }
}

// ============================================================================
// Use item
// ============================================================================

/// Consumes the item in `slot`. Confusion needs an explicit `target`; a bolt
/// picks the closest visible hostile on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UseItemAction {
    pub actor: EntityId,
    pub slot: usize,
    pub target: Option<EntityId>,
}

impl UseItemAction {
    pub fn new(actor: EntityId, slot: usize) -> Self {
        Self {
            actor,
            slot,
            target: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// Closest living hostile `user` can see within `range`, lowest id first
    /// on ties.
    fn bolt_target(
        state: &GameState,
        perception: &dyn PerceptionOracle,
        user: &ActorState,
        range: u32,
    ) -> Option<EntityId> {
        state
            .entities
            .all_actors()
            .filter(|other| other.is_alive() && user.is_hostile_to(other))
            .filter(|other| perception.is_visible(user, other.position))
            .map(|other| (user.position.chebyshev_distance(other.position), other.id))
            .filter(|(distance, _)| *distance <= range)
            .min()
            .map(|(_, id)| id)
    }

    fn check_confuse_target(
        &self,
        state: &GameState,
        perception: &dyn PerceptionOracle,
        user: &ActorState,
        range: u32,
    ) -> Result<EntityId, InventoryError> {
        let target_id = self.target.ok_or(InventoryError::TargetRequired)?;
        let target = state
            .actor(target_id)
            .filter(|target| target.is_alive() && target.id != user.id)
            .filter(|target| target.controller.is_some())
            .ok_or(InventoryError::InvalidTarget(target_id))?;
        if !perception.is_visible(user, target.position) {
            return Err(InventoryError::InvalidTarget(target_id));
        }
        if user.position.chebyshev_distance(target.position) > range {
            return Err(InventoryError::TargetOutOfRange);
        }
        Ok(target_id)
    }
}

impl ActionTransition for UseItemAction {
    type Error = InventoryError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        let user = carrier(state, self.actor)?;
        let (_, definition) = slot_item(user, self.slot, ctx.env.items()?)?;
        let effect = definition
            .consumable()
            .ok_or(InventoryError::NotConsumable(definition.name))?;

        match effect {
            ConsumableEffect::Heal { .. } if user.health.is_full() => Err(InventoryError::HealthFull),
            ConsumableEffect::Heal { .. } | ConsumableEffect::Grant { .. } => Ok(()),
            ConsumableEffect::Confuse { range, .. } => self
                .check_confuse_target(state, ctx.perception, user, range)
                .map(|_| ()),
            ConsumableEffect::Bolt { range, .. } => {
                Self::bolt_target(state, ctx.perception, user, range)
                    .map(|_| ())
                    .ok_or(InventoryError::NoTargetInRange)
            }
        }
    }

    fn apply(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error> {
        let user = carrier(state, self.actor)?;
        let (handle, definition) = slot_item(user, self.slot, ctx.env.items()?)?;
        let effect = definition
            .consumable()
            .ok_or(InventoryError::NotConsumable(definition.name))?;

        match effect {
            ConsumableEffect::Heal { amount } => {
                let amount = carrier_mut(state, self.actor)?.health.restore(amount);
                ctx.events.push(GameEvent::Healed {
                    actor: self.actor,
                    amount,
                });
            }
            ConsumableEffect::Grant { effect, turns } => {
                carrier_mut(state, self.actor)?.apply_effect(effect, turns);
                ctx.events.push(GameEvent::EffectApplied {
                    actor: self.actor,
                    effect,
                    turns,
                });
            }
            ConsumableEffect::Confuse { turns, range } => {
                let target_id = self.check_confuse_target(state, ctx.perception, user, range)?;
                let target = carrier_mut(state, target_id)?;
                let controller = target
                    .controller
                    .take()
                    .ok_or(InventoryError::InvalidTarget(target_id))?;
                target.controller = Some(controller.confuse(turns));
                ctx.events.push(GameEvent::Confused {
                    actor: target_id,
                    turns,
                });
            }
            ConsumableEffect::Bolt { damage, range } => {
                let target_id = Self::bolt_target(state, ctx.perception, user, range)
                    .ok_or(InventoryError::NoTargetInRange)?;
                ctx.events.push(GameEvent::Struck {
                    source: self.actor,
                    target: target_id,
                    damage,
                });
                apply_damage(state, ctx.events, target_id, damage);
            }
        }

        carrier_mut(state, self.actor)?.inventory.take(self.slot);
        ctx.events.push(GameEvent::ItemConsumed {
            actor: self.actor,
            item: handle,
        });
        Ok(RepeatSignal::Stop)
    }
}
