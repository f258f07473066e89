//! Record of what happened during an action or a tick.
//!
//! The core does no logging. Everything a host might narrate (hits, deaths,
//! pickups, failed activations) is pushed onto an [`EventLog`] that the host
//! drains after each call.

use crate::action::StairDirection;
use crate::env::EquipSlot;
use crate::state::{EffectKind, EntityId, ItemHandle, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Moved {
        actor: EntityId,
        from: Position,
        to: Position,
    },
    Attacked {
        attacker: EntityId,
        target: EntityId,
        damage: u32,
        critical: bool,
        ranged: bool,
    },
    /// Damage from an item rather than an attack.
    Struck {
        source: EntityId,
        target: EntityId,
        damage: u32,
    },
    Died {
        actor: EntityId,
        position: Position,
    },
    Woke {
        actor: EntityId,
    },
    Healed {
        actor: EntityId,
        amount: u32,
    },
    EffectApplied {
        actor: EntityId,
        effect: EffectKind,
        turns: u32,
    },
    EffectExpired {
        actor: EntityId,
        effect: EffectKind,
    },
    Confused {
        actor: EntityId,
        turns: u32,
    },
    ConfusionEnded {
        actor: EntityId,
    },
    PickedUp {
        actor: EntityId,
        item: ItemHandle,
    },
    Dropped {
        actor: EntityId,
        item: ItemHandle,
    },
    Equipped {
        actor: EntityId,
        item: ItemHandle,
        slot: EquipSlot,
    },
    Unequipped {
        actor: EntityId,
        item: ItemHandle,
        slot: EquipSlot,
    },
    ItemConsumed {
        actor: EntityId,
        item: ItemHandle,
    },
    FloorChanged {
        floor: u32,
        direction: StairDirection,
    },
    /// An automated run was halted because `spotted` came into view.
    ThreatSpotted {
        actor: EntityId,
        spotted: EntityId,
    },
    /// A non-player action failed validation. The activation is still spent.
    ActionFailed {
        actor: EntityId,
        code: &'static str,
        message: String,
    },
}

/// Append-only buffer of [`GameEvent`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Takes every buffered event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }
}
