//! Per-floor world data layered on top of the static map.

use super::{EntityId, FloorItem, ItemHandle, Position};

/// What remains of a slain creature. Never blocks movement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Corpse {
    pub former: EntityId,
    pub name: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    /// Dungeon depth, starting at 1.
    pub floor: u32,
    pub items: Vec<FloorItem>,
    pub corpses: Vec<Corpse>,
}

impl WorldState {
    pub fn new() -> Self {
        Self {
            floor: 1,
            items: Vec::new(),
            corpses: Vec::new(),
        }
    }

    pub fn items_at(&self, position: Position) -> impl Iterator<Item = &FloorItem> {
        self.items
            .iter()
            .filter(move |item| item.position == position)
    }

    pub fn has_item_at(&self, position: Position) -> bool {
        self.items_at(position).next().is_some()
    }

    pub fn drop_item(&mut self, handle: ItemHandle, position: Position) {
        self.items.push(FloorItem::new(handle, position));
    }

    /// Removes the most recently dropped item at `position`.
    pub fn take_item_at(&mut self, position: Position) -> Option<ItemHandle> {
        let index = self.items.iter().rposition(|item| item.position == position)?;
        Some(self.items.remove(index).handle)
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new()
    }
}
