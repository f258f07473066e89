//! Carried items and which of them are worn or wielded.
//!
//! Equipment is not a separate container: a carried item is equipped when its
//! slot is flagged, so dropping or consuming an item can never leave a dangling
//! equipment reference behind.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::types::ItemHandle;

/// One carried item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub handle: ItemHandle,
    pub equipped: bool,
}

impl InventorySlot {
    pub fn new(handle: ItemHandle) -> Self {
        Self {
            handle,
            equipped: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    items: ArrayVec<InventorySlot, { GameConfig::MAX_INVENTORY_SLOTS }>,
    /// Per-actor limit, never above [`GameConfig::MAX_INVENTORY_SLOTS`].
    capacity: u8,
}

impl InventoryState {
    pub fn with_capacity(capacity: u8) -> Self {
        Self {
            items: ArrayVec::new(),
            capacity: capacity.min(GameConfig::MAX_INVENTORY_SLOTS as u8),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity()
    }

    pub fn get(&self, index: usize) -> Option<&InventorySlot> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut InventorySlot> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventorySlot> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut InventorySlot> {
        self.items.iter_mut()
    }

    /// Handles of every equipped item.
    pub fn equipped(&self) -> impl Iterator<Item = ItemHandle> + '_ {
        self.items
            .iter()
            .filter(|slot| slot.equipped)
            .map(|slot| slot.handle)
    }

    /// Stores an item. Gives the handle back when the pack is full.
    pub fn add(&mut self, handle: ItemHandle) -> Result<(), ItemHandle> {
        if self.is_full() {
            return Err(handle);
        }
        self.items
            .try_push(InventorySlot::new(handle))
            .map_err(|err| err.element().handle)
    }

    /// Removes and returns the item at `index`, shifting later items down.
    pub fn take(&mut self, index: usize) -> Option<InventorySlot> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }
}

impl Default for InventoryState {
    fn default() -> Self {
        Self::with_capacity(GameConfig::DEFAULT_INVENTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_items_past_capacity() {
        let mut inventory = InventoryState::with_capacity(2);

        assert!(inventory.add(ItemHandle(1)).is_ok());
        assert!(inventory.add(ItemHandle(2)).is_ok());
        assert_eq!(inventory.add(ItemHandle(3)), Err(ItemHandle(3)));
        assert!(inventory.is_full());
    }

    #[test]
    fn taking_an_equipped_item_clears_equipment() {
        let mut inventory = InventoryState::default();
        inventory.add(ItemHandle(7)).unwrap();
        inventory.get_mut(0).unwrap().equipped = true;
        assert_eq!(inventory.equipped().collect::<Vec<_>>(), vec![ItemHandle(7)]);

        let taken = inventory.take(0).unwrap();

        assert!(taken.equipped);
        assert_eq!(inventory.equipped().count(), 0);
    }
}
