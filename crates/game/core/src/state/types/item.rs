//! Item references and items lying on the floor.

use super::Position;

/// Reference to an item definition served by the [`ItemOracle`](crate::env::ItemOracle).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHandle(pub u32);

/// An item resting on a floor tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorItem {
    pub handle: ItemHandle,
    pub position: Position,
}

impl FloorItem {
    pub fn new(handle: ItemHandle, position: Position) -> Self {
        Self { handle, position }
    }
}
