//! Minimal [`crawl_core::ItemOracle`] backed by an in-memory map.
use std::collections::HashMap;

use crawl_core::{ItemDefinition, ItemHandle, ItemOracle};

/// Item definitions keyed by handle, with an optional map glyph per item.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    definitions: HashMap<ItemHandle, ItemDefinition>,
    glyphs: HashMap<char, ItemHandle>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item definition
    pub fn insert(&mut self, handle: ItemHandle, definition: ItemDefinition) {
        self.definitions.insert(handle, definition);
    }

    /// Binds a map marker glyph to an item that is already defined.
    pub fn bind_glyph(&mut self, glyph: char, handle: ItemHandle) {
        self.glyphs.insert(glyph, handle);
    }

    pub fn by_glyph(&self, glyph: char) -> Option<ItemHandle> {
        self.glyphs.get(&glyph).copied()
    }

    /// Display name of `handle`, or a placeholder for unknown handles.
    pub fn name(&self, handle: ItemHandle) -> String {
        self.definitions
            .get(&handle)
            .map_or_else(|| format!("item #{}", handle.0), |def| def.name.clone())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition> {
        self.definitions.get(&handle).cloned()
    }
}
