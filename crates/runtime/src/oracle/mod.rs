//! Runtime implementations of the `crawl-core` oracle traits.
//!
//! These wrap static content (layouts, item definitions, creature templates,
//! tunables) and bundle them into an [`OracleManager`] so the session can
//! build [`crawl_core::GameEnv`] snapshots on demand. The data is immutable
//! while a floor is being played; dynamic state lives in
//! [`crawl_core::GameState`]. Visibility is the one mutable collaborator and
//! is kept apart as a [`FieldOfView`].
mod actors;
mod items;
mod map;
mod perception;

use std::sync::Arc;

use crawl_core::{Env, GameConfig, GameEnv, PcgRng};

pub use actors::{PLAYER_TEMPLATE, TemplateCatalog};
pub use items::ItemCatalog;
pub use map::{GridMap, ITEM_GLYPHS, MapParseError, Marker};
pub use perception::FieldOfView;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) map: Arc<GridMap>,
    pub(crate) items: Arc<ItemCatalog>,
    pub(crate) actors: Arc<TemplateCatalog>,
    pub(crate) config: Arc<GameConfig>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    pub fn new(
        map: Arc<GridMap>,
        items: Arc<ItemCatalog>,
        actors: Arc<TemplateCatalog>,
        config: Arc<GameConfig>,
    ) -> Self {
        Self {
            map,
            items,
            actors,
            config,
            rng: PcgRng,
        }
    }

    /// Converts oracle manager into GameEnv for crawl-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        Env::with_all(
            self.map.as_ref(),
            self.items.as_ref(),
            self.actors.as_ref(),
            self.config.as_ref(),
            &self.rng,
        )
        .into_game_env()
    }

    /// Swaps in the layout of the floor being entered.
    pub fn set_map(&mut self, map: Arc<GridMap>) {
        self.map = map;
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    pub fn actors(&self) -> &TemplateCatalog {
        &self.actors
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
