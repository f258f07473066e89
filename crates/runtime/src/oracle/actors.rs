//! Creature templates served through [`crawl_core::ActorOracle`].
use std::collections::HashMap;

use crawl_core::{ActorOracle, ActorTemplate};

/// Template id used to build the player character.
pub const PLAYER_TEMPLATE: &str = "player";

/// Actor templates keyed by definition id, plus the map glyphs that spawn them.
#[derive(Clone, Debug, Default)]
pub struct TemplateCatalog {
    templates: HashMap<String, ActorTemplate>,
    glyphs: HashMap<char, String>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, template: ActorTemplate) {
        self.templates.insert(id.into(), template);
    }

    /// Registers `template` under `id` and makes `glyph` a spawn marker for it.
    pub fn insert_with_glyph(&mut self, id: impl Into<String>, glyph: char, template: ActorTemplate) {
        let id = id.into();
        self.glyphs.insert(glyph, id.clone());
        self.templates.insert(id, template);
    }

    /// Template id a spawn marker stands for.
    pub fn id_for_glyph(&self, glyph: char) -> Option<&str> {
        self.glyphs.get(&glyph).map(String::as_str)
    }

    pub fn get(&self, id: &str) -> Option<&ActorTemplate> {
        self.templates.get(id)
    }
}

impl ActorOracle for TemplateCatalog {
    fn template(&self, def_id: &str) -> Option<ActorTemplate> {
        self.templates.get(def_id).cloned()
    }
}
