//! Stub oracles shared by the unit tests.

use std::collections::{HashMap, HashSet};

use crate::config::GameConfig;
use crate::env::{
    ActorOracle, ActorTemplate, Env, ItemDefinition, ItemOracle, MapDimensions, MapOracle,
    PcgRng, PerceptionOracle, StaticTile, TileFeature,
};
use crate::state::{ActorState, GameState, ItemHandle, Position, StatusFlags};

/// Grid parsed from rows of ASCII: `#` wall, `.` floor, `>`/`<` stairs.
/// Anything else is floor.
pub(crate) struct StubMap {
    dimensions: MapDimensions,
    tiles: Vec<StaticTile>,
}

impl StubMap {
    pub(crate) fn parse(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let dimensions = MapDimensions::new(width, height);
        let mut tiles = vec![StaticTile::wall(); dimensions.area()];
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                tiles[y * width as usize + x] = match glyph {
                    '#' => StaticTile::wall(),
                    '>' => StaticTile::with_feature(TileFeature::DownStairs),
                    '<' => StaticTile::with_feature(TileFeature::UpStairs),
                    _ => StaticTile::floor(),
                };
            }
        }
        Self { dimensions, tiles }
    }

    /// Fully open floor of the given size.
    pub(crate) fn open(width: u32, height: u32) -> Self {
        let dimensions = MapDimensions::new(width, height);
        Self {
            dimensions,
            tiles: vec![StaticTile::floor(); dimensions.area()],
        }
    }
}

impl MapOracle for StubMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.dimensions
            .index(position)
            .map(|index| self.tiles[index])
    }
}

#[derive(Default)]
pub(crate) struct StubItems {
    definitions: HashMap<ItemHandle, ItemDefinition>,
}

impl StubItems {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, handle: ItemHandle, definition: ItemDefinition) -> Self {
        self.definitions.insert(handle, definition);
        self
    }
}

impl ItemOracle for StubItems {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition> {
        self.definitions.get(&handle).cloned()
    }
}

#[derive(Default)]
pub(crate) struct StubActors {
    templates: HashMap<String, ActorTemplate>,
}

impl StubActors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, id: &str, template: ActorTemplate) -> Self {
        self.templates.insert(id.to_owned(), template);
        self
    }
}

impl ActorOracle for StubActors {
    fn template(&self, def_id: &str) -> Option<ActorTemplate> {
        self.templates.get(def_id).cloned()
    }
}

/// Perception with a fixed set of visible tiles shared by every observer,
/// optionally widened by a sight radius around the observer.
///
/// `refresh` only counts calls; tests move the visible set by hand.
#[derive(Default)]
pub(crate) struct StubPerception {
    everything: bool,
    radius: Option<u32>,
    visible: HashSet<Position>,
    pub(crate) refreshes: u32,
}

impl StubPerception {
    pub(crate) fn everything() -> Self {
        Self {
            everything: true,
            ..Self::default()
        }
    }

    pub(crate) fn nothing() -> Self {
        Self::default()
    }

    /// Every observer sees tiles within `radius` (Chebyshev) of itself.
    pub(crate) fn radius(radius: u32) -> Self {
        Self {
            radius: Some(radius),
            ..Self::default()
        }
    }

    pub(crate) fn reveal(&mut self, position: Position) {
        self.visible.insert(position);
    }
}

impl PerceptionOracle for StubPerception {
    fn is_visible(&self, observer: &ActorState, position: Position) -> bool {
        if observer.flags.contains(StatusFlags::BLIND) {
            return false;
        }
        self.everything
            || self.visible.contains(&position)
            || self
                .radius
                .is_some_and(|radius| observer.position.chebyshev_distance(position) <= radius)
    }

    fn refresh(&mut self, _state: &GameState, _map: &dyn MapOracle) {
        self.refreshes += 1;
    }
}

/// Bundle of stub oracles that hands out a complete environment.
pub(crate) struct Fixture {
    pub(crate) map: StubMap,
    pub(crate) items: StubItems,
    pub(crate) actors: StubActors,
    pub(crate) config: GameConfig,
    pub(crate) rng: PcgRng,
}

impl Fixture {
    pub(crate) fn new(map: StubMap) -> Self {
        Self {
            map,
            items: StubItems::new(),
            actors: StubActors::new(),
            config: GameConfig::default(),
            rng: PcgRng,
        }
    }

    pub(crate) fn with_items(mut self, items: StubItems) -> Self {
        self.items = items;
        self
    }

    pub(crate) fn with_actors(mut self, actors: StubActors) -> Self {
        self.actors = actors;
        self
    }

    pub(crate) fn env(&self) -> crate::env::GameEnv<'_> {
        Env::with_all(
            &self.map,
            &self.items,
            &self.actors,
            &self.config,
            &self.rng,
        )
        .into_game_env()
    }
}

/// State with the player placed at `position` and the given NPCs appended.
pub(crate) fn state_with(position: Position, npcs: Vec<ActorState>) -> GameState {
    let mut state = GameState::default();
    state.entities.player.position = position;
    for mut npc in npcs {
        npc.id = state.allocate_entity_id();
        state.entities.npcs.push(npc);
    }
    state
}
