//! Single-player session driver.
//!
//! A [`Session`] owns the authoritative [`GameState`], the oracles for the
//! floor being played and the player's field of view. Hosts hand it one
//! player command at a time; it runs the command through the engine, narrates
//! the resulting events into the [`MessageLog`] and swaps floor layouts when
//! the player takes the stairs.
use std::sync::Arc;

use crawl_core::{
    Action, EntityId, EventLog, GameConfig, GameEngine, GameEvent, GameState, MapOracle, Pathfinder, PerceptionOracle,
    Position, RepeatSignal, RunReport, SpawnError, StairDirection, StopReason, TerrainKind,
    TileFeature,
};
use tracing::{debug, error, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::messages::{MessageEntry, MessageLevel, MessageLog, Names, capitalize, describe};
use crate::oracle::{
    FieldOfView, GridMap, ItemCatalog, OracleManager, PLAYER_TEMPLATE, TemplateCatalog,
};
use crate::presets;

/// Static content shared by every floor of a session.
#[derive(Clone, Debug, Default)]
pub struct Catalogs {
    pub items: ItemCatalog,
    pub templates: TemplateCatalog,
}

impl Catalogs {
    pub fn new(items: ItemCatalog, templates: TemplateCatalog) -> Self {
        Self { items, templates }
    }

    /// The built-in creatures and items.
    pub fn presets() -> Self {
        Self::new(presets::items(), presets::templates())
    }
}

/// Serializable view of a session handed to hosts and tools.
#[derive(serde::Serialize)]
struct Snapshot<'a> {
    floor: u32,
    visible: Vec<Position>,
    state: &'a GameState,
}

pub struct Session {
    config: RuntimeConfig,
    oracles: OracleManager,
    floors: Vec<Arc<GridMap>>,
    state: GameState,
    perception: FieldOfView,
    messages: MessageLog,
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    config: RuntimeConfig,
    rules: GameConfig,
    floors: Vec<GridMap>,
    catalogs: Catalogs,
}

impl SessionBuilder {
    fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            rules: GameConfig::default(),
            floors: Vec::new(),
            catalogs: Catalogs::presets(),
        }
    }

    /// Appends the layout of the next floor down.
    pub fn floor(mut self, map: GridMap) -> Self {
        self.floors.push(map);
        self
    }

    pub fn rules(mut self, rules: GameConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn catalogs(mut self, catalogs: Catalogs) -> Self {
        self.catalogs = catalogs;
        self
    }

    /// Creates the player and enters the first floor.
    pub fn build(self) -> Result<Session> {
        let floors: Vec<Arc<GridMap>> = self.floors.into_iter().map(Arc::new).collect();
        let first = floors.first().cloned().ok_or(RuntimeError::NoStartingTile)?;
        let start = first.arrival(None).ok_or(RuntimeError::NoStartingTile)?;

        let template = self
            .catalogs
            .templates
            .get(PLAYER_TEMPLATE)
            .ok_or_else(|| SpawnError::UnknownTemplate(PLAYER_TEMPLATE.to_owned()))?;
        template
            .validate()
            .map_err(|source| SpawnError::InvalidTemplate {
                id: PLAYER_TEMPLATE.to_owned(),
                source,
            })?;
        let state = GameState::new(
            self.config.game_seed,
            template.to_actor(EntityId::PLAYER, start),
        );

        let oracles = OracleManager::new(
            first,
            Arc::new(self.catalogs.items),
            Arc::new(self.catalogs.templates),
            Arc::new(self.rules),
        );
        let mut session = Session {
            perception: FieldOfView::new(self.config.fov_radius),
            messages: MessageLog::new(self.config.message_capacity),
            config: self.config,
            oracles,
            floors,
            state,
        };
        session.enter_floor(None)?;
        info!(
            seed = session.config.game_seed,
            floors = session.floors.len(),
            "session started"
        );
        Ok(session)
    }
}

impl Session {
    pub fn builder(config: RuntimeConfig) -> SessionBuilder {
        SessionBuilder::new(config)
    }

    /// Session on a single floor.
    pub fn new(config: RuntimeConfig, map: GridMap, catalogs: Catalogs) -> Result<Self> {
        Self::builder(config).floor(map).catalogs(catalogs).build()
    }

    /// Session assembled from the files named in `config`.
    ///
    /// Falls back to the built-in demo floors when no layout file is set.
    pub fn from_config(config: RuntimeConfig) -> anyhow::Result<Self> {
        let rules = config.game_config()?;
        let mut builder = Self::builder(config.clone()).rules(rules);
        if config.map_paths.is_empty() {
            for text in presets::DEMO_FLOORS {
                builder = builder.floor(GridMap::parse(text)?);
            }
        } else {
            for path in &config.map_paths {
                builder = builder.floor(GridMap::load(path)?);
            }
        }
        Ok(builder.build()?)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn perception(&self) -> &FieldOfView {
        &self.perception
    }

    pub fn map(&self) -> &GridMap {
        self.oracles.map()
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn is_over(&self) -> bool {
        !self.state.player().is_alive()
    }

    /// Extra actions the player may take before the world moves again.
    pub fn bonus_actions(&self) -> u32 {
        self.state.turn.bonus_actions
    }

    /// Performs one player action and lets the world take its turn.
    ///
    /// A refused action (a wall in the way, nothing to pick up) is reported in
    /// the message log and returned as an error; it costs no time.
    pub fn submit(&mut self, mut action: Action) -> Result<RepeatSignal> {
        self.ensure_alive()?;
        let names = Names::capture(&self.state);
        let mut events = EventLog::new();

        let result = {
            let env = self.oracles.as_game_env();
            GameEngine::new(&mut self.state).submit_player_action(
                env,
                &mut self.perception,
                &mut events,
                &mut action,
            )
        };
        self.absorb(events, &names)?;

        match result {
            Ok(signal) => {
                debug!(action = action.kind(), clock = %self.state.turn.clock, "player action done");
                Ok(signal)
            }
            Err(error) => Err(self.refuse(error.into())),
        }
    }

    /// Repeats `action` until it stops on its own or something interrupts it.
    pub fn run(&mut self, action: Action) -> Result<RunReport> {
        self.run_until(action, |_| false)
    }

    /// [`Session::run`] with a host interrupt checked between hops.
    pub fn run_until<F>(&mut self, action: Action, interrupt: F) -> Result<RunReport>
    where
        F: FnMut(&GameState) -> bool,
    {
        self.ensure_alive()?;
        let names = Names::capture(&self.state);
        let mut events = EventLog::new();
        let kind = action.kind();

        let report = {
            let env = self.oracles.as_game_env();
            GameEngine::new(&mut self.state).run_player_action(
                env,
                &mut self.perception,
                &mut events,
                action,
                interrupt,
            )
        };
        self.absorb(events, &names)?;

        match report.stop {
            StopReason::Failed(error) if report.steps == 0 => Err(self.refuse(error.into())),
            StopReason::Failed(ref error) => {
                self.notify(format!("You stop: {}.", error.reason()), MessageLevel::Warning);
                info!(action = kind, steps = report.steps, %error, "run cut short");
                Ok(report)
            }
            _ => {
                info!(action = kind, steps = report.steps, stop = ?report.stop, "run finished");
                Ok(report)
            }
        }
    }

    /// Walks the player to `goal` along the cheapest known path.
    ///
    /// When `goal` is held by another actor the walk ends next to it; if the
    /// player already stands there the report is empty and no turn passes.
    pub fn travel_to(&mut self, goal: Position) -> Result<RunReport> {
        self.ensure_alive()?;
        let start = self.state.player().position;
        if start == goal {
            return Err(self.refuse(RuntimeError::AlreadyThere(goal)));
        }

        let found = {
            let env = self.oracles.as_game_env();
            Pathfinder::from_env(&env, &self.state).and_then(|finder| {
                if self.state.is_occupied(goal) {
                    finder.find_path_to_adjacent(start, goal)
                } else {
                    finder.find_path(start, goal)
                }
            })
        };
        let path = match found {
            Ok(path) => path,
            Err(error) => return Err(self.refuse(error.into())),
        };
        if path.is_empty() {
            debug!(%start, %goal, "already next to the travel target");
            return Ok(RunReport {
                steps: 0,
                stop: StopReason::Completed,
            });
        }
        debug!(%start, %goal, hops = path.len(), "travel path planned");

        self.run(Action::follow(EntityId::PLAYER, path))
    }

    /// Adds a creature to the current floor.
    pub fn spawn(&mut self, template_id: &str, position: Position) -> Result<EntityId> {
        let env = self.oracles.as_game_env();
        let id = GameEngine::new(&mut self.state).spawn(env, template_id, position)?;
        debug!(%id, template_id, %position, "spawned");
        Ok(id)
    }

    /// Pretty-printed JSON of the game state and the player's view.
    pub fn snapshot_json(&self) -> Result<String> {
        let mut visible: Vec<Position> = self.perception.player_view().iter().copied().collect();
        visible.sort();
        let snapshot = Snapshot {
            floor: self.state.world.floor,
            visible,
            state: &self.state,
        };
        serde_json::to_string_pretty(&snapshot).map_err(RuntimeError::Snapshot)
    }

    /// ASCII picture of the floor: terrain, items, then actors on top.
    pub fn render(&self) -> String {
        let map = self.oracles.map();
        let dimensions = map.dimensions();
        let mut rows = Vec::with_capacity(dimensions.height as usize);
        for y in 0..dimensions.height as i32 {
            let row: String = (0..dimensions.width as i32)
                .map(|x| self.glyph_at(map, Position::new(x, y)))
                .collect();
            rows.push(row.trim_end().to_owned());
        }
        rows.join("\n")
    }

    fn glyph_at(&self, map: &GridMap, position: Position) -> char {
        if let Some(actor) = self.state.blocking_actor_at(position) {
            if actor.id.is_player() {
                return '@';
            }
            return actor.name.chars().next().unwrap_or('?');
        }
        if self.state.world.has_item_at(position) {
            return '*';
        }
        if self
            .state
            .world
            .corpses
            .iter()
            .any(|corpse| corpse.position == position)
        {
            return '%';
        }
        match map.tile(position) {
            Some(tile) => match (tile.feature(), tile.terrain()) {
                (Some(TileFeature::DownStairs), _) => '>',
                (Some(TileFeature::UpStairs), _) => '<',
                (None, TerrainKind::Floor) => '.',
                (None, TerrainKind::Wall) => '#',
                (None, TerrainKind::Void) => ' ',
            },
            None => ' ',
        }
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.is_over() {
            return Err(RuntimeError::GameOver);
        }
        Ok(())
    }

    /// Narrates `events` and reacts to floor changes.
    fn absorb(&mut self, mut events: EventLog, names: &Names) -> Result<()> {
        let mut arrival = None;
        for event in events.drain() {
            debug!(?event, "game event");
            match &event {
                GameEvent::FloorChanged { floor, direction } => {
                    info!(floor, %direction, "floor changed");
                    arrival = Some(*direction);
                }
                GameEvent::ActionFailed {
                    actor,
                    code,
                    message,
                } => {
                    debug!(%actor, code, message = %message, "npc action failed");
                }
                GameEvent::Died { actor, .. } if actor.is_player() => {
                    info!(clock = %self.state.turn.clock, "player died");
                }
                _ => {}
            }
            if let Some((text, level)) = describe(&event, names, self.oracles.items()) {
                self.notify(text, level);
            }
        }

        match arrival {
            Some(direction) => self.enter_floor(Some(direction)),
            None => Ok(()),
        }
    }

    /// Loads the layout for `state.world.floor`, places the player and
    /// populates the floor from its markers.
    ///
    /// Floors past the last layout reuse the deepest one.
    fn enter_floor(&mut self, via: Option<StairDirection>) -> Result<()> {
        let index = (self.state.world.floor.saturating_sub(1) as usize)
            .min(self.floors.len().saturating_sub(1));
        let map = Arc::clone(&self.floors[index]);
        self.oracles.set_map(Arc::clone(&map));

        // Going down lands on the up staircase and vice versa.
        let landing = via.map(|direction| match direction {
            StairDirection::Down => TileFeature::UpStairs,
            StairDirection::Up => TileFeature::DownStairs,
        });
        let arrival = map.arrival(landing).ok_or(RuntimeError::NoStartingTile)?;

        let mut spawned = 0;
        {
            let env = self.oracles.as_game_env();
            let mut engine = GameEngine::new(&mut self.state);
            engine.place_player(map.as_ref(), arrival)?;
            for marker in map.markers() {
                if let Some(template_id) = self.oracles.actors().id_for_glyph(marker.glyph) {
                    if marker.position == arrival {
                        continue;
                    }
                    engine.spawn(env, template_id, marker.position)?;
                    spawned += 1;
                } else if self.oracles.items().by_glyph(marker.glyph).is_none() {
                    return Err(RuntimeError::UnknownMarker(marker.glyph));
                }
            }
        }
        for marker in map.markers() {
            if let Some(handle) = self.oracles.items().by_glyph(marker.glyph) {
                self.state.world.drop_item(handle, marker.position);
            }
        }

        self.perception.refresh(&self.state, map.as_ref());
        info!(
            floor = self.state.world.floor,
            %arrival,
            creatures = spawned,
            "entered floor"
        );
        Ok(())
    }

    /// Reports `error` to the player when it is an ordinary refusal.
    fn refuse(&mut self, error: RuntimeError) -> RuntimeError {
        if error.is_notice() {
            warn!(%error, "player command refused");
            self.notify(format!("{}.", error.notice()), MessageLevel::Warning);
        } else {
            error!(%error, "player command failed");
        }
        error
    }

    fn notify(&mut self, text: String, level: MessageLevel) {
        let text = capitalize(&text);
        self.messages
            .push(MessageEntry::new(text, self.state.turn.clock, level));
    }
}
