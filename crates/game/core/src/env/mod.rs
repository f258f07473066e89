//! Traits describing read-only world data.
//!
//! Oracles expose static map geometry, item definitions, creature templates,
//! tunables and randomness. The [`Env`] aggregate bundles them so actions and
//! the scheduler can reach everything they need without coupling to concrete
//! implementations. Visibility is mutable and travels separately as a
//! [`PerceptionOracle`].
mod actors;
mod config;
mod error;
mod items;
mod map;
mod perception;
mod rng;

pub use actors::{ActorOracle, ActorTemplate, ActorTemplateBuilder, TemplateError};
pub use config::ConfigOracle;
pub use error::OracleError;
pub use items::{
    ConsumableEffect, EquipSlot, EquipmentData, ItemDefinition, ItemKind, ItemOracle,
};
pub use map::{MapDimensions, MapOracle, StaticTile, TerrainKind, TileFeature};
pub use perception::{PerceptionOracle, visible_actors};
pub use rng::{PcgRng, RngOracle, compute_seed};

/// Aggregates the read-only oracles used by actions and the scheduler.
pub struct Env<'a, M, I, A, C, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: ActorOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    map: Option<&'a M>,
    items: Option<&'a I>,
    actors: Option<&'a A>,
    config: Option<&'a C>,
    rng: Option<&'a R>,
}

// Hand-written so `GameEnv` stays `Copy`: derives would demand `dyn Trait: Clone`.
impl<M, I, A, C, R> Clone for Env<'_, M, I, A, C, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: ActorOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, I, A, C, R> Copy for Env<'_, M, I, A, C, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: ActorOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

impl<M, I, A, C, R> std::fmt::Debug for Env<'_, M, I, A, C, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: ActorOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("map", &self.map.is_some())
            .field("items", &self.items.is_some())
            .field("actors", &self.actors.is_some())
            .field("config", &self.config.is_some())
            .field("rng", &self.rng.is_some())
            .finish()
    }
}

pub type GameEnv<'a> = Env<
    'a,
    dyn MapOracle + 'a,
    dyn ItemOracle + 'a,
    dyn ActorOracle + 'a,
    dyn ConfigOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, M, I, A, C, R> Env<'a, M, I, A, C, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: ActorOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        map: Option<&'a M>,
        items: Option<&'a I>,
        actors: Option<&'a A>,
        config: Option<&'a C>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            map,
            items,
            actors,
            config,
            rng,
        }
    }

    pub fn with_all(map: &'a M, items: &'a I, actors: &'a A, config: &'a C, rng: &'a R) -> Self {
        Self::new(Some(map), Some(items), Some(actors), Some(config), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            items: None,
            actors: None,
            config: None,
            rng: None,
        }
    }

    /// # Errors
    ///
    /// Returns `OracleError::MapNotAvailable` if no map oracle was provided.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no item oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Item oracle if present. Derived stats treat a missing catalog as "no
    /// equipment bonuses".
    pub fn items_opt(&self) -> Option<&'a I> {
        self.items
    }

    /// # Errors
    ///
    /// Returns `OracleError::ActorsNotAvailable` if no actor oracle was provided.
    pub fn actors(&self) -> Result<&'a A, OracleError> {
        self.actors.ok_or(OracleError::ActorsNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, M, I, A, C, R> Env<'a, M, I, A, C, R>
where
    M: MapOracle + 'a,
    I: ItemOracle + 'a,
    A: ActorOracle + 'a,
    C: ConfigOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv` (consumes self).
    pub fn into_game_env(self) -> GameEnv<'a> {
        self.as_game_env()
    }

    /// Converts this environment into a trait-object based `GameEnv` (borrows self).
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let items: Option<&'a dyn ItemOracle> = self.items.map(|items| items as _);
        let actors: Option<&'a dyn ActorOracle> = self.actors.map(|actors| actors as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(map, items, actors, config, rng)
    }
}
