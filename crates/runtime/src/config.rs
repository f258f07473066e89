//! Runtime configuration.
//!
//! [`RuntimeConfig`] carries host settings read from the environment (the
//! binary loads `.env` first). Rule tunables live in [`GameConfig`] and are
//! read from a TOML file by [`ConfigLoader`].
use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use crawl_core::GameConfig;

/// Host settings for a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Seed for every random roll in the session.
    pub game_seed: u64,
    /// Sight radius of every observer, in tiles.
    pub fov_radius: u32,
    /// Messages kept in the player-facing log.
    pub message_capacity: usize,
    /// Layout files, one per floor, in descending order.
    pub map_paths: Vec<PathBuf>,
    /// TOML file holding [`GameConfig`] overrides.
    pub config_path: Option<PathBuf>,
}

impl RuntimeConfig {
    pub const DEFAULT_FOV_RADIUS: u32 = 8;
    pub const DEFAULT_MESSAGE_CAPACITY: usize = 64;

    /// Defaults overridden by `CRAWL_*` environment variables.
    ///
    /// `CRAWL_MAP` accepts several layout files separated by the platform's
    /// path-list separator (`:` on Unix).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("CRAWL_SEED") {
            config.game_seed = seed;
        }
        if let Some(radius) = read_env::<u32>("CRAWL_FOV_RADIUS") {
            config.fov_radius = radius;
        }
        if let Some(capacity) = read_env::<usize>("CRAWL_MESSAGE_CAPACITY") {
            config.message_capacity = capacity.max(1);
        }
        if let Some(paths) = env::var_os("CRAWL_MAP") {
            config.map_paths = env::split_paths(&paths).collect();
        }
        if let Some(path) = env::var_os("CRAWL_CONFIG") {
            config.config_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Rule tunables from `config_path`, or the defaults when none is set.
    pub fn game_config(&self) -> anyhow::Result<GameConfig> {
        match &self.config_path {
            Some(path) => ConfigLoader::load(path),
            None => Ok(GameConfig::default()),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_seed: 0,
            fov_radius: Self::DEFAULT_FOV_RADIUS,
            message_capacity: Self::DEFAULT_MESSAGE_CAPACITY,
            map_paths: Vec::new(),
            config_path: None,
        }
    }
}

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`GameConfig`] from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<GameConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<GameConfig> {
        let config: GameConfig =
            toml::from_str(content).map_err(|e| anyhow::anyhow!("invalid config TOML: {}", e))?;
        Ok(config)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
