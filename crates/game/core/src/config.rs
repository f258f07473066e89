/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Upper bound on steps a single auto-travel command may take.
    pub max_auto_steps: u32,
    /// Whether the pathfinder may take diagonal steps.
    pub allow_diagonal_paths: bool,
    /// Extra path cost for stepping through a tile currently held by an actor.
    pub occupied_path_penalty: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of non-player actors on one floor.
    pub const MAX_NPCS: usize = 128;
    pub const MAX_INVENTORY_SLOTS: usize = 26;
    pub const MAX_TIMED_EFFECTS: usize = 8;

    // ===== rules =====
    /// Energy spent per decision; also the energy an actor of base speed gains per tick.
    pub const ACTION_ENERGY: u32 = 100;
    pub const BASE_SPEED: u32 = 100;
    /// Chebyshev reach of a melee attack.
    pub const MELEE_RANGE: u32 = 1;
    pub const DEFAULT_CRIT_CHANCE: u8 = 5;
    pub const DEFAULT_CRIT_MULTIPLIER: u16 = 150;
    pub const RAGE_OFFENSE_PERCENT: u32 = 50;
    pub const DEFAULT_INVENTORY_CAPACITY: u8 = 26;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_AUTO_STEPS: u32 = 200;
    pub const DEFAULT_OCCUPIED_PATH_PENALTY: u32 = 10;

    pub fn new() -> Self {
        Self {
            max_auto_steps: Self::DEFAULT_MAX_AUTO_STEPS,
            allow_diagonal_paths: true,
            occupied_path_penalty: Self::DEFAULT_OCCUPIED_PATH_PENALTY,
        }
    }

    #[must_use]
    pub fn with_max_auto_steps(mut self, max_auto_steps: u32) -> Self {
        self.max_auto_steps = max_auto_steps;
        self
    }

    #[must_use]
    pub fn with_diagonal_paths(mut self, allow: bool) -> Self {
        self.allow_diagonal_paths = allow;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
