//! Configuration oracle for exposing game configuration to the engine.

use crate::config::GameConfig;

/// Provides access to runtime configuration values.
pub trait ConfigOracle: Send + Sync {
    /// Upper bound on steps a single auto-travel command may take.
    fn max_auto_steps(&self) -> u32;

    fn allow_diagonal_paths(&self) -> bool;

    /// Extra path cost for stepping through an occupied tile.
    fn occupied_path_penalty(&self) -> u32;
}

impl ConfigOracle for GameConfig {
    fn max_auto_steps(&self) -> u32 {
        self.max_auto_steps
    }

    fn allow_diagonal_paths(&self) -> bool {
        self.allow_diagonal_paths
    }

    fn occupied_path_penalty(&self) -> u32 {
        self.occupied_path_penalty
    }
}
