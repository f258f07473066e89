use super::Tick;

/// Turn bookkeeping owned by the scheduler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Full ticks elapsed. Bonus ticks never advance it.
    pub clock: Tick,
    /// Count of executed actions, mixed into combat roll seeds.
    pub nonce: u64,
    /// Extra in-turn actions the player may still take before the world advances.
    pub bonus_actions: u32,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }
}
