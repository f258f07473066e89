use crate::engine::EventLog;
use crate::env::{GameEnv, PerceptionOracle};
use crate::state::{EntityId, GameState};

/// Whether an action wants to be invoked again right away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RepeatSignal {
    Stop,
    Repeat,
    /// Nothing was done this invocation and the action is over. A run whose
    /// next hop was taken by someone else ends this way; no turn is spent.
    Halt,
}

impl RepeatSignal {
    pub fn is_repeat(self) -> bool {
        matches!(self, RepeatSignal::Repeat)
    }

    /// Whether the invocation changed the world and must be paid for.
    pub fn is_acted(self) -> bool {
        !matches!(self, RepeatSignal::Halt)
    }
}

/// Everything an action may consult besides the state it mutates.
pub struct ActionContext<'a> {
    pub env: GameEnv<'a>,
    pub perception: &'a dyn PerceptionOracle,
    pub events: &'a mut EventLog,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        env: GameEnv<'a>,
        perception: &'a dyn PerceptionOracle,
        events: &'a mut EventLog,
    ) -> Self {
        Self {
            env,
            perception,
            events,
        }
    }
}

/// Defines how a concrete action variant mutates game state.
///
/// `pre_validate` must reject every failure it can foresee without touching
/// the state; `apply` may still fail for conditions only discovered while
/// resolving (a multi-step run meeting a wall). Validation hooks are
/// side-effect free.
pub trait ActionTransition {
    type Error;

    fn actor(&self) -> EntityId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action. Implementations may assume `pre_validate` passed.
    fn apply(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Runs all three phases of a nested transition, keeping its raw error.
///
/// Composite actions (bump, travel) resolve their single steps through this.
pub(crate) fn resolve<T: ActionTransition>(
    transition: &mut T,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<RepeatSignal, T::Error> {
    transition.pre_validate(state, ctx)?;
    let signal = transition.apply(state, ctx)?;
    transition.post_validate(state, ctx)?;
    Ok(signal)
}
