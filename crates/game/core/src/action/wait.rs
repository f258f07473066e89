use crate::action::{ActionContext, ActionTransition, RepeatSignal};
use crate::error::NeverError;
use crate::state::{EntityId, GameState};

/// Wait action - actor passes their turn without performing any action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitAction {
    pub actor: EntityId,
}

impl WaitAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for WaitAction {
    type Error = NeverError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(
        &mut self,
        _state: &mut GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error> {
        Ok(RepeatSignal::Stop)
    }
}
