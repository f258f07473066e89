//! Action domain: the units of intent actors perform.
//!
//! Every variant implements [`ActionTransition`]; the engine drives the
//! phases and wraps failures in [`ExecuteError`](crate::engine::ExecuteError).
//! Actions are constructed fresh per attempt and discarded afterwards. Travel
//! actions are the exception: a run keeps invoking the same value until it
//! signals [`RepeatSignal::Stop`].
mod combat;
mod direction;
mod items;
mod movement;
mod stairs;
mod transition;
mod travel;
mod wait;

pub use combat::{AttackAction, AttackError, AttackStyle};
pub use direction::Direction;
pub use items::{DropAction, EquipAction, InventoryError, PickupAction, UseItemAction};
pub use movement::{BumpAction, BumpError, MoveAction, MoveError};
pub use stairs::{StairDirection, StairsError, TakeStairsAction};
pub use transition::{ActionContext, ActionTransition, RepeatSignal};
pub use travel::{
    CarefulMoveAction, PathMoveAction, RepeatedMoveAction, ThreatWatch, TravelError,
};
pub use wait::WaitAction;

pub(crate) use movement::check_destination;
pub(crate) use transition::resolve;

use crate::engine::ExecuteError;
use crate::env::PerceptionOracle;
use crate::navigation::Path;
use crate::state::{EntityId, GameState};

/// Closed set of actions.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Wait(WaitAction),
    Move(MoveAction),
    Bump(BumpAction),
    Attack(AttackAction),
    RepeatedMove(RepeatedMoveAction),
    CarefulMove(CarefulMoveAction),
    PathMove(PathMoveAction),
    Pickup(PickupAction),
    Drop(DropAction),
    UseItem(UseItemAction),
    Equip(EquipAction),
    TakeStairs(TakeStairsAction),
}

impl Action {
    pub fn wait(actor: EntityId) -> Self {
        Action::Wait(WaitAction::new(actor))
    }

    pub fn step(actor: EntityId, direction: Direction) -> Self {
        Action::Move(MoveAction::new(actor, direction))
    }

    pub fn bump(actor: EntityId, direction: Direction) -> Self {
        Action::Bump(BumpAction::new(actor, direction))
    }

    pub fn melee(actor: EntityId, target: EntityId) -> Self {
        Action::Attack(AttackAction::melee(actor, target))
    }

    pub fn ranged(actor: EntityId, target: EntityId) -> Self {
        Action::Attack(AttackAction::ranged(actor, target))
    }

    pub fn run(actor: EntityId, direction: Direction) -> Self {
        Action::RepeatedMove(RepeatedMoveAction::new(actor, direction))
    }

    pub fn careful_run(actor: EntityId, direction: Direction) -> Self {
        Action::CarefulMove(CarefulMoveAction::new(actor, direction))
    }

    pub fn follow(actor: EntityId, path: Path) -> Self {
        Action::PathMove(PathMoveAction::new(actor, path))
    }

    pub fn pickup(actor: EntityId) -> Self {
        Action::Pickup(PickupAction::new(actor))
    }

    pub fn drop_item(actor: EntityId, slot: usize) -> Self {
        Action::Drop(DropAction::new(actor, slot))
    }

    pub fn use_item(actor: EntityId, slot: usize, target: Option<EntityId>) -> Self {
        let action = UseItemAction::new(actor, slot);
        Action::UseItem(match target {
            Some(target) => action.with_target(target),
            None => action,
        })
    }

    pub fn equip(actor: EntityId, slot: usize) -> Self {
        Action::Equip(EquipAction::new(actor, slot))
    }

    pub fn descend(actor: EntityId) -> Self {
        Action::TakeStairs(TakeStairsAction::new(actor, StairDirection::Down))
    }

    pub fn ascend(actor: EntityId) -> Self {
        Action::TakeStairs(TakeStairsAction::new(actor, StairDirection::Up))
    }

    pub fn actor(&self) -> EntityId {
        match self {
            Action::Wait(action) => action.actor(),
            Action::Move(action) => action.actor(),
            Action::Bump(action) => action.actor(),
            Action::Attack(action) => action.actor(),
            Action::RepeatedMove(action) => action.actor(),
            Action::CarefulMove(action) => action.actor(),
            Action::PathMove(action) => action.actor(),
            Action::Pickup(action) => action.actor(),
            Action::Drop(action) => action.actor(),
            Action::UseItem(action) => action.actor(),
            Action::Equip(action) => action.actor(),
            Action::TakeStairs(action) => action.actor(),
        }
    }

    /// Snake-case name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Whether this action is one hop of a multi-step run.
    pub fn is_travel(&self) -> bool {
        matches!(
            self,
            Action::RepeatedMove(_) | Action::CarefulMove(_) | Action::PathMove(_)
        )
    }

    /// Runs the action through its transition phases.
    pub fn perform(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, ExecuteError> {
        crate::engine::execute_transition(self, state, ctx)
    }

    /// An actor that came into view since this run began, if the action
    /// watches for threats. Checked between hops, after perception refreshes.
    pub fn spotted_threat(
        &self,
        state: &GameState,
        perception: &dyn PerceptionOracle,
    ) -> Option<EntityId> {
        match self {
            Action::CarefulMove(action) => action.watch().spotted(state, perception, action.actor),
            Action::PathMove(action) => action.watch().spotted(state, perception, action.actor),
            _ => None,
        }
    }
}
