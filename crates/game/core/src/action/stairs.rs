use crate::action::{ActionContext, ActionTransition, RepeatSignal};
use crate::engine::GameEvent;
use crate::env::{OracleError, TileFeature};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GameState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StairDirection {
    Down,
    Up,
}

impl StairDirection {
    pub fn feature(self) -> TileFeature {
        match self {
            StairDirection::Down => TileFeature::DownStairs,
            StairDirection::Up => TileFeature::UpStairs,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StairsError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("only the player can change floors")]
    NotPlayer,

    #[error("there are no stairs going {0} here")]
    NoStairs(StairDirection),

    #[error("already on the top floor")]
    AlreadyTopFloor,
}

impl GameError for StairsError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StairsError::Oracle(error) => error.severity(),
            StairsError::ActorNotFound(_) | StairsError::NotPlayer => ErrorSeverity::Internal,
            StairsError::NoStairs(_) | StairsError::AlreadyTopFloor => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StairsError::Oracle(error) => error.error_code(),
            StairsError::ActorNotFound(_) => "STAIRS_ACTOR_NOT_FOUND",
            StairsError::NotPlayer => "STAIRS_NOT_PLAYER",
            StairsError::NoStairs(_) => "STAIRS_NO_STAIRS",
            StairsError::AlreadyTopFloor => "STAIRS_ALREADY_TOP_FLOOR",
        }
    }
}

/// Leaves the current floor.
///
/// Creatures, floor items and corpses belong to the floor and are dropped;
/// the host swaps in the new layout and places the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TakeStairsAction {
    pub actor: EntityId,
    pub direction: StairDirection,
}

impl TakeStairsAction {
    pub fn new(actor: EntityId, direction: StairDirection) -> Self {
        Self { actor, direction }
    }
}

impl ActionTransition for TakeStairsAction {
    type Error = StairsError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        if !self.actor.is_player() {
            return Err(StairsError::NotPlayer);
        }
        let actor = state
            .actor(self.actor)
            .ok_or(StairsError::ActorNotFound(self.actor))?;
        if ctx.env.map()?.feature(actor.position) != Some(self.direction.feature()) {
            return Err(StairsError::NoStairs(self.direction));
        }
        if self.direction == StairDirection::Up && state.world.floor <= 1 {
            return Err(StairsError::AlreadyTopFloor);
        }
        Ok(())
    }

    fn apply(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error> {
        let world = &mut state.world;
        world.floor = match self.direction {
            StairDirection::Down => world.floor + 1,
            StairDirection::Up => world.floor.saturating_sub(1).max(1),
        };
        world.items.clear();
        world.corpses.clear();
        state.entities.npcs.clear();

        ctx.events.push(GameEvent::FloorChanged {
            floor: state.world.floor,
            direction: self.direction,
        });
        Ok(RepeatSignal::Stop)
    }
}
