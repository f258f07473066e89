use crate::action::{
    ActionContext, ActionTransition, AttackAction, AttackError, Direction, RepeatSignal, resolve,
};
use crate::engine::GameEvent;
use crate::env::{MapOracle, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GameState, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Position },

    #[error("destination {destination} is occupied by {occupant}")]
    Occupied {
        destination: Position,
        occupant: EntityId,
    },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::Oracle(error) => error.severity(),
            MoveError::ActorNotFound(_) => ErrorSeverity::Internal,
            MoveError::OutOfBounds { .. }
            | MoveError::Blocked { .. }
            | MoveError::Occupied { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::Oracle(error) => error.error_code(),
            MoveError::ActorNotFound(_) => "MOVE_ACTOR_NOT_FOUND",
            MoveError::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            MoveError::Blocked { .. } => "MOVE_BLOCKED",
            MoveError::Occupied { .. } => "MOVE_OCCUPIED",
        }
    }
}

/// Checks that `actor` could step onto `destination` right now.
pub(crate) fn check_destination(
    state: &GameState,
    map: &dyn MapOracle,
    destination: Position,
) -> Result<(), MoveError> {
    if !map.contains(destination) {
        return Err(MoveError::OutOfBounds { destination });
    }
    if !map.is_walkable(destination) {
        return Err(MoveError::Blocked { destination });
    }
    if let Some(occupant) = state.blocking_actor_at(destination) {
        return Err(MoveError::Occupied {
            destination,
            occupant: occupant.id,
        });
    }
    Ok(())
}

/// Single step in one of eight directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveAction {
    pub actor: EntityId,
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }

    fn origin(&self, state: &GameState) -> Result<Position, MoveError> {
        state
            .actor(self.actor)
            .map(|actor| actor.position)
            .ok_or(MoveError::ActorNotFound(self.actor))
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        let destination = self.direction.step(self.origin(state)?);
        check_destination(state, ctx.env.map()?, destination)
    }

    fn apply(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error> {
        let actor = state
            .actor_mut(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;
        let from = actor.position;
        actor.position = self.direction.step(from);

        ctx.events.push(GameEvent::Moved {
            actor: self.actor,
            from,
            to: actor.position,
        });
        Ok(RepeatSignal::Stop)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BumpError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Attack(#[from] AttackError),
}

impl GameError for BumpError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            BumpError::Move(error) => error.severity(),
            BumpError::Attack(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            BumpError::Move(error) => error.error_code(),
            BumpError::Attack(error) => error.error_code(),
        }
    }
}

/// Directional input: melee a hostile in the way, otherwise step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BumpAction {
    pub actor: EntityId,
    pub direction: Direction,
}

impl BumpAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }

    /// The hostile standing where this bump lands, if any.
    fn hostile_target(&self, state: &GameState) -> Option<EntityId> {
        let actor = state.actor(self.actor)?;
        let target = state.blocking_actor_at(self.direction.step(actor.position))?;
        actor.is_hostile_to(target).then_some(target.id)
    }
}

impl ActionTransition for BumpAction {
    type Error = BumpError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        match self.hostile_target(state) {
            Some(target) => Ok(AttackAction::melee(self.actor, target).pre_validate(state, ctx)?),
            None => Ok(MoveAction::new(self.actor, self.direction).pre_validate(state, ctx)?),
        }
    }

    fn apply(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error> {
        match self.hostile_target(state) {
            Some(target) => Ok(resolve(&mut AttackAction::melee(self.actor, target), state, ctx)?),
            None => Ok(resolve(&mut MoveAction::new(self.actor, self.direction), state, ctx)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EventLog;
    use crate::state::{ActorState, Faction};
    use crate::testing::{Fixture, StubMap, StubPerception, state_with};

    fn corridor() -> StubMap {
        StubMap::parse(&[
            "#####", //
            "#...#",
            "#####",
        ])
    }

    #[test]
    fn move_relocates_actor() {
        let fixture = Fixture::new(corridor());
        let perception = StubPerception::everything();
        let mut events = EventLog::new();
        let mut state = state_with(Position::new(1, 1), Vec::new());
        let mut ctx = ActionContext::new(fixture.env(), &perception, &mut events);

        let mut action = MoveAction::new(EntityId::PLAYER, Direction::East);
        action.pre_validate(&state, &ctx).unwrap();
        action.apply(&mut state, &mut ctx).unwrap();

        assert_eq!(state.player().position, Position::new(2, 1));
    }

    #[test]
    fn move_rejects_walls_and_occupants() {
        let fixture = Fixture::new(corridor());
        let perception = StubPerception::everything();
        let mut events = EventLog::new();
        let rat = ActorState::new(EntityId(0), "rat", Position::new(2, 1));
        let state = state_with(Position::new(1, 1), vec![rat]);
        let ctx = ActionContext::new(fixture.env(), &perception, &mut events);

        assert_eq!(
            MoveAction::new(EntityId::PLAYER, Direction::North).pre_validate(&state, &ctx),
            Err(MoveError::Blocked {
                destination: Position::new(1, 0)
            })
        );
        assert_eq!(
            MoveAction::new(EntityId::PLAYER, Direction::East).pre_validate(&state, &ctx),
            Err(MoveError::Occupied {
                destination: Position::new(2, 1),
                occupant: EntityId(1),
            })
        );
    }

    #[test]
    fn bump_attacks_hostiles_only() {
        let fixture = Fixture::new(corridor());
        let perception = StubPerception::everything();
        let mut events = EventLog::new();
        let orc = ActorState::new(EntityId(0), "orc", Position::new(2, 1))
            .with_faction(Faction::Monster)
            .with_health(20);
        let mut state = state_with(Position::new(1, 1), vec![orc]);
        state.entities.player.combat = crate::state::CombatProfile::new(5, 0).with_crit(0, 150);
        let mut ctx = ActionContext::new(fixture.env(), &perception, &mut events);

        resolve(
            &mut BumpAction::new(EntityId::PLAYER, Direction::East),
            &mut state,
            &mut ctx,
        )
        .unwrap();

        assert_eq!(state.player().position, Position::new(1, 1));
        assert_eq!(state.actor(EntityId(1)).unwrap().health.current, 15);

        state.actor_mut(EntityId(1)).unwrap().faction = Faction::Adventurer;
        let blocked = resolve(
            &mut BumpAction::new(EntityId::PLAYER, Direction::East),
            &mut state,
            &mut ctx,
        );
        assert!(matches!(blocked, Err(BumpError::Move(MoveError::Occupied { .. }))));
    }
}
