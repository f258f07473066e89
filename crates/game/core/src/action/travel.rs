//! Multi-step player movement.
//!
//! Each action here performs exactly one hop per invocation and tells the
//! caller whether it wants to be invoked again. The caller ends the turn in
//! between, so monsters act and perception refreshes after every hop, and any
//! external signal can stop the run without leaving partial state.
//!
//! The first hop of a run behaves like a plain move: if it cannot be taken the
//! error is returned and no turn is spent. Later hops never fail; a run whose
//! next hop was taken between turns answers [`RepeatSignal::Halt`], which ends
//! it without spending a turn on the hop that did not happen.

use crate::action::{
    ActionContext, ActionTransition, AttackAction, AttackError, Direction, MoveAction, MoveError,
    RepeatSignal, resolve,
};
use crate::env::{MapOracle, OracleError, PerceptionOracle, visible_actors};
use crate::error::{ErrorSeverity, GameError};
use crate::navigation::{Path, find_corridor_turn, is_open_area, unique_continuation};
use crate::state::{EntityId, GameState, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TravelError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error(transparent)]
    Step(#[from] MoveError),

    #[error(transparent)]
    Attack(#[from] AttackError),

    #[error("no steps left to travel")]
    PathExhausted,

    #[error("path is blocked at {at}")]
    PathBlocked { at: Position },

    #[error("next step {expected} is not adjacent to {at}")]
    PathDiverged { at: Position, expected: Position },
}

impl GameError for TravelError {
    fn severity(&self) -> ErrorSeverity {
        use TravelError::*;
        match self {
            Oracle(error) => error.severity(),
            ActorNotFound(_) => ErrorSeverity::Internal,
            Step(error) => error.severity(),
            Attack(error) => error.severity(),
            PathExhausted | PathDiverged { .. } => ErrorSeverity::Validation,
            PathBlocked { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use TravelError::*;
        match self {
            Oracle(error) => error.error_code(),
            ActorNotFound(_) => "TRAVEL_ACTOR_NOT_FOUND",
            Step(error) => error.error_code(),
            Attack(error) => error.error_code(),
            PathExhausted => "TRAVEL_PATH_EXHAUSTED",
            PathBlocked { .. } => "TRAVEL_PATH_BLOCKED",
            PathDiverged { .. } => "TRAVEL_PATH_DIVERGED",
        }
    }
}

// ============================================================================
// Threat watch
// ============================================================================

/// Actors visible to the traveller when its run started.
///
/// Armed on the first hop; afterwards any visible actor outside the baseline
/// is a reason to halt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThreatWatch {
    baseline: Option<Vec<EntityId>>,
}

impl ThreatWatch {
    pub fn is_armed(&self) -> bool {
        self.baseline.is_some()
    }

    fn arm(&mut self, state: &GameState, perception: &dyn PerceptionOracle, observer: EntityId) {
        if self.baseline.is_some() {
            return;
        }
        let seen = state
            .actor(observer)
            .map(|actor| visible_actors(perception, state, actor))
            .unwrap_or_default();
        self.baseline = Some(seen);
    }

    /// First visible actor that was not in sight when the run began.
    pub fn spotted(
        &self,
        state: &GameState,
        perception: &dyn PerceptionOracle,
        observer: EntityId,
    ) -> Option<EntityId> {
        let baseline = self.baseline.as_ref()?;
        let actor = state.actor(observer)?;
        visible_actors(perception, state, actor)
            .into_iter()
            .find(|id| !baseline.contains(id))
    }
}

// ============================================================================
// Shared hop mechanics
// ============================================================================

fn position_of(state: &GameState, actor: EntityId) -> Result<Position, TravelError> {
    state
        .actor(actor)
        .map(|actor| actor.position)
        .ok_or(TravelError::ActorNotFound(actor))
}

/// Whether the hop from `position` along `heading` can be taken right now.
fn hop_is_free(
    state: &GameState,
    map: &dyn MapOracle,
    position: Position,
    heading: Option<Direction>,
) -> bool {
    heading.is_some_and(|direction| {
        let destination = direction.step(position);
        map.is_walkable(destination) && !state.is_occupied(destination)
    })
}

/// Takes one hop along `heading`.
///
/// Returns `Ok(false)`, with the state untouched, when a later hop of the run
/// cannot be taken. On the first hop the underlying move error is returned
/// instead; a missing heading is reported as the straight move's error.
fn hop(
    actor: EntityId,
    heading: Option<Direction>,
    straight: Direction,
    steps: u32,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<bool, TravelError> {
    let Some(direction) = heading else {
        if steps > 0 {
            return Ok(false);
        }
        let straight_move = MoveAction::new(actor, straight);
        straight_move.pre_validate(state, ctx)?;
        let destination = straight.step(position_of(state, actor)?);
        return Err(MoveError::Blocked { destination }.into());
    };

    match resolve(&mut MoveAction::new(actor, direction), state, ctx) {
        Ok(_) => Ok(true),
        Err(error) if steps > 0 && error.severity().is_recoverable() => Ok(false),
        Err(error) => Err(error.into()),
    }
}

// ============================================================================
// Repeated move
// ============================================================================

/// Run in a fixed direction, bending at unambiguous corridor turns.
///
/// Stops before a hop that would hit a wall with no guarded continuation or
/// bump into an actor; that final hop is never consumed. Junctions are not
/// stopped at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepeatedMoveAction {
    pub actor: EntityId,
    direction: Direction,
    steps: u32,
}

impl RepeatedMoveAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self {
            actor,
            direction,
            steps: 0,
        }
    }

    /// Current heading; changes when the run bends.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    fn heading(map: &dyn MapOracle, position: Position, direction: Direction) -> Option<Direction> {
        if map.is_walkable(direction.step(position)) {
            Some(direction)
        } else {
            find_corridor_turn(map, position, direction)
        }
    }
}

impl ActionTransition for RepeatedMoveAction {
    type Error = TravelError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        position_of(state, self.actor).map(|_| ())
    }

    fn apply(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error> {
        let map = ctx.env.map()?;
        let position = position_of(state, self.actor)?;
        let heading = Self::heading(map, position, self.direction);

        if !hop(self.actor, heading, self.direction, self.steps, state, ctx)? {
            return Ok(RepeatSignal::Halt);
        }
        if let Some(direction) = heading {
            self.direction = direction;
        }
        self.steps += 1;

        let position = position_of(state, self.actor)?;
        let next = Self::heading(map, position, self.direction);
        Ok(if hop_is_free(state, map, position, next) {
            RepeatSignal::Repeat
        } else {
            RepeatSignal::Stop
        })
    }
}

// ============================================================================
// Careful move
// ============================================================================

/// Run that stops wherever something deserves attention.
///
/// On open area the run goes straight and never turns. In a corridor it
/// follows the only continuation, bends included. Once it has walked a
/// corridor hop it stops on the last corridor tile before open area (a room
/// entrance or a junction); a run whose very first hop enters open area keeps
/// going across it. It stops on stairs and on floor items, and halts once an
/// actor not visible at the start comes into view (see [`ThreatWatch`]). Stop
/// conditions are checked before the corridor is followed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarefulMoveAction {
    pub actor: EntityId,
    direction: Direction,
    steps: u32,
    walked_corridor: bool,
    watch: ThreatWatch,
}

impl CarefulMoveAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self {
            actor,
            direction,
            steps: 0,
            walked_corridor: false,
            watch: ThreatWatch::default(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn watch(&self) -> &ThreatWatch {
        &self.watch
    }

    fn heading(
        map: &dyn MapOracle,
        position: Position,
        direction: Direction,
        in_open: bool,
    ) -> Option<Direction> {
        if map.is_walkable(direction.step(position)) {
            Some(direction)
        } else if in_open {
            None
        } else {
            unique_continuation(map, position, direction)
        }
    }

    fn is_point_of_interest(state: &GameState, map: &dyn MapOracle, position: Position) -> bool {
        map.feature(position).is_some() || state.world.has_item_at(position)
    }
}

impl ActionTransition for CarefulMoveAction {
    type Error = TravelError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        position_of(state, self.actor).map(|_| ())
    }

    fn apply(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error> {
        let map = ctx.env.map()?;
        let position = position_of(state, self.actor)?;
        self.watch.arm(state, ctx.perception, self.actor);

        let from_open = is_open_area(map, position);
        let heading = Self::heading(map, position, self.direction, from_open);
        if !hop(self.actor, heading, self.direction, self.steps, state, ctx)? {
            return Ok(RepeatSignal::Halt);
        }
        if let Some(direction) = heading {
            self.direction = direction;
        }
        self.walked_corridor |= !from_open;
        self.steps += 1;

        let position = position_of(state, self.actor)?;
        if Self::is_point_of_interest(state, map, position) {
            return Ok(RepeatSignal::Stop);
        }
        let in_open = is_open_area(map, position);
        let next = Self::heading(map, position, self.direction, in_open);
        let enters_open =
            next.is_some_and(|direction| is_open_area(map, direction.step(position)));
        if !in_open && self.walked_corridor && enters_open {
            return Ok(RepeatSignal::Stop);
        }
        Ok(if hop_is_free(state, map, position, next) {
            RepeatSignal::Repeat
        } else {
            RepeatSignal::Stop
        })
    }
}

// ============================================================================
// Path move
// ============================================================================

/// Follows a precomputed [`Path`], one step per invocation.
///
/// A hostile standing on the next step is attacked instead and the run ends.
/// Any other obstruction aborts the run with an error and discards the rest
/// of the path; nothing is replanned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathMoveAction {
    pub actor: EntityId,
    path: Path,
    steps: u32,
    watch: ThreatWatch,
}

impl PathMoveAction {
    pub fn new(actor: EntityId, path: Path) -> Self {
        Self {
            actor,
            path,
            steps: 0,
            watch: ThreatWatch::default(),
        }
    }

    /// Steps not yet taken.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn watch(&self) -> &ThreatWatch {
        &self.watch
    }

    fn abort(&mut self, error: TravelError) -> Result<RepeatSignal, TravelError> {
        self.path.clear();
        Err(error)
    }
}

impl ActionTransition for PathMoveAction {
    type Error = TravelError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        position_of(state, self.actor)?;
        if self.steps == 0 && self.path.is_empty() {
            return Err(TravelError::PathExhausted);
        }
        Ok(())
    }

    fn apply(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error> {
        let map = ctx.env.map()?;
        self.watch.arm(state, ctx.perception, self.actor);

        let Some(next) = self.path.peek() else {
            return Ok(RepeatSignal::Stop);
        };
        let actor = state
            .actor(self.actor)
            .ok_or(TravelError::ActorNotFound(self.actor))?;
        let at = actor.position;
        let Some(direction) = Direction::between(at, next) else {
            return self.abort(TravelError::PathDiverged { at, expected: next });
        };

        if let Some(occupant) = state.blocking_actor_at(next) {
            if !actor.is_hostile_to(occupant) {
                return self.abort(TravelError::PathBlocked { at: next });
            }
            let target = occupant.id;
            self.path.clear();
            resolve(&mut AttackAction::melee(self.actor, target), state, ctx)?;
            self.steps += 1;
            return Ok(RepeatSignal::Stop);
        }
        if !map.is_walkable(next) {
            return self.abort(TravelError::PathBlocked { at: next });
        }

        resolve(&mut MoveAction::new(self.actor, direction), state, ctx)?;
        self.path.pop();
        self.steps += 1;
        Ok(if self.path.is_empty() {
            RepeatSignal::Stop
        } else {
            RepeatSignal::Repeat
        })
    }
}
