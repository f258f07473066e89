//! Read-only blackboard a controller decides against.

use crate::action::{Action, Direction, check_destination};
use crate::env::{GameEnv, PerceptionOracle, RngOracle};
use crate::navigation::{Path, Pathfinder};
use crate::state::{ActorState, GameState, Position, StatusFlags};

/// Everything a controller may read during one activation.
///
/// The controller itself is taken out of the acting actor while it decides,
/// so `actor.controller` is always `None` here.
pub struct AiView<'a> {
    pub actor: &'a ActorState,
    pub state: &'a GameState,
    pub env: GameEnv<'a>,
    pub perception: &'a dyn PerceptionOracle,
    /// Seed for this activation. Derived from the game seed, the clock, the
    /// actor id and the activation index within the tick.
    pub seed: u64,
}

impl<'a> AiView<'a> {
    pub fn player(&self) -> &'a ActorState {
        self.state.player()
    }

    pub fn is_blind(&self) -> bool {
        self.actor.flags.contains(StatusFlags::BLIND)
    }

    /// Whether the player is alive, not invisible and in this actor's sight.
    pub fn sees_player(&self) -> bool {
        let player = self.player();
        player.is_alive()
            && !player.flags.contains(StatusFlags::INVISIBLE)
            && self.perception.is_visible(self.actor, player.position)
    }

    pub fn distance_to(&self, position: Position) -> u32 {
        self.actor.position.chebyshev_distance(position)
    }

    /// Whether a plain move in `direction` would currently succeed.
    pub fn can_step(&self, direction: Direction) -> bool {
        self.env.map().is_ok_and(|map| {
            check_destination(self.state, map, direction.step(self.actor.position)).is_ok()
        })
    }

    /// Uniform index in `0..len` drawn from this activation's seed.
    pub fn pick(&self, len: usize) -> Option<usize> {
        let rng = self.env.rng().ok()?;
        Some(rng.pick(self.seed, len))
    }

    /// A move onto a random free neighbouring tile, or `None` when boxed in.
    pub fn wander(&self) -> Option<Action> {
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|direction| self.can_step(*direction))
            .collect();
        if open.is_empty() {
            return None;
        }
        let direction = open[self.pick(open.len())?];
        Some(Action::step(self.actor.id, direction))
    }

    /// Shortest path onto `goal`.
    pub fn path_to(&self, goal: Position) -> Option<Path> {
        Pathfinder::from_env(&self.env, self.state)
            .ok()?
            .find_path(self.actor.position, goal)
            .ok()
    }

    /// Shortest path to a free tile next to `goal`.
    pub fn path_next_to(&self, goal: Position) -> Option<Path> {
        Pathfinder::from_env(&self.env, self.state)
            .ok()?
            .find_path_to_adjacent(self.actor.position, goal)
            .ok()
    }

    /// Follows `path` one step, unless its first step is held by an ally.
    ///
    /// Hostile occupants are left to the path move, which attacks them.
    pub fn follow(&self, path: Path) -> Option<Action> {
        let next = path.peek()?;
        if self
            .state
            .blocking_actor_at(next)
            .is_some_and(|occupant| !occupant.is_hostile_to(self.actor))
        {
            return None;
        }
        Some(Action::follow(self.actor.id, path))
    }
}
