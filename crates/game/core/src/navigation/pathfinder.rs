//! A* search over the static grid.
//!
//! Orthogonal steps cost 2 and diagonal steps cost 3, which keeps the
//! diagonal penalty integral. Walls are impassable. Tiles held by a living
//! actor are handled per [`Occupancy`]; the start and goal tiles are always
//! exempt. Paths are never replanned here: a stale path is detected when a
//! step is taken.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::action::Direction;
use crate::env::{ConfigOracle, GameEnv, MapOracle, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, Position};

const ORTHOGONAL_COST: u32 = 2;
const DIAGONAL_COST: u32 = 3;

/// How tiles currently held by an actor are treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Occupancy {
    Ignore,
    /// Passable at an extra cost.
    #[default]
    Penalize,
    Avoid,
}

#[derive(Clone, Copy)]
enum Goal {
    Exact,
    Adjacent,
}

/// Ordered queue of tiles to step onto, excluding the start tile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: VecDeque<Position>,
}

impl Path {
    pub fn new(steps: impl IntoIterator<Item = Position>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The next tile to step onto.
    pub fn peek(&self) -> Option<Position> {
        self.steps.front().copied()
    }

    pub fn pop(&mut self) -> Option<Position> {
        self.steps.pop_front()
    }

    /// Final tile of the path.
    pub fn destination(&self) -> Option<Position> {
        self.steps.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.steps.iter()
    }

    /// Drops every remaining step.
    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("start {0} is outside the map")]
    StartOutOfBounds(Position),

    #[error("destination {0} is not walkable")]
    GoalNotWalkable(Position),

    #[error("no path from {from} to {to}")]
    NoPath { from: Position, to: Position },
}

impl GameError for PathError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            PathError::Oracle(error) => error.severity(),
            PathError::StartOutOfBounds(_) => ErrorSeverity::Internal,
            PathError::GoalNotWalkable(_) | PathError::NoPath { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            PathError::Oracle(error) => error.error_code(),
            PathError::StartOutOfBounds(_) => "PATH_START_OUT_OF_BOUNDS",
            PathError::GoalNotWalkable(_) => "PATH_GOAL_NOT_WALKABLE",
            PathError::NoPath { .. } => "PATH_NO_PATH",
        }
    }
}

/// Shortest-path search bound to a map and the current roster.
pub struct Pathfinder<'a, M: MapOracle + ?Sized> {
    map: &'a M,
    state: &'a GameState,
    diagonals: bool,
    occupancy: Occupancy,
    penalty: u32,
}

impl<'a> Pathfinder<'a, dyn MapOracle + 'a> {
    /// Pathfinder configured from the environment's map and tunables.
    pub fn from_env(env: &GameEnv<'a>, state: &'a GameState) -> Result<Self, PathError> {
        let config = env.config()?;
        Ok(Pathfinder::new(env.map()?, state)
            .with_diagonals(config.allow_diagonal_paths())
            .with_penalty(config.occupied_path_penalty()))
    }
}

impl<'a, M: MapOracle + ?Sized> Pathfinder<'a, M> {
    pub fn new(map: &'a M, state: &'a GameState) -> Self {
        Self {
            map,
            state,
            diagonals: true,
            occupancy: Occupancy::default(),
            penalty: crate::config::GameConfig::DEFAULT_OCCUPIED_PATH_PENALTY,
        }
    }

    #[must_use]
    pub fn with_diagonals(mut self, allow: bool) -> Self {
        self.diagonals = allow;
        self
    }

    #[must_use]
    pub fn with_occupancy(mut self, occupancy: Occupancy) -> Self {
        self.occupancy = occupancy;
        self
    }

    #[must_use]
    pub fn with_penalty(mut self, penalty: u32) -> Self {
        self.penalty = penalty;
        self
    }

    /// Cheapest path from `start` to `goal`. An empty path means the two are
    /// the same tile.
    pub fn find_path(&self, start: Position, goal: Position) -> Result<Path, PathError> {
        self.check_start(start)?;
        if !self.map.is_walkable(goal) {
            return Err(PathError::GoalNotWalkable(goal));
        }
        self.search(start, goal, Goal::Exact)
    }

    /// Cheapest path from `start` to any free walkable tile adjacent to
    /// `goal`. Used when `goal` itself is held by an actor.
    pub fn find_path_to_adjacent(&self, start: Position, goal: Position) -> Result<Path, PathError> {
        self.check_start(start)?;
        if self.is_neighbour(start, goal) {
            return Ok(Path::default());
        }
        self.search(start, goal, Goal::Adjacent)
    }

    fn check_start(&self, start: Position) -> Result<(), PathError> {
        if self.map.contains(start) {
            Ok(())
        } else {
            Err(PathError::StartOutOfBounds(start))
        }
    }

    /// Whether one step of this search leads from `from` to `to`.
    fn is_neighbour(&self, from: Position, to: Position) -> bool {
        from.is_adjacent(to) && (self.diagonals || from.manhattan_distance(to) == 1)
    }

    fn directions(&self) -> &'static [Direction] {
        if self.diagonals {
            &Direction::ALL
        } else {
            &Direction::CARDINAL
        }
    }

    fn heuristic(&self, from: Position, to: Position) -> u32 {
        let dx = (from.x - to.x).unsigned_abs();
        let dy = (from.y - to.y).unsigned_abs();
        if self.diagonals {
            ORTHOGONAL_COST * (dx + dy) - (2 * ORTHOGONAL_COST - DIAGONAL_COST) * dx.min(dy)
        } else {
            ORTHOGONAL_COST * (dx + dy)
        }
    }

    fn accepts(&self, position: Position, target: Position, goal: Goal) -> bool {
        match goal {
            Goal::Exact => position == target,
            Goal::Adjacent => {
                self.is_neighbour(position, target) && !self.state.is_occupied(position)
            }
        }
    }

    fn enter_cost(
        &self,
        position: Position,
        direction: Direction,
        target: Position,
        goal: Goal,
    ) -> Option<u32> {
        if !self.map.is_walkable(position) {
            return None;
        }
        let exempt = match goal {
            Goal::Exact => position == target,
            // the occupant of the target is never walked through
            Goal::Adjacent if position == target => return None,
            Goal::Adjacent => false,
        };
        let base = if direction.is_cardinal() {
            ORTHOGONAL_COST
        } else {
            DIAGONAL_COST
        };
        if exempt || !self.state.is_occupied(position) {
            return Some(base);
        }
        match self.occupancy {
            Occupancy::Ignore => Some(base),
            Occupancy::Penalize => Some(base + self.penalty),
            Occupancy::Avoid => None,
        }
    }

    /// A* towards `target`, stopping at the first tile `goal` accepts.
    fn search(&self, start: Position, target: Position, goal: Goal) -> Result<Path, PathError> {
        // Adjacent goals lie up to one diagonal step short of the target.
        let slack = match goal {
            Goal::Exact => 0,
            Goal::Adjacent => DIAGONAL_COST,
        };
        let dimensions = self.map.dimensions();
        let Some(start_index) = dimensions.index(start) else {
            return Err(PathError::StartOutOfBounds(start));
        };
        if self.accepts(start, target, goal) {
            return Ok(Path::default());
        }

        let mut cost = vec![u32::MAX; dimensions.area()];
        let mut prev: Vec<Option<usize>> = vec![None; dimensions.area()];
        let mut heap: BinaryHeap<Reverse<(u32, usize)>> = BinaryHeap::new();
        cost[start_index] = 0;
        heap.push(Reverse((self.heuristic(start, target), start_index)));

        while let Some(Reverse((_, index))) = heap.pop() {
            let position = dimensions.position(index);
            if self.accepts(position, target, goal) {
                return Ok(Self::reconstruct(&prev, dimensions, index, start_index));
            }

            for &direction in self.directions() {
                let next = direction.step(position);
                let Some(next_index) = dimensions.index(next) else {
                    continue;
                };
                let Some(step) = self.enter_cost(next, direction, target, goal) else {
                    continue;
                };
                let candidate = cost[index].saturating_add(step);
                if candidate < cost[next_index] {
                    cost[next_index] = candidate;
                    prev[next_index] = Some(index);
                    let estimate = self.heuristic(next, target).saturating_sub(slack);
                    heap.push(Reverse((candidate + estimate, next_index)));
                }
            }
        }

        Err(PathError::NoPath {
            from: start,
            to: target,
        })
    }

    fn reconstruct(
        prev: &[Option<usize>],
        dimensions: crate::env::MapDimensions,
        goal: usize,
        start: usize,
    ) -> Path {
        let mut steps = VecDeque::new();
        let mut cursor = goal;
        while cursor != start {
            steps.push_front(dimensions.position(cursor));
            match prev[cursor] {
                Some(previous) => cursor = previous,
                None => break,
            }
        }
        Path { steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorState, Faction};
    use crate::testing::{StubMap, state_with};

    fn wall_map() -> StubMap {
        StubMap::parse(&[
            "#######", //
            "#.....#",
            "#####.#",
            "#.....#",
            "#######",
        ])
    }

    #[test]
    fn routes_around_walls() {
        let map = wall_map();
        let state = state_with(Position::new(1, 1), Vec::new());
        let path = Pathfinder::new(&map, &state)
            .find_path(Position::new(1, 1), Position::new(1, 3))
            .unwrap();

        assert_eq!(path.destination(), Some(Position::new(1, 3)));
        assert!(path.iter().all(|&step| map.is_walkable(step)));
        // Diagonals through (5,2) shorten the detour to eight steps.
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn orthogonal_only_paths_take_no_diagonals() {
        let map = StubMap::open(5, 5);
        let state = state_with(Position::new(0, 0), Vec::new());
        let path = Pathfinder::new(&map, &state)
            .with_diagonals(false)
            .find_path(Position::new(0, 0), Position::new(2, 2))
            .unwrap();

        assert_eq!(path.len(), 4);
        let mut previous = Position::new(0, 0);
        for &step in path.iter() {
            assert_eq!(previous.manhattan_distance(step), 1);
            previous = step;
        }
    }

    #[test]
    fn unreachable_goal_is_an_error() {
        let map = StubMap::parse(&[
            "#####", //
            "#.#.#",
            "#####",
        ]);
        let state = state_with(Position::new(1, 1), Vec::new());

        assert_eq!(
            Pathfinder::new(&map, &state).find_path(Position::new(1, 1), Position::new(3, 1)),
            Err(PathError::NoPath {
                from: Position::new(1, 1),
                to: Position::new(3, 1),
            })
        );
    }

    #[test]
    fn avoided_occupant_blocks_single_lane() {
        let map = StubMap::parse(&[
            "#######", //
            "#.....#",
            "#######",
        ]);
        let rat = ActorState::new(Default::default(), "rat", Position::new(3, 1))
            .with_faction(Faction::Monster);
        let state = state_with(Position::new(1, 1), vec![rat]);
        let finder = Pathfinder::new(&map, &state);

        assert!(finder
            .with_occupancy(Occupancy::Avoid)
            .find_path(Position::new(1, 1), Position::new(5, 1))
            .is_err());
        let penalized = Pathfinder::new(&map, &state)
            .find_path(Position::new(1, 1), Position::new(5, 1))
            .unwrap();
        assert_eq!(penalized.len(), 4);
    }

    #[test]
    fn adjacent_search_stops_next_to_occupied_goal() {
        let map = StubMap::open(8, 3);
        let orc = ActorState::new(Default::default(), "orc", Position::new(6, 1))
            .with_faction(Faction::Monster);
        let state = state_with(Position::new(1, 1), vec![orc]);

        let path = Pathfinder::new(&map, &state)
            .find_path_to_adjacent(Position::new(1, 1), Position::new(6, 1))
            .unwrap();

        let last = path.destination().unwrap();
        assert!(last.is_adjacent(Position::new(6, 1)));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn diagonal_neighbour_is_not_adjacent_without_diagonals() {
        let map = StubMap::open(5, 5);
        let goal = Position::new(2, 2);
        let orc = ActorState::new(Default::default(), "orc", goal).with_faction(Faction::Monster);
        let state = state_with(Position::new(1, 1), vec![orc]);

        let path = Pathfinder::new(&map, &state)
            .with_diagonals(false)
            .find_path_to_adjacent(Position::new(1, 1), goal)
            .unwrap();

        assert_eq!(path.len(), 1);
        assert_eq!(path.destination().unwrap().manhattan_distance(goal), 1);
        assert!(Pathfinder::new(&map, &state)
            .find_path_to_adjacent(Position::new(1, 1), goal)
            .unwrap()
            .is_empty());
    }
}
