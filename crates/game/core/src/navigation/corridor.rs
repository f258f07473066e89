//! Corridor classification and turn-following.
//!
//! A tile with three or more walkable cardinal neighbours is treated as open
//! area (room floor, junction). A corridor bend and a room corner both show
//! exactly two walkable neighbours, so turn-following also inspects the
//! neighbours' own counts before it bends a run.

use crate::action::Direction;
use crate::env::MapOracle;
use crate::state::Position;

/// Number of the four orthogonal neighbours of `position` that are walkable.
pub fn cardinal_walkable_count<M: MapOracle + ?Sized>(map: &M, position: Position) -> usize {
    Direction::CARDINAL
        .iter()
        .filter(|direction| map.is_walkable(direction.step(position)))
        .count()
}

pub fn is_open_area<M: MapOracle + ?Sized>(map: &M, position: Position) -> bool {
    cardinal_walkable_count(map, position) >= 3
}

/// Whether any walkable cardinal neighbour of `position` is open area.
pub fn is_near_open_area<M: MapOracle + ?Sized>(map: &M, position: Position) -> bool {
    Direction::CARDINAL.iter().any(|direction| {
        let neighbour = direction.step(position);
        map.is_walkable(neighbour) && is_open_area(map, neighbour)
    })
}

/// The only walkable cardinal exit of `position` other than back along
/// `incoming`. No open-area guard is applied.
pub fn unique_continuation<M: MapOracle + ?Sized>(
    map: &M,
    position: Position,
    incoming: Direction,
) -> Option<Direction> {
    if !incoming.is_cardinal() {
        return None;
    }
    let reverse = incoming.opposite();
    let mut candidates = Direction::CARDINAL
        .into_iter()
        .filter(|&direction| direction != reverse)
        .filter(|direction| map.is_walkable(direction.step(position)));

    let first = candidates.next()?;
    match candidates.next() {
        Some(_) => None,
        None => Some(first),
    }
}

/// Direction to bend a run arriving at `position` along `incoming`.
///
/// Returns the unique continuation only when neither `position` nor any of
/// its walkable cardinal neighbours is open area; a bend next to a room is
/// indistinguishable from a room corner and yields `None`.
pub fn find_corridor_turn<M: MapOracle + ?Sized>(
    map: &M,
    position: Position,
    incoming: Direction,
) -> Option<Direction> {
    let turn = unique_continuation(map, position, incoming)?;
    if is_open_area(map, position) || is_near_open_area(map, position) {
        return None;
    }
    Some(turn)
}
