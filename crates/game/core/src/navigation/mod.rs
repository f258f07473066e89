//! Pure grid algorithms used by autonomous movement.
//!
//! Nothing here mutates state. The corridor navigator classifies single tiles
//! and picks continuation directions; the pathfinder plans multi-step routes
//! that [`PathMoveAction`](crate::action::PathMoveAction) later consumes.
pub mod corridor;
pub mod pathfinder;

pub use corridor::{
    cardinal_walkable_count, find_corridor_turn, is_near_open_area, is_open_area,
    unique_continuation,
};
pub use pathfinder::{Occupancy, Path, PathError, Pathfinder};
