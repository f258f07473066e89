//! Field-of-view perception served through [`crawl_core::PerceptionOracle`].
//!
//! Sight is a circle of `radius` tiles traced with Bresenham lines: a tile is
//! visible when every tile strictly between the observer and it lets light
//! through. Walls themselves are visible, which keeps room outlines on screen.
//! `refresh` snapshots the floor's opacity and recomputes the player's view;
//! other observers are answered on demand against the same snapshot.
use std::collections::HashSet;

use crawl_core::{
    ActorState, GameState, MapDimensions, MapOracle, PerceptionOracle, Position, StatusFlags,
    TerrainKind,
};

#[derive(Clone, Debug)]
pub struct FieldOfView {
    radius: u32,
    dimensions: MapDimensions,
    transparent: Vec<bool>,
    player_view: HashSet<Position>,
}

impl FieldOfView {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            dimensions: MapDimensions::new(0, 0),
            transparent: Vec::new(),
            player_view: HashSet::new(),
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Tiles the player saw at the last refresh.
    pub fn player_view(&self) -> &HashSet<Position> {
        &self.player_view
    }

    fn is_transparent(&self, position: Position) -> bool {
        self.dimensions
            .index(position)
            .is_some_and(|index| self.transparent[index])
    }

    fn within_radius(&self, from: Position, to: Position) -> bool {
        let dx = i64::from(to.x - from.x);
        let dy = i64::from(to.y - from.y);
        let radius = i64::from(self.radius);
        dx * dx + dy * dy <= radius * radius
    }

    fn in_sight(&self, from: Position, to: Position) -> bool {
        if !self.dimensions.contains(to) || !self.within_radius(from, to) {
            return false;
        }

        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut error = dx + dy;
        let (mut x, mut y) = (from.x, from.y);

        loop {
            if x == to.x && y == to.y {
                return true;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += sx;
            }
            if doubled <= dx {
                error += dx;
                y += sy;
            }
            let step = Position::new(x, y);
            if step != to && !self.is_transparent(step) {
                return false;
            }
        }
    }
}

impl PerceptionOracle for FieldOfView {
    fn is_visible(&self, observer: &ActorState, position: Position) -> bool {
        if observer.flags.contains(StatusFlags::BLIND) {
            return false;
        }
        self.in_sight(observer.position, position)
    }

    fn refresh(&mut self, state: &GameState, map: &dyn MapOracle) {
        self.dimensions = map.dimensions();
        self.transparent = (0..self.dimensions.area())
            .map(|index| {
                map.tile(self.dimensions.position(index))
                    .is_some_and(|tile| tile.terrain() == TerrainKind::Floor)
            })
            .collect();

        self.player_view.clear();
        let player = state.player();
        if !player.is_alive() || player.flags.contains(StatusFlags::BLIND) {
            return;
        }
        let reach = self.radius as i32;
        let origin = player.position;
        for y in origin.y - reach..=origin.y + reach {
            for x in origin.x - reach..=origin.x + reach {
                let position = Position::new(x, y);
                if self.in_sight(origin, position) {
                    self.player_view.insert(position);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::GridMap;
    use crawl_core::EntityId;

    fn refreshed(rows: &str, player: Position, radius: u32) -> (FieldOfView, GameState) {
        let map = GridMap::parse(rows).unwrap();
        let hero = ActorState::new(EntityId::PLAYER, "you", player).with_health(10);
        let state = GameState::new(0, hero);
        let mut fov = FieldOfView::new(radius);
        fov.refresh(&state, &map);
        (fov, state)
    }

    #[test]
    fn walls_block_sight_but_are_seen() {
        let (fov, state) = refreshed(
            "#######\n#.....#\n###.###\n#.....#\n#######",
            Position::new(1, 1),
            8,
        );
        let player = state.player();

        assert!(fov.is_visible(player, Position::new(5, 1)));
        assert!(fov.is_visible(player, Position::new(1, 2)));
        assert!(!fov.is_visible(player, Position::new(1, 3)));
        assert!(fov.player_view().contains(&Position::new(0, 0)));
    }

    #[test]
    fn sight_ends_at_the_radius() {
        let (fov, state) = refreshed("#########\n#.......#\n#########", Position::new(1, 1), 3);
        let player = state.player();

        assert!(fov.is_visible(player, Position::new(4, 1)));
        assert!(!fov.is_visible(player, Position::new(5, 1)));
    }

    #[test]
    fn blind_observers_see_nothing() {
        let (fov, mut state) = refreshed("#####\n#...#\n#####", Position::new(1, 1), 5);
        state.entities.player.flags.insert(StatusFlags::BLIND);

        assert!(!fov.is_visible(state.player(), Position::new(2, 1)));
    }
}
