use crate::state::Position;

/// Static map oracle exposing the immutable layout of the current floor.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// Whether an actor may stand on `position`. Positions off the map are not walkable.
    fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(StaticTile::is_passable)
    }

    /// Feature marking a tile of interest (stairs), if any.
    fn feature(&self, position: Position) -> Option<TileFeature> {
        self.tile(position).and_then(StaticTile::feature)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Row-major index of an in-bounds position.
    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn position(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
    feature: Option<TileFeature>,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self {
            terrain,
            feature: None,
        }
    }

    pub const fn floor() -> Self {
        Self::new(TerrainKind::Floor)
    }

    pub const fn wall() -> Self {
        Self::new(TerrainKind::Wall)
    }

    /// A floor tile carrying a feature.
    pub const fn with_feature(feature: TileFeature) -> Self {
        Self {
            terrain: TerrainKind::Floor,
            feature: Some(feature),
        }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn feature(self) -> Option<TileFeature> {
        self.feature
    }

    pub fn is_passable(self) -> bool {
        self.terrain.is_passable()
    }
}

/// Canonical terrain classes for static map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall,
    Void,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }
}

/// Tiles of interest. Careful travel stops on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileFeature {
    DownStairs,
    UpStairs,
}
