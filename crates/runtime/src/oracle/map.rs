//! Static floor layout served through [`crawl_core::MapOracle`].
//!
//! Layouts are written as ASCII art, one row per line:
//!
//! | glyph | meaning |
//! |-------|---------|
//! | `#` | wall |
//! | `.` | floor |
//! | ` ` | void (outside the dungeon) |
//! | `>` / `<` | stairs down / up |
//! | `@` | player start (floor) |
//! | letter | creature spawn marker (floor) |
//! | `!` `?` `/` `[` | item marker (floor) |
//!
//! Short rows are padded with void. Markers are kept alongside the tiles so
//! the session can populate the floor on arrival.
use std::path::Path;

use anyhow::Context;
use crawl_core::{MapDimensions, MapOracle, Position, StaticTile, TerrainKind, TileFeature};
use thiserror::Error;

/// Glyphs that mark an item lying on the floor.
pub const ITEM_GLYPHS: [char; 4] = ['!', '?', '/', '['];

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapParseError {
    #[error("map has no rows")]
    Empty,

    #[error("unknown glyph '{glyph}' at line {line}, column {column}")]
    UnknownGlyph {
        glyph: char,
        line: usize,
        column: usize,
    },

    #[error("more than one player start ('@') in the map")]
    DuplicateStart,
}

/// Something placed on the layout besides terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker {
    pub glyph: char,
    pub position: Position,
}

/// MapOracle implementation backed by a row-major tile grid.
#[derive(Clone, Debug)]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<StaticTile>,
    player_start: Option<Position>,
    markers: Vec<Marker>,
}

impl GridMap {
    pub fn parse(text: &str) -> Result<Self, MapParseError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        let rows = trim_blank_edges(&rows);
        if rows.is_empty() {
            return Err(MapParseError::Empty);
        }

        let width = rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0) as u32;
        let dimensions = MapDimensions::new(width, rows.len() as u32);
        let mut tiles = vec![StaticTile::new(TerrainKind::Void); dimensions.area()];
        let mut player_start = None;
        let mut markers = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                let tile = match glyph {
                    '#' => StaticTile::wall(),
                    '.' => StaticTile::floor(),
                    ' ' => StaticTile::new(TerrainKind::Void),
                    '>' => StaticTile::with_feature(TileFeature::DownStairs),
                    '<' => StaticTile::with_feature(TileFeature::UpStairs),
                    '@' => {
                        if player_start.replace(position).is_some() {
                            return Err(MapParseError::DuplicateStart);
                        }
                        StaticTile::floor()
                    }
                    glyph if glyph.is_ascii_alphabetic() || ITEM_GLYPHS.contains(&glyph) => {
                        markers.push(Marker { glyph, position });
                        StaticTile::floor()
                    }
                    glyph => {
                        return Err(MapParseError::UnknownGlyph {
                            glyph,
                            line: y + 1,
                            column: x + 1,
                        });
                    }
                };
                tiles[y * width as usize + x] = tile;
            }
        }

        Ok(Self {
            dimensions,
            tiles,
            player_start,
            markers,
        })
    }

    /// Reads and parses a layout file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read map file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to parse map file {}", path.display()))
    }

    pub fn player_start(&self) -> Option<Position> {
        self.player_start
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// First tile carrying `feature`, scanning row by row.
    pub fn find_feature(&self, feature: TileFeature) -> Option<Position> {
        self.tiles
            .iter()
            .position(|tile| tile.feature() == Some(feature))
            .map(|index| self.dimensions.position(index))
    }

    /// Where the player appears when arriving on this floor.
    ///
    /// Coming down lands on the up staircase, coming up lands on the down
    /// staircase. Otherwise the marked start is used, then the first floor tile.
    pub fn arrival(&self, via: Option<TileFeature>) -> Option<Position> {
        via.and_then(|feature| self.find_feature(feature))
            .or(self.player_start)
            .or_else(|| {
                self.tiles
                    .iter()
                    .position(|tile| tile.is_passable())
                    .map(|index| self.dimensions.position(index))
            })
    }

    /// Whether sight passes through `position`. Off-map tiles block sight.
    pub fn is_transparent(&self, position: Position) -> bool {
        self.tile(position)
            .is_some_and(|tile| tile.terrain() == TerrainKind::Floor)
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.dimensions
            .index(position)
            .map(|index| self.tiles[index])
    }
}

fn trim_blank_edges<'a>(rows: &'a [&'a str]) -> &'a [&'a str] {
    let start = rows
        .iter()
        .position(|row| !row.trim().is_empty())
        .unwrap_or(rows.len());
    let end = rows
        .iter()
        .rposition(|row| !row.trim().is_empty())
        .map_or(start, |index| index + 1);
    &rows[start..end]
}
