//! Tile module - a single colored tile with a stable identity.

use crate::types::{Color, Coord, TileId};

/// A tile on the grid
///
/// Only [`GridState`](crate::grid::GridState) creates tiles. `id` and `color`
/// never change. `coord` is rewritten only by
/// [`GridState`](crate::grid::GridState) so that it always names the slot
/// holding the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    id: TileId,
    coord: Coord,
    color: Color,
}

impl Tile {
    pub(crate) fn new(id: TileId, coord: Coord, color: Color) -> Self {
        Self { id, coord, color }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn set_coord(&mut self, coord: Coord) {
        self.coord = coord;
    }
}
