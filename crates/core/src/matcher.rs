//! Match detection - straight runs of three or more same-colored tiles
//!
//! The scan looks at every window of three consecutive slots along each row
//! and each column. A window qualifies when all three slots are occupied by
//! tiles of one color. There is no notion of a "run": a run of four or five is
//! found as two or three overlapping windows, and the result is the union of
//! every tile in any qualifying window.

use std::collections::BTreeMap;

use crate::grid::GridState;
use crate::tile::Tile;
use crate::types::{Coord, TileId, MATCH_LEN};

/// Deduplicated set of matched tiles, ordered by coordinate
///
/// A tile in both a horizontal and a vertical window appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    tiles: BTreeMap<Coord, Tile>,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.tiles.contains_key(&coord)
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.tiles.keys().copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.values().map(Tile::id)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.values()
    }

    fn insert_window(&mut self, window: [Tile; MATCH_LEN]) {
        for tile in window {
            self.tiles.insert(tile.coord(), tile);
        }
    }
}

/// Scan the whole grid for qualifying windows
pub fn find_matches(grid: &GridState) -> MatchSet {
    let mut matches = MatchSet::default();
    let (w, h) = (grid.width(), grid.height());

    // Horizontal
    for y in 0..h {
        for x in 0..w.saturating_sub(2) {
            let window = [Coord::new(x, y), Coord::new(x + 1, y), Coord::new(x + 2, y)];
            if let Some(tiles) = same_color_window(grid, window) {
                matches.insert_window(tiles);
            }
        }
    }

    // Vertical
    for x in 0..w {
        for y in 0..h.saturating_sub(2) {
            let window = [Coord::new(x, y), Coord::new(x, y + 1), Coord::new(x, y + 2)];
            if let Some(tiles) = same_color_window(grid, window) {
                matches.insert_window(tiles);
            }
        }
    }

    matches
}

/// True when the grid has at least one qualifying window
pub fn has_match(grid: &GridState) -> bool {
    !find_matches(grid).is_empty()
}

fn same_color_window(grid: &GridState, window: [Coord; MATCH_LEN]) -> Option<[Tile; MATCH_LEN]> {
    let a = *grid.get(window[0]).ok()??;
    let b = *grid.get(window[1]).ok()??;
    let c = *grid.get(window[2]).ok()??;
    (a.color() == b.color() && b.color() == c.color()).then_some([a, b, c])
}
