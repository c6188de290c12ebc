//! Grid module - owns tile placement
//!
//! The grid is a `width` x `height` table where each slot is empty or holds one
//! tile. Uses a flat vector in row-major order (`y * width + x`).
//! Coordinates: (x, y) where x grows to the right and y grows downward.
//!
//! Every mutating method either fully succeeds or returns an error without
//! touching the table, and every tile's stored coordinate equals the slot it
//! sits in.

use rand::Rng;
use tracing::instrument;

use crate::error::GridError;
use crate::palette::{pick_color, ColorPalette};
use crate::tile::Tile;
use crate::types::{Color, Coord, TileId};

/// The tile table
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    width: u16,
    height: u16,
    /// Flat array of slots, row-major order (y * width + x)
    slots: Vec<Option<Tile>>,
    /// Next id to hand out; wider than `TileId` so exhaustion is detectable
    next_id: u64,
}

impl GridState {
    /// Create an empty grid
    pub fn new(width: u16, height: u16) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            slots: vec![None; usize::from(width) * usize::from(height)],
            next_id: 0,
        })
    }

    /// Fill a new grid, column by column, with colors that form no runs
    #[instrument(level = "debug", skip(palette, rng))]
    pub fn generate<R: Rng + ?Sized>(
        width: u16,
        height: u16,
        palette: &ColorPalette,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        grid.fill(palette, rng)?;
        Ok(grid)
    }

    /// Build a grid from rows of optional colors (row 0 is the top)
    ///
    /// Tiles get ids in row-major order. Every row must have the same
    /// non-zero length.
    pub fn from_rows<R: AsRef<[Option<Color>]>>(rows: &[R]) -> Result<Self, GridError> {
        let first_len = rows.first().map_or(0, |r| r.as_ref().len());
        let height = u16::try_from(rows.len()).unwrap_or(u16::MAX);
        let width = u16::try_from(first_len).unwrap_or(u16::MAX);
        if usize::from(height) != rows.len()
            || usize::from(width) != first_len
            || rows.iter().any(|r| r.as_ref().len() != first_len)
        {
            return Err(GridError::InvalidDimensions { width, height });
        }

        let mut grid = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.as_ref().iter().enumerate() {
                if let Some(color) = cell {
                    grid.spawn(Coord::new(x as u16, y as u16), *color)?;
                }
            }
        }
        Ok(grid)
    }

    /// Replace every slot with a freshly picked tile
    ///
    /// Ids keep counting up from the previous contents. On error the grid is
    /// left as it was.
    pub(crate) fn fill<R: Rng + ?Sized>(
        &mut self,
        palette: &ColorPalette,
        rng: &mut R,
    ) -> Result<(), GridError> {
        let mut next = Self {
            width: self.width,
            height: self.height,
            slots: vec![None; self.slots.len()],
            next_id: self.next_id,
        };

        for x in 0..self.width {
            for y in 0..self.height {
                let coord = Coord::new(x, y);
                let color = pick_color(coord, &next, palette, rng)?;
                next.spawn(coord, color)?;
            }
        }

        *self = next;
        Ok(())
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Check if a coordinate lies inside the grid
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    pub(crate) fn check_bounds(&self, coord: Coord) -> Result<(), GridError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    #[inline(always)]
    fn index(&self, coord: Coord) -> Result<usize, GridError> {
        self.check_bounds(coord)?;
        Ok(usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x))
    }

    /// Tile at `coord`, if any
    pub fn get(&self, coord: Coord) -> Result<Option<&Tile>, GridError> {
        let idx = self.index(coord)?;
        Ok(self.slots[idx].as_ref())
    }

    /// Color at `coord`; `None` for empty or out-of-bounds slots
    pub fn color_at(&self, coord: Coord) -> Option<Color> {
        self.get(coord).ok().flatten().map(Tile::color)
    }

    /// Store `tile` (or nothing) at `coord`, returning the displaced occupant
    ///
    /// The stored tile's coordinate is rewritten to `coord`. A tile whose id
    /// already sits in a different slot is rejected, so one identity never
    /// occupies two slots.
    pub fn set(&mut self, coord: Coord, tile: Option<Tile>) -> Result<Option<Tile>, GridError> {
        let idx = self.index(coord)?;
        let tile = match tile {
            Some(mut t) => {
                if let Some(at) = self.position_of(t.id()).filter(|&at| at != coord) {
                    return Err(GridError::DuplicateTile {
                        id: t.id(),
                        x: at.x,
                        y: at.y,
                    });
                }
                t.set_coord(coord);
                self.next_id = self.next_id.max(u64::from(t.id().0) + 1);
                Some(t)
            }
            None => None,
        };
        Ok(std::mem::replace(&mut self.slots[idx], tile))
    }

    /// Create a new tile with a fresh id at `coord`
    ///
    /// Ids are never reused; once the id space is spent this fails with
    /// [`GridError::IdsExhausted`].
    pub fn spawn(&mut self, coord: Coord, color: Color) -> Result<TileId, GridError> {
        let idx = self.index(coord)?;
        let raw = u32::try_from(self.next_id).map_err(|_| GridError::IdsExhausted)?;
        let id = TileId(raw);
        self.next_id += 1;
        self.slots[idx] = Some(Tile::new(id, coord, color));
        Ok(id)
    }

    /// Exchange the occupants of `a` and `b`
    ///
    /// Both coordinates are checked before anything moves. Either slot may be
    /// empty.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<(), GridError> {
        let ia = self.index(a)?;
        let ib = self.index(b)?;
        if ia == ib {
            return Ok(());
        }

        self.slots.swap(ia, ib);
        if let Some(tile) = self.slots[ia].as_mut() {
            tile.set_coord(a);
        }
        if let Some(tile) = self.slots[ib].as_mut() {
            tile.set_coord(b);
        }
        Ok(())
    }

    /// Remove and destroy the occupant of `coord`
    pub fn clear(&mut self, coord: Coord) -> Result<Option<Tile>, GridError> {
        let idx = self.index(coord)?;
        Ok(self.slots[idx].take())
    }

    /// Current coordinate of the tile with `id`
    pub fn position_of(&self, id: TileId) -> Option<Coord> {
        self.tiles().find(|t| t.id() == id).map(Tile::coord)
    }

    /// Live tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.slots.iter().flatten()
    }

    pub fn occupied_count(&self) -> usize {
        self.tiles().count()
    }

    /// Slots in row-major order (for snapshots)
    pub fn slots(&self) -> &[Option<Tile>] {
        &self.slots
    }
}
