//! Palette module - the colors a grid may be generated with, and the
//! neighbor-aware color picker used while filling it.
//!
//! Colors are chosen so that a freshly placed tile never completes a run of
//! three with the two tiles to its left or the two tiles above it. Generation
//! scans column by column, so those are exactly the neighbors already placed.

use arrayvec::ArrayVec;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::GridError;
use crate::grid::GridState;
use crate::types::{Color, Coord};

/// Maximum number of distinct colors (one per [`Color`] variant)
pub const MAX_COLORS: usize = Color::ALL.len();

/// Non-empty, duplicate-free ordered set of colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    colors: ArrayVec<Color, MAX_COLORS>,
}

impl ColorPalette {
    /// Build a palette, keeping the first occurrence of each color
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Result<Self, GridError> {
        let mut set = ArrayVec::new();
        for color in colors {
            if !set.contains(&color) {
                set.push(color);
            }
        }
        if set.is_empty() {
            return Err(GridError::EmptyPalette);
        }
        Ok(Self { colors: set })
    }

    /// Red, Blue, Green
    pub fn classic() -> Self {
        Self {
            colors: [Color::Red, Color::Blue, Color::Green].into_iter().collect(),
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::classic()
    }
}

/// Pick a color for `coord` that does not complete a run with placed neighbors
///
/// Starting from the full palette, the shared color of the two tiles to the
/// left is removed, and independently the shared color of the two tiles above.
/// The result is uniform over what remains.
pub fn pick_color<R: Rng + ?Sized>(
    coord: Coord,
    grid: &GridState,
    palette: &ColorPalette,
    rng: &mut R,
) -> Result<Color, GridError> {
    grid.check_bounds(coord)?;

    let mut candidates = palette.colors.clone();

    if coord.x >= 2 {
        let left1 = grid.color_at(Coord::new(coord.x - 1, coord.y));
        let left2 = grid.color_at(Coord::new(coord.x - 2, coord.y));
        if let (Some(a), Some(b)) = (left1, left2) {
            if a == b {
                candidates.retain(|c| *c != a);
            }
        }
    }

    if coord.y >= 2 {
        let up1 = grid.color_at(Coord::new(coord.x, coord.y - 1));
        let up2 = grid.color_at(Coord::new(coord.x, coord.y - 2));
        if let (Some(a), Some(b)) = (up1, up2) {
            if a == b {
                candidates.retain(|c| *c != a);
            }
        }
    }

    candidates
        .choose(rng)
        .copied()
        .ok_or(GridError::NoValidColor {
            x: coord.x,
            y: coord.y,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn row(colors: &[Color]) -> GridState {
        let mut grid = GridState::new(colors.len() as u16 + 1, 1).unwrap();
        for (x, color) in colors.iter().enumerate() {
            grid.spawn(Coord::new(x as u16, 0), *color).unwrap();
        }
        grid
    }

    #[test]
    fn palette_drops_duplicates_in_order() {
        let p = ColorPalette::new([Color::Blue, Color::Red, Color::Blue]).unwrap();
        assert_eq!(p.colors(), &[Color::Blue, Color::Red]);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert_eq!(
            ColorPalette::new(std::iter::empty()),
            Err(GridError::EmptyPalette)
        );
    }

    #[test]
    fn left_pair_color_is_never_picked() {
        let grid = row(&[Color::Red, Color::Red]);
        let palette = ColorPalette::classic();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let c = pick_color(Coord::new(2, 0), &grid, &palette, &mut rng).unwrap();
            assert_ne!(c, Color::Red);
        }
    }

    #[test]
    fn mixed_left_pair_leaves_full_palette() {
        let grid = row(&[Color::Red, Color::Blue]);
        let palette = ColorPalette::classic();
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = Vec::new();
        for _ in 0..300 {
            let c = pick_color(Coord::new(2, 0), &grid, &palette, &mut rng).unwrap();
            if !seen.contains(&c) {
                seen.push(c);
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn same_color_on_both_axes_is_removed_once() {
        let mut grid = GridState::new(3, 3).unwrap();
        grid.spawn(Coord::new(0, 2), Color::Green).unwrap();
        grid.spawn(Coord::new(1, 2), Color::Green).unwrap();
        grid.spawn(Coord::new(2, 0), Color::Green).unwrap();
        grid.spawn(Coord::new(2, 1), Color::Green).unwrap();

        let palette = ColorPalette::new([Color::Green, Color::Red]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let c = pick_color(Coord::new(2, 2), &grid, &palette, &mut rng).unwrap();
        assert_eq!(c, Color::Red);
    }

    #[test]
    fn two_colors_with_conflicting_pairs_has_no_valid_color() {
        let mut grid = GridState::new(3, 3).unwrap();
        grid.spawn(Coord::new(0, 2), Color::Red).unwrap();
        grid.spawn(Coord::new(1, 2), Color::Red).unwrap();
        grid.spawn(Coord::new(2, 0), Color::Blue).unwrap();
        grid.spawn(Coord::new(2, 1), Color::Blue).unwrap();

        let palette = ColorPalette::new([Color::Red, Color::Blue]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            pick_color(Coord::new(2, 2), &grid, &palette, &mut rng),
            Err(GridError::NoValidColor { x: 2, y: 2 })
        );
    }

    #[test]
    fn out_of_bounds_coordinate_is_an_error() {
        let grid = GridState::new(2, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let err = pick_color(Coord::new(2, 0), &grid, &ColorPalette::classic(), &mut rng);
        assert!(matches!(err, Err(GridError::OutOfBounds { .. })));
    }
}
