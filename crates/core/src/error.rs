//! Grid engine errors.

use thiserror::Error;

use crate::types::TileId;

/// Failures surfaced by grid operations.
///
/// All variants are local to the call that produced them: the grid is left
/// exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    /// Every palette color is excluded by the left and up neighbors.
    ///
    /// Only possible with fewer than three colors.
    #[error("no palette color can be placed at ({x}, {y}) without forming a run")]
    NoValidColor { x: u16, y: u16 },

    #[error("color palette is empty")]
    EmptyPalette,

    #[error("grid dimensions must be positive (got {width}x{height})")]
    InvalidDimensions { width: u16, height: u16 },

    /// The tile being stored already occupies another slot.
    #[error("tile {id} already sits at ({x}, {y})")]
    DuplicateTile { id: TileId, x: u16, y: u16 },

    #[error("tile ids exhausted")]
    IdsExhausted,
}
