use crate::swap::{PendingKind, SwapState};
use crate::types::{Color, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSnapshot {
    pub id: TileId,
    pub color: Color,
}

/// Plain copy of the coordinator state for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major cells (`y * width + x`)
    pub cells: Vec<Option<CellSnapshot>>,
    pub state: SwapState,
    pub pending: Option<PendingKind>,
    pub settle_remaining_ms: u32,
    pub game_active: bool,
}

impl GridSnapshot {
    pub fn cell(&self, x: u16, y: u16) -> Option<CellSnapshot> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
            .flatten()
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn playable(&self) -> bool {
        self.game_active && self.state == SwapState::Idle
    }
}

impl Default for GridSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            state: SwapState::Idle,
            pending: None,
            settle_remaining_ms: 0,
            game_active: true,
        }
    }
}
