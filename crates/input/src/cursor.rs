//! Cursor and selection state.
//!
//! The player moves a cursor over the grid, selects a tile, then selects an
//! orthogonal neighbor to request a swap. Selecting a non-adjacent tile moves
//! the selection there instead. Empty slots cannot be selected.

use crate::types::{Coord, GameAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Coord,
    selected: Option<Coord>,
    width: u16,
    height: u16,
}

impl Cursor {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            pos: Coord::new(0, 0),
            selected: None,
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn pos(&self) -> Coord {
        self.pos
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Apply a cursor action; returns the pair to swap when one completes
    ///
    /// `occupied` reports whether a slot holds a tile. Actions that do not
    /// concern the cursor are ignored.
    pub fn apply(
        &mut self,
        action: GameAction,
        occupied: impl Fn(Coord) -> bool,
    ) -> Option<(Coord, Coord)> {
        match action {
            GameAction::Cursor(dir) => {
                if let Some(next) = self.pos.offset(dir) {
                    if next.x < self.width && next.y < self.height {
                        self.pos = next;
                    }
                }
                None
            }
            GameAction::Select if !occupied(self.pos) => None,
            GameAction::Select => match self.selected {
                None => {
                    self.selected = Some(self.pos);
                    None
                }
                Some(sel) if sel == self.pos => {
                    self.selected = None;
                    None
                }
                Some(sel) if sel.is_adjacent(self.pos) => {
                    self.selected = None;
                    Some((sel, self.pos))
                }
                Some(_) => {
                    self.selected = Some(self.pos);
                    None
                }
            },
            GameAction::Cancel => {
                self.selected = None;
                None
            }
            GameAction::Pause | GameAction::Restart => None,
        }
    }
}
