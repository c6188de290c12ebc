//! GameView: maps a `core::GridSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GridSnapshot, PendingKind, SwapState};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, Coord, TileLayout};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Cursor and selection to draw on top of the tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Highlight {
    pub cursor: Option<Coord>,
    pub selected: Option<Coord>,
}

/// Terminal renderer for the match-3 grid.
///
/// Tile placement follows a [`TileLayout`] in world units; `cols_per_unit`
/// and `rows_per_unit` scale world units to terminal cells.
pub struct GameView {
    layout: TileLayout,
    cols_per_unit: f32,
    rows_per_unit: f32,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(TileLayout::default())
    }
}

impl GameView {
    pub fn new(layout: TileLayout) -> Self {
        Self {
            layout,
            // 2x1 helps compensate for typical terminal glyph aspect ratio.
            cols_per_unit: 2.0,
            rows_per_unit: 1.0,
        }
    }

    fn tile_cols(&self) -> u16 {
        ((self.layout.tile_w * self.cols_per_unit).round() as u16).max(1)
    }

    fn tile_rows(&self) -> u16 {
        ((self.layout.tile_h * self.rows_per_unit).round() as u16).max(1)
    }

    /// Offset of a tile's top-left corner inside the board area.
    fn tile_offset(&self, coord: Coord, width: u16, height: u16) -> (u16, u16) {
        let (x0, y0) = self.layout.world_position(Coord::new(0, 0), width, height);
        let (wx, wy) = self.layout.world_position(coord, width, height);
        (
            ((wx - x0) * self.cols_per_unit).round() as u16,
            ((wy - y0) * self.rows_per_unit).round() as u16,
        )
    }

    /// Board area size in terminal cells (without border).
    pub fn board_size(&self, width: u16, height: u16) -> (u16, u16) {
        if width == 0 || height == 0 {
            return (0, 0);
        }
        let (x, y) = self.tile_offset(Coord::new(width - 1, height - 1), width, height);
        (
            x.saturating_add(self.tile_cols()),
            y.saturating_add(self.tile_rows()),
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GridSnapshot,
        highlight: Highlight,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (board_w, board_h) = self.board_size(snap.width, snap.height);
        let frame_w = board_w.saturating_add(2);
        let frame_h = board_h.saturating_add(2);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(
            start_x.saturating_add(1),
            start_y.saturating_add(1),
            board_w,
            board_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h);

        for y in 0..snap.height {
            for x in 0..snap.width {
                let coord = Coord::new(x, y);
                let (ox, oy) = self.tile_offset(coord, snap.width, snap.height);
                let px = start_x.saturating_add(1).saturating_add(ox);
                let py = start_y.saturating_add(1).saturating_add(oy);

                let mut style;
                let ch;
                match snap.cell(x, y) {
                    Some(cell) => {
                        style = CellStyle::new(color_rgb(cell.color), BOARD_BG);
                        style.bold = true;
                        style.dim = snap.pending == Some(PendingKind::Removal);
                        ch = '█';
                    }
                    None => {
                        style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG);
                        style.dim = true;
                        ch = '·';
                    }
                }

                if highlight.selected == Some(coord) {
                    style.bg = Rgb::new(200, 200, 60);
                } else if highlight.cursor == Some(coord) {
                    style.bg = Rgb::new(110, 110, 130);
                }

                fb.fill_rect(px, py, self.tile_cols(), self.tile_rows(), ch, style);
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, viewport, panel_x, start_y);

        if !snap.game_active {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if snap.occupied() == 0 {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "CLEARED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GridSnapshot, highlight: Highlight, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, highlight, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GridSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let mut label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG);
        label.bold = true;
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "STATE", label);
        y += 1;
        let state = match snap.state {
            SwapState::Idle => "idle",
            SwapState::Settling => "settling",
        };
        fb.put_str(panel_x, y, state, value);
        y += 2;

        fb.put_str(panel_x, y, "PENDING", label);
        y += 1;
        match snap.pending {
            Some(kind) => {
                let name = match kind {
                    PendingKind::Revert => "revert",
                    PendingKind::Removal => "removal",
                };
                fb.put_str(panel_x, y, name, value);
                y += 1;
                fb.put_u32(panel_x, y, snap.settle_remaining_ms, value);
                fb.put_str(panel_x + 5, y, "ms", CellStyle { dim: true, ..value });
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
        y += 2;

        fb.put_str(panel_x, y, "TILES", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.occupied() as u32, value);
        y += 2;

        let dim = CellStyle { dim: true, ..value };
        for line in ["arrows move", "space select", "p pause", "r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let mut style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG);
    style.bold = true;
    fb.put_str(
        x.saturating_add(w.saturating_sub(text_w) / 2),
        y.saturating_add(h / 2),
        text,
        style,
    );
}

fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Red => Rgb::new(220, 80, 80),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Purple => Rgb::new(200, 120, 220),
        Color::Orange => Rgb::new(255, 165, 0),
    }
}
