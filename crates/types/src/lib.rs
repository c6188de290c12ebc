//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (grid engine, terminal rendering, configuration).
//!
//! # Grid Dimensions
//!
//! The reference playfield is 8 columns by 6 rows:
//!
//! - **Width**: 8 columns (indexed 0-7, left to right)
//! - **Height**: 6 rows (indexed 0-5, top to bottom)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SETTLE_DELAY_MS` | 500 | Pause before a swap is reverted or its matches removed |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Color, Coord, Direction, GameAction};
//!
//! // Parse a color (case-insensitive)
//! assert_eq!(Color::from_str("RED"), Some(Color::Red));
//!
//! // Step to a neighbor
//! let c = Coord::new(1, 0);
//! assert_eq!(c.offset(Direction::Left), Some(Coord::new(0, 0)));
//! assert_eq!(c.offset(Direction::Up), None);
//!
//! // Parse game action
//! assert_eq!(GameAction::from_str("select"), Some(GameAction::Select));
//! ```

use std::fmt;

/// Default grid width in tiles (8 columns)
pub const DEFAULT_WIDTH: u16 = 8;

/// Default grid height in tiles (6 rows)
pub const DEFAULT_HEIGHT: u16 = 6;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Settle delay after a swap (500ms)
pub const SETTLE_DELAY_MS: u32 = 500;

/// Minimum run length that counts as a match
pub const MATCH_LEN: usize = 3;


/// Tile colors available to the generator
///
/// The reference palette uses the first three (Red, Blue, Green); the others
/// let a host widen the palette without changing the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl Color {
    /// Every color, in declaration order
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
    ];

    /// Parse color from string (case-insensitive, surrounding whitespace ignored)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::Color;
    ///
    /// assert_eq!(Color::from_str("red"), Some(Color::Red));
    /// assert_eq!(Color::from_str("Green"), Some(Color::Green));
    /// assert_eq!(Color::from_str("teal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "purple" => Some(Color::Purple),
            "orange" => Some(Color::Orange),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Orange => "orange",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid coordinate
///
/// `x` grows to the right, `y` grows downward. Whether a coordinate is in
/// bounds depends on the grid it is used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

impl Coord {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Neighbor one step in `dir`, or `None` if it would be negative
    ///
    /// The upper bound is not checked here; the grid rejects it.
    pub fn offset(self, dir: Direction) -> Option<Coord> {
        match dir {
            Direction::Left => self.x.checked_sub(1).map(|x| Coord::new(x, self.y)),
            Direction::Right => self.x.checked_add(1).map(|x| Coord::new(x, self.y)),
            Direction::Up => self.y.checked_sub(1).map(|y| Coord::new(self.x, y)),
            Direction::Down => self.y.checked_add(1).map(|y| Coord::new(self.x, y)),
        }
    }

    /// True when `other` is an orthogonal neighbor
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Stable identity of a tile for its lifetime on one grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Orthogonal step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Game actions produced by input and applied by the host loop
///
/// The grid engine itself only understands swap requests; these actions
/// drive the cursor/selection model that produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cursor one tile
    Cursor(Direction),
    /// Select the tile under the cursor, or swap with the previous selection
    Select,
    /// Drop the current selection
    Cancel,
    /// Toggle the game-active signal
    Pause,
    /// Regenerate the grid
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("cursorLeft"), Some(GameAction::Cursor(Direction::Left)));
    /// assert_eq!(GameAction::from_str("pause"), Some(GameAction::Pause));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorleft" => Some(GameAction::Cursor(Direction::Left)),
            "cursorright" => Some(GameAction::Cursor(Direction::Right)),
            "cursorup" => Some(GameAction::Cursor(Direction::Up)),
            "cursordown" => Some(GameAction::Cursor(Direction::Down)),
            "select" => Some(GameAction::Select),
            "cancel" => Some(GameAction::Cancel),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Cursor(Direction::Left) => "cursorLeft",
            GameAction::Cursor(Direction::Right) => "cursorRight",
            GameAction::Cursor(Direction::Up) => "cursorUp",
            GameAction::Cursor(Direction::Down) => "cursorDown",
            GameAction::Select => "select",
            GameAction::Cancel => "cancel",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Presentation-only placement of tiles in world units
///
/// The engine never reads this; hosts use it to turn grid coordinates into
/// positions. The grid is centered on the origin using integer halving of the
/// dimensions, so odd sizes lean one tile to the positive side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileLayout {
    pub tile_w: f32,
    pub tile_h: f32,
    pub spacing: f32,
}

impl Default for TileLayout {
    fn default() -> Self {
        Self {
            tile_w: 1.0,
            tile_h: 1.0,
            spacing: 0.0,
        }
    }
}

impl TileLayout {
    /// World position of the tile center at `coord` on a `width` x `height` grid
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::{Coord, TileLayout};
    ///
    /// let layout = TileLayout::default();
    /// assert_eq!(layout.world_position(Coord::new(0, 0), 8, 6), (-4.0, -3.0));
    /// assert_eq!(layout.world_position(Coord::new(7, 5), 8, 6), (3.0, 2.0));
    /// ```
    pub fn world_position(&self, coord: Coord, width: u16, height: u16) -> (f32, f32) {
        let step_x = self.tile_w + self.spacing;
        let step_y = self.tile_h + self.spacing;
        let start_x = -f32::from(width / 2) * step_x;
        let start_y = -f32::from(height / 2) * step_y;
        (
            start_x + f32::from(coord.x) * step_x,
            start_y + f32::from(coord.y) * step_y,
        )
    }
}
