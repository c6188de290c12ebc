//! Core grid engine - pure, deterministic with a seed, and testable
//!
//! This crate contains the match-3 rules: tile placement, swap validation,
//! match detection, delayed removal and color-constrained generation.
//! It has **no dependencies** on rendering, input, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces the same grid
//! - **Testable**: Every transition is reachable from plain unit tests
//! - **Portable**: Any host loop can drive it by calling `tick`
//!
//! # Module Structure
//!
//! - [`grid`]: The tile table and its coordinate invariants
//! - [`tile`]: A tile's identity, color and position
//! - [`palette`]: Color palette and neighbor-aware color picking
//! - [`matcher`]: Three-in-a-row window scan
//! - [`swap`]: Swap / settle state machine and presentation events
//! - [`snapshot`]: Render-ready copy of the coordinator state
//!
//! # Rules
//!
//! - **Generation**: No tile completes a run with the two tiles left of it or
//!   the two tiles above it
//! - **Matching**: Any three consecutive same-colored tiles in a row or column;
//!   longer runs are covered by overlapping windows
//! - **Settle delay**: 500ms after a swap before the matched tiles disappear or
//!   the swap is undone; new swaps are ignored meanwhile
//! - **No gravity**: Removed tiles leave empty slots
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{ColorPalette, GridState, SwapCoordinator, SwapOutcome, SettleResult};
//! use tui_match3_types::{Color, Coord, SETTLE_DELAY_MS};
//!
//! let grid = GridState::from_rows(&[[Some(Color::Red), Some(Color::Red), Some(Color::Blue), Some(Color::Red)]]).unwrap();
//! let mut game = SwapCoordinator::new(grid, ColorPalette::classic(), true);
//!
//! // Bring the last red next to the others
//! let outcome = game.request_swap(Coord::new(2, 0), Coord::new(3, 0)).unwrap();
//! assert_eq!(outcome, SwapOutcome::Matched { tiles: 3 });
//!
//! // After the settle delay the run is gone
//! let fired = game.tick(SETTLE_DELAY_MS).unwrap();
//! assert_eq!(fired, Some(SettleResult::Removed(3)));
//! assert_eq!(game.grid().occupied_count(), 1);
//! ```

pub mod error;
pub mod grid;
pub mod matcher;
pub mod palette;
pub mod snapshot;
pub mod swap;
pub mod tile;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use error::GridError;
pub use grid::GridState;
pub use matcher::{find_matches, has_match, MatchSet};
pub use palette::{pick_color, ColorPalette};
pub use snapshot::{CellSnapshot, GridSnapshot};
pub use swap::{
    GameActivity, GridEvent, PendingKind, RejectReason, SettleResult, SwapCoordinator,
    SwapOutcome, SwapState,
};
pub use tile::Tile;
