//! Swap coordinator - ties the grid, the match scan and the settle timer together
//!
//! A swap request is applied to the grid immediately. The whole grid is then
//! scanned: if anything matches, the matched tiles are removed once the settle
//! delay elapses; if nothing matches, the swap is undone after the same delay.
//! While an outcome is pending the coordinator is `Settling` and ignores new
//! swap requests.
//!
//! Time is abstract: the host calls [`SwapCoordinator::tick`] with elapsed
//! milliseconds, the same way it drives any other timed game state.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::error::GridError;
use crate::grid::GridState;
use crate::matcher::find_matches;
use crate::palette::ColorPalette;
use crate::snapshot::{CellSnapshot, GridSnapshot};
use crate::tile::Tile;
use crate::types::{Coord, TileId, SETTLE_DELAY_MS};

/// External "is the game running" signal
///
/// Swap requests (including automatic reverts) are silently rejected while
/// this reports false.
pub trait GameActivity {
    fn is_game_active(&self) -> bool;
}

impl GameActivity for bool {
    fn is_game_active(&self) -> bool {
        *self
    }
}

impl GameActivity for Rc<Cell<bool>> {
    fn is_game_active(&self) -> bool {
        self.get()
    }
}

impl GameActivity for Arc<AtomicBool> {
    fn is_game_active(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

/// Whether a new swap may begin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapState {
    Idle,
    Settling,
}

/// Kind of deferred action waiting on the settle timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    Revert,
    Removal,
}

/// Why a swap request was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A previous swap's outcome is still pending
    Settling,
    /// The game-active signal is false
    GameInactive,
    /// One of the two slots holds no tile
    EmptySlot,
}

/// Result of a swap request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Nothing happened
    Rejected(RejectReason),
    /// Tiles were exchanged and `tiles` matched tiles await removal
    Matched { tiles: usize },
    /// Tiles were exchanged, nothing matched, the swap will be undone
    RevertPending,
    /// An automatic revert was applied and nothing matched
    Reverted,
}

impl SwapOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, SwapOutcome::Rejected(_))
    }
}

/// What a settle timer did when it fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleResult {
    /// The revert swap was requested; carries its outcome
    Revert(SwapOutcome),
    /// This many tiles were destroyed
    Removed(usize),
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// Occupants of `a` and `b` were exchanged; ids are the new occupants
    TilesSwapped {
        a: Coord,
        b: Coord,
        now_at_a: Option<TileId>,
        now_at_b: Option<TileId>,
    },
    /// A matched tile was removed from the grid
    TileDestroyed { id: TileId, coord: Coord },
    /// Every slot was refilled with new tiles
    Regenerated,
}

#[derive(Debug, Clone, PartialEq)]
enum SettleAction {
    Revert { a: Coord, b: Coord },
    Removal { tiles: Vec<Tile> },
}

impl SettleAction {
    fn kind(&self) -> PendingKind {
        match self {
            SettleAction::Revert { .. } => PendingKind::Revert,
            SettleAction::Removal { .. } => PendingKind::Removal,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Settling {
        remaining_ms: u32,
        action: SettleAction,
    },
}

/// Owns the grid and enforces the swap / settle protocol
#[derive(Debug)]
pub struct SwapCoordinator<A: GameActivity = bool> {
    grid: GridState,
    palette: ColorPalette,
    rng: StdRng,
    activity: A,
    settle_delay_ms: u32,
    phase: Phase,
    events: Vec<GridEvent>,
}

impl<A: GameActivity> SwapCoordinator<A> {
    /// Wrap an existing grid
    pub fn new(grid: GridState, palette: ColorPalette, activity: A) -> Self {
        Self {
            grid,
            palette,
            rng: StdRng::from_os_rng(),
            activity,
            settle_delay_ms: SETTLE_DELAY_MS,
            phase: Phase::Idle,
            events: Vec::new(),
        }
    }

    /// Generate a fresh match-free grid
    ///
    /// With `seed` set, generation (and later regenerations) are reproducible.
    pub fn generate(
        width: u16,
        height: u16,
        palette: ColorPalette,
        activity: A,
        seed: Option<u64>,
    ) -> Result<Self, GridError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let grid = GridState::generate(width, height, &palette, &mut rng)?;
        Ok(Self {
            rng,
            ..Self::new(grid, palette, activity)
        })
    }

    /// Override the settle delay (default [`SETTLE_DELAY_MS`])
    pub fn with_settle_delay(mut self, settle_delay_ms: u32) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn activity(&self) -> &A {
        &self.activity
    }

    pub fn activity_mut(&mut self) -> &mut A {
        &mut self.activity
    }

    pub fn settle_delay_ms(&self) -> u32 {
        self.settle_delay_ms
    }

    pub fn state(&self) -> SwapState {
        match self.phase {
            Phase::Idle => SwapState::Idle,
            Phase::Settling { .. } => SwapState::Settling,
        }
    }

    pub fn is_settling(&self) -> bool {
        self.state() == SwapState::Settling
    }

    /// Kind of the pending deferred action, if any
    pub fn pending(&self) -> Option<PendingKind> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Settling { action, .. } => Some(action.kind()),
        }
    }

    /// Time left before the pending action fires
    pub fn settle_remaining_ms(&self) -> Option<u32> {
        match self.phase {
            Phase::Idle => None,
            Phase::Settling { remaining_ms, .. } => Some(remaining_ms),
        }
    }

    /// Take all buffered presentation events
    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    /// Request that the tiles at `a` and `b` trade places
    ///
    /// Both slots must hold a tile. Rejections are not errors; only an
    /// out-of-bounds coordinate is.
    pub fn request_swap(&mut self, a: Coord, b: Coord) -> Result<SwapOutcome, GridError> {
        self.swap_tiles(a, b, false)
    }

    fn swap_tiles(&mut self, a: Coord, b: Coord, revert: bool) -> Result<SwapOutcome, GridError> {
        if self.is_settling() {
            trace!(%a, %b, revert, "swap rejected: settling");
            return Ok(SwapOutcome::Rejected(RejectReason::Settling));
        }
        if !self.activity.is_game_active() {
            trace!(%a, %b, revert, "swap rejected: game inactive");
            return Ok(SwapOutcome::Rejected(RejectReason::GameInactive));
        }

        let (Some(first), Some(second)) = (self.grid.get(a)?, self.grid.get(b)?) else {
            trace!(%a, %b, revert, "swap rejected: empty slot");
            return Ok(SwapOutcome::Rejected(RejectReason::EmptySlot));
        };
        let (now_at_a, now_at_b) = (Some(second.id()), Some(first.id()));

        self.grid.swap(a, b)?;
        self.events.push(GridEvent::TilesSwapped {
            a,
            b,
            now_at_a,
            now_at_b,
        });
        debug!(%a, %b, revert, "swap committed");

        let matches = find_matches(&self.grid);
        if !matches.is_empty() {
            let tiles: Vec<Tile> = matches.tiles().copied().collect();
            let count = tiles.len();
            debug!(matched = count, "removal scheduled");
            self.schedule(SettleAction::Removal { tiles });
            return Ok(SwapOutcome::Matched { tiles: count });
        }

        if revert {
            return Ok(SwapOutcome::Reverted);
        }

        debug!(%a, %b, "no match, revert scheduled");
        // Undo swaps the same two slots back: tile B returns to b, tile A to a.
        self.schedule(SettleAction::Revert { a: b, b: a });
        Ok(SwapOutcome::RevertPending)
    }

    fn schedule(&mut self, action: SettleAction) {
        self.phase = Phase::Settling {
            remaining_ms: self.settle_delay_ms,
            action,
        };
    }

    /// Advance the settle timer
    ///
    /// When the timer expires the coordinator becomes `Idle` first and then
    /// runs the pending action, which may itself schedule a new one (a revert
    /// that re-forms a match schedules its removal).
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<Option<SettleResult>, GridError> {
        let Phase::Settling { remaining_ms, .. } = &mut self.phase else {
            return Ok(None);
        };

        *remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
        if *remaining_ms > 0 {
            return Ok(None);
        }

        let Phase::Settling { action, .. } = std::mem::replace(&mut self.phase, Phase::Idle)
        else {
            return Ok(None);
        };

        match action {
            SettleAction::Revert { a, b } => {
                debug!(%a, %b, "settle expired: reverting");
                let outcome = self.swap_tiles(a, b, true)?;
                Ok(Some(SettleResult::Revert(outcome)))
            }
            SettleAction::Removal { tiles } => {
                let removed = self.remove_tiles(&tiles)?;
                debug!(removed, "settle expired: tiles removed");
                Ok(Some(SettleResult::Removed(removed)))
            }
        }
    }

    /// Clear each tile's slot if it still holds that tile
    fn remove_tiles(&mut self, tiles: &[Tile]) -> Result<usize, GridError> {
        let mut removed = 0;
        for tile in tiles {
            let coord = tile.coord();
            let still_there = self.grid.get(coord)?.is_some_and(|t| t.id() == tile.id());
            if !still_there {
                trace!(id = %tile.id(), %coord, "stale removal skipped");
                continue;
            }
            self.grid.clear(coord)?;
            self.events.push(GridEvent::TileDestroyed { id: tile.id(), coord });
            removed += 1;
        }
        Ok(removed)
    }

    /// Refill the whole grid with new, match-free tiles
    ///
    /// Returns `Rejected(Settling)` while an outcome is pending.
    pub fn regenerate(&mut self) -> Result<Option<RejectReason>, GridError> {
        if self.is_settling() {
            return Ok(Some(RejectReason::Settling));
        }
        self.grid.fill(&self.palette, &mut self.rng)?;
        self.events.push(GridEvent::Regenerated);
        debug!(
            width = self.grid.width(),
            height = self.grid.height(),
            "grid regenerated"
        );
        Ok(None)
    }

    /// Render-ready copy of the current state
    pub fn snapshot(&self) -> GridSnapshot {
        let mut snap = GridSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill an existing snapshot, reusing its allocation
    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend(self.grid.slots().iter().map(|slot| {
            slot.map(|t| CellSnapshot {
                id: t.id(),
                color: t.color(),
            })
        }));
        out.state = self.state();
        out.pending = self.pending();
        out.settle_remaining_ms = self.settle_remaining_ms().unwrap_or(0);
        out.game_active = self.activity.is_game_active();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color::{self, *};

    fn row(colors: &[Color]) -> SwapCoordinator {
        let cells: Vec<Option<Color>> = colors.iter().copied().map(Some).collect();
        let grid = GridState::from_rows(&[cells]).unwrap();
        SwapCoordinator::new(grid, ColorPalette::classic(), true)
    }

    #[test]
    fn starts_idle() {
        let c = row(&[Red, Blue, Green]);
        assert_eq!(c.state(), SwapState::Idle);
        assert_eq!(c.pending(), None);
        assert_eq!(c.settle_remaining_ms(), None);
    }

    #[test]
    fn tick_while_idle_does_nothing() {
        let mut c = row(&[Red, Blue, Green]);
        assert_eq!(c.tick(1000), Ok(None));
        assert!(c.take_events().is_empty());
    }

    #[test]
    fn settle_timer_counts_down_before_firing() {
        let mut c = row(&[Red, Red, Blue, Green, Green]);
        c.request_swap(Coord::new(1, 0), Coord::new(2, 0)).unwrap();

        assert_eq!(c.tick(200), Ok(None));
        assert_eq!(c.settle_remaining_ms(), Some(300));
        assert_eq!(c.tick(299), Ok(None));
        assert!(c.is_settling());
        assert_eq!(
            c.tick(1),
            Ok(Some(SettleResult::Revert(SwapOutcome::Reverted)))
        );
        assert_eq!(c.state(), SwapState::Idle);
    }

    #[test]
    fn zero_delay_fires_on_next_tick() {
        let mut c = row(&[Red, Red, Blue]).with_settle_delay(0);
        assert_eq!(c.settle_delay_ms(), 0);
        c.request_swap(Coord::new(0, 0), Coord::new(2, 0)).unwrap();
        assert!(c.is_settling());
        assert!(matches!(c.tick(0), Ok(Some(_))));
    }

    #[test]
    fn shared_activity_flag_gates_swaps() {
        let flag = Rc::new(Cell::new(false));
        let grid = GridState::from_rows(&[[Some(Red), Some(Blue)]]).unwrap();
        let mut c = SwapCoordinator::new(grid, ColorPalette::classic(), Rc::clone(&flag));

        assert_eq!(
            c.request_swap(Coord::new(0, 0), Coord::new(1, 0)),
            Ok(SwapOutcome::Rejected(RejectReason::GameInactive))
        );

        flag.set(true);
        assert_eq!(
            c.request_swap(Coord::new(0, 0), Coord::new(1, 0)),
            Ok(SwapOutcome::RevertPending)
        );
    }

    #[test]
    fn atomic_activity_flag_is_read_on_each_request() {
        let flag = Arc::new(AtomicBool::new(true));
        assert!(flag.is_game_active());
        flag.store(false, Ordering::Release);
        assert!(!flag.is_game_active());
    }

    #[test]
    fn swaps_involving_empty_slots_are_rejected() {
        let grid = GridState::from_rows(&[[Some(Red), Some(Red), None, Some(Red)]]).unwrap();
        let mut c = SwapCoordinator::new(grid, ColorPalette::classic(), true);
        let before = c.grid().clone();

        assert_eq!(
            c.request_swap(Coord::new(2, 0), Coord::new(3, 0)),
            Ok(SwapOutcome::Rejected(RejectReason::EmptySlot))
        );
        assert_eq!(c.grid(), &before);
        assert_eq!(c.state(), SwapState::Idle);
        assert!(c.take_events().is_empty());
    }

    #[test]
    fn swapping_two_empty_slots_does_not_lock_input() {
        let grid = GridState::new(2, 1).unwrap();
        let mut c = SwapCoordinator::new(grid, ColorPalette::classic(), true);

        assert_eq!(
            c.request_swap(Coord::new(0, 0), Coord::new(1, 0)),
            Ok(SwapOutcome::Rejected(RejectReason::EmptySlot))
        );
        assert!(!c.is_settling());
    }

    #[test]
    fn regenerate_is_blocked_while_settling() {
        let mut c = row(&[Red, Red, Blue, Green, Green]);
        c.request_swap(Coord::new(1, 0), Coord::new(2, 0)).unwrap();
        assert_eq!(c.regenerate(), Ok(Some(RejectReason::Settling)));

        c.tick(SETTLE_DELAY_MS).unwrap();
        let before: Vec<TileId> = c.grid().tiles().map(Tile::id).collect();
        assert_eq!(c.regenerate(), Ok(None));
        let after: Vec<TileId> = c.grid().tiles().map(Tile::id).collect();
        assert_eq!(after.len(), 5);
        assert!(after.iter().all(|id| !before.contains(id)));
        assert!(find_matches(c.grid()).is_empty());
    }
}
