//! Swap coordinator tests - the swap / settle protocol end to end

use tui_match3::core::{
    find_matches, ColorPalette, GridEvent, GridState, PendingKind, RejectReason, SettleResult,
    SwapCoordinator, SwapOutcome, SwapState,
};
use tui_match3::types::{Color, Coord, TileId, SETTLE_DELAY_MS};

use Color::{Blue, Green, Red};

fn row_game(colors: &[Color]) -> SwapCoordinator {
    let cells: Vec<Option<Color>> = colors.iter().copied().map(Some).collect();
    let grid = GridState::from_rows(&[cells]).unwrap();
    SwapCoordinator::new(grid, ColorPalette::classic(), true)
}

fn row_colors(game: &SwapCoordinator) -> Vec<Option<Color>> {
    (0..game.grid().width())
        .map(|x| game.grid().color_at(Coord::new(x, 0)))
        .collect()
}

fn row_ids(game: &SwapCoordinator) -> Vec<Option<TileId>> {
    (0..game.grid().width())
        .map(|x| game.grid().get(Coord::new(x, 0)).unwrap().map(|t| t.id()))
        .collect()
}

#[test]
fn unmatched_swap_is_visible_then_reverted() {
    let mut game = row_game(&[Red, Red, Blue, Green, Green]);
    let ids_before = row_ids(&game);

    let outcome = game.request_swap(Coord::new(1, 0), Coord::new(2, 0)).unwrap();
    assert_eq!(outcome, SwapOutcome::RevertPending);
    assert_eq!(
        row_colors(&game),
        vec![Some(Red), Some(Blue), Some(Red), Some(Green), Some(Green)]
    );
    assert_eq!(game.state(), SwapState::Settling);
    assert_eq!(game.pending(), Some(PendingKind::Revert));

    let fired = game.tick(SETTLE_DELAY_MS).unwrap();
    assert_eq!(fired, Some(SettleResult::Revert(SwapOutcome::Reverted)));
    assert_eq!(
        row_colors(&game),
        vec![Some(Red), Some(Red), Some(Blue), Some(Green), Some(Green)]
    );
    assert_eq!(row_ids(&game), ids_before);
    assert_eq!(game.state(), SwapState::Idle);

    // The revert does not schedule another revert.
    assert_eq!(game.tick(SETTLE_DELAY_MS).unwrap(), None);
}

#[test]
fn matched_swap_removes_run_after_delay() {
    let mut game = row_game(&[Red, Red, Blue, Red]);

    let outcome = game.request_swap(Coord::new(2, 0), Coord::new(3, 0)).unwrap();
    assert_eq!(outcome, SwapOutcome::Matched { tiles: 3 });
    assert_eq!(game.pending(), Some(PendingKind::Removal));

    let matches = find_matches(game.grid());
    let coords: Vec<Coord> = matches.coords().collect();
    assert_eq!(
        coords,
        vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]
    );

    // Still present until the delay elapses.
    assert_eq!(game.tick(SETTLE_DELAY_MS - 1).unwrap(), None);
    assert_eq!(game.grid().occupied_count(), 4);

    assert_eq!(game.tick(1).unwrap(), Some(SettleResult::Removed(3)));
    assert_eq!(row_colors(&game), vec![None, None, None, Some(Blue)]);
    assert_eq!(game.state(), SwapState::Idle);
}

#[test]
fn removal_emits_one_event_per_destroyed_tile() {
    let mut game = row_game(&[Red, Red, Blue, Red]);
    game.request_swap(Coord::new(2, 0), Coord::new(3, 0)).unwrap();

    let events = game.take_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        GridEvent::TilesSwapped {
            a,
            b,
            now_at_a: Some(_),
            now_at_b: Some(_),
        } if a == Coord::new(2, 0) && b == Coord::new(3, 0)
    ));

    let doomed: Vec<(TileId, Coord)> = find_matches(game.grid())
        .tiles()
        .map(|t| (t.id(), t.coord()))
        .collect();
    game.tick(SETTLE_DELAY_MS).unwrap();

    let destroyed: Vec<(TileId, Coord)> = game
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            GridEvent::TileDestroyed { id, coord } => Some((id, coord)),
            _ => None,
        })
        .collect();
    assert_eq!(destroyed, doomed);
}

#[test]
fn swaps_are_rejected_while_settling() {
    let mut game = row_game(&[Red, Red, Blue, Green, Green]);
    game.request_swap(Coord::new(1, 0), Coord::new(2, 0)).unwrap();
    let during = game.grid().clone();

    let outcome = game.request_swap(Coord::new(3, 0), Coord::new(4, 0)).unwrap();
    assert_eq!(outcome, SwapOutcome::Rejected(RejectReason::Settling));
    assert!(outcome.is_rejected());
    assert_eq!(game.grid(), &during);

    // Rejected requests do not extend the settle timer.
    game.tick(SETTLE_DELAY_MS).unwrap();
    assert_eq!(game.state(), SwapState::Idle);
}

#[test]
fn swaps_are_rejected_while_game_inactive() {
    let mut game = row_game(&[Red, Blue, Green]);
    *game.activity_mut() = false;
    let before = game.grid().clone();

    let outcome = game.request_swap(Coord::new(0, 0), Coord::new(1, 0)).unwrap();
    assert_eq!(outcome, SwapOutcome::Rejected(RejectReason::GameInactive));
    assert_eq!(game.grid(), &before);
    assert_eq!(game.state(), SwapState::Idle);
    assert!(game.take_events().is_empty());
}

#[test]
fn revert_is_dropped_if_game_stops_during_settle() {
    let mut game = row_game(&[Red, Red, Blue, Green, Green]);
    game.request_swap(Coord::new(1, 0), Coord::new(2, 0)).unwrap();
    *game.activity_mut() = false;

    let fired = game.tick(SETTLE_DELAY_MS).unwrap();
    assert_eq!(
        fired,
        Some(SettleResult::Revert(SwapOutcome::Rejected(
            RejectReason::GameInactive
        )))
    );
    assert_eq!(game.state(), SwapState::Idle);
    assert_eq!(
        row_colors(&game),
        vec![Some(Red), Some(Blue), Some(Red), Some(Green), Some(Green)]
    );
}

#[test]
fn removal_still_fires_when_game_stops_during_settle() {
    let mut game = row_game(&[Red, Red, Blue, Red]);
    game.request_swap(Coord::new(2, 0), Coord::new(3, 0)).unwrap();
    *game.activity_mut() = false;

    assert_eq!(
        game.tick(SETTLE_DELAY_MS).unwrap(),
        Some(SettleResult::Removed(3))
    );
}

#[test]
fn out_of_bounds_swap_is_an_error_without_side_effects() {
    let mut game = row_game(&[Red, Blue, Green]);
    let before = game.grid().clone();

    assert!(game.request_swap(Coord::new(2, 0), Coord::new(3, 0)).is_err());
    assert_eq!(game.grid(), &before);
    assert_eq!(game.state(), SwapState::Idle);
    assert!(game.take_events().is_empty());
}

#[test]
fn revert_that_reforms_a_match_schedules_removal() {
    // The swap breaks an existing run; undoing it restores the run.
    let mut game = row_game(&[Red, Red, Red, Blue]);

    let outcome = game.request_swap(Coord::new(2, 0), Coord::new(3, 0)).unwrap();
    assert_eq!(outcome, SwapOutcome::RevertPending);

    let fired = game.tick(SETTLE_DELAY_MS).unwrap();
    assert_eq!(
        fired,
        Some(SettleResult::Revert(SwapOutcome::Matched { tiles: 3 }))
    );
    assert_eq!(game.state(), SwapState::Settling);
    assert_eq!(game.pending(), Some(PendingKind::Removal));

    assert_eq!(
        game.tick(SETTLE_DELAY_MS).unwrap(),
        Some(SettleResult::Removed(3))
    );
    assert_eq!(row_colors(&game), vec![None, None, None, Some(Blue)]);
}

#[test]
fn tile_coordinates_track_their_slots_across_swaps() {
    let mut game = row_game(&[Red, Blue, Green, Red, Blue]);
    for (a, b) in [(0, 1), (3, 4), (1, 2)] {
        game.request_swap(Coord::new(a, 0), Coord::new(b, 0)).unwrap();
        game.tick(SETTLE_DELAY_MS).unwrap();
        game.tick(SETTLE_DELAY_MS).unwrap();
        for tile in game.grid().tiles() {
            assert_eq!(game.grid().position_of(tile.id()), Some(tile.coord()));
            assert_eq!(game.grid().get(tile.coord()).unwrap(), Some(tile));
        }
    }
}

#[test]
fn swap_removes_matches_anywhere_on_the_grid() {
    // Before the swap the grid already contains a run at row 2. A swap
    // elsewhere finds that run and schedules its removal.
    let grid = GridState::from_rows(&[
        [Some(Red), Some(Blue), Some(Red)],
        [Some(Blue), Some(Red), Some(Blue)],
        [Some(Green), Some(Green), Some(Green)],
    ])
    .unwrap();
    let mut game = SwapCoordinator::new(grid, ColorPalette::classic(), true);

    let outcome = game.request_swap(Coord::new(0, 0), Coord::new(1, 0)).unwrap();
    assert_eq!(outcome, SwapOutcome::Matched { tiles: 3 });

    game.tick(SETTLE_DELAY_MS).unwrap();
    for x in 0..3 {
        assert_eq!(game.grid().get(Coord::new(x, 2)).unwrap(), None);
    }
    // The swapped tiles stay where they were moved.
    assert_eq!(game.grid().color_at(Coord::new(0, 0)), Some(Blue));
    assert_eq!(game.grid().color_at(Coord::new(1, 0)), Some(Red));
}

#[test]
fn snapshot_reflects_pending_state() {
    let mut game = row_game(&[Red, Red, Blue, Green, Green]);
    game.request_swap(Coord::new(1, 0), Coord::new(2, 0)).unwrap();
    game.tick(100).unwrap();

    let snap = game.snapshot();
    assert_eq!(snap.width, 5);
    assert_eq!(snap.height, 1);
    assert_eq!(snap.state, SwapState::Settling);
    assert_eq!(snap.pending, Some(PendingKind::Revert));
    assert_eq!(snap.settle_remaining_ms, SETTLE_DELAY_MS - 100);
    assert_eq!(snap.cell(1, 0).map(|c| c.color), Some(Blue));
    assert!(!snap.playable());
}

#[test]
fn swaps_into_holes_are_rejected() {
    let grid = GridState::from_rows(&[[Some(Red), Some(Red), None, Some(Red)]]).unwrap();
    let mut game = SwapCoordinator::new(grid, ColorPalette::classic(), true);
    let before = game.grid().clone();

    let outcome = game.request_swap(Coord::new(2, 0), Coord::new(3, 0)).unwrap();
    assert_eq!(outcome, SwapOutcome::Rejected(RejectReason::EmptySlot));
    assert_eq!(game.grid(), &before);
    assert_eq!(game.state(), SwapState::Idle);
    assert!(game.take_events().is_empty());
}

#[test]
fn holes_left_by_removal_cannot_be_swapped_into() {
    let mut game = row_game(&[Red, Red, Blue, Red, Green]);
    game.request_swap(Coord::new(2, 0), Coord::new(3, 0)).unwrap();
    game.tick(SETTLE_DELAY_MS).unwrap();
    assert_eq!(row_colors(&game), vec![None, None, None, Some(Blue), Some(Green)]);

    let outcome = game.request_swap(Coord::new(3, 0), Coord::new(2, 0)).unwrap();
    assert_eq!(outcome, SwapOutcome::Rejected(RejectReason::EmptySlot));
    assert_eq!(game.grid().color_at(Coord::new(3, 0)), Some(Blue));
}
