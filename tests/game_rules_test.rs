//! Scenario tests for the tile rules through the public API.

use tui_2048::core::{combine, deflate, is_lost, merge, shift, Grid, SavedState, Session};
use tui_2048::types::{Direction, GameAction, GameMode, Tile};

const E: Tile = Tile::Empty;
const B: Tile = Tile::Bomb;
const C: Tile = Tile::Chance;

fn n(rank: u8) -> Tile {
    Tile::Numeric(rank)
}

fn slide_row_left(row: [Tile; 4]) -> ([Tile; 4], u32) {
    let mut grid = Grid::from_rows([row, [E; 4], [E; 4], [E; 4]]);
    let result = shift(&mut grid, Direction::Left);
    (grid.to_rows()[0], result.score)
}

#[test]
fn test_pair_of_twos_merges() {
    assert_eq!(slide_row_left([n(1), n(1), E, E]), ([n(2), E, E, E], 4));
}

#[test]
fn test_chance_upgrades_neighbour() {
    assert_eq!(slide_row_left([C, n(3), E, E]), ([n(4), E, E, E], 16));
    assert_eq!(slide_row_left([n(3), C, E, E]), ([n(4), E, E, E], 16));
}

#[test]
fn test_two_chances_make_a_four() {
    assert_eq!(slide_row_left([C, C, E, E]), ([n(2), E, E, E], 4));
}

#[test]
fn test_bomb_blocks_but_survives() {
    assert_eq!(slide_row_left([B, n(1), n(1), E]), ([B, n(2), E, E], 4));
    assert_eq!(slide_row_left([B, B, E, E]), ([B, B, E, E], 0));
    assert_eq!(slide_row_left([n(2), B, n(2), E]), ([n(2), B, n(2), E], 0));
}

#[test]
fn test_merged_tile_does_not_merge_again() {
    assert_eq!(slide_row_left([n(1), n(1), n(2), E]), ([n(2), n(2), E, E], 4));
    assert_eq!(slide_row_left([n(1), n(1), n(1), n(1)]), ([n(2), n(2), E, E], 8));
}

#[test]
fn test_gap_closes_before_merge() {
    assert_eq!(slide_row_left([n(1), E, E, n(1)]), ([n(2), E, E, E], 4));
}

#[test]
fn test_merge_rules_table() {
    assert_eq!(merge(n(5), n(5)), Some((n(6), 64)));
    assert_eq!(merge(n(5), n(4)), None);
    assert_eq!(merge(C, C), Some((n(2), 4)));
    assert_eq!(merge(C, E), None);
    assert_eq!(merge(B, n(1)), None);
    assert_eq!(merge(B, C), None);
}

#[test]
fn test_row_transforms_report_changes() {
    let mut row = [E, n(1), E, n(2)];
    assert!(deflate(&mut row));
    assert_eq!(row, [n(1), n(2), E, E]);
    assert!(!combine(&mut row).merged);
}

#[test]
fn test_full_non_mergeable_grid_is_lost() {
    let grid = Grid::from_rows([
        [n(1), n(2), n(3), n(4)],
        [n(5), n(6), n(7), n(8)],
        [n(1), n(2), n(3), n(4)],
        [n(5), n(6), n(7), n(8)],
    ]);
    assert!(is_lost(&grid));

    let session = Session::restore(
        GameMode::Normal,
        1,
        SavedState {
            turns: 3,
            score: 30,
            grid,
        },
    );
    assert!(session.is_lost());
}

#[test]
fn test_bombs_count_toward_a_lost_board() {
    let grid = Grid::from_rows([
        [B, n(2), n(1), n(2)],
        [n(2), n(1), n(2), n(1)],
        [n(1), n(2), n(1), n(2)],
        [n(2), n(1), n(2), B],
    ]);
    assert!(is_lost(&grid));
}

#[test]
fn test_blocked_direction_is_not_a_turn() {
    let mut session = Session::restore(
        GameMode::Normal,
        9,
        SavedState {
            turns: 5,
            score: 12,
            grid: Grid::from_rows([[n(1), E, E, E], [n(2), E, E, E], [E; 4], [E; 4]]),
        },
    );
    let report = session.apply_input(Some(GameAction::MoveLeft));
    assert!(!report.effective);
    assert_eq!(session.turns(), 5);
    assert_eq!(session.grid().tile_count(), 2);

    let report = session.apply_input(Some(GameAction::MoveRight));
    assert!(report.effective);
    assert_eq!(session.turns(), 6);
    assert_eq!(session.grid().tile_count(), 3);
}
