//! Move engine and loss detection.
//!
//! Every direction is a left slide on a rotated grid: rotate clockwise by
//! [`Direction::clockwise_turns`], run the row transforms, rotate back.

use crate::grid::Grid;
use crate::row::{combine, deflate};
use crate::types::Direction;

/// Result of sliding the grid in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    /// At least one row changed in a deflate or combine step
    pub changed: bool,
    /// Points earned by merges during the move
    pub score: u32,
}

/// Slide `grid` in `direction`.
///
/// Each row runs `deflate`, `combine`, `deflate` in that order. Turn counting and
/// spawning are the caller's job.
pub fn shift(grid: &mut Grid, direction: Direction) -> MoveResult {
    let turns = direction.clockwise_turns();
    grid.rotate_clockwise_times(turns);

    let mut result = MoveResult::default();
    for row in grid.rows_mut() {
        result.changed |= deflate(row);
        let combined = combine(row);
        result.changed |= combined.merged;
        result.score = result.score.saturating_add(combined.score);
        result.changed |= deflate(row);
    }

    grid.rotate_clockwise_times((4 - turns) % 4);
    result
}

/// True if no direction changes the grid.
///
/// Each direction is tried on its own copy; `grid` is never modified.
pub fn is_lost(grid: &Grid) -> bool {
    Direction::ALL.iter().all(|&direction| {
        let mut copy = *grid;
        !shift(&mut copy, direction).changed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;

    const E: Tile = Tile::Empty;

    fn n(rank: u8) -> Tile {
        Tile::Numeric(rank)
    }

    #[test]
    fn test_shift_left_merges_pair() {
        let mut grid = Grid::from_rows([[n(1), n(1), E, E], [E; 4], [E; 4], [E; 4]]);
        let result = shift(&mut grid, Direction::Left);
        assert_eq!(result, MoveResult { changed: true, score: 4 });
        assert_eq!(grid.row(0), &[n(2), E, E, E]);
    }

    #[test]
    fn test_shift_right_packs_toward_right_edge() {
        let mut grid = Grid::from_rows([[n(1), E, n(1), n(2)], [E; 4], [E; 4], [E; 4]]);
        let result = shift(&mut grid, Direction::Right);
        assert!(result.changed);
        assert_eq!(grid.row(0), &[E, E, n(2), n(2)]);
        assert_eq!(result.score, 4);
    }

    #[test]
    fn test_shift_up_and_down_move_columns() {
        let start = Grid::from_rows([
            [n(1), E, E, E],
            [E, E, E, E],
            [n(1), E, E, E],
            [n(2), E, E, n(3)],
        ]);

        let mut up = start;
        let result = shift(&mut up, Direction::Up);
        assert!(result.changed);
        assert_eq!(
            up.to_rows(),
            [
                [n(2), E, E, n(3)],
                [n(2), E, E, E],
                [E, E, E, E],
                [E, E, E, E],
            ]
        );

        let mut down = start;
        let result = shift(&mut down, Direction::Down);
        assert!(result.changed);
        assert_eq!(
            down.to_rows(),
            [
                [E, E, E, E],
                [E, E, E, E],
                [n(2), E, E, E],
                [n(2), E, E, n(3)],
            ]
        );
    }

    #[test]
    fn test_up_merges_toward_top() {
        let mut grid = Grid::from_rows([
            [E, E, E, E],
            [n(1), E, E, E],
            [n(1), E, E, E],
            [n(1), E, E, E],
        ]);
        shift(&mut grid, Direction::Up);
        assert_eq!(grid.get(0, 0), Some(n(2)));
        assert_eq!(grid.get(1, 0), Some(n(1)));
        assert_eq!(grid.get(2, 0), Some(E));
    }

    #[test]
    fn test_blocked_move_is_not_effective() {
        let mut grid = Grid::from_rows([[n(1), n(2), E, E], [n(3), E, E, E], [E; 4], [E; 4]]);
        let before = grid;
        let result = shift(&mut grid, Direction::Left);
        assert_eq!(result, MoveResult::default());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_full_checkerboard_is_lost() {
        let grid = Grid::from_rows([
            [n(1), n(2), n(1), n(2)],
            [n(2), n(1), n(2), n(1)],
            [n(1), n(2), n(1), n(2)],
            [n(2), n(1), n(2), n(1)],
        ]);
        let before = grid;
        assert!(is_lost(&grid));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_full_grid_with_vertical_pair_is_not_lost() {
        let grid = Grid::from_rows([
            [n(1), n(2), n(1), n(2)],
            [n(1), n(3), n(2), n(1)],
            [n(3), n(2), n(1), n(2)],
            [n(2), n(1), n(2), n(1)],
        ]);
        assert!(!is_lost(&grid));
    }

    #[test]
    fn test_full_grid_with_chance_is_not_lost() {
        let grid = Grid::from_rows([
            [n(1), n(2), n(1), n(2)],
            [n(2), Tile::Chance, n(2), n(1)],
            [n(1), n(2), n(1), n(2)],
            [n(2), n(1), n(2), n(1)],
        ]);
        assert!(!is_lost(&grid));
    }

    #[test]
    fn test_full_grid_of_bombs_is_lost() {
        let grid = Grid::from_rows([[Tile::Bomb; 4]; 4]);
        assert!(is_lost(&grid));
    }

    #[test]
    fn test_grid_with_empty_cell_is_not_lost() {
        let mut grid = Grid::from_rows([
            [n(1), n(2), n(1), n(2)],
            [n(2), n(1), n(2), n(1)],
            [n(1), n(2), n(1), n(2)],
            [n(2), n(1), n(2), n(1)],
        ]);
        grid.set(3, 3, E);
        assert!(!is_lost(&grid));
    }
}
