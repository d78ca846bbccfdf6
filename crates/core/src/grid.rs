//! Grid module - manages the 4x4 tile grid
//!
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where row ranges 0..3 (top to bottom), col ranges 0..3 (left to right).

use crate::types::{Tile, GRID_CELLS, GRID_SIZE};

/// The game grid - 4 rows x 4 columns using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * GRID_SIZE + col)
    cells: [Tile; GRID_CELLS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Tile::Empty; GRID_CELLS],
        }
    }

    /// Build a grid from row arrays.
    pub fn from_rows(rows: [[Tile; GRID_SIZE]; GRID_SIZE]) -> Self {
        let mut cells = [Tile::Empty; GRID_CELLS];
        for (r, row) in rows.iter().enumerate() {
            cells[r * GRID_SIZE..(r + 1) * GRID_SIZE].copy_from_slice(row);
        }
        Self { cells }
    }

    /// Copy the grid out as row arrays.
    pub fn to_rows(&self) -> [[Tile; GRID_SIZE]; GRID_SIZE] {
        let mut rows = [[Tile::Empty; GRID_SIZE]; GRID_SIZE];
        for (r, row) in rows.iter_mut().enumerate() {
            row.copy_from_slice(self.row(r));
        }
        rows
    }

    #[inline(always)]
    fn index(row: usize, col: usize) -> Option<usize> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        Some(row * GRID_SIZE + col)
    }

    /// Get tile at (row, col). Returns None if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set tile at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: usize, col: usize, tile: Tile) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = tile;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, row: usize) -> &[Tile] {
        &self.cells[row * GRID_SIZE..(row + 1) * GRID_SIZE]
    }

    /// Mutable views of every row, top to bottom.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Tile]> {
        self.cells.chunks_exact_mut(GRID_SIZE)
    }

    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Number of non-empty cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|t| !t.is_empty()).count()
    }

    pub fn empty_count(&self) -> usize {
        GRID_CELLS - self.tile_count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|t| !t.is_empty())
    }

    /// Highest numeric rank on the grid (0 when there is none).
    ///
    /// Bomb and chance tiles are not numbers and never count.
    pub fn max_rank(&self) -> u8 {
        self.cells
            .iter()
            .filter_map(Tile::numeric_rank)
            .max()
            .unwrap_or(0)
    }

    /// Rotate the grid 90° clockwise: `new[r][c] = old[N-1-c][r]`.
    pub fn rotate_clockwise(&mut self) {
        let old = self.cells;
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                self.cells[r * GRID_SIZE + c] = old[(GRID_SIZE - 1 - c) * GRID_SIZE + r];
            }
        }
    }

    /// Rotate clockwise `turns` times (taken modulo 4).
    pub fn rotate_clockwise_times(&mut self, turns: usize) {
        for _ in 0..turns % 4 {
            self.rotate_clockwise();
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(Tile::Empty);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
