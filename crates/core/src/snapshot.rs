//! Plain-data views of a session: save state, render frame and end-of-game summary.

use std::time::Duration;

use crate::grid::Grid;
use crate::types::{rank_value, GameMode, Outcome};

/// The (turns, score, grid) triple held by the undo slot and written to save files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SavedState {
    pub turns: u32,
    pub score: u32,
    pub grid: Grid,
}

/// Everything a render sink needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub turns: u32,
    pub score: u32,
    pub mode: GameMode,
    pub elapsed: Duration,
    pub can_undo: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: Grid::new(),
            turns: 0,
            score: 0,
            mode: GameMode::Normal,
            elapsed: Duration::ZERO,
            can_undo: false,
        }
    }
}

/// Final figures reported once when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub outcome: Outcome,
    pub mode: GameMode,
    pub score: u32,
    pub turns: u32,
    pub elapsed: Duration,
    pub max_rank: u8,
}

impl GameSummary {
    /// Displayed value of the largest numeric tile (1 on a grid with no numbers).
    pub fn max_tile_value(&self) -> u32 {
        rank_value(self.max_rank)
    }
}
