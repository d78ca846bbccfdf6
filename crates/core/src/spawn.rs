//! Spawner - places a new tile into a uniformly chosen empty cell
//!
//! The cell is drawn first, then (for chance draws) the tile. Both use the session's
//! single [`SimpleRng`], which keeps replays deterministic.

use arrayvec::ArrayVec;

use crate::error::EngineError;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::types::{GameMode, Tile, GRID_CELLS, GRID_SIZE};

/// Which tile a spawn may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    /// Always a rank-1 numeric tile
    Number,
    /// Always a bomb (start of a Bomb-mode session only)
    Bomb,
    /// 10% rank-2, otherwise 10% chance tile, otherwise rank-1
    Chance,
}

impl SpawnKind {
    /// Spawn kind used after an effective move in `mode`.
    pub fn for_turn(mode: GameMode) -> Self {
        if mode.spawns_chance_tiles() {
            SpawnKind::Chance
        } else {
            SpawnKind::Number
        }
    }
}

/// Where a tile was placed and what it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub row: usize,
    pub col: usize,
    pub tile: Tile,
}

/// Place one tile of `kind` into a random empty cell.
///
/// Returns [`EngineError::GridFull`] without touching the grid or the RNG when
/// there is no empty cell.
pub fn spawn_tile(
    grid: &mut Grid,
    kind: SpawnKind,
    rng: &mut SimpleRng,
) -> Result<Spawned, EngineError> {
    let empties: ArrayVec<usize, GRID_CELLS> = grid
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, tile)| tile.is_empty())
        .map(|(idx, _)| idx)
        .collect();

    if empties.is_empty() {
        return Err(EngineError::GridFull);
    }

    let idx = empties[rng.next_range(empties.len() as u32) as usize];
    let tile = match kind {
        SpawnKind::Number => Tile::Numeric(1),
        SpawnKind::Bomb => Tile::Bomb,
        SpawnKind::Chance => draw_chance_tile(rng),
    };

    let (row, col) = (idx / GRID_SIZE, idx % GRID_SIZE);
    grid.set(row, col, tile);
    tracing::trace!(row, col, ?tile, "spawned tile");
    Ok(Spawned { row, col, tile })
}

fn draw_chance_tile(rng: &mut SimpleRng) -> Tile {
    if rng.next_range(10) < 1 {
        Tile::Numeric(2)
    } else if rng.next_range(10) == 9 {
        Tile::Chance
    } else {
        Tile::Numeric(1)
    }
}
