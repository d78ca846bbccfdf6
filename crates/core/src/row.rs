//! Row transforms - the leaf algorithm behind every move
//!
//! A left move is `deflate`, `combine`, `deflate` on each row. The other directions
//! rotate the grid first (see [`crate::engine`]).

use crate::types::{rank_value, Tile, CHANCE_PAIR_SCORE};

/// Outcome of a single [`combine`] pass over one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CombineResult {
    pub merged: bool,
    /// Points earned by the merges in this pass
    pub score: u32,
}

/// Left-pack the non-empty tiles of `row`, preserving their order.
///
/// Returns true if any tile moved. Deflating an already packed row is a no-op.
pub fn deflate(row: &mut [Tile]) -> bool {
    let mut write = 0;
    let mut changed = false;
    for read in 0..row.len() {
        if row[read].is_empty() {
            continue;
        }
        if read != write {
            row[write] = row[read];
            row[read] = Tile::Empty;
            changed = true;
        }
        write += 1;
    }
    changed
}

/// Merge rule for a left/right neighbour pair.
///
/// Returns the tile that replaces `left` and the points earned, or `None` when the
/// pair does not merge. Bombs never merge and empty cells merge with nothing.
pub fn merge(left: Tile, right: Tile) -> Option<(Tile, u32)> {
    match (left, right) {
        (Tile::Chance, Tile::Chance) => Some((Tile::Numeric(2), CHANCE_PAIR_SCORE)),
        (Tile::Numeric(a), Tile::Numeric(b)) if a == b => Some(promote(a)),
        (Tile::Chance, Tile::Numeric(r)) | (Tile::Numeric(r), Tile::Chance) => Some(promote(r)),
        _ => None,
    }
}

fn promote(rank: u8) -> (Tile, u32) {
    let next = rank.saturating_add(1);
    (Tile::Numeric(next), rank_value(next))
}

/// One left-to-right merge sweep.
///
/// Each merged pair lands at the left index and empties the right one, so a tile made in
/// this pass faces an empty cell next and cannot merge again.
pub fn combine(row: &mut [Tile]) -> CombineResult {
    let mut result = CombineResult::default();
    for i in 1..row.len() {
        if let Some((tile, score)) = merge(row[i - 1], row[i]) {
            row[i - 1] = tile;
            row[i] = Tile::Empty;
            result.merged = true;
            result.score = result.score.saturating_add(score);
        }
    }
    result
}
