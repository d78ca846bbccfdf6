//! Save-file codec.
//!
//! ```text
//! turns score
//! c c c c
//! c c c c
//! c c c c
//! c c c c
//! ```
//!
//! Each `c` is a tile code (see [`Tile::from_code`]). Blank lines are ignored. A file is
//! accepted whole or rejected whole; nothing is applied from a partial parse.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::PersistError;
use crate::grid::Grid;
use crate::snapshot::SavedState;
use crate::types::{Tile, GRID_SIZE};

/// Write `state` in save-file format.
pub fn write_state<W: Write>(state: &SavedState, out: &mut W) -> Result<(), PersistError> {
    writeln!(out, "{} {}", state.turns, state.score)?;
    for r in 0..GRID_SIZE {
        let codes: Vec<String> = state
            .grid
            .row(r)
            .iter()
            .map(|tile| tile.code().to_string())
            .collect();
        writeln!(out, "{}", codes.join(" "))?;
    }
    Ok(())
}

/// Parse a save file.
pub fn parse_state(text: &str) -> Result<SavedState, PersistError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| PersistError::malformed(1, "empty file"))?;
    let fields: Vec<&str> = header.split_whitespace().collect();
    let [turns, score] = fields.as_slice() else {
        return Err(PersistError::malformed(
            header_line,
            format!("expected `turns score`, found {} fields", fields.len()),
        ));
    };
    let turns = parse_number::<u32>(header_line, turns, "turns")?;
    let score = parse_number::<u32>(header_line, score, "score")?;

    let mut grid = Grid::new();
    let mut last_line = header_line;
    for r in 0..GRID_SIZE {
        let (line_no, line) = lines.next().ok_or_else(|| {
            PersistError::malformed(
                last_line + 1,
                format!("expected {GRID_SIZE} grid rows, found {r}"),
            )
        })?;
        last_line = line_no;

        let codes: Vec<&str> = line.split_whitespace().collect();
        if codes.len() != GRID_SIZE {
            return Err(PersistError::malformed(
                line_no,
                format!("expected {GRID_SIZE} tiles, found {}", codes.len()),
            ));
        }
        for (c, code) in codes.into_iter().enumerate() {
            let code = parse_number::<u8>(line_no, code, "tile code")?;
            let tile = Tile::from_code(code).ok_or_else(|| {
                PersistError::malformed(line_no, format!("unknown tile code {code}"))
            })?;
            grid.set(r, c, tile);
        }
    }

    if let Some((line_no, _)) = lines.next() {
        return Err(PersistError::malformed(line_no, "unexpected content after grid"));
    }

    Ok(SavedState { turns, score, grid })
}

/// Read and parse a save file from any reader.
pub fn read_state<R: Read>(input: &mut R) -> Result<SavedState, PersistError> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    parse_state(&text)
}

pub fn save_to_path(path: &Path, state: &SavedState) -> Result<(), PersistError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_state(state, &mut out)?;
    out.flush()?;
    tracing::debug!(path = %path.display(), turns = state.turns, score = state.score, "saved game");
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<SavedState, PersistError> {
    let state = read_state(&mut File::open(path)?)?;
    tracing::debug!(
        path = %path.display(),
        turns = state.turns,
        score = state.score,
        "loaded game"
    );
    Ok(state)
}

fn parse_number<T: std::str::FromStr>(
    line: usize,
    token: &str,
    what: &str,
) -> Result<T, PersistError> {
    token
        .parse::<T>()
        .map_err(|_| PersistError::malformed(line, format!("invalid {what} `{token}`")))
}
