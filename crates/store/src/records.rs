//! Finished-games log.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::GameSummary;

pub const GAME_RECORDS_FILE: &str = "game_records.txt";

/// `Mode: NAME, Score: S, Turns: T, Time: X.XX seconds, Result: OUTCOME`
pub fn format_game_record(summary: &GameSummary) -> String {
    format!(
        "Mode: {}, Score: {}, Turns: {}, Time: {:.2} seconds, Result: {}",
        summary.mode.name(),
        summary.score,
        summary.turns,
        summary.elapsed.as_secs_f64(),
        summary.outcome.as_str()
    )
}

pub(crate) fn append(path: &Path, summary: &GameSummary) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    writeln!(file, "{}", format_game_record(summary))
        .with_context(|| format!("appending to {}", path.display()))?;
    tracing::debug!(path = %path.display(), score = summary.score, "recorded game");
    Ok(())
}

pub(crate) fn read(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
    }
}
