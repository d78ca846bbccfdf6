//! One decimal integer per mode.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};

use crate::types::GameMode;

pub fn high_score_file_name(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Normal => "high_score_default.txt",
        GameMode::Bomb => "high_score_bomb.txt",
        GameMode::Chance => "high_score_chance.txt",
        GameMode::TimeAttack => "high_score_time_attack.txt",
        GameMode::ScoreRace => "high_score_score_race.txt",
        GameMode::TurnLimit => "high_score_turn_limit.txt",
    }
}

pub(crate) fn load(path: &Path) -> u32 {
    match fs::read_to_string(path) {
        Ok(text) => match text.split_whitespace().next().map(str::parse::<u32>) {
            Some(Ok(score)) => score,
            _ => {
                tracing::warn!(path = %path.display(), "ignoring malformed high score file");
                0
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => 0,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "cannot read high score file");
            0
        }
    }
}

pub(crate) fn save(path: &Path, score: u32) -> Result<()> {
    fs::write(path, score.to_string())
        .with_context(|| format!("writing high score to {}", path.display()))?;
    tracing::debug!(path = %path.display(), score, "saved high score");
    Ok(())
}
