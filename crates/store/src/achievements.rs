//! Score milestones, each logged at most once per mode.
//!
//! Line format: `mode N - MILESTONE : YYYY.MM.DD`.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::types::{GameMode, ACHIEVEMENT_MILESTONES};

pub const ACHIEVEMENTS_FILE: &str = "achievements.txt";

const DATE_FORMAT: &str = "%Y.%m.%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub mode_number: u8,
    pub milestone: u32,
    pub date: String,
}

impl Achievement {
    pub fn new(mode: GameMode, milestone: u32, date: NaiveDate) -> Self {
        Self {
            mode_number: mode.number(),
            milestone,
            date: date.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn to_line(&self) -> String {
        format!(
            "mode {} - {} : {}",
            self.mode_number, self.milestone, self.date
        )
    }

    fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix("mode ")?;
        let (mode, rest) = rest.split_once(" - ")?;
        let (milestone, date) = rest.split_once(" : ")?;
        Some(Self {
            mode_number: mode.trim().parse().ok()?,
            milestone: milestone.trim().parse().ok()?,
            date: date.trim().to_string(),
        })
    }
}

/// Parse an achievements log, skipping lines that do not match the format.
pub fn parse_achievements(text: &str) -> Vec<Achievement> {
    text.lines().filter_map(Achievement::parse).collect()
}

/// Milestones `score` has reached that `recorded` does not yet hold for `mode`.
pub fn new_milestones(recorded: &[Achievement], mode: GameMode, score: u32) -> Vec<u32> {
    ACHIEVEMENT_MILESTONES
        .iter()
        .copied()
        .filter(|&milestone| score >= milestone)
        .filter(|&milestone| {
            !recorded
                .iter()
                .any(|a| a.mode_number == mode.number() && a.milestone == milestone)
        })
        .collect()
}

pub(crate) fn record(path: &Path, mode: GameMode, score: u32, date: NaiveDate) -> Result<Vec<u32>> {
    let recorded = match fs::read_to_string(path) {
        Ok(text) => parse_achievements(&text),
        Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", path.display()));
        }
    };

    let fresh = new_milestones(&recorded, mode, score);
    if fresh.is_empty() {
        return Ok(fresh);
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    for &milestone in &fresh {
        writeln!(file, "{}", Achievement::new(mode, milestone, date).to_line())
            .with_context(|| format!("appending to {}", path.display()))?;
        tracing::info!(mode = mode.name(), milestone, "achievement unlocked");
    }
    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn line_format() {
        let a = Achievement::new(GameMode::Bomb, 2048, date());
        assert_eq!(a.to_line(), "mode 2 - 2048 : 2024.05.17");
        assert_eq!(parse_achievements(&a.to_line()), vec![a]);
    }

    #[test]
    fn parse_skips_foreign_lines() {
        let text = "mode 1 - 1000 : 2024.01.01\n1000 : 2023.12.31\ngarbage\n";
        let parsed = parse_achievements(text);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].milestone, 1000);
    }

    #[test]
    fn milestones_are_per_mode() {
        let recorded = vec![Achievement::new(GameMode::Normal, 1000, date())];
        assert_eq!(new_milestones(&recorded, GameMode::Normal, 999), Vec::<u32>::new());
        assert_eq!(new_milestones(&recorded, GameMode::Normal, 2100), vec![2048]);
        assert_eq!(new_milestones(&recorded, GameMode::Chance, 2100), vec![1000, 2048]);
    }

    #[test]
    fn record_writes_each_milestone_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ACHIEVEMENTS_FILE);

        assert_eq!(record(&path, GameMode::Normal, 1500, date()).unwrap(), vec![1000]);
        assert!(record(&path, GameMode::Normal, 1600, date()).unwrap().is_empty());
        assert_eq!(
            record(&path, GameMode::Normal, 6000, date()).unwrap(),
            vec![2048, 5000]
        );
        assert_eq!(record(&path, GameMode::TurnLimit, 1000, date()).unwrap(), vec![1000]);

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "mode 1 - 1000 : 2024.05.17\n\
             mode 1 - 2048 : 2024.05.17\n\
             mode 1 - 5000 : 2024.05.17\n\
             mode 6 - 1000 : 2024.05.17\n"
        );
    }
}
