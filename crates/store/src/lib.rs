//! On-disk bookkeeping around a session.
//!
//! Everything lives as small text files in one data directory: a high score per mode,
//! an achievements log, a finished-games log, plus the optional move record log that a
//! later run can replay.

pub mod achievements;
pub mod high_score;
pub mod move_log;
pub mod records;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::core::GameSummary;
use crate::types::GameMode;

pub use achievements::{new_milestones, parse_achievements, Achievement, ACHIEVEMENTS_FILE};
pub use high_score::high_score_file_name;
pub use move_log::MoveLog;
pub use records::{format_game_record, GAME_RECORDS_FILE};

/// Data directory holding the high-score, achievement and game-record files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stored high score for `mode`; 0 when the file is missing or unreadable.
    pub fn high_score(&self, mode: GameMode) -> u32 {
        high_score::load(&self.dir.join(high_score_file_name(mode)))
    }

    pub fn save_high_score(&self, mode: GameMode, score: u32) -> Result<()> {
        high_score::save(&self.dir.join(high_score_file_name(mode)), score)
    }

    /// Record milestones reached by `score` that `mode` has not recorded yet, dated today.
    pub fn record_achievements(&self, mode: GameMode, score: u32) -> Result<Vec<u32>> {
        self.record_achievements_on(mode, score, Local::now().date_naive())
    }

    pub fn record_achievements_on(
        &self,
        mode: GameMode,
        score: u32,
        date: NaiveDate,
    ) -> Result<Vec<u32>> {
        achievements::record(&self.dir.join(ACHIEVEMENTS_FILE), mode, score, date)
    }

    pub fn append_game_record(&self, summary: &GameSummary) -> Result<()> {
        records::append(&self.dir.join(GAME_RECORDS_FILE), summary)
    }

    /// Contents of the finished-games log, `None` if no game has been recorded.
    pub fn read_game_records(&self) -> Result<Option<String>> {
        records::read(&self.dir.join(GAME_RECORDS_FILE))
    }
}
