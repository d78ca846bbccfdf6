//! Move record log: one `KEY:SCORE` line per state-changing input.
//!
//! The key comes first so the file can be fed straight back as replay input.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::types::GameAction;

pub struct MoveLog<W: Write = BufWriter<File>> {
    out: W,
}

impl MoveLog {
    /// Create (or truncate) the log at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("creating record file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "recording moves");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> MoveLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Append one entry and flush it, so an interrupted run keeps what it played.
    pub fn append(&mut self, action: GameAction, score: u32) -> Result<()> {
        writeln!(self.out, "{}:{}", action.key(), score)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
