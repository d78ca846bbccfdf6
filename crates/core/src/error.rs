//! Engine and persistence errors.
//!
//! None of these terminate the game. The control loop decides what to do with them.

use thiserror::Error;

/// Recoverable engine conditions reported to the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A spawn was requested but every cell is occupied. The grid is left untouched.
    #[error("no empty cell to spawn a tile into")]
    GridFull,

    /// Undo was requested with an empty undo slot.
    #[error("nothing to undo")]
    UndoUnavailable,
}

/// Save-file read/write failures.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not describe a complete `turns score` header plus a full grid.
    #[error("malformed save file at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

impl PersistError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_names_the_line() {
        let err = PersistError::malformed(3, "expected 4 tiles, found 2");
        assert_eq!(
            err.to_string(),
            "malformed save file at line 3: expected 4 tiles, found 2"
        );
    }
}
