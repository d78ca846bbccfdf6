//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It never touches the terminal, reads the clock only for the session's elapsed time,
//! and does file I/O only in the save-file codec, making it:
//!
//! - **Deterministic**: Same seed and same inputs produce identical games (for replays)
//! - **Testable**: Unit tests for every rule, property tests for the row transforms
//! - **Portable**: Can run in any environment (terminal, batch replay, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: 4x4 tile grid with clockwise rotation
//! - [`row`]: Row transforms (`deflate` and `combine`) and the tile merge rules
//! - [`engine`]: Directional moves built from rotation + row transforms, and loss detection
//! - [`rng`]: Seeded LCG shared by every spawn
//! - [`spawn`]: Tile spawning into a uniformly chosen empty cell
//! - [`session`]: Turn counter, score, one-slot undo, restart, and mode termination checks
//! - [`snapshot`]: Plain-data views of a session (undo slot, save file, render input)
//! - [`persist`]: Text save-file codec
//!
//! # Game Rules
//!
//! - A move slides every row toward the move direction, merging equal neighbours once per move
//! - Merging two numeric tiles of rank `r` yields rank `r + 1` and scores `2^(r + 1)`
//! - Bomb tiles slide but never merge
//! - Chance tiles merge with any numeric tile (`r` becomes `r + 1`) or with each other
//!   (rank 2, 4 points)
//! - A move that changes nothing does not count as a turn and spawns nothing
//! - The game is lost when no direction changes the grid
//!
//! # Example
//!
//! ```
//! use tui_2048_core::Session;
//! use tui_2048_types::{GameAction, GameMode};
//!
//! let mut session = Session::new(GameMode::Normal, 12345);
//! session.start();
//! assert_eq!(session.grid().tile_count(), 2);
//!
//! let report = session.apply_input(Some(GameAction::MoveLeft));
//! if report.effective {
//!     assert_eq!(session.turns(), 1);
//! }
//! assert!(session.can_undo());
//! ```

pub mod engine;
pub mod error;
pub mod grid;
pub mod persist;
pub mod rng;
pub mod row;
pub mod session;
pub mod snapshot;
pub mod spawn;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use engine::{is_lost, shift, MoveResult};
pub use error::{EngineError, PersistError};
pub use grid::Grid;
pub use rng::SimpleRng;
pub use row::{combine, deflate, merge, CombineResult};
pub use session::{Session, TurnReport};
pub use snapshot::{GameSnapshot, GameSummary, SavedState};
pub use spawn::{spawn_tile, SpawnKind, Spawned};
