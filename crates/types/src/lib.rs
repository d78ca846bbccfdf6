//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, persistence, replay).
//!
//! # Grid
//!
//! The playfield is a fixed 4x4 grid, stored row-major. Each cell holds a [`Tile`].
//!
//! # Tile codes
//!
//! Tiles are written to save files and read back as small integers:
//!
//! | Code | Tile |
//! |------|------|
//! | 0 | empty |
//! | 1..=14 | numeric tile of that rank (value `2^rank`) |
//! | 15 | bomb |
//! | 16 | chance |
//! | 17..=31 | numeric tile of rank `code - 2` |
//!
//! # Game modes
//!
//! | Number | Mode | Ends when |
//! |--------|------|-----------|
//! | 1 | Normal | no move changes the grid |
//! | 2 | Bomb | same as Normal; one bomb tile is placed at start |
//! | 3 | Chance | same as Normal; spawns may produce rank-2 and chance tiles |
//! | 4 | Time Attack | 120 seconds elapsed |
//! | 5 | Score Race | score reaches 2000 (win) |
//! | 6 | Turn Limit | 100 turns played (win with 1000+ points) |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, GameMode, Tile};
//!
//! assert_eq!(Tile::from_code(3), Some(Tile::Numeric(3)));
//! assert_eq!(Tile::Bomb.code(), 15);
//!
//! assert_eq!(GameAction::from_key('a'), Some(GameAction::MoveLeft));
//! assert_eq!(GameAction::MoveLeft.direction(), Some(Direction::Left));
//!
//! assert_eq!(GameMode::from_number(3), Some(GameMode::Chance));
//! ```

/// Grid side length (the grid is square).
pub const GRID_SIZE: usize = 4;

/// Total number of cells in the grid.
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Save-file code for a bomb tile.
pub const BOMB_CODE: u8 = 15;

/// Save-file code for a chance tile.
pub const CHANCE_CODE: u8 = 16;

/// Highest numeric rank accepted from a save file.
pub const MAX_NUMERIC_RANK: u8 = 29;

/// Highest valid save-file code.
pub const MAX_TILE_CODE: u8 = MAX_NUMERIC_RANK + 2;

/// Points awarded when two chance tiles merge into a rank-2 tile.
pub const CHANCE_PAIR_SCORE: u32 = 4;

/// Time Attack session length in seconds.
pub const TIME_ATTACK_LIMIT_SECS: u64 = 120;

/// Score Race winning score.
pub const SCORE_RACE_TARGET: u32 = 2000;

/// Turn Limit session length in turns.
pub const TURN_LIMIT_TURNS: u32 = 100;

/// Score needed to win a Turn Limit session.
pub const TURN_LIMIT_TARGET: u32 = 1000;

/// Live keyboard poll timeout in milliseconds.
pub const INPUT_POLL_MS: u64 = 100;

/// Default pause between scripted inputs in milliseconds.
pub const DEFAULT_REPLAY_DELAY_MS: u64 = 250;

/// Score milestones recorded once per mode in the achievements log.
pub const ACHIEVEMENT_MILESTONES: [u32; 4] = [1000, 2048, 5000, 10000];

/// A single grid cell.
///
/// - **Empty**: no tile
/// - **Numeric(rank)**: a number tile worth `2^rank`, `rank >= 1`
/// - **Bomb**: slides with the row but never merges
/// - **Chance**: merges with any numeric tile it touches, or with another chance tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Empty,
    Numeric(u8),
    Bomb,
    Chance,
}

impl Tile {
    pub fn is_empty(&self) -> bool {
        matches!(self, Tile::Empty)
    }

    /// Rank of a numeric tile, `None` for every other variant.
    pub fn numeric_rank(&self) -> Option<u8> {
        match self {
            Tile::Numeric(rank) => Some(*rank),
            _ => None,
        }
    }

    /// Displayed value of a numeric tile (`2^rank`).
    pub fn value(&self) -> Option<u32> {
        self.numeric_rank().map(rank_value)
    }

    /// Decode a save-file code.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Tile;
    ///
    /// assert_eq!(Tile::from_code(0), Some(Tile::Empty));
    /// assert_eq!(Tile::from_code(16), Some(Tile::Chance));
    /// assert_eq!(Tile::from_code(17), Some(Tile::Numeric(15)));
    /// assert_eq!(Tile::from_code(99), None);
    /// ```
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Tile::Empty),
            BOMB_CODE => Some(Tile::Bomb),
            CHANCE_CODE => Some(Tile::Chance),
            c if c < BOMB_CODE => Some(Tile::Numeric(c)),
            c if c <= MAX_TILE_CODE => Some(Tile::Numeric(c - 2)),
            _ => None,
        }
    }

    /// Encode as a save-file code. Inverse of [`Tile::from_code`].
    pub fn code(&self) -> u8 {
        match *self {
            Tile::Empty => 0,
            Tile::Bomb => BOMB_CODE,
            Tile::Chance => CHANCE_CODE,
            Tile::Numeric(rank) if rank < BOMB_CODE => rank,
            Tile::Numeric(rank) => rank.saturating_add(2),
        }
    }
}

/// Value of a numeric rank, saturating at `u32::MAX`.
pub fn rank_value(rank: u8) -> u32 {
    1u32.checked_shl(rank as u32).unwrap_or(u32::MAX)
}

/// Slide direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Directions in the order the loss check tries them.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Down,
        Direction::Right,
    ];

    /// Clockwise quarter turns that turn this direction into a left slide.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::Left.clockwise_turns(), 0);
    /// assert_eq!(Direction::Down.clockwise_turns(), 1);
    /// assert_eq!(Direction::Right.clockwise_turns(), 2);
    /// assert_eq!(Direction::Up.clockwise_turns(), 3);
    /// ```
    pub fn clockwise_turns(&self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Player inputs understood by the session.
///
/// Each action has a canonical key character. Record logs are written with these
/// characters and scripted replays are read with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Restore the grid from before the last input
    Undo,
    /// Start over in the same mode
    Restart,
    /// Write the current grid to a file
    Save,
    Quit,
}

impl GameAction {
    /// Map a canonical key character to an action.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_key('w'), Some(GameAction::MoveUp));
    /// assert_eq!(GameAction::from_key('u'), Some(GameAction::Undo));
    /// assert_eq!(GameAction::from_key('x'), None);
    /// ```
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'a' => Some(GameAction::MoveLeft),
            'd' => Some(GameAction::MoveRight),
            'w' => Some(GameAction::MoveUp),
            's' => Some(GameAction::MoveDown),
            'u' => Some(GameAction::Undo),
            'r' => Some(GameAction::Restart),
            'l' => Some(GameAction::Save),
            'q' => Some(GameAction::Quit),
            _ => None,
        }
    }

    /// Canonical key character.
    pub fn key(&self) -> char {
        match self {
            GameAction::MoveLeft => 'a',
            GameAction::MoveRight => 'd',
            GameAction::MoveUp => 'w',
            GameAction::MoveDown => 's',
            GameAction::Undo => 'u',
            GameAction::Restart => 'r',
            GameAction::Save => 'l',
            GameAction::Quit => 'q',
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::MoveLeft => Some(Direction::Left),
            GameAction::MoveRight => Some(Direction::Right),
            GameAction::MoveUp => Some(Direction::Up),
            GameAction::MoveDown => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Game mode, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Normal,
    Bomb,
    Chance,
    TimeAttack,
    ScoreRace,
    TurnLimit,
}

impl GameMode {
    pub const ALL: [GameMode; 6] = [
        GameMode::Normal,
        GameMode::Bomb,
        GameMode::Chance,
        GameMode::TimeAttack,
        GameMode::ScoreRace,
        GameMode::TurnLimit,
    ];

    /// Parse the numeric mode selector used on the command line (1-6).
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(GameMode::Normal),
            2 => Some(GameMode::Bomb),
            3 => Some(GameMode::Chance),
            4 => Some(GameMode::TimeAttack),
            5 => Some(GameMode::ScoreRace),
            6 => Some(GameMode::TurnLimit),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            GameMode::Normal => 1,
            GameMode::Bomb => 2,
            GameMode::Chance => 3,
            GameMode::TimeAttack => 4,
            GameMode::ScoreRace => 5,
            GameMode::TurnLimit => 6,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Normal => "Normal",
            GameMode::Bomb => "Bomb",
            GameMode::Chance => "Chance",
            GameMode::TimeAttack => "Time Attack",
            GameMode::ScoreRace => "Score Race",
            GameMode::TurnLimit => "Turn Limit",
        }
    }

    /// Whether in-play spawns draw from the chance distribution.
    pub fn spawns_chance_tiles(&self) -> bool {
        matches!(self, GameMode::Chance)
    }

    /// Whether the second start-of-session tile is a bomb.
    pub fn starts_with_bomb(&self) -> bool {
        matches!(self, GameMode::Bomb)
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Lost,
    Won,
    TimedOut,
    Quit,
}

impl Outcome {
    /// Past-tense phrase used in the exit summary ("You lost after ...").
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Lost => "lost",
            Outcome::Won => "won",
            Outcome::TimedOut => "timed out",
            Outcome::Quit => "quit",
        }
    }
}
