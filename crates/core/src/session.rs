//! Session module - the live game state
//!
//! Ties together the grid, the move engine, the spawner and the RNG. It owns the
//! turn counter, the score, the one-slot undo buffer and the elapsed-time anchor.

use std::time::{Duration, Instant};

use crate::engine::{self, MoveResult};
use crate::error::EngineError;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::snapshot::{GameSnapshot, GameSummary, SavedState};
use crate::spawn::{spawn_tile, SpawnKind, Spawned};
use crate::types::*;

/// What one input did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnReport {
    /// The input as dispatched (`None` for an unrecognized key)
    pub action: Option<GameAction>,
    /// A directional move changed the grid
    pub effective: bool,
    /// Points earned by this input
    pub gained: u32,
    /// Tile placed after an effective move
    pub spawned: Option<Spawned>,
    /// Undo restored a state different from the current one
    pub undone: bool,
}

impl TurnReport {
    /// Whether this input changed the session in a way a replay must reproduce.
    pub fn changed_state(&self) -> bool {
        self.effective || self.undone || self.action == Some(GameAction::Restart)
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    turns: u32,
    score: u32,
    mode: GameMode,
    seed: u32,
    rng: SimpleRng,
    /// State before the last snapshotting input, consumed by `undo`.
    undo_slot: Option<SavedState>,
    started_at: Instant,
    started: bool,
}

impl Session {
    /// Create a session with an empty grid. Call [`Session::start`] to place the first tiles.
    pub fn new(mode: GameMode, seed: u32) -> Self {
        Self {
            grid: Grid::new(),
            turns: 0,
            score: 0,
            mode,
            seed,
            rng: SimpleRng::new(seed),
            undo_slot: None,
            started_at: Instant::now(),
            started: false,
        }
    }

    /// Resume from a saved (turns, score, grid) triple. No start tiles are placed.
    pub fn restore(mode: GameMode, seed: u32, state: SavedState) -> Self {
        let mut session = Self::new(mode, seed);
        session.load(state);
        session.started = true;
        session
    }

    /// Place the start-of-session tiles and anchor the clock.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.started_at = Instant::now();
        self.place_start_tiles();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn can_undo(&self) -> bool {
        self.undo_slot.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn max_rank(&self) -> u8 {
        self.grid.max_rank()
    }

    pub fn saved_state(&self) -> SavedState {
        SavedState {
            turns: self.turns,
            score: self.score,
            grid: self.grid,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid,
            turns: self.turns,
            score: self.score,
            mode: self.mode,
            elapsed: self.elapsed(),
            can_undo: self.can_undo(),
        }
    }

    pub fn summary(&self, outcome: Outcome) -> GameSummary {
        GameSummary {
            outcome,
            mode: self.mode,
            score: self.score,
            turns: self.turns,
            elapsed: self.elapsed(),
            max_rank: self.max_rank(),
        }
    }

    /// Dispatch one input.
    ///
    /// Directional moves, restart and unrecognized inputs (`None`) first overwrite the
    /// undo slot with the current state. An effective move is followed by one spawn.
    /// Save and quit are left to the caller and leave the session untouched.
    pub fn apply_input(&mut self, input: Option<GameAction>) -> TurnReport {
        let snapshots = !matches!(
            input,
            Some(GameAction::Undo | GameAction::Save | GameAction::Quit)
        );
        if snapshots {
            self.undo_slot = Some(self.saved_state());
        }

        let mut report = TurnReport {
            action: input,
            ..TurnReport::default()
        };

        match input {
            Some(GameAction::Undo) => {
                let before = self.saved_state();
                match self.undo() {
                    Ok(()) => report.undone = self.saved_state() != before,
                    Err(err) => tracing::debug!(%err, "undo ignored"),
                }
            }
            Some(GameAction::Restart) => self.restart(),
            Some(GameAction::Save | GameAction::Quit) => {}
            Some(action) => {
                if let Some(direction) = action.direction() {
                    let moved = self.shift(direction);
                    report.effective = moved.changed;
                    report.gained = moved.score;
                    if moved.changed {
                        match self.spawn() {
                            Ok(spawned) => report.spawned = Some(spawned),
                            Err(err) => tracing::debug!(%err, "no spawn after move"),
                        }
                    }
                }
            }
            None => tracing::trace!("unrecognized input"),
        }

        report
    }

    /// Slide the live grid and update score and turns. No snapshot, no spawn.
    pub fn shift(&mut self, direction: Direction) -> MoveResult {
        let result = engine::shift(&mut self.grid, direction);
        self.score = self.score.saturating_add(result.score);
        if result.changed {
            self.turns += 1;
        }
        tracing::trace!(
            direction = direction.as_str(),
            changed = result.changed,
            gained = result.score,
            "shift"
        );
        result
    }

    /// In-play spawn using the mode's policy.
    pub fn spawn(&mut self) -> Result<Spawned, EngineError> {
        spawn_tile(&mut self.grid, SpawnKind::for_turn(self.mode), &mut self.rng)
    }

    /// Restore the undo slot and clear it.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        let saved = self.undo_slot.take().ok_or(EngineError::UndoUnavailable)?;
        self.turns = saved.turns;
        self.score = saved.score;
        self.grid = saved.grid;
        tracing::debug!(turns = self.turns, score = self.score, "undo");
        Ok(())
    }

    /// Start over in the same mode. The RNG keeps its stream.
    pub fn restart(&mut self) {
        self.turns = 0;
        self.score = 0;
        self.grid.clear();
        self.place_start_tiles();
        self.started_at = Instant::now();
        self.started = true;
        tracing::debug!(mode = self.mode.name(), "restart");
    }

    /// Replace (turns, score, grid) with a loaded state. The undo slot is kept.
    pub fn load(&mut self, state: SavedState) {
        self.turns = state.turns;
        self.score = state.score;
        self.grid = state.grid;
    }

    /// No direction changes the grid. Never modifies the session.
    pub fn is_lost(&self) -> bool {
        engine::is_lost(&self.grid)
    }

    /// Mode-specific termination for the given elapsed time.
    pub fn mode_outcome(&self, elapsed: Duration) -> Option<Outcome> {
        match self.mode {
            GameMode::TimeAttack if elapsed >= Duration::from_secs(TIME_ATTACK_LIMIT_SECS) => {
                Some(Outcome::TimedOut)
            }
            GameMode::ScoreRace if self.score >= SCORE_RACE_TARGET => Some(Outcome::Won),
            GameMode::TurnLimit if self.turns >= TURN_LIMIT_TURNS => {
                if self.score >= TURN_LIMIT_TARGET {
                    Some(Outcome::Won)
                } else {
                    Some(Outcome::Lost)
                }
            }
            _ => None,
        }
    }

    fn place_start_tiles(&mut self) {
        let second = if self.mode.starts_with_bomb() {
            SpawnKind::Bomb
        } else {
            SpawnKind::Number
        };
        for kind in [SpawnKind::Number, second] {
            if let Err(err) = spawn_tile(&mut self.grid, kind, &mut self.rng) {
                tracing::debug!(%err, "start tile not placed");
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameMode::Normal, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Tile = Tile::Empty;

    fn n(rank: u8) -> Tile {
        Tile::Numeric(rank)
    }

    fn session_with(mode: GameMode, rows: [[Tile; GRID_SIZE]; GRID_SIZE]) -> Session {
        Session::restore(
            mode,
            7,
            SavedState {
                turns: 0,
                score: 0,
                grid: Grid::from_rows(rows),
            },
        )
    }

    fn stuck_rows() -> [[Tile; GRID_SIZE]; GRID_SIZE] {
        [
            [n(1), n(2), n(1), n(2)],
            [n(2), n(1), n(2), n(1)],
            [n(1), n(2), n(1), n(2)],
            [n(2), n(1), n(2), n(1)],
        ]
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(GameMode::Normal, 12345);
        assert!(!session.started());
        assert_eq!(session.turns(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.grid().tile_count(), 0);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_start_places_two_numbers() {
        let mut session = Session::new(GameMode::Normal, 12345);
        session.start();
        assert!(session.started());
        let tiles: Vec<Tile> = session
            .grid()
            .cells()
            .iter()
            .copied()
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(tiles, vec![n(1), n(1)]);

        // Starting twice is a no-op
        session.start();
        assert_eq!(session.grid().tile_count(), 2);
    }

    #[test]
    fn test_bomb_mode_starts_with_one_bomb() {
        let mut session = Session::new(GameMode::Bomb, 99);
        session.start();
        let bombs = session.grid().cells().iter().filter(|t| **t == Tile::Bomb).count();
        let ones = session.grid().cells().iter().filter(|t| **t == n(1)).count();
        assert_eq!((bombs, ones), (1, 1));
    }

    #[test]
    fn test_effective_move_counts_turn_and_spawns() {
        let mut session = session_with(
            GameMode::Normal,
            [[n(1), n(1), E, E], [E; 4], [E; 4], [E; 4]],
        );
        let report = session.apply_input(Some(GameAction::MoveLeft));
        assert!(report.effective);
        assert_eq!(report.gained, 4);
        assert_eq!(session.turns(), 1);
        assert_eq!(session.score(), 4);
        assert_eq!(session.grid().get(0, 0), Some(n(2)));
        let spawned = report.spawned.unwrap();
        assert_eq!(spawned.tile, n(1));
        assert_eq!(session.grid().tile_count(), 2);
    }

    #[test]
    fn test_ineffective_move_changes_nothing_but_snapshots() {
        let mut session = session_with(
            GameMode::Normal,
            [[n(1), n(2), E, E], [E; 4], [E; 4], [E; 4]],
        );
        let before = session.saved_state();
        let report = session.apply_input(Some(GameAction::MoveLeft));
        assert!(!report.effective);
        assert!(report.spawned.is_none());
        assert_eq!(session.saved_state(), before);
        assert!(session.can_undo());
    }

    #[test]
    fn test_unrecognized_input_is_a_noop_turn() {
        let mut session = session_with(GameMode::Normal, [[n(1), E, E, E], [E; 4], [E; 4], [E; 4]]);
        let before = session.saved_state();
        let report = session.apply_input(None);
        assert!(!report.changed_state());
        assert_eq!(session.saved_state(), before);
        assert!(session.can_undo());
    }

    #[test]
    fn test_undo_restores_state_before_move() {
        let mut session = session_with(
            GameMode::Normal,
            [[n(1), n(1), E, E], [E; 4], [E; 4], [E; 4]],
        );
        let before = session.saved_state();
        session.apply_input(Some(GameAction::MoveLeft));
        assert_ne!(session.saved_state(), before);

        let report = session.apply_input(Some(GameAction::Undo));
        assert!(report.undone);
        assert_eq!(session.saved_state(), before);
        assert!(!session.can_undo());

        // Second undo is a no-op
        let report = session.apply_input(Some(GameAction::Undo));
        assert!(!report.undone);
        assert_eq!(session.saved_state(), before);
        assert_eq!(session.undo(), Err(EngineError::UndoUnavailable));
    }

    #[test]
    fn test_undo_after_noop_turn_changes_nothing() {
        let mut session = session_with(
            GameMode::Normal,
            [[n(1), n(1), E, E], [E; 4], [E; 4], [E; 4]],
        );
        session.apply_input(Some(GameAction::MoveLeft));
        let after_move = session.saved_state();

        // Unrecognized input overwrites the slot with the current state
        session.apply_input(None);
        let report = session.apply_input(Some(GameAction::Undo));
        assert!(!report.undone);
        assert!(!report.changed_state());
        assert_eq!(session.saved_state(), after_move);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_save_and_quit_do_not_touch_undo_slot() {
        let mut session = session_with(
            GameMode::Normal,
            [[n(1), n(1), E, E], [E; 4], [E; 4], [E; 4]],
        );
        let before = session.saved_state();
        session.apply_input(Some(GameAction::MoveLeft));
        session.apply_input(Some(GameAction::Save));
        session.apply_input(Some(GameAction::Quit));
        session.undo().unwrap();
        assert_eq!(session.saved_state(), before);
    }

    #[test]
    fn test_restart_resets_counters_and_places_start_tiles() {
        let mut session = session_with(
            GameMode::Bomb,
            [[n(4), n(4), n(3), E], [E; 4], [E; 4], [E; 4]],
        );
        session.apply_input(Some(GameAction::MoveLeft));
        assert!(session.score() > 0);

        let report = session.apply_input(Some(GameAction::Restart));
        assert!(report.changed_state());
        assert_eq!(session.turns(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.grid().tile_count(), 2);
        assert!(session.grid().cells().contains(&Tile::Bomb));
        assert_eq!(session.mode(), GameMode::Bomb);

        // Restart itself can be undone
        session.undo().unwrap();
        assert!(session.score() > 0);
    }

    #[test]
    fn test_is_lost_does_not_mutate_session() {
        let session = session_with(GameMode::Normal, stuck_rows());
        let before = session.saved_state();
        assert!(session.is_lost());
        assert_eq!(session.saved_state(), before);
    }

    #[test]
    fn test_fresh_session_is_not_lost() {
        let mut session = Session::new(GameMode::Chance, 5);
        session.start();
        assert!(!session.is_lost());
    }

    #[test]
    fn test_load_replaces_triple_and_keeps_undo_slot() {
        let mut session = session_with(
            GameMode::Normal,
            [[n(1), n(1), E, E], [E; 4], [E; 4], [E; 4]],
        );
        session.apply_input(Some(GameAction::MoveLeft));
        assert!(session.can_undo());

        let loaded = SavedState {
            turns: 40,
            score: 800,
            grid: Grid::from_rows(stuck_rows()),
        };
        session.load(loaded);
        assert_eq!(session.saved_state(), loaded);
        assert!(session.can_undo());
    }

    #[test]
    fn test_time_attack_times_out_after_limit() {
        let session = session_with(GameMode::TimeAttack, [[n(1), E, E, E], [E; 4], [E; 4], [E; 4]]);
        assert_eq!(session.mode_outcome(Duration::from_secs(119)), None);
        assert_eq!(
            session.mode_outcome(Duration::from_secs(TIME_ATTACK_LIMIT_SECS)),
            Some(Outcome::TimedOut)
        );
    }

    #[test]
    fn test_score_race_wins_at_target() {
        let mut session = session_with(
            GameMode::ScoreRace,
            [[n(1), E, E, E], [E; 4], [E; 4], [E; 4]],
        );
        assert_eq!(session.mode_outcome(Duration::ZERO), None);
        session.load(SavedState {
            score: SCORE_RACE_TARGET,
            ..session.saved_state()
        });
        assert_eq!(session.mode_outcome(Duration::ZERO), Some(Outcome::Won));
    }

    #[test]
    fn test_turn_limit_outcome_depends_on_score() {
        let mut session = session_with(
            GameMode::TurnLimit,
            [[n(1), E, E, E], [E; 4], [E; 4], [E; 4]],
        );
        session.load(SavedState {
            turns: TURN_LIMIT_TURNS - 1,
            score: 5000,
            ..session.saved_state()
        });
        assert_eq!(session.mode_outcome(Duration::ZERO), None);

        session.load(SavedState {
            turns: TURN_LIMIT_TURNS,
            score: TURN_LIMIT_TARGET - 1,
            ..session.saved_state()
        });
        assert_eq!(session.mode_outcome(Duration::ZERO), Some(Outcome::Lost));

        session.load(SavedState {
            turns: TURN_LIMIT_TURNS,
            score: TURN_LIMIT_TARGET,
            ..session.saved_state()
        });
        assert_eq!(session.mode_outcome(Duration::ZERO), Some(Outcome::Won));
    }

    #[test]
    fn test_normal_mode_has_no_mode_outcome() {
        let mut session = session_with(GameMode::Normal, [[n(1), E, E, E], [E; 4], [E; 4], [E; 4]]);
        session.load(SavedState {
            turns: 10_000,
            score: 1_000_000,
            ..session.saved_state()
        });
        assert_eq!(session.mode_outcome(Duration::from_secs(10_000)), None);
    }

    #[test]
    fn test_same_seed_and_inputs_replay_identically() {
        let inputs = [
            GameAction::MoveLeft,
            GameAction::MoveUp,
            GameAction::MoveRight,
            GameAction::MoveDown,
            GameAction::Undo,
            GameAction::MoveLeft,
            GameAction::Restart,
            GameAction::MoveDown,
        ];
        for mode in GameMode::ALL {
            let mut a = Session::new(mode, 4242);
            let mut b = Session::new(mode, 4242);
            a.start();
            b.start();
            for _ in 0..20 {
                for action in inputs {
                    assert_eq!(a.apply_input(Some(action)), b.apply_input(Some(action)));
                }
            }
            assert_eq!(a.saved_state(), b.saved_state());
        }
    }

    #[test]
    fn test_summary_reports_max_rank() {
        let session = session_with(
            GameMode::Chance,
            [[n(6), Tile::Chance, E, E], [E; 4], [E; 4], [E; 4]],
        );
        let summary = session.summary(Outcome::Quit);
        assert_eq!(summary.max_rank, 6);
        assert_eq!(summary.max_tile_value(), 64);
        assert_eq!(summary.outcome, Outcome::Quit);
        assert_eq!(summary.mode, GameMode::Chance);
    }
}
