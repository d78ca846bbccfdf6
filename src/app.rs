//! Control loop and end-of-game bookkeeping.
//!
//! One [`Game`] drives a [`Session`] from an [`InputSource`] to an [`Outcome`], draws
//! every cycle through a [`RenderSink`], and finalizes exactly once.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::core::persist::{load_from_path, save_to_path};
use crate::core::{GameSnapshot, GameSummary, Session};
use crate::input::{InputEvent, InputSource, LiveInput, ScriptedInput};
use crate::store::{MoveLog, Store};
use crate::term::{FrameBuffer, GameView, StatusView, TerminalRenderer, Viewport};
use crate::types::{GameAction, Outcome};

/// Where frames go.
pub trait RenderSink {
    fn draw(&mut self, snap: &GameSnapshot, status: &StatusView<'_>) -> Result<()>;
}

/// Batch runs draw nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl RenderSink for Headless {
    fn draw(&mut self, _snap: &GameSnapshot, _status: &StatusView<'_>) -> Result<()> {
        Ok(())
    }
}

/// Full-screen terminal output.
pub struct TerminalSink {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
        }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for TerminalSink {
    fn draw(&mut self, snap: &GameSnapshot, status: &StatusView<'_>) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view
            .render_into(snap, status, Viewport::new(w, h), &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}

/// What a finished run reports back to `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub summary: GameSummary,
    /// Pass back with `-s` to replay a recording.
    pub seed: u32,
    pub high_score: u32,
    pub new_high_score: bool,
}

impl RunReport {
    pub fn outcome_line(&self) -> String {
        let s = &self.summary;
        format!(
            "You {} after scoring {} points in {} turns, with largest tile {}",
            s.outcome.as_str(),
            s.score,
            s.turns,
            s.max_tile_value()
        )
    }

    pub fn high_score_line(&self) -> String {
        if self.new_high_score {
            format!("New high score for {}: {}", self.summary.mode.name(), self.high_score)
        } else {
            format!("High score for {}: {}", self.summary.mode.name(), self.high_score)
        }
    }

    pub fn seed_line(&self) -> String {
        format!("Seed: {}", self.seed)
    }

    pub fn time_line(&self) -> String {
        format!(
            "Time played: {:.2} seconds",
            self.summary.elapsed.as_secs_f64()
        )
    }
}

/// A session plus everything around it that outlives a single turn.
pub struct Game {
    session: Session,
    store: Store,
    move_log: Option<MoveLog>,
    high_score: u32,
    new_high_score: bool,
    message: Option<String>,
}

impl Game {
    pub fn new(session: Session, store: Store) -> Self {
        let high_score = store.high_score(session.mode());
        Self {
            session,
            store,
            move_log: None,
            high_score,
            new_high_score: false,
            message: None,
        }
    }

    pub fn with_move_log(mut self, log: MoveLog) -> Self {
        self.move_log = Some(log);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Run to completion, then finalize once.
    pub fn play<I: InputSource, S: RenderSink>(
        mut self,
        input: &mut I,
        sink: &mut S,
    ) -> Result<RunReport> {
        tracing::info!(
            mode = self.session.mode().name(),
            seed = self.session.seed(),
            scripted = input.is_scripted(),
            "game started"
        );
        let outcome = self.run_loop(input, sink)?;
        // The clock stops here, not when the end screen is dismissed.
        let summary = self.session.summary(outcome);
        self.show_end_screen(outcome, input, sink)?;
        Ok(self.finish(summary))
    }

    fn run_loop<I: InputSource, S: RenderSink>(
        &mut self,
        input: &mut I,
        sink: &mut S,
    ) -> Result<Outcome> {
        loop {
            if self.session.is_lost() {
                return Ok(Outcome::Lost);
            }
            self.draw(sink, None)?;

            let event = input.next_event()?;
            if event != InputEvent::Idle {
                self.message = None;
                match event.action() {
                    Some(GameAction::Quit) => return Ok(Outcome::Quit),
                    Some(GameAction::Save) => self.save_prompt(input, sink)?,
                    action => self.apply(action)?,
                }
            }

            if let Some(outcome) = self.session.mode_outcome(self.session.elapsed()) {
                return Ok(outcome);
            }
        }
    }

    fn apply(&mut self, action: Option<GameAction>) -> Result<()> {
        let report = self.session.apply_input(action);

        if let (Some(action), Some(log)) = (report.action, self.move_log.as_mut()) {
            if report.changed_state() {
                log.append(action, self.session.score())?;
            }
        }

        if report.effective {
            self.update_high_score();
            self.update_achievements();
        }
        Ok(())
    }

    fn update_high_score(&mut self) {
        let score = self.session.score();
        if score <= self.high_score {
            return;
        }
        self.high_score = score;
        self.new_high_score = true;
        if let Err(err) = self.store.save_high_score(self.session.mode(), score) {
            tracing::warn!(error = %err, "high score not saved");
        }
        self.message = Some(format!("New high score: {score}"));
    }

    fn update_achievements(&mut self) {
        match self
            .store
            .record_achievements(self.session.mode(), self.session.score())
        {
            Ok(unlocked) => {
                if let Some(milestone) = unlocked.last() {
                    self.message = Some(format!("Achievement unlocked: {milestone} points"));
                }
            }
            Err(err) => tracing::warn!(error = %err, "achievements not recorded"),
        }
    }

    fn save_prompt<I: InputSource, S: RenderSink>(
        &mut self,
        input: &mut I,
        sink: &mut S,
    ) -> Result<()> {
        if input.is_scripted() {
            tracing::debug!("save ignored during replay");
            return Ok(());
        }

        let snap = self.session.snapshot();
        let status_base = self.status();
        let name = input.read_line(&mut |typed| {
            sink.draw(
                &snap,
                &StatusView {
                    prompt: Some(typed),
                    ..status_base
                },
            )
        })?;

        self.message = Some(match name.as_deref().map(str::trim) {
            None | Some("") => "Save cancelled".to_string(),
            Some(name) => match save_to_path(Path::new(name), &self.session.saved_state()) {
                Ok(()) => format!("Saved to {name}"),
                Err(err) => {
                    tracing::warn!(error = %err, path = name, "save failed");
                    format!("Save failed: {err}")
                }
            },
        });
        Ok(())
    }

    fn show_end_screen<I: InputSource, S: RenderSink>(
        &mut self,
        outcome: Outcome,
        input: &mut I,
        sink: &mut S,
    ) -> Result<()> {
        if outcome == Outcome::Quit {
            return Ok(());
        }
        self.message = Some("Press q to exit".to_string());
        self.draw(sink, Some(outcome))?;
        if input.is_scripted() {
            return Ok(());
        }
        while input.next_event()?.action() != Some(GameAction::Quit) {}
        Ok(())
    }

    fn finish(self, summary: GameSummary) -> RunReport {
        if let Err(err) = self.store.append_game_record(&summary) {
            tracing::warn!(error = %err, "game record not written");
        }
        tracing::info!(
            outcome = summary.outcome.as_str(),
            score = summary.score,
            turns = summary.turns,
            "game finished"
        );
        RunReport {
            summary,
            seed: self.session.seed(),
            high_score: self.high_score,
            new_high_score: self.new_high_score,
        }
    }

    fn status(&self) -> StatusView<'_> {
        StatusView {
            high_score: self.high_score,
            message: self.message.as_deref(),
            prompt: None,
            outcome: None,
        }
    }

    fn draw<S: RenderSink>(&self, sink: &mut S, outcome: Option<Outcome>) -> Result<()> {
        let status = StatusView {
            outcome,
            ..self.status()
        };
        sink.draw(&self.session.snapshot(), &status)
    }
}

/// Build the session, input source and sink described by `cli` and play one game.
pub fn run(cli: &Cli) -> Result<RunReport> {
    let mode = cli.game_mode();
    let seed = cli.seed();

    let session = match &cli.load {
        Some(path) => {
            let state = load_from_path(path)
                .with_context(|| format!("loading saved game {}", path.display()))?;
            Session::restore(mode, seed, state)
        }
        None => {
            let mut session = Session::new(mode, seed);
            session.start();
            session
        }
    };

    let mut game = Game::new(session, Store::new(&cli.data_dir));
    if let Some(path) = &cli.record {
        game = game.with_move_log(MoveLog::create(path)?);
    }

    match &cli.playback {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening playback file {}", path.display()))?;
            let mut input = ScriptedInput::new(BufReader::new(file)).with_delay(cli.replay_delay());
            if cli.is_batch() {
                game.play(&mut input, &mut Headless)
            } else {
                with_terminal(|sink| game.play(&mut input, sink))
            }
        }
        None => with_terminal(|sink| game.play(&mut LiveInput::new(), sink)),
    }
}

/// Run `f` with the terminal in raw alternate-screen mode, restoring it afterwards.
fn with_terminal<T>(f: impl FnOnce(&mut TerminalSink) -> Result<T>) -> Result<T> {
    let mut sink = TerminalSink::new();
    sink.renderer.enter().context("entering terminal UI")?;
    let result = f(&mut sink);
    if let Err(err) = sink.renderer.exit() {
        tracing::warn!(error = %err, "terminal not restored");
    }
    result
}
