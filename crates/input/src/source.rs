//! Input sources: the live keyboard and a scripted key stream.

use std::io::BufRead;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::map::{handle_key_event, map_char, should_quit};
use crate::types::{GameAction, INPUT_POLL_MS};

/// One input as seen by the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Action(GameAction),
    /// A key with no binding; still a turn for the undo slot.
    Unrecognized,
    /// Nothing arrived before the poll timeout.
    Idle,
}

impl InputEvent {
    /// The action to hand to the session, `None` for an unrecognized key.
    pub fn action(&self) -> Option<GameAction> {
        match self {
            InputEvent::Action(action) => Some(*action),
            _ => None,
        }
    }
}

/// Where the control loop gets its keys from.
pub trait InputSource {
    /// Next input. Live sources return [`InputEvent::Idle`] after the poll timeout.
    fn next_event(&mut self) -> Result<InputEvent>;

    /// Read a line of text, calling `echo` with the partial line after every edit.
    /// Returns `None` when the source cannot prompt or the user cancels.
    fn read_line(&mut self, echo: &mut dyn FnMut(&str) -> Result<()>) -> Result<Option<String>>;

    /// Scripted sources never prompt and never idle.
    fn is_scripted(&self) -> bool;
}

/// Keyboard input polled through crossterm. Expects raw mode.
#[derive(Debug, Clone)]
pub struct LiveInput {
    poll: Duration,
}

impl LiveInput {
    pub fn new() -> Self {
        Self {
            poll: Duration::from_millis(INPUT_POLL_MS),
        }
    }
}

impl Default for LiveInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for LiveInput {
    fn next_event(&mut self) -> Result<InputEvent> {
        if !event::poll(self.poll)? {
            return Ok(InputEvent::Idle);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(InputEvent::Idle);
        };
        if key.kind == KeyEventKind::Release {
            return Ok(InputEvent::Idle);
        }
        if should_quit(key) {
            return Ok(InputEvent::Action(GameAction::Quit));
        }
        Ok(match handle_key_event(key) {
            Some(action) => InputEvent::Action(action),
            None => InputEvent::Unrecognized,
        })
    }

    fn read_line(&mut self, echo: &mut dyn FnMut(&str) -> Result<()>) -> Result<Option<String>> {
        let mut line = String::new();
        echo(&line)?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if should_quit(key) {
                return Ok(None);
            }
            match key.code {
                KeyCode::Enter => return Ok(Some(line)),
                KeyCode::Esc => return Ok(None),
                KeyCode::Backspace => {
                    line.pop();
                }
                KeyCode::Char(c) => line.push(c),
                _ => continue,
            }
            echo(&line)?;
        }
    }

    fn is_scripted(&self) -> bool {
        false
    }
}

/// Keys read one per line from a replay or record file.
///
/// The first non-whitespace character of each line is the key, so `KEY:SCORE` record
/// lines replay directly. Blank lines are skipped. End of input reads as quit.
#[derive(Debug)]
pub struct ScriptedInput<R> {
    reader: R,
    delay: Duration,
    line: String,
    exhausted: bool,
}

impl<R: BufRead> ScriptedInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            delay: Duration::ZERO,
            line: String::new(),
            exhausted: false,
        }
    }

    /// Sleep this long before handing out each key.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn next_key(&mut self) -> Result<Option<char>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            if let Some(key) = self.line.chars().find(|c| !c.is_whitespace()) {
                return Ok(Some(key));
            }
        }
    }
}

impl<R: BufRead> InputSource for ScriptedInput<R> {
    fn next_event(&mut self) -> Result<InputEvent> {
        if !self.exhausted && !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let key = if self.exhausted { None } else { self.next_key()? };
        let Some(key) = key else {
            if !self.exhausted {
                tracing::debug!("replay input exhausted");
            }
            self.exhausted = true;
            return Ok(InputEvent::Action(GameAction::Quit));
        };
        tracing::trace!(%key, "replay key");
        Ok(match map_char(key) {
            Some(action) => InputEvent::Action(action),
            None => InputEvent::Unrecognized,
        })
    }

    fn read_line(&mut self, _echo: &mut dyn FnMut(&str) -> Result<()>) -> Result<Option<String>> {
        Ok(None)
    }

    fn is_scripted(&self) -> bool {
        true
    }
}
