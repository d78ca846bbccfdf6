//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events and replay-file lines into [`crate::types::GameAction`]
//! and hides the difference between a live keyboard and a scripted key stream behind
//! [`InputSource`].

pub mod map;
pub mod source;

pub use tui_2048_types as types;

pub use map::{handle_key_event, map_char, should_quit};
pub use source::{InputEvent, InputSource, LiveInput, ScriptedInput};
