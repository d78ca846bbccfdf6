//! Terminal game renderer.
//!
//! Renders into a plain framebuffer (no widget toolkit) that is diffed and flushed to
//! the terminal through crossterm. The view layer is pure and unit-tested; only
//! [`TerminalRenderer`] touches the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{format_clock, tile_label, AnchorY, GameView, StatusView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
