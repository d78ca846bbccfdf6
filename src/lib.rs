//! TUI 2048 (workspace facade crate).
//!
//! Re-exports the member crates as `tui_2048::{types,core,input,term,store}` and hosts
//! the command-line options and the control loop that ties them together.

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_store as store;
pub use tui_2048_term as term;
pub use tui_2048_types as types;

pub mod app;
pub mod cli;
