//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Up => Some(GameAction::MoveUp),
        KeyCode::Down => Some(GameAction::MoveDown),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => map_char(c),
        _ => None,
    }
}

/// Map a typed or scripted character. Letters are case-insensitive.
pub fn map_char(c: char) -> Option<GameAction> {
    GameAction::from_key(c.to_ascii_lowercase())
}

/// Ctrl-C always quits, whatever the game state.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
