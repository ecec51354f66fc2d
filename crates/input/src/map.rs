//! Key mapping from terminal events to game keys.

use crate::types::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a terminal key code to a game key. Quit keys are not game keys; see [`should_quit`].
pub fn map_key_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),

        KeyCode::Char(' ') => Some(Key::Space),

        KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::S),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Key::M),

        _ => None,
    }
}

/// Map a key event, ignoring anything chorded with Ctrl or Alt.
pub fn handle_key_event(key: KeyEvent) -> Option<Key> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    map_key_code(key.code)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
