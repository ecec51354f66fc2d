//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Key`] and tracks per-frame
//! key state with press edges, suitable for terminal environments (including
//! terminals without key-release events).

pub mod keyboard;
pub mod map;

pub use sprite_tetris_types as types;

pub use keyboard::KeyboardState;
pub use map::{handle_key_event, map_key_code, should_quit};
