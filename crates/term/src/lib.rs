//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders into a simple framebuffer that is diffed and flushed to the
//! terminal, and exposes that framebuffer to the engine as a [`Canvas`].
//!
//! Goals:
//! - Keep the engine unaware of terminals
//! - Only write changed cells each frame
//! - Clip the logical playfield inside whatever size the terminal has

pub mod audio;
pub mod canvas;
pub mod fb;
pub mod renderer;

pub use sprite_tetris_engine as engine;
pub use sprite_tetris_types as types;

pub use audio::TerminalAudio;
pub use canvas::{FrameCanvas, Viewport};
pub use engine::Canvas;
pub use fb::{Cell, CellStyle, FrameBuffer};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
