//! Sprite Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `sprite_tetris::{core,engine,input,term,types}`
//! and hosts the pieces that tie them together: the [`app`] glue and the
//! [`config`] loader used by the binary.

pub use sprite_tetris_core as core;
pub use sprite_tetris_engine as engine;
pub use sprite_tetris_input as input;
pub use sprite_tetris_term as term;
pub use sprite_tetris_types as types;

pub mod app;
pub mod config;
