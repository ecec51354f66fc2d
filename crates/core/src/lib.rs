//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the falling-block rules: the board, the seven shapes, the
//! mode state machine and the hi-score table. It knows nothing about sprites,
//! terminals or wall-clock time; callers feed it key edges and fixed `dt`
//! steps.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of color ids with row compaction
//! - [`piece`]: shape table, translation and rotation about a pivot point
//! - [`session`]: mode transitions, input requests and the per-tick rules
//! - [`hiscores`]: top-five table and its one-line file format
//!
//! # Game Rules
//!
//! | Rule | Behavior |
//! |------|----------|
//! | Spawn | First piece is an L in color 1; later ones are uniform random |
//! | Rotation | 90° about point 1, rejected if any point leaves the board or hits a cell |
//! | Gravity | One row once the accumulated time exceeds 0.3s (0.05s while Down is held) |
//! | Lock | A piece that cannot fall is stamped into the board |
//! | Game over | A piece that cannot fall while overlapping filled cells |
//! | Score | 40 per cleared row |
//!
//! # Example
//!
//! ```
//! use sprite_tetris_core::{GameSession, HiScores};
//! use sprite_tetris_core::types::GameMode;
//!
//! let mut session = GameSession::new(12345, HiScores::new());
//! assert_eq!(session.mode(), GameMode::Splash);
//!
//! session.start_game();
//! session.request_move(1);
//! let report = session.tick(1.0 / 30.0);
//!
//! assert!(!report.locked);
//! assert_eq!(session.score(), 0);
//! ```

pub mod board;
pub mod hiscores;
pub mod piece;
pub mod session;

pub use sprite_tetris_types as types;

pub use board::{Board, ClearedRows};
pub use hiscores::{HiScoreError, HiScores};
pub use piece::{Piece, Point, ShapeKind};
pub use session::{GameSession, TickReport};
