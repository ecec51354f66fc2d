//! Shared types module - plain data structures and constants
//!
//! Everything in here is dependency-free data used by the engine, the game
//! rules, the input layer and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Palette**: color ids 1-7, 0 means an empty cell
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_RATE_HZ` | 30 | Fixed simulation ticks per second |
//! | `DEFAULT_MAX_TICKS_PER_FRAME` | 5 | Catch-up cap per rendered frame |
//! | `DROP_DELAY_SECS` | 0.3 | Gravity delay between rows |
//! | `SOFT_DROP_DELAY_SECS` | 0.05 | Gravity delay while Down is held |
//!
//! # Examples
//!
//! ```
//! use sprite_tetris_types::{GameMode, Key, Rect, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let a = Rect::new(0.0, 0.0, 4.0, 2.0);
//! assert!(a.contains(1.0, 1.0));
//! assert!(!a.contains(4.0, 1.0));
//!
//! assert_eq!(Key::from_index(Key::Space.index()), Some(Key::Space));
//! assert_eq!(GameMode::Splash.as_str(), "splash");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of colors in the piece palette (ids 1..=7)
pub const PALETTE_SIZE: u8 = 7;

/// Points awarded for every cleared row
pub const LINE_CLEAR_SCORE: u32 = 40;

/// Gravity delay in seconds
pub const DROP_DELAY_SECS: f32 = 0.3;

/// Gravity delay in seconds while soft dropping
pub const SOFT_DROP_DELAY_SECS: f32 = 0.05;

/// Default simulation rate
pub const DEFAULT_TICK_RATE_HZ: u32 = 30;

/// Default upper bound on simulation ticks run for one rendered frame
pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 5;

/// Number of entries in the persisted hi-score table
pub const HISCORE_SLOTS: usize = 5;

/// Upper bound on stars in a starfield backdrop
pub const MAX_STARS: usize = 100;


/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray level `v` on all three channels.
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }
}

/// 2D vector (velocity, offsets).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned float rectangle (left/top origin, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Half-open containment: `left <= x < right`, `top <= y < bottom`.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Overlap test with inclusive edges (touching rectangles overlap).
    pub fn overlaps_inclusive(&self, other: &Rect) -> bool {
        self.left <= other.right()
            && other.left <= self.right()
            && self.top <= other.bottom()
            && other.top <= self.bottom()
    }

    /// Shrink by `dx` on the left and right and by `dy` on the top and bottom.
    pub fn inset(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            width: self.width - dx * 2.0,
            height: self.height - dy * 2.0,
        }
    }
}

/// Integer rectangle, used to select a sub-rect of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Keys the game reacts to.
///
/// The set is closed so keyboard state can live in fixed arrays indexed by
/// [`Key::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    S,
    M,
}

/// Number of [`Key`] variants.
pub const KEY_COUNT: usize = 7;

impl Key {
    pub const ALL: [Key; KEY_COUNT] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Space,
        Key::S,
        Key::M,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }
}

/// Top-level game mode; selects both input handling and what gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Splash,
    Menu,
    Playing,
    GameOver,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Splash => "splash",
            GameMode::Menu => "menu",
            GameMode::Playing => "playing",
            GameMode::GameOver => "game_over",
        }
    }
}

/// A board cell: 0 is empty, 1..=7 is a palette color id.
pub type CellColor = u8;

/// Per-frame view of the keyboard.
pub trait KeyInput {
    /// Down this frame and up the previous frame.
    fn pressed(&self, key: Key) -> bool;
    /// Down this frame.
    fn held(&self, key: Key) -> bool;
}
