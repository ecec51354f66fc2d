//! Small 2D sprite engine for cell-based displays.
//!
//! The engine does not know what it is drawing to or playing through: it
//! talks to a [`Canvas`], a [`TextureRegistry`] and an [`Audio`] backend, all
//! supplied by the caller.
//!
//! # Module Structure
//!
//! - [`sprite`]: a single sprite - movement, bounds policy, animation, collision rect
//! - [`sprites`]: z-ordered sprite collection with update/collision/removal hooks
//! - [`game_loop`]: fixed-timestep loop driving a [`Game`]
//! - [`background`]: solid, image, scrolling and starfield backdrops
//! - [`texture`]: text-art textures and the registry lookup trait
//! - [`assets`]: manifest-driven asset store with built-in textures
//! - [`canvas`]: render surface and [`Draw`] traits
//! - [`audio`]: audio service trait and music channel bookkeeping

pub mod assets;
pub mod audio;
pub mod background;
pub mod canvas;
pub mod game_loop;
pub mod sprite;
pub mod sprites;
pub mod texture;

pub use sprite_tetris_types as types;

pub use assets::{AssetError, AssetKind, AssetStore, ManifestEntry};
pub use audio::{Audio, MusicChannel, MusicState, NullAudio};
pub use background::{Background, Star};
pub use canvas::{Canvas, Draw};
pub use game_loop::{
    Clock, FixedTimestep, Game, GameLoop, LoopConfig, LoopControl, LoopStats, StepPlan,
    SystemClock,
};
pub use sprite::{BoundsAction, Sprite, SpriteAction};
pub use sprites::{NoHooks, SpriteCollection, SpriteHooks, SpriteId};
pub use texture::{Texel, Texture, TextureRegistry};
