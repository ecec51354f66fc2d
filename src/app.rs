//! TetrisApp: the game session dressed up with sprites, backgrounds and sound.
//!
//! The app owns everything that is not pure game rules: the asset store, the
//! sprite collection used for line-clear sparks, one background per mode and
//! the audio sink. It knows nothing about terminals; `main.rs` feeds it key
//! state and hands it a [`Canvas`] to paint on.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{GameSession, HiScores, TickReport};
use crate::engine::assets::{FRAME_TEXTURE, TILES_TEXTURE, TILE_HEIGHT, TILE_WIDTH};
use crate::engine::{
    AssetStore, Audio, Background, BoundsAction, Canvas, Draw, Sprite, SpriteCollection,
    SpriteHooks, Texture, TextureRegistry,
};
use crate::types::{GameMode, KeyInput, Rect, Rgb, Vec2, BOARD_HEIGHT, BOARD_WIDTH, PALETTE_SIZE};

/// Logical canvas size in terminal cells.
pub const CANVAS_WIDTH: u16 = 40;
pub const CANVAS_HEIGHT: u16 = 22;

/// Top-left cell of board cell (0, 0).
pub const BOARD_LEFT: f32 = 2.0;
pub const BOARD_TOP: f32 = 1.0;

pub const LINE_SOUND: &str = "line";
pub const MUSIC_TRACK: &str = "music";

pub const SPLASH_TEXTURE: &str = "splash";
pub const MENU_TEXTURE: &str = "menu";
pub const BACKGROUND_TEXTURE: &str = "background";
pub const SPARK_TEXTURE: &str = "spark";

/// Sparks spawned for every cleared row.
pub const SPARKS_PER_ROW: usize = 6;
const SPARK_FRAME_DELAY: i32 = 3;
const SPARK_Z: i32 = 10;

const NUM_STARS: usize = 100;
const TWINKLE_DELAY: u32 = 20;
const MENU_SCROLL_SPEED: f32 = 0.25;

const TEXT_X: f32 = 25.0;
const DIM: Rgb = Rgb::new(16, 16, 24);

/// Sparks fly through each other and are counted as they burn out.
#[derive(Debug, Clone, Copy, Default)]
struct SparkHooks {
    expired: u64,
}

impl SpriteHooks for SparkHooks {
    fn sprite_collision(&mut self, _mover: &Sprite, _other: &Sprite) -> bool {
        false
    }

    fn sprite_dying(&mut self, sprite: &Sprite) {
        if sprite.name() == SPARK_TEXTURE {
            self.expired += 1;
        }
    }
}

#[derive(Debug, Clone)]
struct Backgrounds {
    splash: Background,
    menu: Background,
    playing: Background,
    game_over: Background,
}

impl Backgrounds {
    fn new(assets: &AssetStore, seed: u64) -> Self {
        let menu_width = assets
            .texture(MENU_TEXTURE)
            .map(Texture::width)
            .unwrap_or(CANVAS_WIDTH);
        Self {
            splash: Background::starry(CANVAS_WIDTH, CANVAS_HEIGHT, NUM_STARS, TWINKLE_DELAY, seed),
            menu: Background::scrolling(MENU_TEXTURE, menu_width, MENU_SCROLL_SPEED),
            playing: Background::image(BACKGROUND_TEXTURE, DIM),
            game_over: Background::starry(
                CANVAS_WIDTH,
                CANVAS_HEIGHT,
                NUM_STARS,
                TWINKLE_DELAY,
                seed.wrapping_add(1),
            ),
        }
    }

    fn get(&self, mode: GameMode) -> &Background {
        match mode {
            GameMode::Splash => &self.splash,
            GameMode::Menu => &self.menu,
            GameMode::Playing => &self.playing,
            GameMode::GameOver => &self.game_over,
        }
    }

    fn get_mut(&mut self, mode: GameMode) -> &mut Background {
        match mode {
            GameMode::Splash => &mut self.splash,
            GameMode::Menu => &mut self.menu,
            GameMode::Playing => &mut self.playing,
            GameMode::GameOver => &mut self.game_over,
        }
    }
}

pub struct TetrisApp<A: Audio> {
    session: GameSession,
    assets: AssetStore,
    audio: A,
    sprites: SpriteCollection,
    hooks: SparkHooks,
    backgrounds: Backgrounds,
    /// Draws every board cell; repositioned and re-framed per cell.
    tile: Sprite,
    rng: StdRng,
    suspended: bool,
}

impl<A: Audio> TetrisApp<A> {
    pub fn new(session: GameSession, mut assets: AssetStore, audio: A, seed: u64) -> Self {
        if !assets.has_texture(SPARK_TEXTURE) {
            assets.insert_texture(SPARK_TEXTURE, Texture::from_art("*+:."));
        }
        let backgrounds = Backgrounds::new(&assets, seed);
        let tile = Sprite::new(TILES_TEXTURE, TILE_WIDTH as f32, TILE_HEIGHT as f32)
            .with_name(TILES_TEXTURE)
            .with_frames(PALETTE_SIZE as u32 + 1, false);
        Self {
            session,
            assets,
            audio,
            sprites: SpriteCollection::new(),
            hooks: SparkHooks::default(),
            backgrounds,
            tile,
            rng: StdRng::seed_from_u64(seed),
            suspended: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn sprites(&self) -> &SpriteCollection {
        &self.sprites
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Sparks that have burned out so far.
    pub fn expired_sparks(&self) -> u64 {
        self.hooks.expired
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Start the looping background track.
    pub fn start(&mut self) {
        self.audio.play_music(MUSIC_TRACK, true);
        tracing::info!(mode = self.session.mode().as_str(), "app_started");
    }

    /// Stop the music and hand back the hi-score table for saving.
    pub fn shutdown(&mut self) -> HiScores {
        self.audio.stop_music();
        *self.session.hiscores()
    }

    /// Losing focus suspends the simulation and pauses music; regaining it resumes both.
    pub fn set_focused(&mut self, focused: bool) {
        if focused == !self.suspended {
            return;
        }
        self.suspended = !focused;
        if focused {
            self.audio.resume_music();
        } else {
            self.audio.pause_music();
        }
        tracing::info!(focused, "focus_changed");
    }

    pub fn handle_input<K: KeyInput + ?Sized>(&mut self, keys: &K) -> Option<GameMode> {
        let changed = self.session.handle_keys(keys);
        if changed == Some(GameMode::Playing) {
            self.sprites.clear();
        }
        changed
    }

    /// One fixed simulation step.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let report = self.session.tick(dt);
        for &row in &report.cleared_rows {
            self.audio.play_sound(LINE_SOUND);
            self.spawn_sparks(row);
        }
        self.sprites.update_all(dt, &mut self.hooks);
        self.backgrounds.get_mut(self.session.mode()).update();
        report
    }

    fn spawn_sparks(&mut self, row: u8) {
        let bounds = Rect::new(
            BOARD_LEFT,
            BOARD_TOP,
            BOARD_WIDTH as f32 * TILE_WIDTH as f32,
            BOARD_HEIGHT as f32 * TILE_HEIGHT as f32,
        );
        let y = BOARD_TOP + row as f32 * TILE_HEIGHT as f32;
        for _ in 0..SPARKS_PER_ROW {
            let x = self.rng.gen_range(bounds.left..bounds.right());
            let velocity = Vec2::new(self.rng.gen_range(-8.0..8.0), self.rng.gen_range(-6.0..-1.0));
            self.sprites.add(
                Sprite::new(SPARK_TEXTURE, 1.0, 1.0)
                    .with_name(SPARK_TEXTURE)
                    .with_position(x, y)
                    .with_velocity(velocity)
                    .with_z_order(SPARK_Z)
                    .with_bounds(bounds, BoundsAction::Die)
                    .with_frames(4, true)
                    .with_frame_delay(SPARK_FRAME_DELAY),
            );
        }
    }

    /// Paint the current mode's screen.
    pub fn paint(&mut self, canvas: &mut dyn Canvas) {
        let mode = self.session.mode();
        canvas.clear(Rgb::BLACK);
        self.backgrounds.get(mode).draw(canvas, &self.assets);

        match mode {
            GameMode::Splash => self.paint_splash(canvas),
            GameMode::Menu => self.paint_menu(canvas),
            GameMode::Playing => self.paint_game(canvas),
            GameMode::GameOver => self.paint_game_over(canvas),
        }

        self.sprites.draw_all(canvas, &self.assets);
    }

    fn paint_splash(&self, canvas: &mut dyn Canvas) {
        match self.assets.texture(SPLASH_TEXTURE) {
            Some(tex) => canvas.draw_texture(tex, tex.bounds(), 0.0, 0.0),
            None => canvas.draw_text("SPRITE TETRIS", 13.0, 8.0, Rgb::CYAN, 2, None),
        }
        canvas.draw_text("PRESS SPACE", 14.0, 18.0, Rgb::WHITE, 1, None);
    }

    fn paint_menu(&self, canvas: &mut dyn Canvas) {
        canvas.draw_text("HI-SCORES", 15.0, 4.0, Rgb::CYAN, 2, None);
        for (i, score) in self.session.hiscores().scores().iter().enumerate() {
            let line = format!("{}. {:>6}", i + 1, score);
            canvas.draw_text(&line, 15.0, 6.0 + i as f32 * 2.0, Rgb::CYAN, 1, None);
        }
        canvas.draw_text("PRESS S", 16.0, 18.0, Rgb::WHITE, 1, None);
    }

    fn paint_game(&mut self, canvas: &mut dyn Canvas) {
        let board = self.session.board();
        for y in 0..board.height() as i8 {
            for x in 0..board.width() as i8 {
                if let Some(color) = board.get(x, y).filter(|&c| c != 0) {
                    draw_tile(&mut self.tile, canvas, &self.assets, x, y, color);
                }
            }
        }
        let piece = *self.session.piece();
        for (x, y) in piece.cells() {
            if y >= 0 {
                draw_tile(&mut self.tile, canvas, &self.assets, x, y, piece.color);
            }
        }

        if let Some(frame) = self.assets.texture(FRAME_TEXTURE) {
            canvas.draw_texture(frame, frame.bounds(), BOARD_LEFT - 1.0, BOARD_TOP - 1.0);
        }

        let score = format!("SCORE:  {}", self.session.score());
        canvas.draw_text(&score, TEXT_X, 2.0, Rgb::WHITE, 1, None);
        let best = format!("BEST:   {}", self.session.hiscores().best());
        canvas.draw_text(&best, TEXT_X, 4.0, Rgb::gray(160), 1, None);
    }

    fn paint_game_over(&self, canvas: &mut dyn Canvas) {
        canvas.draw_text("GAME OVER", 15.0, 8.0, Rgb::CYAN, 2, None);
        let score = format!("SCORE:  {}", self.session.score());
        canvas.draw_text(&score, 15.0, 11.0, Rgb::WHITE, 1, None);
        canvas.draw_text("PRESS M", 16.0, 18.0, Rgb::CYAN, 1, None);
    }
}

fn draw_tile(
    tile: &mut Sprite,
    canvas: &mut dyn Canvas,
    textures: &dyn TextureRegistry,
    x: i8,
    y: i8,
    color: u8,
) {
    tile.set_frame(color as u32);
    tile.set_position(
        BOARD_LEFT + x as f32 * TILE_WIDTH as f32,
        BOARD_TOP + y as f32 * TILE_HEIGHT as f32,
    );
    tile.draw(canvas, textures);
}
