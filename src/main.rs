//! Terminal Tetris runner (default binary).
//!
//! Wires the fixed-timestep loop to crossterm input, the framebuffer renderer
//! and the terminal bell. Logs go to a file because the terminal is in raw,
//! alternate-screen mode while the game runs.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use sprite_tetris::app::{TetrisApp, CANVAS_HEIGHT, CANVAS_WIDTH};
use sprite_tetris::config::{Args, Config};
use sprite_tetris::core::{GameSession, HiScores};
use sprite_tetris::engine::{AssetStore, Game, GameLoop, LoopControl, SystemClock};
use sprite_tetris::input::{handle_key_event, should_quit, KeyboardState};
use sprite_tetris::term::{Cell, FrameBuffer, FrameCanvas, TerminalAudio, TerminalRenderer};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::resolve(&args)?;
    init_logging(&config)?;

    let hiscores = match HiScores::load(&config.hiscores_path) {
        Ok(scores) => scores,
        Err(e) => {
            tracing::warn!(error = %e, "hiscores_unreadable");
            HiScores::new()
        }
    };
    let seed = config.seed.unwrap_or_else(rand::random);
    let assets = AssetStore::load(&config.assets_dir);
    let audio = TerminalAudio::from_assets(&assets, config.bell);
    tracing::info!(
        seed,
        tick_rate = config.tick_rate_hz,
        max_ticks_per_frame = config.max_ticks_per_frame,
        "startup"
    );

    let mut app = TetrisApp::new(GameSession::new(seed, hiscores), assets, audio, seed);
    app.start();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut game = TerminalGame::new(app, term);
    let mut game_loop = GameLoop::new(SystemClock::new(), config.loop_config());
    let result = game_loop.run(&mut game);

    // Always try to restore terminal state.
    let _ = game.term.exit();

    let hiscores = game.app.shutdown();
    if let Err(e) = hiscores.save(&config.hiscores_path) {
        tracing::error!(error = %e, "hiscores_save_failed");
    }

    let stats = result?;
    tracing::info!(
        frames = stats.frames,
        ticks = stats.ticks,
        clamped_frames = stats.clamped_frames,
        "shutdown"
    );
    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

struct TerminalGame {
    app: TetrisApp<TerminalAudio>,
    term: TerminalRenderer,
    keyboard: KeyboardState,
    fb: FrameBuffer,
}

impl TerminalGame {
    fn new(app: TetrisApp<TerminalAudio>, term: TerminalRenderer) -> Self {
        Self {
            app,
            term,
            keyboard: KeyboardState::new(),
            fb: FrameBuffer::new(0, 0),
        }
    }

    fn handle_event(&mut self, ev: Event) -> LoopControl {
        match ev {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Release && should_quit(key) {
                    return LoopControl::Stop;
                }
                if let Some(k) = handle_key_event(key) {
                    match key.kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            self.keyboard.record_press(k, Instant::now())
                        }
                        KeyEventKind::Release => self.keyboard.record_release(k),
                    }
                }
            }
            Event::FocusLost => {
                self.keyboard.reset();
                self.app.set_focused(false);
            }
            Event::FocusGained => {
                self.keyboard.reset();
                self.app.set_focused(true);
            }
            Event::Resize(..) => self.term.invalidate(),
            _ => {}
        }
        LoopControl::Continue
    }
}

impl Game for TerminalGame {
    type Error = anyhow::Error;

    fn process_events(&mut self, budget: Duration) -> Result<LoopControl> {
        let mut timeout = budget;
        while event::poll(timeout)? {
            if self.handle_event(event::read()?) == LoopControl::Stop {
                return Ok(LoopControl::Stop);
            }
            timeout = Duration::ZERO;
        }

        self.keyboard.expire(Instant::now());
        if !self.app.is_suspended() {
            self.app.handle_input(&self.keyboard);
        }
        self.keyboard.end_frame();
        Ok(LoopControl::Continue)
    }

    fn suspended(&self) -> bool {
        self.app.is_suspended()
    }

    fn tick(&mut self, dt: f32) -> Result<()> {
        self.app.tick(dt);
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((CANVAS_WIDTH, CANVAS_HEIGHT));
        self.fb.resize(w, h);
        self.fb.clear(Cell::default());
        {
            let mut canvas = FrameCanvas::centered(&mut self.fb, CANVAS_WIDTH, CANVAS_HEIGHT);
            self.app.paint(&mut canvas);
        }
        for _ in 0..self.app.audio_mut().take_bells() {
            self.term.queue_bell();
        }
        self.term.draw_swap(&mut self.fb)
    }
}
