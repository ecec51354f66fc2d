//! Game session - the mode state machine and the per-tick gameplay rules
//!
//! One `GameSession` owns everything gameplay mutates: board, active piece,
//! score, hi-score table and the current [`GameMode`]. Input only records
//! requests (move, rotate, soft drop); [`GameSession::tick`] applies them in a
//! fixed order and then resets them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, ClearedRows};
use crate::hiscores::HiScores;
use crate::piece::{Piece, ShapeKind};
use crate::types::{
    CellColor, GameMode, Key, KeyInput, DROP_DELAY_SECS, LINE_CLEAR_SCORE, PALETTE_SIZE,
    SOFT_DROP_DELAY_SECS,
};

/// What happened during one simulation tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The piece came to rest and was stamped into the board.
    pub locked: bool,
    /// Rows removed by this tick's compaction pass (pre-compaction indices).
    pub cleared_rows: ClearedRows,
    /// The piece could not rest; the session moved to `GameOver`.
    pub game_over: bool,
}

impl TickReport {
    pub fn lines_cleared(&self) -> u32 {
        self.cleared_rows.len() as u32
    }
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameSession {
    mode: GameMode,
    board: Board,
    piece: Piece,
    score: u32,
    hiscores: HiScores,
    /// Pending horizontal step for the next tick (-1, 0, 1)
    dx: i8,
    /// Pending rotation for the next tick
    rotate: bool,
    /// Gravity delay used by the next tick
    delay: f32,
    /// Seconds accumulated toward the next gravity step
    timer: f32,
    rng: StdRng,
}

impl GameSession {
    /// Create a session in `Splash` with a fresh board.
    pub fn new(seed: u64, hiscores: HiScores) -> Self {
        let mut session = Self {
            mode: GameMode::Splash,
            board: Board::new(),
            piece: Piece::spawn(ShapeKind::L, 1),
            score: 0,
            hiscores,
            dx: 0,
            rotate: false,
            delay: DROP_DELAY_SECS,
            timer: 0.0,
            rng: StdRng::seed_from_u64(seed),
        };
        session.new_game();
        session
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scripted setups.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Replace the active piece (scripted setups).
    pub fn set_piece(&mut self, piece: Piece) {
        self.piece = piece;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hiscores(&self) -> &HiScores {
        &self.hiscores
    }

    pub fn drop_delay(&self) -> f32 {
        self.delay
    }

    /// Reset score, board, requests and timers; the first piece is always an L in color 1.
    pub fn new_game(&mut self) {
        self.score = 0;
        self.board.clear();
        self.piece = Piece::spawn(ShapeKind::L, 1);
        self.reset_requests();
        self.timer = 0.0;
    }

    /// Menu -> Playing with a fresh game.
    pub fn start_game(&mut self) {
        self.new_game();
        self.set_mode(GameMode::Playing);
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            tracing::info!(from = self.mode.as_str(), to = mode.as_str(), "mode_changed");
            self.mode = mode;
        }
    }

    /// React to key edges for the current mode.
    ///
    /// Returns the new mode when a transition happened.
    pub fn handle_keys<K: KeyInput + ?Sized>(&mut self, keys: &K) -> Option<GameMode> {
        let before = self.mode;
        match self.mode {
            GameMode::Splash => {
                if keys.pressed(Key::Space) {
                    self.set_mode(GameMode::Menu);
                }
            }
            GameMode::Menu => {
                if keys.pressed(Key::S) {
                    self.start_game();
                }
            }
            GameMode::Playing => {
                if keys.pressed(Key::Up) {
                    self.request_rotate();
                } else if keys.pressed(Key::Left) {
                    self.request_move(-1);
                } else if keys.pressed(Key::Right) {
                    self.request_move(1);
                }

                if keys.pressed(Key::Down) || keys.held(Key::Down) {
                    self.request_soft_drop();
                }
            }
            GameMode::GameOver => {
                if keys.pressed(Key::M) {
                    self.set_mode(GameMode::Menu);
                }
            }
        }
        (self.mode != before).then_some(self.mode)
    }

    pub fn request_move(&mut self, dx: i8) {
        self.dx = dx.signum();
    }

    pub fn request_rotate(&mut self) {
        self.rotate = true;
    }

    pub fn request_soft_drop(&mut self) {
        self.delay = SOFT_DROP_DELAY_SECS;
    }

    fn reset_requests(&mut self) {
        self.dx = 0;
        self.rotate = false;
        self.delay = DROP_DELAY_SECS;
    }

    /// Apply `f` to the piece; if the result does not fit, fall back to `shadow`.
    fn try_transform(&mut self, shadow: Piece, f: impl FnOnce(&Piece) -> Piece) -> bool {
        self.piece = f(&self.piece);
        if self.piece.fits(&self.board) {
            true
        } else {
            self.piece = shadow;
            false
        }
    }

    /// Advance gameplay by one fixed step of `dt` seconds. No-op outside `Playing`.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let mut report = TickReport::default();
        if self.mode != GameMode::Playing {
            return report;
        }

        self.timer += dt;

        // One shadow covers both the move and the rotation: a rotation that
        // does not fit also undoes this tick's move.
        let shadow = self.piece;
        if self.dx != 0 {
            let dx = self.dx;
            self.try_transform(shadow, |p| p.shifted(dx, 0));
        }

        if self.rotate {
            self.try_transform(shadow, Piece::rotated);
        }

        if self.timer > self.delay {
            if !self.try_transform(self.piece, |p| p.shifted(0, 1)) {
                self.settle(&mut report);
            }
            self.timer = 0.0;
        }

        if !report.game_over {
            report.cleared_rows = self.board.clear_full_rows();
            self.score += LINE_CLEAR_SCORE * report.lines_cleared();
            if !report.cleared_rows.is_empty() {
                tracing::debug!(
                    rows = report.cleared_rows.len(),
                    score = self.score,
                    "lines_cleared"
                );
            }
        }

        self.reset_requests();
        report
    }

    /// The piece cannot move down: stamp it and spawn the next one, or end the game.
    fn settle(&mut self, report: &mut TickReport) {
        if self.piece.overlaps(&self.board) {
            report.game_over = true;
            let ranked = self.hiscores.push(self.score);
            tracing::info!(score = self.score, ranked, "game_over");
            self.set_mode(GameMode::GameOver);
            return;
        }

        self.board.stamp(&self.piece.cells(), self.piece.color);
        report.locked = true;
        self.piece = self.random_piece();
    }

    fn random_piece(&mut self) -> Piece {
        let color: CellColor = self.rng.gen_range(1..=PALETTE_SIZE);
        let kind = ShapeKind::ALL[self.rng.gen_range(0..ShapeKind::ALL.len())];
        Piece::spawn(kind, color)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1, HiScores::new())
    }
}
