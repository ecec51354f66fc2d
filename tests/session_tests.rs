//! Session tests - mode flow, gravity, line clears and game over

use sprite_tetris::core::{GameSession, HiScores, Piece, ShapeKind};
use sprite_tetris::types::{
    GameMode, Key, KeyInput, DROP_DELAY_SECS, LINE_CLEAR_SCORE, SOFT_DROP_DELAY_SECS,
};

/// Keys pressed this frame; nothing is held.
struct Pressed<'a>(&'a [Key]);

impl KeyInput for Pressed<'_> {
    fn pressed(&self, key: Key) -> bool {
        self.0.contains(&key)
    }

    fn held(&self, _key: Key) -> bool {
        false
    }
}

fn playing(seed: u64) -> GameSession {
    let mut session = GameSession::new(seed, HiScores::new());
    session.handle_keys(&Pressed(&[Key::Space]));
    session.handle_keys(&Pressed(&[Key::S]));
    assert_eq!(session.mode(), GameMode::Playing);
    session
}

#[test]
fn test_mode_flow() {
    let mut session = GameSession::new(7, HiScores::new());
    assert_eq!(session.mode(), GameMode::Splash);

    // S does nothing on the splash screen.
    assert_eq!(session.handle_keys(&Pressed(&[Key::S])), None);
    assert_eq!(
        session.handle_keys(&Pressed(&[Key::Space])),
        Some(GameMode::Menu)
    );
    assert_eq!(
        session.handle_keys(&Pressed(&[Key::S])),
        Some(GameMode::Playing)
    );
}

#[test]
fn test_first_piece_is_l_in_color_one() {
    let session = playing(99);
    assert_eq!(*session.piece(), Piece::spawn(ShapeKind::L, 1));
    assert_eq!(session.score(), 0);
    assert!(session.board().is_empty());
}

#[test]
fn test_tick_outside_playing_does_nothing() {
    let mut session = GameSession::new(1, HiScores::new());
    session.board_mut().fill_row(19, 2);
    let report = session.tick(1.0);
    assert!(report.cleared_rows.is_empty());
    assert_eq!(session.board().row_count(19), 10);
}

#[test]
fn test_gravity_waits_for_the_drop_delay() {
    let mut session = playing(1);
    let start = *session.piece();

    session.tick(DROP_DELAY_SECS);
    assert_eq!(*session.piece(), start, "timer must exceed the delay");

    session.tick(0.01);
    assert_eq!(*session.piece(), start.shifted(0, 1));
}

#[test]
fn test_soft_drop_lasts_one_tick() {
    let mut session = playing(1);
    session.request_soft_drop();
    assert_eq!(session.drop_delay(), SOFT_DROP_DELAY_SECS);

    session.tick(0.01);
    assert_eq!(session.drop_delay(), DROP_DELAY_SECS);
}

#[test]
fn test_move_is_rejected_at_the_wall() {
    let mut session = playing(1);
    let start = *session.piece();

    session.handle_keys(&Pressed(&[Key::Left]));
    session.tick(0.01);
    assert_eq!(*session.piece(), start);

    session.handle_keys(&Pressed(&[Key::Right]));
    session.tick(0.01);
    assert_eq!(*session.piece(), start.shifted(1, 0));
}

#[test]
fn test_full_row_scores_and_clears() {
    let mut session = playing(1);
    session.board_mut().fill_row(19, 4);
    session.board_mut().fill_row(18, 4);
    session.board_mut().set(0, 17, 6);

    let report = session.tick(0.01);
    assert_eq!(report.lines_cleared(), 2);
    assert_eq!(session.score(), 2 * LINE_CLEAR_SCORE);
    assert_eq!(session.board().get(0, 19), Some(6));
    assert_eq!(session.board().row_count(0), 0);
}

#[test]
fn test_piece_locks_and_next_one_spawns() {
    let mut session = playing(5);
    let piece = Piece::spawn(ShapeKind::O, 3).shifted(4, 17);
    session.set_piece(piece);

    let report = session.tick(DROP_DELAY_SECS + 0.01);
    assert!(report.locked);
    for (x, y) in piece.cells() {
        assert_eq!(session.board().get(x, y), Some(3));
    }
    let next = session.piece();
    assert!((1..=7).contains(&next.color));
    assert!(next.fits(session.board()));
}

#[test]
fn test_game_over_records_score_and_returns_to_menu() {
    let mut session = playing(3);
    session.board_mut().fill_row(19, 1);
    session.tick(0.01);
    assert_eq!(session.score(), LINE_CLEAR_SCORE);

    // Bury the spawn area, leaving one column open so nothing clears.
    for y in 0..20 {
        for x in 0..9 {
            session.board_mut().set(x, y, 2);
        }
    }
    let report = session.tick(DROP_DELAY_SECS + 0.01);
    assert!(report.game_over);
    assert_eq!(session.mode(), GameMode::GameOver);
    assert_eq!(session.hiscores().best(), LINE_CLEAR_SCORE);

    assert_eq!(
        session.handle_keys(&Pressed(&[Key::M])),
        Some(GameMode::Menu)
    );
    session.handle_keys(&Pressed(&[Key::S]));
    assert_eq!(session.score(), 0);
    assert!(session.board().is_empty());
}
