//! Piece tests - shape table, movement and rotation

use sprite_tetris::core::{Board, Piece, ShapeKind};
use sprite_tetris::types::BOARD_HEIGHT;

#[test]
fn test_every_shape_spawns_in_the_stencil() {
    let board = Board::new();
    for kind in ShapeKind::ALL {
        let piece = Piece::spawn(kind, 1);
        assert!(piece.fits(&board), "{:?} should fit on an empty board", kind);
        for (x, y) in piece.cells() {
            assert!((0..2).contains(&x), "{:?} x={} outside stencil", kind, x);
            assert!((0..4).contains(&y), "{:?} y={} outside stencil", kind, y);
        }
    }
}

#[test]
fn test_i_piece_is_vertical() {
    let piece = Piece::spawn(ShapeKind::I, 1);
    assert_eq!(piece.cells(), [(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn test_four_rotations_return_to_start() {
    for kind in ShapeKind::ALL {
        let start = Piece::spawn(kind, 2).shifted(4, 5);
        let mut piece = start;
        for _ in 0..4 {
            piece = piece.rotated();
        }
        assert_eq!(piece, start, "{:?}", kind);
    }
}

#[test]
fn test_rotation_keeps_pivot() {
    let piece = Piece::spawn(ShapeKind::T, 3).shifted(4, 4);
    let pivot = piece.points[1];
    assert_eq!(piece.rotated().points[1], pivot);
}

#[test]
fn test_walls_and_floor_reject_pieces() {
    let board = Board::new();
    let piece = Piece::spawn(ShapeKind::O, 1);

    assert!(!piece.shifted(-1, 0).fits(&board));
    assert!(piece.shifted(8, 0).fits(&board));
    assert!(!piece.shifted(9, 0).fits(&board));
    assert!(piece.shifted(0, BOARD_HEIGHT as i8 - 3).fits(&board));
    assert!(!piece.shifted(0, BOARD_HEIGHT as i8 - 2).fits(&board));
}

#[test]
fn test_points_above_the_top_are_accepted() {
    let board = Board::new();
    let piece = Piece::spawn(ShapeKind::I, 1).shifted(3, -2);
    assert!(piece.fits(&board));
}

#[test]
fn test_filled_cells_block_and_overlap() {
    let mut board = Board::new();
    board.set(1, 3, 5);
    let piece = Piece::spawn(ShapeKind::I, 1);

    assert!(!piece.fits(&board));
    assert!(piece.overlaps(&board));
    assert!(piece.shifted(1, 0).fits(&board));
}
