//! Piece module - the falling four-cell piece
//!
//! Shapes come from a compact table: each shape lists four cell numbers in a
//! 2-column x 4-row stencil (`x = n % 2`, `y = n / 2`). A freshly spawned piece
//! sits at exactly those offsets, in the top-left corner of the board.
//!
//! Rotation is a plain 90° integer transform about the piece's second point,
//! with no wall kicks: a rotation that does not fit is simply rejected.

use crate::board::Board;
use crate::types::{CellColor, BOARD_HEIGHT, BOARD_WIDTH};

/// Stencil cell numbers per shape, in [`ShapeKind::ALL`] order.
const FIGURES: [[u8; 4]; 7] = [
    [1, 3, 5, 7], // I
    [2, 4, 5, 7], // Z
    [3, 5, 4, 6], // S
    [3, 5, 4, 7], // T
    [2, 3, 5, 7], // L
    [3, 5, 7, 6], // J
    [2, 3, 4, 5], // O
];

/// Index of the point every rotation turns around.
pub const PIVOT: usize = 1;

/// The seven shapes, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    Z,
    S,
    T,
    L,
    J,
    O,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::Z,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::O,
    ];

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// Spawn-position points for this shape.
    pub fn points(self) -> [Point; 4] {
        FIGURES[self as usize].map(|n| Point::new((n % 2) as i8, (n / 2) as i8))
    }
}

/// A grid coordinate. `y` may go negative after a rotation near the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i8,
    pub y: i8,
}

impl Point {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Whether this point may be occupied by the active piece.
    ///
    /// Horizontal bounds and the floor are enforced; the top edge is not, so a
    /// point above the board is accepted as long as the other checks pass.
    pub fn fits(self, board: &Board) -> bool {
        if self.x < 0 || self.x >= BOARD_WIDTH as i8 || self.y >= BOARD_HEIGHT as i8 {
            return false;
        }
        !board.is_occupied(self.x, self.y)
    }
}

/// Active falling piece: four points and a palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub points: [Point; 4],
    pub color: CellColor,
}

impl Piece {
    /// A piece at the table offsets for `kind`.
    pub fn spawn(kind: ShapeKind, color: CellColor) -> Self {
        Self {
            points: kind.points(),
            color,
        }
    }

    /// Copy moved by (dx, dy).
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            points: self.points.map(|p| Point::new(p.x + dx, p.y + dy)),
            color: self.color,
        }
    }

    /// Copy turned 90° about point [`PIVOT`].
    pub fn rotated(&self) -> Self {
        let pivot = self.points[PIVOT];
        Self {
            points: self.points.map(|p| {
                Point::new(pivot.x - (p.y - pivot.y), pivot.y + (p.x - pivot.x))
            }),
            color: self.color,
        }
    }

    /// Every point fits on `board`.
    pub fn fits(&self, board: &Board) -> bool {
        self.points.iter().all(|p| p.fits(board))
    }

    /// Any point sits on an already filled cell.
    pub fn overlaps(&self, board: &Board) -> bool {
        self.points.iter().any(|p| board.is_occupied(p.x, p.y))
    }

    pub fn cells(&self) -> [(i8, i8); 4] {
        self.points.map(|p| (p.x, p.y))
    }
}
