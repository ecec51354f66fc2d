//! The well: a 10x20 grid of palette ids that pieces lock into.
//!
//! `x` grows to the right over `0..BOARD_WIDTH`, `y` grows downward over
//! `0..BOARD_HEIGHT`. A zero cell is empty; anything else is the color id
//! (1..=7) of the piece that locked there.

use arrayvec::ArrayVec;

use crate::types::{CellColor, BOARD_HEIGHT, BOARD_WIDTH};

const CELL_COUNT: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

/// Rows removed by one compaction pass, bottom-most first.
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [CellColor; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [0; CELL_COUNT],
        }
    }

    #[inline]
    fn offset(x: i8, y: i8) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < BOARD_WIDTH as usize && y < BOARD_HEIGHT as usize)
            .then_some(y * BOARD_WIDTH as usize + x)
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// `None` off the board.
    pub fn get(&self, x: i8, y: i8) -> Option<CellColor> {
        Self::offset(x, y).map(|i| self.cells[i])
    }

    /// Writes the cell and reports whether (x, y) was on the board.
    pub fn set(&mut self, x: i8, y: i8, color: CellColor) -> bool {
        let Some(i) = Self::offset(x, y) else {
            return false;
        };
        self.cells[i] = color;
        true
    }

    /// Off-board positions count as free.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.get(x, y).is_some_and(|c| c != 0)
    }

    /// Borrow one row of cells, `None` below the floor.
    pub fn row(&self, y: usize) -> Option<&[CellColor]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Number of filled cells in a row; zero for rows off the board.
    pub fn row_count(&self, y: usize) -> usize {
        self.row(y)
            .map_or(0, |row| row.iter().filter(|&&c| c != 0).count())
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|&c| c != 0))
    }

    /// Write `color` into every listed cell that lies on the board.
    ///
    /// Points above the top edge (negative y) are dropped.
    pub fn stamp(&mut self, points: &[(i8, i8)], color: CellColor) {
        for &(x, y) in points {
            self.set(x, y, color);
        }
    }

    /// Remove full rows and let everything above settle, in one bottom-up pass.
    ///
    /// Rows `BOARD_HEIGHT-1 ..= 1` are scanned with a write cursor starting at the
    /// bottom row. Every scanned row is copied to the cursor; a full row leaves the
    /// cursor in place so the next copy overwrites it, a partial row moves it up.
    /// Row 0 is never scanned as a candidate: it is moved to the final cursor
    /// position and everything above that is emptied.
    ///
    /// Returns the indices (pre-compaction) of the removed rows, bottom-most first.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let w = BOARD_WIDTH as usize;
        let mut cleared = ClearedRows::new();
        let mut cursor = BOARD_HEIGHT as usize - 1;

        for y in (1..BOARD_HEIGHT as usize).rev() {
            let full = self.row_count(y) == w;
            if cursor != y {
                self.cells.copy_within(y * w..(y + 1) * w, cursor * w);
            }
            if full {
                cleared.push(y as u8);
            } else {
                cursor -= 1;
            }
        }

        if cursor > 0 {
            self.cells.copy_within(0..w, cursor * w);
            self.cells[..cursor * w].fill(0);
        }

        cleared
    }

    /// True when no cell is filled
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Fill a whole row with one color (test setups and benches)
    pub fn fill_row(&mut self, y: i8, color: CellColor) {
        for x in 0..BOARD_WIDTH as i8 {
            self.set(x, y, color);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_row_major_and_bounded() {
        assert_eq!(Board::offset(3, 0), Some(3));
        assert_eq!(Board::offset(0, 2), Some(20));
        assert_eq!(Board::offset(9, 19), Some(CELL_COUNT - 1));
        for (x, y) in [(-1, 0), (0, -1), (10, 5), (5, 20)] {
            assert_eq!(Board::offset(x, y), None, "({x}, {y})");
        }
    }

    #[test]
    fn single_full_row_is_removed() {
        let mut board = Board::new();
        board.set(0, 17, 3);
        board.set(4, 18, 5);
        board.fill_row(19, 2);

        let cleared = board.clear_full_rows();

        assert_eq!(cleared.as_slice(), &[19]);
        assert_eq!(board.get(0, 18), Some(3));
        assert_eq!(board.get(4, 19), Some(5));
        assert_eq!(board.row_count(17), 0);
        assert_eq!(board.row_count(0), 0);
    }

    #[test]
    fn non_adjacent_full_rows() {
        let mut board = Board::new();
        board.fill_row(19, 1);
        board.set(2, 18, 4);
        board.fill_row(17, 1);
        board.set(7, 16, 6);

        let cleared = board.clear_full_rows();

        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert_eq!(board.get(2, 19), Some(4));
        assert_eq!(board.get(7, 18), Some(6));
        assert_eq!((0..20).map(|y| board.row_count(y)).sum::<usize>(), 2);
    }

    #[test]
    fn no_full_rows_leaves_board_untouched() {
        let mut board = Board::new();
        board.set(0, 0, 7);
        board.set(9, 19, 1);
        let before = board.clone();

        assert!(board.clear_full_rows().is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn full_row_one_is_removed_and_row_zero_settles() {
        let mut board = Board::new();
        board.fill_row(1, 2);
        board.set(3, 0, 6);

        let cleared = board.clear_full_rows();

        assert_eq!(cleared.as_slice(), &[1]);
        assert_eq!(board.get(3, 1), Some(6));
        assert_eq!(board.row_count(0), 0);
        assert!(!board.is_row_full(1));
    }

    #[test]
    fn rows_off_the_board_are_empty() {
        let mut board = Board::new();
        board.fill_row(19, 3);
        assert_eq!(board.row(19).map(<[_]>::len), Some(10));
        assert_eq!(board.row(20), None);
        assert_eq!(board.row(usize::MAX), None);
        assert_eq!(board.row_count(20), 0);
        assert!(!board.is_row_full(20));
    }

    #[test]
    fn stamp_skips_points_above_the_board() {
        let mut board = Board::new();
        board.stamp(&[(0, -1), (0, 0), (1, 0), (2, 0)], 4);
        assert_eq!(board.row_count(0), 3);
    }
}
