//! Framebuffer: the grid of styled cells a frame is painted into.

use crate::engine::texture::DEFAULT_INK;
use crate::types::Rgb;

/// Per-cell styling. Bold marks large text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: DEFAULT_INK,
            bg: Rgb::BLACK,
            bold: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Row-major grid of cells sized to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Follow a terminal resize. The allocation is reused; contents are unspecified.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Cells `x..x + len` of row `y`, clipped to the buffer.
    pub fn run(&self, x: u16, y: u16, len: u16) -> &[Cell] {
        let Some(start) = self.index(x, y) else {
            return &[];
        };
        let end = start + len.min(self.width - x) as usize;
        &self.cells[start..end]
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(cell_ref) = self.get_mut(x, y) {
            *cell_ref = cell;
        }
    }

    /// Fill every cell with `cell`.
    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write `s` left to right from (x, y), stopping at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (cx, ch) in (x..self.width).zip(s.chars()) {
            self.put_char(cx, y, ch, style);
        }
    }

    /// Text content of row `y`, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        self.run(0, y, self.width).iter().map(|c| c.ch).collect()
    }
}
