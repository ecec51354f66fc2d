//! FrameCanvas: the engine's [`Canvas`] over a terminal framebuffer.
//!
//! A fixed-size logical canvas is placed inside the (usually larger) terminal
//! framebuffer. Everything drawn is clipped to the logical area, so sprites
//! that wander off the playfield never bleed into the margins.

use crate::engine::{Canvas, Texture};
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{IntRect, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub struct FrameCanvas<'a> {
    fb: &'a mut FrameBuffer,
    origin_x: i32,
    origin_y: i32,
    width: u16,
    height: u16,
}

impl<'a> FrameCanvas<'a> {
    /// Logical canvas with its top-left corner at framebuffer cell (x, y).
    pub fn new(fb: &'a mut FrameBuffer, x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            fb,
            origin_x: x,
            origin_y: y,
            width,
            height,
        }
    }

    /// Logical canvas centered in the framebuffer.
    ///
    /// When the terminal is smaller than the canvas the top-left corner is
    /// pinned at (0, 0) and the rest is clipped.
    pub fn centered(fb: &'a mut FrameBuffer, width: u16, height: u16) -> Self {
        let x = fb.width().saturating_sub(width) / 2;
        let y = fb.height().saturating_sub(height) / 2;
        Self::new(fb, x as i32, y as i32, width, height)
    }

    /// Framebuffer cell for logical cell (x, y), if visible.
    fn target(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let fx = self.origin_x + x;
        let fy = self.origin_y + y;
        if fx < 0 || fy < 0 || fx >= self.fb.width() as i32 || fy >= self.fb.height() as i32 {
            return None;
        }
        Some((fx as u16, fy as u16))
    }

    /// Overwrite glyph and foreground, keeping the cell's background.
    fn paint(&mut self, x: i32, y: i32, ch: char, fg: Rgb, bold: bool) {
        let Some((fx, fy)) = self.target(x, y) else {
            return;
        };
        if let Some(cell) = self.fb.get_mut(fx, fy) {
            cell.ch = ch;
            cell.style.fg = fg;
            cell.style.bold = bold;
        }
    }
}

impl Canvas for FrameCanvas<'_> {
    fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    fn clear(&mut self, color: Rgb) {
        let style = CellStyle {
            bg: color,
            ..CellStyle::default()
        };
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if let Some((fx, fy)) = self.target(x, y) {
                    self.fb.put_char(fx, fy, ' ', style);
                }
            }
        }
    }

    fn draw_texture(&mut self, texture: &Texture, src: IntRect, x: f32, y: f32) {
        let x0 = x.round() as i32;
        let y0 = y.round() as i32;
        for ty in 0..src.height {
            for tx in 0..src.width {
                if let Some(texel) = texture.sample(src.left + tx, src.top + ty) {
                    self.paint(x0 + tx, y0 + ty, texel.ch, texel.fg, false);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Rgb, size: u16, _font: Option<&str>) {
        let x0 = x.round() as i32;
        let y0 = y.round() as i32;
        for (i, ch) in text.chars().enumerate() {
            self.paint(x0 + i as i32, y0, ch, color, size > 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::texture::Texel;

    #[test]
    fn centered_canvas_offsets_and_clips() {
        let mut fb = FrameBuffer::new(10, 4);
        {
            let mut canvas = FrameCanvas::centered(&mut fb, 4, 2);
            canvas.clear(Rgb::new(1, 2, 3));
            canvas.draw_text("abcdef", 1.0, 0.0, Rgb::WHITE, 1, None);
        }
        assert_eq!(fb.row_text(1), "    abc   ");
        assert_eq!(fb.get(3, 1).map(|c| c.style.bg), Some(Rgb::new(1, 2, 3)));
        assert_eq!(fb.get(2, 1).map(|c| c.style.bg), Some(Rgb::BLACK));
    }

    #[test]
    fn transparent_texels_keep_underlying_cells() {
        let mut fb = FrameBuffer::new(4, 1);
        let mut tex = Texture::new(3, 1);
        tex.set(0, 0, Some(Texel::new('#', Rgb::WHITE)));
        tex.set(2, 0, Some(Texel::new('#', Rgb::WHITE)));
        {
            let mut canvas = FrameCanvas::new(&mut fb, 0, 0, 4, 1);
            canvas.draw_text("....", 0.0, 0.0, Rgb::WHITE, 1, None);
            canvas.draw_texture(&tex, tex.bounds(), 1.0, 0.0);
        }
        assert_eq!(fb.row_text(0), ".#.#");
    }

    #[test]
    fn sub_rect_selects_atlas_frame() {
        let mut fb = FrameBuffer::new(2, 1);
        let tex = Texture::from_art("ab");
        {
            let mut canvas = FrameCanvas::new(&mut fb, 0, 0, 2, 1);
            canvas.draw_texture(&tex, IntRect::new(1, 0, 1, 1), 0.0, 0.0);
        }
        assert_eq!(fb.row_text(0), "b ");
    }
}
