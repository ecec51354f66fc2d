//! Render surface abstraction.
//!
//! Coordinates are in canvas cells with (0, 0) at the top left. Fractional
//! positions are rounded to the nearest cell by implementations.

use crate::texture::{Texture, TextureRegistry};
use crate::types::{IntRect, Rgb};

pub trait Canvas {
    /// Logical size in cells.
    fn size(&self) -> (f32, f32);

    /// Fill the whole canvas with `color`.
    fn clear(&mut self, color: Rgb);

    /// Blit the `src` sub-rect of `texture` with its top-left corner at (x, y).
    /// Transparent texels leave the canvas untouched.
    fn draw_texture(&mut self, texture: &Texture, src: IntRect, x: f32, y: f32);

    /// Draw one line of text. `size` and `font` are hints a surface may ignore.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Rgb, size: u16, font: Option<&str>);
}

/// Anything that can paint itself onto a canvas.
pub trait Draw {
    fn draw(&self, canvas: &mut dyn Canvas, textures: &dyn TextureRegistry);
}
