//! Text-art textures.
//!
//! A texture is a grid of optional texels; `None` is transparent. Art files
//! use one character per texel:
//!
//! | char | texel |
//! |------|-------|
//! | space | transparent |
//! | `0`-`9` | solid block in [`ART_PALETTE`] color |
//! | anything else | that glyph in [`DEFAULT_INK`] |

use std::collections::HashMap;

use crate::types::{IntRect, Rgb};

/// Glyph used for solid art cells.
pub const BLOCK: char = '█';

/// Foreground for non-digit art glyphs.
pub const DEFAULT_INK: Rgb = Rgb::new(220, 220, 220);

/// Colors for art digits. Entries 1..=7 double as the piece palette.
pub const ART_PALETTE: [Rgb; 10] = [
    Rgb::new(40, 40, 40),
    Rgb::new(220, 50, 47),
    Rgb::new(133, 200, 0),
    Rgb::new(38, 139, 210),
    Rgb::new(240, 200, 0),
    Rgb::new(211, 54, 130),
    Rgb::new(42, 200, 190),
    Rgb::new(240, 130, 20),
    Rgb::new(128, 128, 128),
    Rgb::new(255, 255, 255),
];

/// One drawable texture cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texel {
    pub ch: char,
    pub fg: Rgb,
}

impl Texel {
    pub const fn new(ch: char, fg: Rgb) -> Self {
        Self { ch, fg }
    }

    /// Decode one art character.
    pub fn from_art(ch: char) -> Option<Self> {
        match ch {
            ' ' => None,
            '0'..='9' => {
                let idx = ch as usize - '0' as usize;
                Some(Self::new(BLOCK, ART_PALETTE[idx]))
            }
            other => Some(Self::new(other, DEFAULT_INK)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: u16,
    height: u16,
    texels: Vec<Option<Texel>>,
}

impl Texture {
    /// Fully transparent texture.
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            texels: vec![None; len],
        }
    }

    /// Parse text art. Short lines are padded with transparent texels.
    pub fn from_art(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let width = lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16;
        let height = lines.len().min(u16::MAX as usize) as u16;

        let mut tex = Self::new(width, height);
        for (y, line) in lines.iter().enumerate().take(height as usize) {
            for (x, ch) in line.chars().enumerate().take(width as usize) {
                tex.set(x as u16, y as u16, Texel::from_art(ch));
            }
        }
        tex
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Rect covering the whole texture.
    pub fn bounds(&self) -> IntRect {
        IntRect::new(0, 0, self.width as i32, self.height as i32)
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Texel> {
        self.idx(x, y).and_then(|i| self.texels[i])
    }

    /// Texel at signed coordinates; anything outside is transparent.
    pub fn sample(&self, x: i32, y: i32) -> Option<Texel> {
        if x < 0 || y < 0 || x > u16::MAX as i32 || y > u16::MAX as i32 {
            return None;
        }
        self.get(x as u16, y as u16)
    }

    pub fn set(&mut self, x: u16, y: u16, texel: Option<Texel>) {
        if let Some(i) = self.idx(x, y) {
            self.texels[i] = texel;
        }
    }

    pub fn fill(&mut self, texel: Option<Texel>) {
        self.texels.fill(texel);
    }
}

/// Read-only lookup of textures by name.
pub trait TextureRegistry {
    fn texture(&self, name: &str) -> Option<&Texture>;
}

impl TextureRegistry for HashMap<String, Texture> {
    fn texture(&self, name: &str) -> Option<&Texture> {
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn art_digits_become_palette_blocks() {
        let tex = Texture::from_art("1 \n x9");
        assert_eq!(tex.width(), 3);
        assert_eq!(tex.height(), 2);
        assert_eq!(tex.get(0, 0), Some(Texel::new(BLOCK, ART_PALETTE[1])));
        assert_eq!(tex.get(1, 0), None);
        assert_eq!(tex.get(2, 0), None);
        assert_eq!(tex.get(1, 1), Some(Texel::new('x', DEFAULT_INK)));
        assert_eq!(tex.get(2, 1), Some(Texel::new(BLOCK, ART_PALETTE[9])));
    }

    #[test]
    fn sample_outside_is_transparent() {
        let tex = Texture::from_art("##");
        assert!(tex.sample(-1, 0).is_none());
        assert!(tex.sample(2, 0).is_none());
        assert!(tex.sample(1, 0).is_some());
    }

    #[test]
    fn empty_art_is_empty() {
        assert!(Texture::from_art("").is_empty());
    }
}
