//! Backdrops drawn beneath everything else.
//!
//! Every variant follows the sprite contract: `update()` once per tick and
//! [`Draw::draw`] once per frame.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::{Canvas, Draw};
use crate::texture::{Texel, Texture, TextureRegistry};
use crate::types::{Rgb, MAX_STARS};

/// Brightness every star starts with.
pub const STAR_INITIAL_BRIGHTNESS: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    pub x: u16,
    pub y: u16,
    pub brightness: u8,
}

impl Star {
    /// Glyph for the star's current brightness.
    pub fn glyph(&self) -> char {
        match self.brightness {
            0..=63 => '.',
            64..=159 => '+',
            _ => '*',
        }
    }
}

#[derive(Debug, Clone)]
pub enum Background {
    /// Flat fill.
    Solid { color: Rgb },
    /// Named texture at the origin, falling back to a flat fill when the texture is missing.
    Image { texture: String, color: Rgb },
    /// Texture scrolled horizontally and tiled across the canvas.
    Scrolling {
        texture: String,
        texture_width: u16,
        speed: f32,
        offset: f32,
    },
    /// Twinkling starfield over a flat fill.
    Starry {
        width: u16,
        height: u16,
        color: Rgb,
        twinkle_delay: u32,
        stars: ArrayVec<Star, MAX_STARS>,
        rng: StdRng,
    },
}

impl Background {
    pub fn solid(color: Rgb) -> Self {
        Background::Solid { color }
    }

    pub fn image(texture: impl Into<String>, color: Rgb) -> Self {
        Background::Image {
            texture: texture.into(),
            color,
        }
    }

    /// `texture_width` is where the scroll offset wraps back to 0. A negative
    /// `speed` scrolls the other way and wraps below 0 back into the texture.
    pub fn scrolling(texture: impl Into<String>, texture_width: u16, speed: f32) -> Self {
        Background::Scrolling {
            texture: texture.into(),
            texture_width,
            speed,
            offset: 0.0,
        }
    }

    /// A `width` x `height` starfield. `num_stars` is capped at [`MAX_STARS`].
    ///
    /// Each update a star twinkles with probability `1 / (twinkle_delay + 1)`.
    pub fn starry(width: u16, height: u16, num_stars: usize, twinkle_delay: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut stars = ArrayVec::new();
        if width > 0 && height > 0 {
            for _ in 0..num_stars.min(MAX_STARS) {
                stars.push(Star {
                    x: rng.gen_range(0..width),
                    y: rng.gen_range(0..height),
                    brightness: STAR_INITIAL_BRIGHTNESS,
                });
            }
        }
        Background::Starry {
            width,
            height,
            color: Rgb::BLACK,
            twinkle_delay,
            stars,
            rng,
        }
    }

    pub fn stars(&self) -> &[Star] {
        match self {
            Background::Starry { stars, .. } => stars.as_slice(),
            _ => &[],
        }
    }

    /// Current horizontal scroll offset (0 for non-scrolling variants).
    pub fn scroll_offset(&self) -> f32 {
        match self {
            Background::Scrolling { offset, .. } => *offset,
            _ => 0.0,
        }
    }

    pub fn update(&mut self) {
        match self {
            Background::Solid { .. } | Background::Image { .. } => {}
            Background::Scrolling {
                texture_width,
                speed,
                offset,
                ..
            } => {
                let width = *texture_width as f32;
                *offset += *speed;
                if *offset >= width {
                    *offset = 0.0;
                } else if *offset < 0.0 && width > 0.0 {
                    *offset = offset.rem_euclid(width);
                }
            }
            Background::Starry {
                twinkle_delay,
                stars,
                rng,
                ..
            } => {
                for star in stars.iter_mut() {
                    if rng.gen_range(0..=*twinkle_delay) == 0 {
                        star.brightness = rng.gen_range(0..=255);
                    }
                }
            }
        }
    }

    /// Fresh starfield image for this frame.
    fn star_image(width: u16, height: u16, stars: &[Star]) -> Texture {
        let mut image = Texture::new(width, height);
        for star in stars {
            image.set(
                star.x,
                star.y,
                Some(Texel::new(star.glyph(), Rgb::gray(star.brightness))),
            );
        }
        image
    }
}

impl Draw for Background {
    fn draw(&self, canvas: &mut dyn Canvas, textures: &dyn TextureRegistry) {
        match self {
            Background::Solid { color } => canvas.clear(*color),
            Background::Image { texture, color } => match textures.texture(texture) {
                Some(tex) => {
                    canvas.clear(*color);
                    canvas.draw_texture(tex, tex.bounds(), 0.0, 0.0);
                }
                None => canvas.clear(*color),
            },
            Background::Scrolling {
                texture, offset, ..
            } => {
                canvas.clear(Rgb::BLACK);
                let Some(tex) = textures.texture(texture) else {
                    return;
                };
                if tex.width() == 0 {
                    return;
                }
                let (view_w, _) = canvas.size();
                let mut x = -offset.floor();
                while x < view_w {
                    canvas.draw_texture(tex, tex.bounds(), x, 0.0);
                    x += tex.width() as f32;
                }
            }
            Background::Starry {
                width,
                height,
                color,
                stars,
                ..
            } => {
                canvas.clear(*color);
                let image = Self::star_image(*width, *height, stars);
                canvas.draw_texture(&image, image.bounds(), 0.0, 0.0);
            }
        }
    }
}
