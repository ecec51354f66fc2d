//! Sprite module - movable, animated, collidable drawables
//!
//! A sprite owns its position, velocity, animation state and a bounds policy.
//! [`Sprite::update`] advances all of it by one step and reports what the
//! owning collection should do next through a [`SpriteAction`] flag set.
//!
//! # Bounds policies
//!
//! | Policy | Behavior at the bounds rect |
//! |--------|-----------------------------|
//! | `Stop` | Clamp inside; zero the velocity component of each clamped axis |
//! | `Wrap` | Once fully past one edge, reappear fully past the opposite edge |
//! | `Bounce` | Clamp to the crossed edge and negate that velocity component |
//! | `Die` | Request removal once fully outside on either axis |
//!
//! # Animation
//!
//! Frames are laid out left to right in the texture; frame `n` selects the
//! sub-rect starting at `n * frame_width`. With a frame delay of `d` the
//! frame advances every `d` updates (`d = 0` advances every update, a
//! negative delay freezes the frame). A one-shot animation marks the sprite
//! dying once it runs past its last frame.
//!
//! # Example
//!
//! ```
//! use sprite_tetris_engine::{BoundsAction, Sprite, SpriteAction};
//! use sprite_tetris_engine::types::{Rect, Vec2};
//!
//! let mut s = Sprite::new("ball", 2.0, 1.0)
//!     .with_position(0.0, 0.0)
//!     .with_velocity(Vec2::new(-10.0, 0.0))
//!     .with_bounds(Rect::new(0.0, 0.0, 40.0, 20.0), BoundsAction::Stop);
//!
//! assert_eq!(s.update(0.1), SpriteAction::NONE);
//! assert_eq!(s.position().left, 0.0);
//! assert_eq!(s.velocity().x, 0.0);
//! ```

use std::ops::{BitOr, BitOrAssign};

use crate::canvas::{Canvas, Draw};
use crate::texture::TextureRegistry;
use crate::types::{IntRect, Rect, Vec2};

/// Flag set returned by [`Sprite::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpriteAction(u8);

impl SpriteAction {
    pub const NONE: SpriteAction = SpriteAction(0);
    /// Remove the sprite from its collection.
    pub const KILL: SpriteAction = SpriteAction(1);
    /// The sprite holds a spawned sprite to be added to its collection.
    pub const ADD_SPRITE: SpriteAction = SpriteAction(1 << 1);

    pub fn contains(self, other: SpriteAction) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for SpriteAction {
    type Output = SpriteAction;

    fn bitor(self, rhs: SpriteAction) -> SpriteAction {
        SpriteAction(self.0 | rhs.0)
    }
}

impl BitOrAssign for SpriteAction {
    fn bitor_assign(&mut self, rhs: SpriteAction) {
        self.0 |= rhs.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundsAction {
    #[default]
    Stop,
    Wrap,
    Bounce,
    Die,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    name: String,
    texture: String,
    src_rect: IntRect,
    position: Rect,
    collision: Rect,
    velocity: Vec2,
    z_order: i32,
    bounds: Rect,
    bounds_action: BoundsAction,
    num_frames: u32,
    cur_frame: u32,
    frame_delay: i32,
    frame_trigger: i32,
    one_shot: bool,
    hidden: bool,
    dying: bool,
    spawn: Option<Box<Sprite>>,
}

impl Sprite {
    /// A single-frame sprite showing the top-left `width` x `height` of `texture`.
    ///
    /// Bounds default to an effectively unbounded rect with the `Stop` policy.
    pub fn new(texture: impl Into<String>, width: f32, height: f32) -> Self {
        let position = Rect::new(0.0, 0.0, width, height);
        Self {
            name: String::new(),
            texture: texture.into(),
            src_rect: IntRect::new(0, 0, width.round() as i32, height.round() as i32),
            position,
            collision: collision_rect(position),
            velocity: Vec2::ZERO,
            z_order: 0,
            bounds: Rect::new(-1.0e6, -1.0e6, 2.0e6, 2.0e6),
            bounds_action: BoundsAction::Stop,
            num_frames: 1,
            cur_frame: 0,
            frame_delay: 0,
            frame_trigger: 0,
            one_shot: false,
            hidden: false,
            dying: false,
            spawn: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.set_position(x, y);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_z_order(mut self, z: i32) -> Self {
        self.z_order = z;
        self
    }

    pub fn with_bounds(mut self, bounds: Rect, action: BoundsAction) -> Self {
        self.bounds = bounds;
        self.bounds_action = action;
        self
    }

    /// `frames` frames laid out horizontally; the frame width stays the sprite width.
    pub fn with_frames(mut self, frames: u32, one_shot: bool) -> Self {
        self.num_frames = frames.max(1);
        self.one_shot = one_shot;
        self.cur_frame = 0;
        self.sync_src_rect();
        self
    }

    pub fn with_frame_delay(mut self, delay: i32) -> Self {
        self.frame_delay = delay;
        self.frame_trigger = delay;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn texture(&self) -> &str {
        &self.texture
    }

    pub fn src_rect(&self) -> IntRect {
        self.src_rect
    }

    pub fn set_src_rect(&mut self, rect: IntRect) {
        self.src_rect = rect;
    }

    pub fn position(&self) -> Rect {
        self.position
    }

    /// Move the top-left corner; the collision rect follows.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position.left = x;
        self.position.top = y;
        self.collision = collision_rect(self.position);
    }

    pub fn offset_position(&mut self, dx: f32, dy: f32) {
        self.set_position(self.position.left + dx, self.position.top + dy);
    }

    pub fn collision(&self) -> Rect {
        self.collision
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds_action(&self) -> BoundsAction {
        self.bounds_action
    }

    pub fn set_bounds_action(&mut self, action: BoundsAction) {
        self.bounds_action = action;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn num_frames(&self) -> u32 {
        self.num_frames
    }

    pub fn frame(&self) -> u32 {
        self.cur_frame
    }

    /// Jump to `frame` (clamped to the last frame).
    pub fn set_frame(&mut self, frame: u32) {
        self.cur_frame = frame.min(self.num_frames - 1);
        self.sync_src_rect();
    }

    pub fn frame_delay(&self) -> i32 {
        self.frame_delay
    }

    pub fn set_frame_delay(&mut self, delay: i32) {
        self.frame_delay = delay;
    }

    pub fn is_one_shot(&self) -> bool {
        self.one_shot
    }

    pub fn is_dying(&self) -> bool {
        self.dying
    }

    /// Ask for removal; the next update returns `KILL`.
    pub fn kill(&mut self) {
        self.dying = true;
    }

    /// Queue a sprite for the owning collection to add after the next update.
    pub fn set_spawn(&mut self, sprite: Sprite) {
        self.spawn = Some(Box::new(sprite));
    }

    pub fn take_spawn(&mut self) -> Option<Sprite> {
        self.spawn.take().map(|b| *b)
    }

    /// Inclusive overlap of collision rects.
    pub fn test_collision(&self, other: &Sprite) -> bool {
        self.collision.overlaps_inclusive(&other.collision)
    }

    /// Half-open containment in the visual rect.
    pub fn is_point_inside(&self, x: f32, y: f32) -> bool {
        self.position.contains(x, y)
    }

    fn sync_src_rect(&mut self) {
        self.src_rect.left = self.cur_frame as i32 * self.src_rect.width;
    }

    fn update_frame(&mut self) {
        if self.frame_delay < 0 {
            return;
        }
        self.frame_trigger -= 1;
        if self.frame_trigger > 0 {
            return;
        }
        self.frame_trigger = self.frame_delay;

        self.cur_frame += 1;
        if self.cur_frame >= self.num_frames {
            if self.one_shot {
                self.cur_frame = self.num_frames - 1;
                self.dying = true;
            } else {
                self.cur_frame = 0;
            }
        }
        self.sync_src_rect();
    }

    fn spawn_flag(&self) -> SpriteAction {
        if self.spawn.is_some() {
            SpriteAction::ADD_SPRITE
        } else {
            SpriteAction::NONE
        }
    }

    /// Advance animation and movement by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> SpriteAction {
        if self.dying {
            return SpriteAction::KILL | self.spawn_flag();
        }

        if self.num_frames > 1 {
            self.update_frame();
        }

        let w = self.position.width;
        let h = self.position.height;
        let b = self.bounds;
        let mut x = self.position.left + self.velocity.x * dt;
        let mut y = self.position.top + self.velocity.y * dt;

        match self.bounds_action {
            BoundsAction::Wrap => {
                if x + w < b.left {
                    x = b.right();
                } else if x > b.right() {
                    x = b.left - w;
                }
                if y + h < b.top {
                    y = b.bottom();
                } else if y > b.bottom() {
                    y = b.top - h;
                }
            }
            BoundsAction::Bounce => {
                if x < b.left {
                    x = b.left;
                    self.velocity.x = -self.velocity.x;
                } else if x + w > b.right() {
                    x = b.right() - w;
                    self.velocity.x = -self.velocity.x;
                }
                if y < b.top {
                    y = b.top;
                    self.velocity.y = -self.velocity.y;
                } else if y + h > b.bottom() {
                    y = b.bottom() - h;
                    self.velocity.y = -self.velocity.y;
                }
            }
            BoundsAction::Die => {
                if x + w < b.left || x > b.right() || y + h < b.top || y > b.bottom() {
                    return SpriteAction::KILL | self.spawn_flag();
                }
            }
            BoundsAction::Stop => {
                if x < b.left || x > b.right() - w {
                    x = x.min(b.right() - w).max(b.left);
                    self.velocity.x = 0.0;
                }
                if y < b.top || y > b.bottom() - h {
                    y = y.min(b.bottom() - h).max(b.top);
                    self.velocity.y = 0.0;
                }
            }
        }

        self.set_position(x, y);
        self.spawn_flag()
    }
}

/// Visual rect shrunk by a twelfth of its size on every side.
fn collision_rect(position: Rect) -> Rect {
    position.inset(position.width / 12.0, position.height / 12.0)
}

impl Draw for Sprite {
    fn draw(&self, canvas: &mut dyn Canvas, textures: &dyn TextureRegistry) {
        if self.hidden {
            return;
        }
        match textures.texture(&self.texture) {
            Some(tex) => {
                canvas.draw_texture(tex, self.src_rect, self.position.left, self.position.top)
            }
            None => tracing::trace!(texture = %self.texture, "sprite_texture_missing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded(action: BoundsAction) -> Sprite {
        Sprite::new("t", 2.0, 2.0).with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0), action)
    }

    #[test]
    fn action_flags_combine() {
        let both = SpriteAction::KILL | SpriteAction::ADD_SPRITE;
        assert!(both.contains(SpriteAction::KILL));
        assert!(both.contains(SpriteAction::ADD_SPRITE));
        assert!(!SpriteAction::NONE.contains(SpriteAction::KILL));
        assert!(SpriteAction::NONE.is_empty());
    }

    #[test]
    fn collision_rect_tracks_position() {
        let mut s = Sprite::new("t", 12.0, 24.0);
        assert_eq!(s.collision(), Rect::new(1.0, 2.0, 10.0, 20.0));
        s.set_position(5.0, 5.0);
        assert_eq!(s.collision(), Rect::new(6.0, 7.0, 10.0, 20.0));
    }

    #[test]
    fn stop_zeroes_only_clamped_axis() {
        let mut s = bounded(BoundsAction::Stop)
            .with_position(7.0, 4.0)
            .with_velocity(Vec2::new(5.0, 1.0));
        s.update(1.0);
        assert_eq!(s.position().left, 8.0);
        assert_eq!(s.position().top, 5.0);
        assert_eq!(s.velocity(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn wrap_reappears_on_opposite_side() {
        let mut s = bounded(BoundsAction::Wrap)
            .with_position(1.0, 3.0)
            .with_velocity(Vec2::new(-4.0, 0.0));
        s.update(1.0);
        assert_eq!(s.position().left, 10.0);
        assert_eq!(s.velocity().x, -4.0);
    }

    #[test]
    fn bounce_negates_velocity() {
        let mut s = bounded(BoundsAction::Bounce)
            .with_position(1.0, 3.0)
            .with_velocity(Vec2::new(-4.0, 0.0));
        s.update(1.0);
        assert_eq!(s.position().left, 0.0);
        assert_eq!(s.velocity().x, 4.0);
    }

    #[test]
    fn die_kills_when_fully_outside() {
        let mut s = bounded(BoundsAction::Die)
            .with_position(7.0, 3.0)
            .with_velocity(Vec2::new(2.0, 0.0));
        assert_eq!(s.update(1.0), SpriteAction::NONE);
        assert_eq!(s.update(1.0), SpriteAction::KILL);
    }

    #[test]
    fn looping_animation_wraps() {
        let mut s = Sprite::new("t", 2.0, 1.0).with_frames(3, false);
        let frames: Vec<u32> = (0..4)
            .map(|_| {
                s.update(0.0);
                s.frame()
            })
            .collect();
        assert_eq!(frames, vec![1, 2, 0, 1]);
        assert_eq!(s.src_rect().left, 2);
    }

    #[test]
    fn frame_delay_slows_animation() {
        let mut s = Sprite::new("t", 1.0, 1.0)
            .with_frames(2, false)
            .with_frame_delay(2);
        s.update(0.0);
        assert_eq!(s.frame(), 0);
        s.update(0.0);
        assert_eq!(s.frame(), 1);
    }

    #[test]
    fn one_shot_animation_dies_on_last_frame() {
        let mut s = Sprite::new("t", 1.0, 1.0).with_frames(2, true);
        assert_eq!(s.update(0.0), SpriteAction::NONE);
        assert_eq!(s.update(0.0), SpriteAction::NONE);
        assert!(s.is_dying());
        assert_eq!(s.frame(), 1);
        assert_eq!(s.update(0.0), SpriteAction::KILL);
    }

    #[test]
    fn pending_spawn_reports_add_sprite() {
        let mut s = Sprite::new("t", 1.0, 1.0);
        s.set_spawn(Sprite::new("child", 1.0, 1.0));
        assert!(s.update(0.0).contains(SpriteAction::ADD_SPRITE));
        assert_eq!(s.take_spawn().map(|c| c.texture().to_string()), Some("child".into()));
        assert_eq!(s.update(0.0), SpriteAction::NONE);
    }

    #[test]
    fn spawn_survives_death_at_the_bounds() {
        let mut s = Sprite::new("t", 1.0, 1.0)
            .with_velocity(Vec2::new(10.0, 0.0))
            .with_bounds(Rect::new(0.0, 0.0, 5.0, 5.0), BoundsAction::Die);
        s.set_spawn(Sprite::new("child", 1.0, 1.0));

        let action = s.update(1.0);
        assert!(action.contains(SpriteAction::KILL));
        assert!(action.contains(SpriteAction::ADD_SPRITE));
        assert!(s.take_spawn().is_some());
    }

    #[test]
    fn point_test_is_half_open() {
        let s = Sprite::new("t", 2.0, 2.0).with_position(1.0, 1.0);
        assert!(s.is_point_inside(1.0, 1.0));
        assert!(!s.is_point_inside(3.0, 1.0));
    }
}
