//! Sprite collection - ownership, update order and draw order
//!
//! Sprites live in one `Vec`, kept sorted ascending by z-order. That order is
//! both the update order and the draw order. A new sprite goes after every
//! sprite with a z-order less than or equal to its own, so equal z-orders
//! keep insertion order.
//!
//! Game-specific reactions to collisions and removals are supplied through
//! [`SpriteHooks`].

use crate::canvas::{Canvas, Draw};
use crate::sprite::{Sprite, SpriteAction};
use crate::texture::TextureRegistry;

/// Stable handle to a sprite owned by a [`SpriteCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(u64);

/// Callbacks invoked by [`SpriteCollection::update_all`].
pub trait SpriteHooks {
    /// `mover` overlaps `other` after moving. Return true to put `mover` back
    /// where it was before the update.
    fn sprite_collision(&mut self, mover: &Sprite, other: &Sprite) -> bool {
        let _ = (mover, other);
        true
    }

    /// `sprite` is about to be removed from the collection.
    fn sprite_dying(&mut self, sprite: &Sprite) {
        let _ = sprite;
    }
}

/// Hooks with the default behavior: every overlap reverts, nothing happens on removal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl SpriteHooks for NoHooks {}

#[derive(Debug, Clone)]
struct Entry {
    id: SpriteId,
    sprite: Sprite,
}

#[derive(Debug, Clone, Default)]
pub struct SpriteCollection {
    entries: Vec<Entry>,
    next_id: u64,
}

impl SpriteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take ownership of `sprite` and insert it in z-order.
    pub fn add(&mut self, sprite: Sprite) -> SpriteId {
        self.insert(sprite).0
    }

    fn insert(&mut self, sprite: Sprite) -> (SpriteId, usize) {
        let id = SpriteId(self.next_id);
        self.next_id += 1;

        let z = sprite.z_order();
        let at = self
            .entries
            .iter()
            .position(|e| e.sprite.z_order() > z)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, Entry { id, sprite });
        (id, at)
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.sprite)
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.sprite)
    }

    /// Mark a sprite dying; it is removed during the next [`update_all`](Self::update_all).
    pub fn kill(&mut self, id: SpriteId) -> bool {
        match self.get_mut(id) {
            Some(sprite) => {
                sprite.kill();
                true
            }
            None => false,
        }
    }

    /// Sprites in z-order.
    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &Sprite)> {
        self.entries.iter().map(|e| (e.id, &e.sprite))
    }

    /// Drop every sprite. No hooks run.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Update every sprite once, in z-order.
    ///
    /// Spawned sprites are added right away. A sprite inserted ahead of the
    /// cursor is not updated this pass; one inserted behind it is.
    pub fn update_all(&mut self, dt: f32, hooks: &mut dyn SpriteHooks) {
        let mut i = 0;
        while i < self.entries.len() {
            let saved = self.entries[i].sprite.position();
            let action = self.entries[i].sprite.update(dt);

            if action.contains(SpriteAction::ADD_SPRITE) {
                if let Some(spawned) = self.entries[i].sprite.take_spawn() {
                    let (_, at) = self.insert(spawned);
                    if at <= i {
                        i += 1;
                    }
                }
            }

            if action.contains(SpriteAction::KILL) {
                let entry = self.entries.remove(i);
                hooks.sprite_dying(&entry.sprite);
                continue;
            }

            if self.check_collision(i, hooks) {
                self.entries[i].sprite.set_position(saved.left, saved.top);
            }
            i += 1;
        }
    }

    /// Run the collision hook for every sprite overlapping entry `i`.
    fn check_collision(&self, i: usize, hooks: &mut dyn SpriteHooks) -> bool {
        let mover = &self.entries[i].sprite;
        let mut revert = false;
        for (j, other) in self.entries.iter().enumerate() {
            if j == i || !mover.test_collision(&other.sprite) {
                continue;
            }
            revert |= hooks.sprite_collision(mover, &other.sprite);
        }
        revert
    }

    /// Draw every visible sprite, lowest z-order first.
    pub fn draw_all(&self, canvas: &mut dyn Canvas, textures: &dyn TextureRegistry) {
        for e in &self.entries {
            e.sprite.draw(canvas, textures);
        }
    }

    /// Topmost visible sprite containing the point.
    pub fn point_hit_test(&self, x: f32, y: f32) -> Option<&Sprite> {
        self.entries
            .iter()
            .rev()
            .map(|e| &e.sprite)
            .find(|s| !s.is_hidden() && s.is_point_inside(x, y))
    }
}
