//! Sprite tests - bounds policies, animation and the collection

use sprite_tetris::engine::{
    BoundsAction, NoHooks, Sprite, SpriteAction, SpriteCollection, SpriteHooks,
};
use sprite_tetris::types::{Rect, Vec2};

fn arena() -> Rect {
    Rect::new(0.0, 0.0, 10.0, 10.0)
}

#[test]
fn test_stop_clamps_and_zeroes_only_the_clamped_axis() {
    let mut sprite = Sprite::new("t", 2.0, 1.0)
        .with_velocity(Vec2::new(10.0, 1.0))
        .with_bounds(arena(), BoundsAction::Stop);

    assert_eq!(sprite.update(1.0), SpriteAction::NONE);
    assert_eq!(sprite.position().left, 8.0);
    assert_eq!(sprite.position().top, 1.0);
    assert_eq!(sprite.velocity(), Vec2::new(0.0, 1.0));
}

#[test]
fn test_wrap_reenters_from_the_far_side() {
    let mut sprite = Sprite::new("t", 1.0, 1.0)
        .with_position(9.5, 0.0)
        .with_velocity(Vec2::new(2.0, 0.0))
        .with_bounds(arena(), BoundsAction::Wrap);

    sprite.update(1.0);
    assert_eq!(sprite.position().left, -1.0);
    assert_eq!(sprite.velocity().x, 2.0);
}

#[test]
fn test_bounce_reflects_velocity() {
    let mut sprite = Sprite::new("t", 2.0, 2.0)
        .with_position(0.0, 7.0)
        .with_velocity(Vec2::new(0.0, 3.0))
        .with_bounds(arena(), BoundsAction::Bounce);

    sprite.update(1.0);
    assert_eq!(sprite.position().top, 8.0);
    assert_eq!(sprite.velocity().y, -3.0);
}

#[test]
fn test_die_only_once_fully_outside() {
    let mut sprite = Sprite::new("t", 2.0, 1.0)
        .with_position(0.5, 5.0)
        .with_velocity(Vec2::new(-2.0, 0.0))
        .with_bounds(arena(), BoundsAction::Die);

    // Partly outside.
    assert_eq!(sprite.update(1.0), SpriteAction::NONE);
    assert_eq!(sprite.update(1.0), SpriteAction::KILL);
}

#[test]
fn test_one_shot_animation_ends_in_kill() {
    let mut sprite = Sprite::new("t", 1.0, 1.0).with_frames(3, true);
    let mut frames = Vec::new();
    let mut killed = false;
    for _ in 0..5 {
        if sprite.update(0.0).contains(SpriteAction::KILL) {
            killed = true;
            break;
        }
        frames.push(sprite.frame());
    }
    assert_eq!(frames, vec![1, 2, 2]);
    assert!(killed);
    assert_eq!(sprite.src_rect().left, 2);
}

#[test]
fn test_collection_orders_by_z_then_insertion() {
    let mut sprites = SpriteCollection::new();
    sprites.add(Sprite::new("t", 1.0, 1.0).with_name("a").with_z_order(5));
    sprites.add(Sprite::new("t", 1.0, 1.0).with_name("b").with_z_order(1));
    sprites.add(Sprite::new("t", 1.0, 1.0).with_name("c").with_z_order(5));

    let names: Vec<&str> = sprites.iter().map(|(_, s)| s.name()).collect();
    assert_eq!(names, ["b", "a", "c"]);
}

#[test]
fn test_collision_reverts_the_mover() {
    let mut sprites = SpriteCollection::new();
    let mover = sprites.add(
        Sprite::new("t", 12.0, 12.0).with_velocity(Vec2::new(5.0, 0.0)),
    );
    sprites.add(Sprite::new("t", 12.0, 12.0).with_position(14.0, 0.0));

    sprites.update_all(1.0, &mut NoHooks);
    assert_eq!(sprites.get(mover).map(|s| s.position().left), Some(0.0));
}

#[test]
fn test_hooks_may_let_sprites_pass() {
    struct PassThrough(u32);
    impl SpriteHooks for PassThrough {
        fn sprite_collision(&mut self, _mover: &Sprite, _other: &Sprite) -> bool {
            self.0 += 1;
            false
        }
    }

    let mut sprites = SpriteCollection::new();
    let mover = sprites.add(
        Sprite::new("t", 12.0, 12.0).with_velocity(Vec2::new(5.0, 0.0)),
    );
    sprites.add(Sprite::new("t", 12.0, 12.0).with_position(14.0, 0.0));

    let mut hooks = PassThrough(0);
    sprites.update_all(1.0, &mut hooks);
    assert_eq!(sprites.get(mover).map(|s| s.position().left), Some(5.0));
    assert!(hooks.0 >= 1);
}

#[test]
fn test_killed_and_spawned_sprites() {
    #[derive(Default)]
    struct Dying(Vec<String>);
    impl SpriteHooks for Dying {
        fn sprite_dying(&mut self, sprite: &Sprite) {
            self.0.push(sprite.name().to_string());
        }
    }

    let mut sprites = SpriteCollection::new();
    let doomed = sprites.add(Sprite::new("t", 1.0, 1.0).with_name("doomed"));
    let mut parent = Sprite::new("t", 1.0, 1.0)
        .with_name("parent")
        .with_position(5.0, 5.0);
    parent.set_spawn(Sprite::new("t", 1.0, 1.0).with_name("child").with_position(8.0, 8.0));
    sprites.add(parent);

    assert!(sprites.kill(doomed));
    let mut hooks = Dying::default();
    sprites.update_all(0.1, &mut hooks);

    assert_eq!(hooks.0, ["doomed"]);
    let names: Vec<&str> = sprites.iter().map(|(_, s)| s.name()).collect();
    assert_eq!(names, ["parent", "child"]);
    assert!(sprites.get(doomed).is_none());
}

#[test]
fn test_point_hit_test_prefers_the_topmost_visible_sprite() {
    let mut sprites = SpriteCollection::new();
    sprites.add(Sprite::new("t", 4.0, 4.0).with_name("low").with_z_order(0));
    sprites.add(Sprite::new("t", 4.0, 4.0).with_name("high").with_z_order(2));
    sprites.add(
        Sprite::new("t", 4.0, 4.0)
            .with_name("hidden")
            .with_z_order(3)
            .with_hidden(true),
    );

    assert_eq!(sprites.point_hit_test(1.0, 1.0).map(Sprite::name), Some("high"));
    assert!(sprites.point_hit_test(4.0, 1.0).is_none());
}
