//! Per-frame keyboard state with press edges.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! a key counts as held until no press or repeat for it has arrived for
//! `release_timeout`. Once a real release event is seen the timeout is no
//! longer applied.

use std::time::{Duration, Instant};

use crate::types::{Key, KeyInput, KEY_COUNT};

// Long enough to bridge the gap between terminal auto-repeat events.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone)]
pub struct KeyboardState {
    down: [bool; KEY_COUNT],
    prev: [bool; KEY_COUNT],
    /// Pressed at some point during the current frame, even if already released.
    tapped: [bool; KEY_COUNT],
    last_press: [Option<Instant>; KEY_COUNT],
    release_events: bool,
    release_timeout: Duration,
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            down: [false; KEY_COUNT],
            prev: [false; KEY_COUNT],
            tapped: [false; KEY_COUNT],
            last_press: [None; KEY_COUNT],
            release_events: false,
            release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    /// Press or auto-repeat of `key` at `now`.
    pub fn record_press(&mut self, key: Key, now: Instant) {
        let i = key.index();
        self.down[i] = true;
        self.tapped[i] = true;
        self.last_press[i] = Some(now);
    }

    pub fn record_release(&mut self, key: Key) {
        self.release_events = true;
        self.down[key.index()] = false;
    }

    /// Release keys whose last press is older than the timeout.
    pub fn expire(&mut self, now: Instant) {
        if self.release_events {
            return;
        }
        for i in 0..KEY_COUNT {
            if !self.down[i] {
                continue;
            }
            let stale = self.last_press[i]
                .map(|t| now.saturating_duration_since(t) > self.release_timeout)
                .unwrap_or(true);
            if stale {
                self.down[i] = false;
            }
        }
    }

    /// Close the frame: current state becomes the previous state.
    pub fn end_frame(&mut self) {
        self.prev = self.down;
        self.tapped = [false; KEY_COUNT];
    }

    /// Forget everything (e.g. after focus loss).
    pub fn reset(&mut self) {
        self.down = [false; KEY_COUNT];
        self.prev = [false; KEY_COUNT];
        self.tapped = [false; KEY_COUNT];
        self.last_press = [None; KEY_COUNT];
    }

    /// Keys with a press edge this frame.
    pub fn pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|&k| self.pressed(k))
    }
}

impl KeyInput for KeyboardState {
    fn pressed(&self, key: Key) -> bool {
        let i = key.index();
        (self.down[i] || self.tapped[i]) && !self.prev[i]
    }

    fn held(&self, key: Key) -> bool {
        self.down[key.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_an_edge() {
        let t0 = Instant::now();
        let mut kb = KeyboardState::new();

        kb.record_press(Key::Up, t0);
        assert!(kb.pressed(Key::Up));
        assert!(kb.held(Key::Up));
        kb.end_frame();

        kb.record_press(Key::Up, t0 + Duration::from_millis(30));
        assert!(!kb.pressed(Key::Up));
        assert!(kb.held(Key::Up));
    }

    #[test]
    fn tap_within_one_frame_still_counts() {
        let mut kb = KeyboardState::new();
        kb.record_press(Key::Space, Instant::now());
        kb.record_release(Key::Space);
        assert!(kb.pressed(Key::Space));
        assert!(!kb.held(Key::Space));
        kb.end_frame();
        assert!(!kb.pressed(Key::Space));
    }

    #[test]
    fn timeout_releases_without_release_events() {
        let t0 = Instant::now();
        let mut kb = KeyboardState::new().with_release_timeout(Duration::from_millis(100));
        kb.record_press(Key::Down, t0);
        kb.end_frame();

        kb.expire(t0 + Duration::from_millis(50));
        assert!(kb.held(Key::Down));
        kb.expire(t0 + Duration::from_millis(150));
        assert!(!kb.held(Key::Down));
        kb.end_frame();

        kb.record_press(Key::Down, t0 + Duration::from_millis(200));
        assert!(kb.pressed(Key::Down));
    }

    #[test]
    fn real_release_events_disable_timeout() {
        let t0 = Instant::now();
        let mut kb = KeyboardState::new().with_release_timeout(Duration::from_millis(10));
        kb.record_press(Key::Left, t0);
        kb.record_release(Key::Left);
        kb.record_press(Key::Right, t0);
        kb.expire(t0 + Duration::from_secs(1));
        assert!(kb.held(Key::Right));
    }

    #[test]
    fn pressed_keys_lists_edges() {
        let mut kb = KeyboardState::new();
        kb.record_press(Key::M, Instant::now());
        kb.record_press(Key::S, Instant::now());
        let keys: Vec<Key> = kb.pressed_keys().collect();
        assert_eq!(keys, vec![Key::S, Key::M]);
    }
}
