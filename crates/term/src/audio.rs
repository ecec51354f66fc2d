//! TerminalAudio: the only sound a terminal can make is its bell.
//!
//! Sound effects known to the asset store ring the bell (when enabled).
//! Music is tracked and logged but not played.

use std::collections::HashSet;

use crate::engine::{AssetStore, Audio, MusicChannel};

#[derive(Debug, Clone, Default)]
pub struct TerminalAudio {
    sounds: HashSet<String>,
    tracks: HashSet<String>,
    bell: bool,
    pending_bells: u32,
    music: MusicChannel,
}

impl TerminalAudio {
    pub fn new<'a>(
        sounds: impl IntoIterator<Item = &'a str>,
        tracks: impl IntoIterator<Item = &'a str>,
        bell: bool,
    ) -> Self {
        Self {
            sounds: sounds.into_iter().map(str::to_string).collect(),
            tracks: tracks.into_iter().map(str::to_string).collect(),
            bell,
            pending_bells: 0,
            music: MusicChannel::new(),
        }
    }

    /// Every sound and music name registered in `assets`.
    pub fn from_assets(assets: &AssetStore, bell: bool) -> Self {
        Self::new(assets.sound_names(), assets.music_names(), bell)
    }

    pub fn music(&self) -> &MusicChannel {
        &self.music
    }

    /// Bells owed to the terminal since the last call.
    pub fn take_bells(&mut self) -> u32 {
        std::mem::take(&mut self.pending_bells)
    }
}

impl Audio for TerminalAudio {
    fn play_sound(&mut self, name: &str) {
        if !self.sounds.contains(name) {
            tracing::trace!(name, "sound_unknown");
            return;
        }
        tracing::debug!(name, "sound_played");
        if self.bell {
            self.pending_bells += 1;
        }
    }

    fn play_music(&mut self, name: &str, looped: bool) {
        if !self.tracks.contains(name) {
            tracing::debug!(name, "music_unknown");
            return;
        }
        self.music.play(name, looped);
        tracing::info!(name, looped, "music_started");
    }

    fn pause_music(&mut self) {
        if self.music.pause() {
            tracing::info!(track = self.music.track(), "music_paused");
        }
    }

    fn resume_music(&mut self) {
        if self.music.resume() {
            tracing::info!(track = self.music.track(), "music_resumed");
        }
    }

    fn stop_music(&mut self) {
        if self.music.stop() {
            tracing::info!("music_stopped");
        }
    }
}
