//! Audio service interface.
//!
//! Playback is fire-and-forget: names the backend does not know are ignored.

/// Sound effects and a single music channel.
pub trait Audio {
    fn play_sound(&mut self, name: &str);
    fn play_music(&mut self, name: &str, looped: bool);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
    fn stop_music(&mut self);
}

/// Backend that plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl Audio for NullAudio {
    fn play_sound(&mut self, _name: &str) {}
    fn play_music(&mut self, _name: &str, _looped: bool) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
    fn stop_music(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Bookkeeping for the music channel, shared by backends.
#[derive(Debug, Clone, Default)]
pub struct MusicChannel {
    track: Option<String>,
    looped: bool,
    state: MusicState,
}

impl MusicChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MusicState {
        self.state
    }

    pub fn track(&self) -> Option<&str> {
        self.track.as_deref()
    }

    pub fn looped(&self) -> bool {
        self.looped
    }

    /// Start `name` from the beginning, replacing any current track.
    pub fn play(&mut self, name: &str, looped: bool) {
        self.track = Some(name.to_string());
        self.looped = looped;
        self.state = MusicState::Playing;
    }

    /// Returns true if playback was running.
    pub fn pause(&mut self) -> bool {
        if self.state == MusicState::Playing {
            self.state = MusicState::Paused;
            return true;
        }
        false
    }

    /// Returns true if playback was paused.
    pub fn resume(&mut self) -> bool {
        if self.state == MusicState::Paused {
            self.state = MusicState::Playing;
            return true;
        }
        false
    }

    /// Returns true if a track was loaded.
    pub fn stop(&mut self) -> bool {
        self.state = MusicState::Stopped;
        self.track.take().is_some()
    }
}
