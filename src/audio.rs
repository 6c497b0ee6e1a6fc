//! Audio cue boundary
//!
//! The simulation only signals cues; playback belongs to the host. Calls are
//! fire-and-forget and a backend failure never reaches the game.

use crate::settings::AudioSettings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Avatar bounced off a platform
    Jump,
}

impl SoundEffect {
    pub fn asset_path(self) -> &'static str {
        match self {
            SoundEffect::Jump => "Sounds/jump.wav",
        }
    }
}

pub const BACKGROUND_TRACK: &str = "Sounds/background.wav";

/// Playback backend provided by the host
pub trait AudioSink {
    fn play_effect(&mut self, path: &str, volume: f32);
    fn play_music(&mut self, path: &str, looped: bool, volume: f32);
    fn stop_music(&mut self);
    fn stop_all_effects(&mut self);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play_effect(&mut self, path: &str, volume: f32) {
        log::debug!("sfx {} @ {:.2}", path, volume);
    }

    fn play_music(&mut self, path: &str, looped: bool, volume: f32) {
        log::debug!("music {} (looped: {}) @ {:.2}", path, looped, volume);
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }

    fn stop_all_effects(&mut self) {
        log::debug!("effects stopped");
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    settings: AudioSettings,
    music_playing: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, settings: AudioSettings) -> Self {
        Self {
            sink,
            settings,
            music_playing: false,
        }
    }

    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if !self.settings.sound_effects || self.settings.sfx_volume <= 0.0 {
            return;
        }
        self.sink
            .play_effect(effect.asset_path(), self.settings.sfx_volume);
    }

    /// Start the looping background track, if enabled
    pub fn start_music(&mut self) {
        if !self.settings.background_music || self.music_playing {
            return;
        }
        self.sink
            .play_music(BACKGROUND_TRACK, true, self.settings.music_volume);
        self.music_playing = true;
    }

    /// Stop music and every playing effect
    pub fn stop_all(&mut self) {
        if self.music_playing {
            self.sink.stop_music();
            self.music_playing = false;
        }
        self.sink.stop_all_effects();
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every call for assertions
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSink {
        pub calls: Vec<String>,
    }

    impl AudioSink for RecordingSink {
        fn play_effect(&mut self, path: &str, volume: f32) {
            self.calls.push(format!("effect {path} {volume}"));
        }

        fn play_music(&mut self, path: &str, looped: bool, volume: f32) {
            self.calls.push(format!("music {path} {looped} {volume}"));
        }

        fn stop_music(&mut self) {
            self.calls.push("stop music".into());
        }

        fn stop_all_effects(&mut self) {
            self.calls.push("stop effects".into());
        }
    }

    #[test]
    fn test_effects_respect_toggle() {
        let mut audio = AudioManager::new(RecordingSink::default(), AudioSettings::muted());
        audio.play(SoundEffect::Jump);
        audio.start_music();
        assert!(audio.sink().calls.is_empty());
        assert!(!audio.music_playing());
    }

    #[test]
    fn test_music_starts_once_and_stops() {
        let mut audio = AudioManager::new(RecordingSink::default(), AudioSettings::default());
        audio.start_music();
        audio.start_music();
        audio.play(SoundEffect::Jump);
        audio.stop_all();
        assert_eq!(
            audio.sink().calls,
            vec![
                "music Sounds/background.wav true 0.5".to_string(),
                "effect Sounds/jump.wav 1".to_string(),
                "stop music".to_string(),
                "stop effects".to_string(),
            ]
        );
    }
}
