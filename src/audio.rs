//! Audio service contract
//!
//! The race only starts and stops looped music cues; playback itself belongs
//! to whatever host embeds the simulation.

/// Title screen music
pub const TITLE_MUSIC: &str = "music/title";
/// Music looped while a race runs
pub const RACE_MUSIC: &str = "music/race";

/// Fire-and-forget audio playback
pub trait AudioService {
    /// Start a cue by key
    fn play(&mut self, key: &str, looped: bool);
    /// Stop every instance of a cue
    fn stop_by_key(&mut self, key: &str);
}

/// Plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioService for NullAudio {
    fn play(&mut self, _key: &str, _looped: bool) {}

    fn stop_by_key(&mut self, _key: &str) {}
}

/// Logs cues instead of playing them (headless runs)
#[derive(Debug, Clone)]
pub struct LogAudio {
    /// Cues currently playing, in start order
    playing: Vec<String>,
    music_volume: f32,
    muted: bool,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            playing: Vec::new(),
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Volume cues are started at
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    pub fn playing(&self) -> &[String] {
        &self.playing
    }
}

impl AudioService for LogAudio {
    fn play(&mut self, key: &str, looped: bool) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::info!("♪ play {} at {:.0}% (looped: {})", key, vol * 100.0, looped);
        if looped {
            self.playing.push(key.to_string());
        }
    }

    fn stop_by_key(&mut self, key: &str) {
        let before = self.playing.len();
        self.playing.retain(|k| k != key);
        if self.playing.len() != before {
            log::info!("♪ stop {}", key);
        }
    }
}
