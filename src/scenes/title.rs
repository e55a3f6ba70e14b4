//! Title screen
//!
//! Waits for the one button, then starts the hurdles event. The selection
//! only fires once.

use super::{Scene, SceneContext, SceneKey, SceneRequest};
use crate::audio::TITLE_MUSIC;
use crate::error::RaceError;
use crate::sim::TickInput;

#[derive(Debug, Clone, Default)]
pub struct TitleScene {
    started: bool,
    music_playing: bool,
}

impl TitleScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// An event has been picked
    pub fn started(&self) -> bool {
        self.started
    }

    fn stop_music(&mut self, ctx: &mut SceneContext<'_>) {
        if self.music_playing {
            ctx.audio.stop_by_key(TITLE_MUSIC);
            self.music_playing = false;
        }
    }
}

impl Scene for TitleScene {
    fn key(&self) -> SceneKey {
        SceneKey::Title
    }

    fn create(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), RaceError> {
        ctx.audio.play(TITLE_MUSIC, true);
        self.music_playing = true;
        log::info!("One Button Olympics! Press the button to start Hurdles");
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>, input: &TickInput, _dt: f32) -> Result<(), RaceError> {
        if input.jump && !self.started {
            self.started = true;
            self.stop_music(ctx);
            ctx.director.start(SceneRequest::new(SceneKey::Hurdles));
        }
        Ok(())
    }

    fn shutdown(&mut self, ctx: &mut SceneContext<'_>) {
        self.stop_music(ctx);
    }
}
