//! One Button Hurdles entry point
//!
//! Runs a headless session: title screen, one hurdles race driven by a
//! fixed button cadence, then logs the podium.
//!
//! Usage: `one-button-hurdles [settings.json]`

use one_button_hurdles::audio::LogAudio;
use one_button_hurdles::consts::SIM_DT;
use one_button_hurdles::platform::{CadenceInput, InputSource};
use one_button_hurdles::scenes::{
    HurdlesScene, Scene, SceneContext, SceneKey, SceneQueue, SceneRequest, TitleScene,
};
use one_button_hurdles::sim::{RaceConfig, ResultsPayload, TickInput};
use one_button_hurdles::{RaceError, Settings};

/// Host loop holding the active scene and its collaborators
struct Game {
    settings: Settings,
    audio: LogAudio,
    queue: SceneQueue,
    scene: Box<dyn Scene>,
    results: Option<ResultsPayload>,
    frames: u64,
}

impl Game {
    fn new(settings: Settings) -> Self {
        let mut audio = LogAudio::new();
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        Self {
            settings,
            audio,
            queue: SceneQueue::new(),
            scene: Box::new(TitleScene::new()),
            results: None,
            frames: 0,
        }
    }

    fn start(&mut self) -> Result<(), RaceError> {
        let mut ctx = SceneContext {
            audio: &mut self.audio,
            director: &mut self.queue,
        };
        self.scene.create(&mut ctx)
    }

    fn frame(&mut self, input: &TickInput) -> Result<(), RaceError> {
        self.frames += 1;
        {
            let mut ctx = SceneContext {
                audio: &mut self.audio,
                director: &mut self.queue,
            };
            self.scene.update(&mut ctx, input, SIM_DT)?;
        }

        for request in self.queue.drain() {
            self.switch_to(request)?;
        }
        Ok(())
    }

    fn switch_to(&mut self, request: SceneRequest) -> Result<(), RaceError> {
        let mut ctx = SceneContext {
            audio: &mut self.audio,
            director: &mut self.queue,
        };
        self.scene.shutdown(&mut ctx);

        match request.key {
            SceneKey::Title => {
                self.scene = Box::new(TitleScene::new());
            }
            SceneKey::Hurdles => {
                let seed = self.settings.resolve_seed();
                self.scene = Box::new(HurdlesScene::new(
                    RaceConfig::default(),
                    self.settings.roster.clone(),
                    seed,
                ));
            }
            SceneKey::GameResults => {
                // The results display lives outside this binary
                self.results = request.results;
                return Ok(());
            }
        }
        self.scene.create(&mut ctx)
    }

    fn scene_key(&self) -> SceneKey {
        self.scene.key()
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Settings::default()
            }
        },
        None => Settings::default(),
    };

    let max_frames = (settings.max_race_seconds / SIM_DT) as u64;
    let mut player = CadenceInput {
        first: settings.demo_first_press,
        period: settings.demo_press_period,
    };
    let mut game = Game::new(settings);

    if let Err(e) = game.start() {
        log::error!("Failed to start: {}", e);
        std::process::exit(1);
    }

    // Press the button on the title screen to pick the event
    if let Err(e) = game.frame(&TickInput { jump: true }) {
        log::error!("Title screen failed: {}", e);
        std::process::exit(1);
    }

    let mut race_tick = 0u64;
    while game.results.is_none() && game.scene_key() == SceneKey::Hurdles && race_tick < max_frames {
        let input = player.poll(race_tick);
        if let Err(e) = game.frame(&input) {
            log::error!("Race aborted: {}", e);
            std::process::exit(1);
        }
        race_tick += 1;
    }

    match &game.results {
        Some(results) => {
            log::info!(
                "{} podium: 1st {} / 2nd {} / 3rd {} ({} frames)",
                results.name,
                results.first.as_str(),
                results.second.as_str(),
                results.third.as_str(),
                game.frames
            );
            match serde_json::to_string(results) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Failed to encode results: {}", e),
            }
        }
        None => {
            log::warn!("No finisher after {} frames", race_tick);
            std::process::exit(2);
        }
    }
}
