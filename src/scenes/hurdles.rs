//! Hurdles race scene
//!
//! Builds the race, runs one simulation tick per frame, and hands the final
//! standings to the results display exactly once.

use super::{Scene, SceneContext, SceneKey, SceneRequest};
use crate::audio::RACE_MUSIC;
use crate::error::RaceError;
use crate::sim::{RaceConfig, RaceEvent, RaceResult, RaceState, Roster, TickInput, tick};

/// Where the scene is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneStatus {
    /// Not created yet
    #[default]
    Idle,
    Racing,
    /// Results handed off, waiting for the host to switch scenes
    Finished,
    Stopped,
}

pub struct HurdlesScene {
    config: RaceConfig,
    roster: Roster,
    seed: u64,
    race: Option<RaceState>,
    status: SceneStatus,
    /// Events from the most recent update
    events: Vec<RaceEvent>,
}

impl HurdlesScene {
    pub fn new(config: RaceConfig, roster: Roster, seed: u64) -> Self {
        Self {
            config,
            roster,
            seed,
            race: None,
            status: SceneStatus::Idle,
            events: Vec::new(),
        }
    }

    pub fn status(&self) -> SceneStatus {
        self.status
    }

    pub fn race(&self) -> Option<&RaceState> {
        self.race.as_ref()
    }

    pub fn race_mut(&mut self) -> Option<&mut RaceState> {
        self.race.as_mut()
    }

    pub fn result(&self) -> Option<&RaceResult> {
        self.race.as_ref().and_then(|r| r.result.as_ref())
    }

    /// Events produced by the last `update`
    pub fn events(&self) -> &[RaceEvent] {
        &self.events
    }
}

impl Scene for HurdlesScene {
    fn key(&self) -> SceneKey {
        SceneKey::Hurdles
    }

    fn create(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), RaceError> {
        self.race = Some(RaceState::new(&self.config, &self.roster, self.seed)?);
        ctx.audio.play(RACE_MUSIC, true);
        self.status = SceneStatus::Racing;
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>, input: &TickInput, dt: f32) -> Result<(), RaceError> {
        self.events.clear();
        if self.status != SceneStatus::Racing {
            return Ok(());
        }
        let Some(race) = self.race.as_mut() else {
            return Ok(());
        };

        tick(race, input, dt)?;
        self.events = race.drain_events();

        let finished = self.events.iter().find_map(|e| match e {
            RaceEvent::Finished(result) => Some(result),
            _ => None,
        });
        if let Some(result) = finished {
            ctx.audio.stop_by_key(RACE_MUSIC);
            ctx.director.start(SceneRequest::results(result.payload()));
            self.status = SceneStatus::Finished;
        }
        Ok(())
    }

    fn shutdown(&mut self, ctx: &mut SceneContext<'_>) {
        match self.status {
            SceneStatus::Stopped => return,
            SceneStatus::Racing => ctx.audio.stop_by_key(RACE_MUSIC),
            SceneStatus::Idle | SceneStatus::Finished => {}
        }
        if let Some(race) = self.race.take() {
            log::info!("Hurdles scene stopped after {} ticks", race.time_ticks);
        }
        self.events.clear();
        self.status = SceneStatus::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::LogAudio;
    use crate::consts::SIM_DT;
    use crate::scenes::SceneQueue;
    use crate::sim::CharacterId;

    fn scene() -> HurdlesScene {
        HurdlesScene::new(RaceConfig::default(), Roster::default(), 31)
    }

    #[test]
    fn test_human_win_hands_off_results_once() {
        let mut audio = LogAudio::new();
        let mut queue = SceneQueue::new();
        let mut scene = scene();

        {
            let mut ctx = SceneContext {
                audio: &mut audio,
                director: &mut queue,
            };
            scene.create(&mut ctx).unwrap();
        }
        assert_eq!(audio.playing(), [RACE_MUSIC.to_string()]);

        {
            let race = scene.race_mut().unwrap();
            let handle = race.human().body;
            let body = race.world.body_mut(handle).unwrap();
            body.pos.x = 2720.0;
            body.prev.x = 2720.0;
        }

        {
            let mut ctx = SceneContext {
                audio: &mut audio,
                director: &mut queue,
            };
            for _ in 0..120 {
                scene.update(&mut ctx, &TickInput::default(), SIM_DT).unwrap();
            }
            scene.shutdown(&mut ctx);
            scene.shutdown(&mut ctx);
        }

        assert_eq!(scene.status(), SceneStatus::Stopped);
        assert!(audio.playing().is_empty());

        let requests = queue.drain();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].key, SceneKey::GameResults);
        let payload = requests[0].results.clone().unwrap();
        assert_eq!(payload.name, "HURDLES");
        assert_eq!(payload.first, CharacterId::VirtualGuy);
        assert_ne!(payload.second, CharacterId::VirtualGuy);
        assert_ne!(payload.third, payload.second);
    }

    #[test]
    fn test_shutdown_mid_race_is_idempotent() {
        let mut audio = LogAudio::new();
        let mut queue = SceneQueue::new();
        let mut scene = scene();
        let mut ctx = SceneContext {
            audio: &mut audio,
            director: &mut queue,
        };

        scene.create(&mut ctx).unwrap();
        for _ in 0..10 {
            scene.update(&mut ctx, &TickInput::default(), SIM_DT).unwrap();
        }
        scene.shutdown(&mut ctx);
        scene.shutdown(&mut ctx);
        scene.update(&mut ctx, &TickInput { jump: true }, SIM_DT).unwrap();

        assert!(scene.race().is_none());
        assert!(scene.events().is_empty());
        assert!(queue.is_empty());
        assert!(audio.playing().is_empty());
    }

    #[test]
    fn test_shutdown_before_create() {
        let mut audio = LogAudio::new();
        let mut queue = SceneQueue::new();
        let mut scene = scene();
        let mut ctx = SceneContext {
            audio: &mut audio,
            director: &mut queue,
        };
        scene.shutdown(&mut ctx);
        assert_eq!(scene.status(), SceneStatus::Stopped);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_bad_roster_fails_at_create() {
        let roster = Roster {
            human: CharacterId::MaskDude,
            computers: vec![CharacterId::MaskDude, CharacterId::PinkMan],
        };
        let mut scene = HurdlesScene::new(RaceConfig::default(), roster, 1);
        let mut audio = LogAudio::new();
        let mut queue = SceneQueue::new();
        let mut ctx = SceneContext {
            audio: &mut audio,
            director: &mut queue,
        };
        assert_eq!(
            scene.create(&mut ctx),
            Err(RaceError::DuplicateCharacter(CharacterId::MaskDude))
        );
        assert_eq!(scene.status(), SceneStatus::Idle);
    }
}
