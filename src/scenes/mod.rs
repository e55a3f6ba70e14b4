//! Scene orchestration
//!
//! Scenes receive their collaborators (audio, scene director) through a
//! `SceneContext` on every call, so a scene never holds on to host services.

pub mod hurdles;
pub mod title;

pub use hurdles::HurdlesScene;
pub use title::TitleScene;

use serde::{Deserialize, Serialize};

use crate::audio::AudioService;
use crate::error::RaceError;
use crate::sim::{ResultsPayload, TickInput};

/// Every scene the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneKey {
    Title,
    Hurdles,
    GameResults,
}

/// Ask the host to switch scenes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRequest {
    pub key: SceneKey,
    /// Set when the target is the results display
    pub results: Option<ResultsPayload>,
}

impl SceneRequest {
    pub fn new(key: SceneKey) -> Self {
        Self { key, results: None }
    }

    pub fn results(payload: ResultsPayload) -> Self {
        Self {
            key: SceneKey::GameResults,
            results: Some(payload),
        }
    }
}

/// Receives scene transition requests
pub trait SceneDirector {
    fn start(&mut self, request: SceneRequest);
}

/// Collects requests for the host to act on between ticks
#[derive(Debug, Clone, Default)]
pub struct SceneQueue {
    requests: Vec<SceneRequest>,
}

impl SceneQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn drain(&mut self) -> Vec<SceneRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl SceneDirector for SceneQueue {
    fn start(&mut self, request: SceneRequest) {
        log::debug!("scene request: {:?}", request.key);
        self.requests.push(request);
    }
}

/// Host services a scene may call into
pub struct SceneContext<'a> {
    pub audio: &'a mut dyn AudioService,
    pub director: &'a mut dyn SceneDirector,
}

/// Lifecycle shared by every scene
pub trait Scene {
    fn key(&self) -> SceneKey;

    /// Build the scene; called once before the first update
    fn create(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), RaceError>;

    /// One frame
    fn update(&mut self, ctx: &mut SceneContext<'_>, input: &TickInput, dt: f32) -> Result<(), RaceError>;

    /// Tear down; safe to call more than once
    fn shutdown(&mut self, ctx: &mut SceneContext<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CharacterId;

    #[test]
    fn test_queue_collects_in_order() {
        let mut queue = SceneQueue::new();
        queue.start(SceneRequest::new(SceneKey::Hurdles));
        queue.start(SceneRequest::results(ResultsPayload {
            name: "HURDLES".to_string(),
            first: CharacterId::PinkMan,
            second: CharacterId::MaskDude,
            third: CharacterId::NinjaFrog,
        }));
        assert_eq!(queue.len(), 2);

        let requests = queue.drain();
        assert_eq!(requests[0].key, SceneKey::Hurdles);
        assert_eq!(requests[1].key, SceneKey::GameResults);
        assert_eq!(requests[1].results.as_ref().unwrap().first, CharacterId::PinkMan);
        assert!(queue.is_empty());
    }
}
