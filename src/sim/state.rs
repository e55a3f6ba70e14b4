//! Race state
//!
//! Everything one race needs lives here, built in dependency order:
//! track, physics world, ground, hurdles, runners, then the collider wiring.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyHandle};
use super::collision::{CollisionResolver, Knockback};
use super::competitor::{CharacterId, Competitor, ComputerControl, Control, HumanControl, Stride};
use super::finish::{FinishDetector, RaceResult, Standing};
use super::obstacle::Hurdle;
use super::physics::PhysicsWorld;
use super::track::{RaceConfig, Track};
use crate::consts::*;
use crate::error::RaceError;

/// PCG stream used to roll computer runners
const ROSTER_STREAM: u64 = 1;
/// PCG stream used for hurdle knockback
const KNOCKBACK_STREAM: u64 = 2;

/// Who is racing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub human: CharacterId,
    pub computers: Vec<CharacterId>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            human: CharacterId::VirtualGuy,
            computers: vec![
                CharacterId::MaskDude,
                CharacterId::NinjaFrog,
                CharacterId::PinkMan,
            ],
        }
    }
}

impl Roster {
    /// Human first, then computers in roster order
    pub fn characters(&self) -> impl Iterator<Item = CharacterId> + '_ {
        std::iter::once(self.human).chain(self.computers.iter().copied())
    }

    pub fn validate(&self) -> Result<(), RaceError> {
        let count = self.computers.len() + 1;
        if count < MIN_COMPETITORS {
            return Err(RaceError::NotEnoughCompetitors { found: count });
        }
        let mut seen = Vec::with_capacity(count);
        for character in self.characters() {
            if seen.contains(&character) {
                return Err(RaceError::DuplicateCharacter(character));
            }
            seen.push(character);
        }
        Ok(())
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RaceEvent {
    Jumped {
        character: CharacterId,
    },
    HurdleStruck {
        hurdle: usize,
        character: CharacterId,
        knockback: Knockback,
    },
    Finished(RaceResult),
}

/// Complete race state
#[derive(Debug, Clone)]
pub struct RaceState {
    /// Seed the race was built from
    pub seed: u64,
    pub track: Track,
    pub world: PhysicsWorld,
    pub ground: BodyHandle,
    /// Hurdles in track order
    pub hurdles: Vec<Hurdle>,
    /// Human first, then computers; this is the update order
    pub competitors: Vec<Competitor>,
    pub detector: FinishDetector,
    pub resolver: CollisionResolver<Pcg32>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Race clock (seconds)
    pub elapsed: f32,
    /// Set once the finish fires
    pub result: Option<RaceResult>,
    /// Events since the last drain
    pub events: Vec<RaceEvent>,
}

impl RaceState {
    pub fn new(config: &RaceConfig, roster: &Roster, seed: u64) -> Result<Self, RaceError> {
        roster.validate()?;

        let track = Track::new(config)?;
        let mut world = PhysicsWorld::new(track.world_width(), track.world_height());

        let (ground_center, ground_size) = track.ground_rect();
        let ground = world.add_body(Body::fixed(ground_center, ground_size));

        let hurdles = Hurdle::spawn_all(&track, &mut world);

        let mut roster_rng = Pcg32::new(seed, ROSTER_STREAM);
        let mut competitors = Vec::with_capacity(roster.computers.len() + 1);
        competitors.push(Competitor::spawn(
            roster.human,
            Control::Human(HumanControl::default()),
            &track,
            &mut world,
        ));
        for &character in &roster.computers {
            let control = ComputerControl::roll(&mut roster_rng);
            log::debug!(
                "{} paces at {:.1} and jumps from {:.1}",
                character.as_str(),
                control.run_speed,
                control.jump_distance
            );
            competitors.push(Competitor::spawn(
                character,
                Control::Computer(control),
                &track,
                &mut world,
            ));
        }

        for hurdle in &hurdles {
            world.add_collider(hurdle.body, ground)?;
        }
        for competitor in &competitors {
            world.add_collider(competitor.body, ground)?;
        }
        // Hurdle goes first so its touching flags come back with the contact
        for hurdle in &hurdles {
            for competitor in &competitors {
                world.add_contact_collider(hurdle.body, competitor.body)?;
            }
        }

        log::info!(
            "Race built: {} hurdles over {} units, {} runners, seed {}",
            hurdles.len(),
            track.world_width(),
            competitors.len(),
            seed
        );

        Ok(Self {
            seed,
            track,
            world,
            ground,
            hurdles,
            competitors,
            detector: FinishDetector::new(),
            resolver: CollisionResolver::new(Pcg32::new(seed, KNOCKBACK_STREAM)),
            time_ticks: 0,
            elapsed: 0.0,
            result: None,
            events: Vec::new(),
        })
    }

    pub fn is_finished(&self) -> bool {
        self.detector.is_finished()
    }

    pub fn human(&self) -> &Competitor {
        // Construction always puts the human first
        &self.competitors[0]
    }

    pub fn competitor(&self, character: CharacterId) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.character == character)
    }

    pub fn competitor_by_body(&self, body: BodyHandle) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.body == body)
    }

    pub fn hurdle_by_body(&self, body: BodyHandle) -> Option<&Hurdle> {
        self.hurdles.iter().find(|h| h.body == body)
    }

    /// Current hurdle x positions, in track order
    pub fn hurdle_positions(&self) -> Result<Vec<f32>, RaceError> {
        self.hurdles
            .iter()
            .map(|h| self.world.body(h.body).map(|b| b.pos.x))
            .collect()
    }

    /// Everyone's x position, in update order
    pub fn standings(&self) -> Result<Vec<Standing>, RaceError> {
        self.competitors
            .iter()
            .map(|c| {
                self.world.body(c.body).map(|b| Standing {
                    character: c.character,
                    x: b.pos.x,
                })
            })
            .collect()
    }

    /// Runner furthest along the track
    pub fn leader(&self) -> Result<Option<Standing>, RaceError> {
        Ok(self
            .standings()?
            .into_iter()
            .reduce(|best, s| if s.x > best.x { s } else { best }))
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<RaceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Compact view for rendering collaborators
    pub fn snapshot(&self) -> Result<RaceSnapshot, RaceError> {
        let runners = self
            .competitors
            .iter()
            .map(|c| {
                self.world.body(c.body).map(|b| RunnerSnapshot {
                    character: c.character,
                    human: c.is_human(),
                    pos: b.pos,
                    vel: b.vel,
                    stride: c.stride,
                    stumbling: c.is_stumbling(),
                })
            })
            .collect::<Result<_, _>>()?;
        let hurdles = self
            .hurdles
            .iter()
            .map(|h| {
                self.world.body(h.body).map(|b| HurdleSnapshot {
                    index: h.index,
                    pos: b.pos,
                    vel: b.vel,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(RaceSnapshot {
            time_ticks: self.time_ticks,
            elapsed: self.elapsed,
            finished: self.is_finished(),
            runners,
            hurdles,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerSnapshot {
    pub character: CharacterId,
    pub human: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    pub stride: Stride,
    pub stumbling: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HurdleSnapshot {
    pub index: usize,
    pub pos: Vec2,
    pub vel: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub time_ticks: u64,
    pub elapsed: f32,
    pub finished: bool,
    pub runners: Vec<RunnerSnapshot>,
    pub hurdles: Vec<HurdleSnapshot>,
}
