//! Deterministic race simulation
//!
//! All race logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable update order (human first, then computers in roster order)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod competitor;
pub mod finish;
pub mod obstacle;
pub mod physics;
pub mod state;
pub mod tick;
pub mod track;

pub use body::{Body, BodyHandle, Side, Sides};
pub use collision::{Axis, CollisionResolver, Knockback, overlap, separate};
pub use competitor::{CharacterId, Competitor, ComputerControl, Control, HumanControl, Motion, Stride};
pub use finish::{FinishDetector, FinishState, RaceResult, ResultsPayload, Standing, rank};
pub use obstacle::Hurdle;
pub use physics::{BoundsHit, Contact, PhysicsWorld, StepReport};
pub use state::{RaceEvent, RaceSnapshot, RaceState, Roster};
pub use tick::{TickInput, tick};
pub use track::{RaceConfig, Track};
