//! Hurdles
//!
//! A hurdle is a light box that can be knocked along the track. It only
//! collides with the top and bottom of the world, so a hard enough hit can
//! push it past the finish line.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyHandle, Sides};
use super::physics::PhysicsWorld;
use super::track::Track;
use crate::consts::*;

/// A hurdle placed on the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hurdle {
    /// Position in the track's hurdle order (0 = nearest the start)
    pub index: usize,
    pub body: BodyHandle,
}

impl Hurdle {
    /// Body for a hurdle standing at `x`
    pub fn body_at(x: f32, ground_y: f32) -> Body {
        Body::new(
            Vec2::new(x, ground_y - HURDLE_SPAWN_LIFT),
            Vec2::new(HURDLE_WIDTH, HURDLE_HEIGHT),
        )
        .with_gravity(HURDLE_GRAVITY)
        .with_drag_x(HURDLE_DRAG_X)
        .with_world_bounds(Sides::VERTICAL)
    }

    /// Place one hurdle per track position, in track order
    pub fn spawn_all(track: &Track, world: &mut PhysicsWorld) -> Vec<Hurdle> {
        track
            .hurdle_positions()
            .iter()
            .enumerate()
            .map(|(index, &x)| Hurdle {
                index,
                body: world.add_body(Self::body_at(x, track.ground_y())),
            })
            .collect()
    }
}
