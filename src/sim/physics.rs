//! Arcade physics world
//!
//! A deliberately small engine: boxes with gravity and horizontal drag,
//! per-body world-edge collision, and registered collider pairs. Contacts and
//! world-edge hits are returned from `step` so the caller can react to them
//! synchronously, in registration order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyHandle, Side};
use super::collision::{Axis, separate};
use crate::apply_drag;
use crate::error::RaceError;

/// Two bodies that are separated against each other every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColliderPair {
    pub a: BodyHandle,
    pub b: BodyHandle,
    /// Report contacts between these two bodies
    pub notify: bool,
}

/// A resolved contact on a notifying collider pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub axis: Axis,
    /// Something was resting on top of `a` this step
    pub touching_from_above: bool,
}

/// A body ran into a world edge it collides with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsHit {
    pub body: BodyHandle,
    pub side: Side,
}

/// Everything a step reports back, in the order it happened
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    pub bounds_hits: Vec<BoundsHit>,
    pub contacts: Vec<Contact>,
}

/// Owns every body in the race
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsWorld {
    /// Top-left corner of the world rectangle
    pub min: Vec2,
    /// Bottom-right corner of the world rectangle
    pub max: Vec2,
    bodies: Vec<Body>,
    colliders: Vec<ColliderPair>,
}

impl PhysicsWorld {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
            bodies: Vec::new(),
            colliders: Vec::new(),
        }
    }

    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&Body, RaceError> {
        self.bodies.get(handle.0).ok_or(RaceError::UnknownBody(handle))
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body, RaceError> {
        self.bodies
            .get_mut(handle.0)
            .ok_or(RaceError::UnknownBody(handle))
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Separate `a` and `b` every step without reporting contacts
    pub fn add_collider(&mut self, a: BodyHandle, b: BodyHandle) -> Result<(), RaceError> {
        self.register(a, b, false)
    }

    /// Separate `a` and `b` every step and report each contact
    pub fn add_contact_collider(&mut self, a: BodyHandle, b: BodyHandle) -> Result<(), RaceError> {
        self.register(a, b, true)
    }

    fn register(&mut self, a: BodyHandle, b: BodyHandle, notify: bool) -> Result<(), RaceError> {
        self.body(a)?;
        self.body(b)?;
        self.colliders.push(ColliderPair { a, b, notify });
        Ok(())
    }

    /// Advance every body by `dt` seconds
    pub fn step(&mut self, dt: f32) -> StepReport {
        let mut report = StepReport::default();

        for body in &mut self.bodies {
            body.begin_step();
        }

        for (index, body) in self.bodies.iter_mut().enumerate() {
            if body.immovable {
                continue;
            }
            integrate(body, dt);
            for side in clamp_to_world(body, self.min, self.max) {
                if body.on_world_bounds {
                    report.bounds_hits.push(BoundsHit {
                        body: BodyHandle(index),
                        side,
                    });
                }
            }
        }

        for pair in &self.colliders {
            let Some((a, b)) = pair_mut(&mut self.bodies, pair.a.0, pair.b.0) else {
                continue;
            };
            if let Some(axis) = separate(a, b) {
                if pair.notify {
                    report.contacts.push(Contact {
                        a: pair.a,
                        b: pair.b,
                        axis,
                        touching_from_above: false,
                    });
                }
            }
        }

        // Touching flags are only final once every pair has been separated
        for contact in &mut report.contacts {
            contact.touching_from_above = self.bodies[contact.a.0].touching.up;
        }

        report
    }
}

fn integrate(body: &mut Body, dt: f32) {
    if body.allow_gravity {
        body.vel.y += body.gravity_y * dt;
    }
    if body.drag_x > 0.0 {
        body.vel.x = apply_drag(body.vel.x, body.drag_x, dt);
    }
    body.pos += body.vel * dt;
}

/// Push a body back inside the world on the edges it collides with
fn clamp_to_world(body: &mut Body, min: Vec2, max: Vec2) -> Vec<Side> {
    let mut hits = Vec::new();
    let half = body.half();
    let mask = body.world_bounds;

    if mask.left && body.left() < min.x {
        body.pos.x = min.x + half.x;
        body.vel.x = body.vel.x.max(0.0);
        body.blocked.left = true;
        hits.push(Side::Left);
    }
    if mask.right && body.right() > max.x {
        body.pos.x = max.x - half.x;
        body.vel.x = body.vel.x.min(0.0);
        body.blocked.right = true;
        hits.push(Side::Right);
    }
    if mask.up && body.top() < min.y {
        body.pos.y = min.y + half.y;
        body.vel.y = body.vel.y.max(0.0);
        body.blocked.up = true;
        hits.push(Side::Up);
    }
    if mask.down && body.bottom() > max.y {
        body.pos.y = max.y - half.y;
        body.vel.y = body.vel.y.min(0.0);
        body.blocked.down = true;
        hits.push(Side::Down);
    }

    hits
}

/// Borrow two distinct bodies mutably
fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> Option<(&mut Body, &mut Body)> {
    if a == b || a >= bodies.len() || b >= bodies.len() {
        return None;
    }
    if a < b {
        let (lo, hi) = bodies.split_at_mut(b);
        Some((&mut lo[a], &mut hi[0]))
    } else {
        let (lo, hi) = bodies.split_at_mut(a);
        Some((&mut hi[0], &mut lo[b]))
    }
}
