//! Axis-aligned physics bodies
//!
//! Positions are body centers in world space, y grows downward (screen
//! convention), so gravity is positive and jumps are negative velocities.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Index of a body inside a `PhysicsWorld`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub(crate) usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-side flags, used both for contact state and world-bounds masks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sides {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Sides {
    pub const NONE: Sides = Sides {
        up: false,
        down: false,
        left: false,
        right: false,
    };
    pub const VERTICAL: Sides = Sides {
        up: true,
        down: true,
        left: false,
        right: false,
    };
    pub const HORIZONTAL: Sides = Sides {
        up: false,
        down: false,
        left: true,
        right: true,
    };

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// A world edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Up,
    Down,
    Left,
    Right,
}

/// A simulated rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Position at the start of the current step, used to work out which side
    /// two bodies met on
    pub prev: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Per-body gravity (units/s², positive is down)
    pub gravity_y: f32,
    pub allow_gravity: bool,
    /// Linear horizontal drag (units/s²)
    pub drag_x: f32,
    /// Never moved by integration or by other bodies
    pub immovable: bool,
    /// Whether other bodies can shove this one during separation
    pub pushable: bool,
    /// World edges this body collides with
    pub world_bounds: Sides,
    /// Report world-edge hits to the caller
    pub on_world_bounds: bool,
    /// Sides in contact with another body this step
    #[serde(skip)]
    pub touching: Sides,
    /// Sides blocked by another body or a world edge this step
    #[serde(skip)]
    pub blocked: Sides,
}

impl Body {
    /// A dynamic body at rest
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            prev: pos,
            size,
            vel: Vec2::ZERO,
            gravity_y: 0.0,
            allow_gravity: true,
            drag_x: 0.0,
            immovable: false,
            pushable: true,
            world_bounds: Sides::NONE,
            on_world_bounds: false,
            touching: Sides::NONE,
            blocked: Sides::NONE,
        }
    }

    /// An immovable, gravity-exempt body (ground, walls)
    pub fn fixed(pos: Vec2, size: Vec2) -> Self {
        Self {
            allow_gravity: false,
            immovable: true,
            pushable: false,
            ..Self::new(pos, size)
        }
    }

    pub fn with_gravity(mut self, gravity_y: f32) -> Self {
        self.gravity_y = gravity_y;
        self
    }

    pub fn with_drag_x(mut self, drag_x: f32) -> Self {
        self.drag_x = drag_x;
        self
    }

    pub fn with_world_bounds(mut self, sides: Sides) -> Self {
        self.world_bounds = sides;
        self
    }

    pub fn reporting_world_bounds(mut self) -> Self {
        self.on_world_bounds = true;
        self
    }

    pub fn unpushable(mut self) -> Self {
        self.pushable = false;
        self
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Standing on something (ground, another body, or the bottom edge)
    pub fn on_floor(&self) -> bool {
        self.blocked.down || self.touching.down
    }

    pub fn set_velocity_x(&mut self, vx: f32) {
        self.vel.x = vx;
    }

    pub fn set_velocity_y(&mut self, vy: f32) {
        self.vel.y = vy;
    }

    /// Clear per-step contact state and remember where the step started
    pub(crate) fn begin_step(&mut self) {
        self.prev = self.pos;
        self.touching = Sides::NONE;
        self.blocked = Sides::NONE;
    }
}
