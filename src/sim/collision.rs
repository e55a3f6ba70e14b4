//! Collision detection, separation and hurdle knockback
//!
//! Bodies are boxes, so detection is a plain overlap test. The interesting
//! part is deciding which side two bodies met on (from where they were at
//! the start of the step) and who gets shoved out of the way.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::*;

/// Slack when deciding whether one body started the step resting on another
const VERTICAL_CONTACT_SLOP: f32 = 1.0;

/// Axis a contact was resolved along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which of the two bodies gets moved out of the overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shove {
    First,
    Second,
    Both,
}

/// Penetration depth on each axis, or `None` when the boxes don't overlap
pub fn overlap(a: &Body, b: &Body) -> Option<Vec2> {
    let reach = a.half() + b.half();
    let dist = (a.pos - b.pos).abs();
    let depth = reach - dist;
    if depth.x > 0.0 && depth.y > 0.0 {
        Some(depth)
    } else {
        None
    }
}

/// Push two overlapping bodies apart and update their contact flags
///
/// Returns the axis the contact was resolved on, or `None` if the bodies
/// don't overlap (or are both immovable).
pub fn separate(a: &mut Body, b: &mut Body) -> Option<Axis> {
    let depth = overlap(a, b)?;

    let a_was_above = a.prev.y + a.half().y <= b.prev.y - b.half().y + VERTICAL_CONTACT_SLOP;
    let b_was_above = b.prev.y + b.half().y <= a.prev.y - a.half().y + VERTICAL_CONTACT_SLOP;

    if a_was_above {
        separate_vertical(a, b, depth.y).then_some(Axis::Vertical)
    } else if b_was_above {
        separate_vertical(b, a, depth.y).then_some(Axis::Vertical)
    } else if depth.x <= depth.y {
        if a.prev.x <= b.prev.x {
            separate_horizontal(a, b, depth.x).then_some(Axis::Horizontal)
        } else {
            separate_horizontal(b, a, depth.x).then_some(Axis::Horizontal)
        }
    } else if a.pos.y <= b.pos.y {
        // Sunk into each other from above, e.g. pressed into the ground
        separate_vertical(a, b, depth.y).then_some(Axis::Vertical)
    } else {
        separate_vertical(b, a, depth.y).then_some(Axis::Vertical)
    }
}

fn shove_vertical(upper: &Body, lower: &Body) -> Option<Shove> {
    if upper.immovable && lower.immovable {
        return None;
    }
    if upper.immovable {
        return Some(Shove::Second);
    }
    // Something resting on the floor holds firm, whatever lands on it
    if lower.immovable || lower.blocked.down || !lower.pushable {
        return Some(Shove::First);
    }
    if !upper.pushable {
        return Some(Shove::Second);
    }
    Some(Shove::Both)
}

fn shove_horizontal(left: &Body, right: &Body) -> Option<Shove> {
    if left.immovable && right.immovable {
        return None;
    }
    if left.immovable {
        return Some(Shove::Second);
    }
    if right.immovable {
        return Some(Shove::First);
    }
    match (left.pushable, right.pushable) {
        (true, true) => Some(Shove::Both),
        (false, true) => Some(Shove::Second),
        (true, false) => Some(Shove::First),
        (false, false) => None,
    }
}

fn separate_vertical(upper: &mut Body, lower: &mut Body, depth: f32) -> bool {
    let Some(shove) = shove_vertical(upper, lower) else {
        return false;
    };

    match shove {
        Shove::First => {
            upper.pos.y -= depth;
            if upper.vel.y > 0.0 {
                upper.vel.y = 0.0;
            }
            upper.blocked.down = true;
        }
        Shove::Second => {
            lower.pos.y += depth;
            lower.vel.y = lower.vel.y.max(upper.vel.y);
            lower.blocked.up = true;
        }
        Shove::Both => {
            upper.pos.y -= depth / 2.0;
            lower.pos.y += depth / 2.0;
            if upper.vel.y > lower.vel.y {
                let shared = (upper.vel.y + lower.vel.y) / 2.0;
                upper.vel.y = shared;
                lower.vel.y = shared;
            }
        }
    }

    upper.touching.down = true;
    lower.touching.up = true;
    true
}

fn separate_horizontal(left: &mut Body, right: &mut Body, depth: f32) -> bool {
    let Some(shove) = shove_horizontal(left, right) else {
        return false;
    };

    match shove {
        Shove::First => {
            left.pos.x -= depth;
            left.vel.x = left.vel.x.min(right.vel.x);
            left.blocked.right = true;
        }
        Shove::Second => {
            right.pos.x += depth;
            right.vel.x = right.vel.x.max(left.vel.x);
            right.blocked.left = true;
        }
        Shove::Both => {
            left.pos.x -= depth / 2.0;
            right.pos.x += depth / 2.0;
            if left.vel.x > right.vel.x {
                let shared = (left.vel.x + right.vel.x) / 2.0;
                left.vel.x = shared;
                right.vel.x = shared;
            }
        }
    }

    left.touching.right = true;
    right.touching.left = true;
    true
}

/// Velocity handed to a struck hurdle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knockback {
    /// Forward velocity, always applied
    pub vx: f32,
    /// Upward velocity, skipped when something is standing on the hurdle
    pub vy: Option<f32>,
}

/// Knocks hurdles forward (and usually up) when a runner hits them
///
/// Each contact is an independent draw from the injected RNG; there is no
/// coordination between contacts in the same step.
#[derive(Debug, Clone)]
pub struct CollisionResolver<R = Pcg32> {
    rng: R,
}

impl CollisionResolver<Pcg32> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> CollisionResolver<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a knockback for one contact
    pub fn roll(&mut self, touching_from_above: bool) -> Knockback {
        let vx = self.rng.random_range(KNOCKBACK_X_MIN..=KNOCKBACK_X_MAX);
        let vy = if touching_from_above {
            None
        } else {
            Some(self.rng.random_range(KNOCKBACK_Y_MIN..=KNOCKBACK_Y_MAX))
        };
        Knockback { vx, vy }
    }

    /// Apply a fresh knockback to a struck hurdle
    ///
    /// `touching_from_above` comes from the step's contact report, taken
    /// after every collider pair was separated.
    pub fn strike(&mut self, hurdle: &mut Body, touching_from_above: bool) -> Knockback {
        let knockback = self.roll(touching_from_above);
        hurdle.set_velocity_x(knockback.vx);
        if let Some(vy) = knockback.vy {
            hurdle.set_velocity_y(vy);
        }
        knockback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn runner_at(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(RUNNER_WIDTH, RUNNER_HEIGHT)).unpushable()
    }

    fn hurdle_at(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(HURDLE_WIDTH, HURDLE_HEIGHT))
    }

    #[test]
    fn test_overlap_miss_and_hit() {
        let a = hurdle_at(0.0, 0.0);
        let b = hurdle_at(12.0, 0.0);
        assert!(overlap(&a, &b).is_none(), "edges touching is not an overlap");

        let c = hurdle_at(10.0, 0.0);
        let depth = overlap(&a, &c).unwrap();
        assert!((depth.x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_runner_shoves_hurdle_forward() {
        let mut runner = runner_at(100.0, 100.0);
        runner.vel.x = 160.0;
        let mut hurdle = hurdle_at(110.0, 108.0);

        let axis = separate(&mut runner, &mut hurdle);
        assert_eq!(axis, Some(Axis::Horizontal));
        assert_eq!(runner.pos.x, 100.0, "unpushable runner keeps its place");
        assert!((hurdle.left() - runner.right()).abs() < 1e-4);
        assert_eq!(hurdle.vel.x, 160.0);
        assert!(hurdle.touching.left);
        assert!(runner.touching.right);
        assert!(!hurdle.touching.up);
    }

    #[test]
    fn test_landing_on_resting_hurdle() {
        let mut hurdle = hurdle_at(200.0, 100.0);
        hurdle.begin_step();
        hurdle.blocked.down = true;

        let mut runner = runner_at(200.0, 79.0);
        runner.prev = Vec2::new(195.0, 58.0);
        runner.vel.y = 120.0;

        let axis = separate(&mut hurdle, &mut runner);
        assert_eq!(axis, Some(Axis::Vertical));
        assert!((runner.bottom() - hurdle.top()).abs() < 1e-4);
        assert_eq!(runner.vel.y, 0.0);
        assert!(runner.blocked.down);
        assert!(hurdle.touching.up);
    }

    #[test]
    fn test_immovable_ground_holds() {
        let mut ground = Body::fixed(Vec2::new(500.0, 300.0), Vec2::new(1000.0, 96.0));
        let mut hurdle = hurdle_at(250.0, 246.0);
        hurdle.prev = Vec2::new(250.0, 243.0);
        hurdle.vel.y = 50.0;

        assert_eq!(separate(&mut hurdle, &mut ground), Some(Axis::Vertical));
        assert!((hurdle.bottom() - ground.top()).abs() < 1e-4);
        assert_eq!(ground.pos, Vec2::new(500.0, 300.0));
        assert!(hurdle.blocked.down);
    }

    #[test]
    fn test_sunk_body_pops_back_up() {
        let mut ground = Body::fixed(Vec2::new(500.0, 300.0), Vec2::new(1000.0, 96.0));
        // Pressed 4 units into the ground during the previous step
        let mut hurdle = hurdle_at(250.0, 248.0);

        assert_eq!(separate(&mut hurdle, &mut ground), Some(Axis::Vertical));
        assert_eq!(hurdle.pos.x, 250.0);
        assert!((hurdle.bottom() - ground.top()).abs() < 1e-4);
    }

    #[test]
    fn test_two_unpushable_bodies_pass_through() {
        let mut a = runner_at(0.0, 0.0);
        let mut b = runner_at(5.0, 0.0);
        assert_eq!(separate(&mut a, &mut b), None);
        assert_eq!(b.pos.x, 5.0);
    }

    #[test]
    fn test_knockback_ranges_over_many_contacts() {
        let mut resolver = CollisionResolver::seeded(7);
        for _ in 0..1000 {
            let k = resolver.roll(false);
            assert!((KNOCKBACK_X_MIN..=KNOCKBACK_X_MAX).contains(&k.vx));
            let vy = k.vy.expect("open hurdle always gets lifted");
            assert!((KNOCKBACK_Y_MIN..=KNOCKBACK_Y_MAX).contains(&vy));
        }
    }

    #[test]
    fn test_no_lift_when_stood_on() {
        let mut resolver = CollisionResolver::seeded(11);
        let mut hurdle = hurdle_at(0.0, 0.0);
        hurdle.vel.y = 3.0;

        for _ in 0..1000 {
            let k = resolver.strike(&mut hurdle, true);
            assert!(k.vy.is_none());
            assert_eq!(hurdle.vel.y, 3.0);
            assert_eq!(hurdle.vel.x, k.vx);
        }
    }

    #[test]
    fn test_same_seed_same_knockbacks() {
        let mut a = CollisionResolver::seeded(42);
        let mut b = CollisionResolver::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.roll(false), b.roll(false));
        }
    }

    proptest! {
        #[test]
        fn prop_strike_sets_velocity_in_range(seed in any::<u64>(), from_above in any::<bool>()) {
            let mut resolver = CollisionResolver::seeded(seed);
            let mut hurdle = hurdle_at(0.0, 0.0);
            let k = resolver.strike(&mut hurdle, from_above);
            prop_assert!(hurdle.vel.x >= KNOCKBACK_X_MIN && hurdle.vel.x <= KNOCKBACK_X_MAX);
            prop_assert_eq!(k.vy.is_some(), !from_above);
            if !from_above {
                prop_assert!(hurdle.vel.y >= KNOCKBACK_Y_MIN && hurdle.vel.y <= KNOCKBACK_Y_MAX);
            }
        }
    }
}
