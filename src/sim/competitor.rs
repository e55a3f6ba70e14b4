//! Competitors
//!
//! Every runner shares the same body and stride state; only the controller
//! differs. The human controller follows input, the computer controller runs
//! at a fixed pace and jumps when the next hurdle gets close. Running into a
//! hurdle instead of over it leaves the runner stumbling at reduced pace.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyHandle, Sides};
use super::physics::PhysicsWorld;
use super::tick::TickInput;
use super::track::Track;
use crate::consts::*;

/// Playable characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharacterId {
    VirtualGuy,
    MaskDude,
    NinjaFrog,
    PinkMan,
}

impl CharacterId {
    pub const ALL: [CharacterId; 4] = [
        CharacterId::VirtualGuy,
        CharacterId::MaskDude,
        CharacterId::NinjaFrog,
        CharacterId::PinkMan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterId::VirtualGuy => "virtual-guy",
            CharacterId::MaskDude => "mask-dude",
            CharacterId::NinjaFrog => "ninja-frog",
            CharacterId::PinkMan => "pink-man",
        }
    }
}

/// Runner animation/physics state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stride {
    #[default]
    Running,
    Jumping,
}

/// What a controller wants its runner to do this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub run_speed: f32,
    pub jump: bool,
}

/// Input-driven controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanControl {
    pub run_speed: f32,
}

impl Default for HumanControl {
    fn default() -> Self {
        Self {
            run_speed: HUMAN_RUN_SPEED,
        }
    }
}

/// Policy-driven controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputerControl {
    pub run_speed: f32,
    /// Jump once the next hurdle is at most this far ahead
    pub jump_distance: f32,
}

impl ComputerControl {
    /// Roll a pace and a jump reflex
    ///
    /// The jump range reaches slightly below the clearable window, so some
    /// hurdles get clipped.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Self {
            run_speed: rng.random_range(CPU_RUN_SPEED_MIN..=CPU_RUN_SPEED_MAX),
            jump_distance: rng.random_range(CPU_JUMP_DISTANCE_MIN..=CPU_JUMP_DISTANCE_MAX),
        }
    }

    fn decide(&self, x: f32, hurdles: &[f32]) -> Motion {
        let jump = next_hurdle(x, hurdles).is_some_and(|h| h - x <= self.jump_distance);
        Motion {
            run_speed: self.run_speed,
            jump,
        }
    }
}

/// How a competitor picks its motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Control {
    Human(HumanControl),
    Computer(ComputerControl),
}

impl Control {
    pub fn is_human(&self) -> bool {
        matches!(self, Control::Human(_))
    }

    /// `hurdles` are the live hurdle x positions, in any order
    pub fn decide(&self, x: f32, hurdles: &[f32], input: &TickInput) -> Motion {
        match self {
            Control::Human(human) => Motion {
                run_speed: human.run_speed,
                jump: input.jump,
            },
            Control::Computer(cpu) => cpu.decide(x, hurdles),
        }
    }
}

/// Nearest hurdle strictly ahead of `x`
fn next_hurdle(x: f32, hurdles: &[f32]) -> Option<f32> {
    hurdles
        .iter()
        .copied()
        .filter(|&h| h > x)
        .min_by(|a, b| a.total_cmp(b))
}

/// A runner in the race
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    pub character: CharacterId,
    pub body: BodyHandle,
    pub control: Control,
    pub stride: Stride,
    /// Ticks of reduced pace left after hitting a hurdle
    #[serde(default)]
    pub stumble_ticks: u32,
}

impl Competitor {
    /// Body for a runner standing on the ground at `x`
    pub fn body_at(x: f32, ground_y: f32) -> Body {
        Body::new(
            Vec2::new(x, ground_y - RUNNER_HEIGHT / 2.0),
            Vec2::new(RUNNER_WIDTH, RUNNER_HEIGHT),
        )
        .with_gravity(RUNNER_GRAVITY)
        .with_world_bounds(Sides::HORIZONTAL)
        .reporting_world_bounds()
        .unpushable()
    }

    /// Put a runner on the start line
    pub fn spawn(character: CharacterId, control: Control, track: &Track, world: &mut PhysicsWorld) -> Self {
        let body = world.add_body(Self::body_at(RUNNER_START_X, track.ground_y()));
        Self {
            character,
            body,
            control,
            stride: Stride::Running,
            stumble_ticks: 0,
        }
    }

    pub fn is_human(&self) -> bool {
        self.control.is_human()
    }

    pub fn is_stumbling(&self) -> bool {
        self.stumble_ticks > 0
    }

    /// Ran into a hurdle; restarts the slowdown if already stumbling
    pub fn stumble(&mut self) {
        if !self.is_stumbling() {
            log::debug!("{} stumbles", self.character.as_str());
        }
        self.stumble_ticks = RUNNER_STUMBLE_TICKS;
    }

    /// Drive the body for one tick; returns true if the runner jumped
    pub fn update(&mut self, body: &mut Body, input: &TickInput, hurdles: &[f32]) -> bool {
        let motion = self.control.decide(body.pos.x, hurdles, input);
        if self.is_stumbling() {
            self.stumble_ticks -= 1;
            body.set_velocity_x(motion.run_speed * RUNNER_STUMBLE_PACE);
        } else {
            body.set_velocity_x(motion.run_speed);
        }

        let grounded = body.on_floor();
        if grounded && self.stride == Stride::Jumping {
            self.stride = Stride::Running;
        }

        if motion.jump && grounded {
            body.set_velocity_y(-RUNNER_JUMP_SPEED);
            self.stride = Stride::Jumping;
            log::debug!("{} jumps at x={:.1}", self.character.as_str(), body.pos.x);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn grounded_body(x: f32) -> Body {
        let mut body = Competitor::body_at(x, 264.0);
        body.blocked.down = true;
        body
    }

    fn human() -> Competitor {
        Competitor {
            character: CharacterId::VirtualGuy,
            body: BodyHandle(0),
            control: Control::Human(HumanControl::default()),
            stride: Stride::Running,
            stumble_ticks: 0,
        }
    }

    fn computer(jump_distance: f32) -> Competitor {
        Competitor {
            character: CharacterId::MaskDude,
            body: BodyHandle(1),
            control: Control::Computer(ComputerControl {
                run_speed: 150.0,
                jump_distance,
            }),
            stride: Stride::Running,
            stumble_ticks: 0,
        }
    }

    #[test]
    fn test_human_runs_and_jumps_on_input() {
        let mut runner = human();
        let mut body = grounded_body(100.0);

        assert!(!runner.update(&mut body, &TickInput::default(), &[]));
        assert_eq!(body.vel.x, HUMAN_RUN_SPEED);
        assert_eq!(body.vel.y, 0.0);

        assert!(runner.update(&mut body, &TickInput { jump: true }, &[]));
        assert_eq!(body.vel.y, -RUNNER_JUMP_SPEED);
        assert_eq!(runner.stride, Stride::Jumping);
    }

    #[test]
    fn test_no_jump_in_midair() {
        let mut runner = human();
        let mut body = Competitor::body_at(100.0, 264.0);
        body.vel.y = -100.0;

        assert!(!runner.update(&mut body, &TickInput { jump: true }, &[]));
        assert_eq!(body.vel.y, -100.0);
    }

    #[test]
    fn test_landing_returns_to_running() {
        let mut runner = human();
        runner.stride = Stride::Jumping;
        let mut body = grounded_body(100.0);
        runner.update(&mut body, &TickInput::default(), &[]);
        assert_eq!(runner.stride, Stride::Running);
    }

    #[test]
    fn test_stumble_halves_pace_then_wears_off() {
        let mut runner = human();
        let mut body = grounded_body(100.0);
        runner.stumble();

        for _ in 0..RUNNER_STUMBLE_TICKS {
            runner.update(&mut body, &TickInput::default(), &[]);
            assert_eq!(body.vel.x, HUMAN_RUN_SPEED * RUNNER_STUMBLE_PACE);
        }
        assert!(!runner.is_stumbling());
        runner.update(&mut body, &TickInput::default(), &[]);
        assert_eq!(body.vel.x, HUMAN_RUN_SPEED);
    }

    #[test]
    fn test_computer_jumps_near_next_hurdle_only() {
        let hurdles = [250.0, 500.0];
        let mut cpu = computer(50.0);

        let mut body = grounded_body(150.0);
        assert!(!cpu.update(&mut body, &TickInput::default(), &hurdles));
        assert_eq!(body.vel.x, 150.0);

        let mut body = grounded_body(205.0);
        assert!(cpu.update(&mut body, &TickInput::default(), &hurdles));

        // Just past the first hurdle the next one is far away
        let mut body = grounded_body(260.0);
        assert!(!cpu.update(&mut body, &TickInput::default(), &hurdles));
    }

    #[test]
    fn test_computer_ignores_input() {
        let mut cpu = computer(10.0);
        let mut body = grounded_body(100.0);
        assert!(!cpu.update(&mut body, &TickInput { jump: true }, &[400.0]));
    }

    #[test]
    fn test_next_hurdle_uses_live_positions_in_any_order() {
        assert_eq!(next_hurdle(300.0, &[750.0, 320.0, 500.0]), Some(320.0));
        assert_eq!(next_hurdle(800.0, &[750.0, 320.0]), None);
    }

    #[test]
    fn test_rolled_controls_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let cpu = ComputerControl::roll(&mut rng);
            assert!((CPU_RUN_SPEED_MIN..=CPU_RUN_SPEED_MAX).contains(&cpu.run_speed));
            assert!((CPU_JUMP_DISTANCE_MIN..=CPU_JUMP_DISTANCE_MAX).contains(&cpu.jump_distance));
        }
    }

    #[test]
    fn test_character_names_are_distinct() {
        let mut names: Vec<_> = CharacterId::ALL.iter().map(|c| c.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), CharacterId::ALL.len());
    }
}
