//! One Button Hurdles - race simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track, bodies, competitors, finish detection)
//! - `scenes`: Title and race scene orchestration, scene transitions
//! - `audio`: Audio service contract
//! - `platform`: Input service contract
//! - `settings`: Runtime settings loaded from JSON

pub mod audio;
pub mod error;
pub mod platform;
pub mod scenes;
pub mod settings;
pub mod sim;

pub use error::{RaceError, SettingsError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 640.0;
    pub const VIEWPORT_HEIGHT: f32 = 360.0;

    /// Track layout
    pub const HURDLE_COUNT: u32 = 10;
    pub const HURDLE_SPACING: f32 = 250.0;
    /// Thickness of the ground strip at the bottom of the viewport
    pub const GROUND_THICKNESS: f32 = 96.0;

    /// Hurdle body
    pub const HURDLE_WIDTH: f32 = 12.0;
    pub const HURDLE_HEIGHT: f32 = 16.0;
    /// Hurdle center sits this far above ground level at spawn
    pub const HURDLE_SPAWN_LIFT: f32 = 8.0;
    /// Extra gravity on hurdles (units/s², downward)
    pub const HURDLE_GRAVITY: f32 = 400.0;
    /// Linear horizontal drag on hurdles (units/s²)
    pub const HURDLE_DRAG_X: f32 = 200.0;

    /// Knockback applied to a struck hurdle (units/s)
    pub const KNOCKBACK_X_MIN: f32 = 100.0;
    pub const KNOCKBACK_X_MAX: f32 = 200.0;
    /// Vertical knockback, negative is up
    pub const KNOCKBACK_Y_MIN: f32 = -250.0;
    pub const KNOCKBACK_Y_MAX: f32 = -150.0;

    /// Runner body
    pub const RUNNER_WIDTH: f32 = 20.0;
    pub const RUNNER_HEIGHT: f32 = 32.0;
    /// Starting x of every runner's center
    pub const RUNNER_START_X: f32 = 48.0;
    pub const RUNNER_GRAVITY: f32 = 900.0;
    /// Upward velocity applied on jump (units/s)
    pub const RUNNER_JUMP_SPEED: f32 = 330.0;
    /// Ticks a runner stays slowed after running into a hurdle
    pub const RUNNER_STUMBLE_TICKS: u32 = 30;
    /// Fraction of run speed kept while stumbling
    pub const RUNNER_STUMBLE_PACE: f32 = 0.5;
    /// Human forward speed (units/s)
    pub const HUMAN_RUN_SPEED: f32 = 160.0;
    /// Computer forward speed range (units/s)
    pub const CPU_RUN_SPEED_MIN: f32 = 145.0;
    pub const CPU_RUN_SPEED_MAX: f32 = 172.0;
    /// Computer jump trigger distance range (center to hurdle center)
    pub const CPU_JUMP_DISTANCE_MIN: f32 = 20.0;
    pub const CPU_JUMP_DISTANCE_MAX: f32 = 80.0;

    /// Minimum competitors needed to name first, second and third
    pub const MIN_COMPETITORS: usize = 3;

    /// Event name reported to the results display
    pub const EVENT_NAME: &str = "HURDLES";
}

/// Linear drag toward zero, never overshooting
#[inline]
pub fn apply_drag(velocity: f32, drag: f32, dt: f32) -> f32 {
    let step = drag * dt;
    if velocity > step {
        velocity - step
    } else if velocity < -step {
        velocity + step
    } else {
        0.0
    }
}
