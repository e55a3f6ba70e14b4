//! Runtime settings
//!
//! Loaded from an optional JSON file. Track layout and physics tuning are
//! fixed in `consts`; settings only cover who races, seeding, audio, and the
//! headless demo.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::sim::Roster;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed seed for reproducible races; `None` seeds from the clock
    pub seed: Option<u64>,
    pub roster: Roster,

    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Headless demo ===
    /// Tick of the demo player's first button press
    pub demo_first_press: u64,
    /// Ticks between demo button presses
    pub demo_press_period: u64,
    /// Give up on a race that runs longer than this (seconds)
    pub max_race_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            roster: Roster::default(),
            music_volume: 0.7,
            muted: false,
            // First hurdle is ~0.9s away at human pace, then one every ~1.56s
            demo_first_press: 53,
            demo_press_period: 94,
            max_race_seconds: 60.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Seed to build the next race from
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
