//! Track geometry
//!
//! The track is a straight strip of ground with evenly spaced hurdles. Every
//! value here is derived from `RaceConfig`; nothing changes once built.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::RaceError;

/// Fixed layout parameters for a race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Number of hurdles on the track
    pub hurdle_count: u32,
    /// Distance between consecutive hurdles (and from the start to the first)
    pub hurdle_spacing: f32,
    /// Height of the world (matches the viewport)
    pub viewport_height: f32,
    /// Thickness of the ground strip
    pub ground_thickness: f32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            hurdle_count: HURDLE_COUNT,
            hurdle_spacing: HURDLE_SPACING,
            viewport_height: VIEWPORT_HEIGHT,
            ground_thickness: GROUND_THICKNESS,
        }
    }
}

/// Immutable world geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    world_width: f32,
    world_height: f32,
    ground_y: f32,
    ground_thickness: f32,
    hurdle_positions: Vec<f32>,
}

impl Track {
    pub fn new(config: &RaceConfig) -> Result<Self, RaceError> {
        if config.hurdle_count == 0 {
            return Err(RaceError::InvalidTrack("hurdle count must be positive"));
        }
        if config.hurdle_spacing <= 0.0 {
            return Err(RaceError::InvalidTrack("hurdle spacing must be positive"));
        }
        if config.ground_thickness <= 0.0 || config.ground_thickness >= config.viewport_height {
            return Err(RaceError::InvalidTrack("ground must fit inside the viewport"));
        }

        let hurdle_positions = (0..config.hurdle_count)
            .map(|i| (i + 1) as f32 * config.hurdle_spacing)
            .collect();

        Ok(Self {
            world_width: (config.hurdle_count + 1) as f32 * config.hurdle_spacing,
            world_height: config.viewport_height,
            ground_y: config.viewport_height - config.ground_thickness,
            ground_thickness: config.ground_thickness,
            hurdle_positions,
        })
    }

    /// Total track length; the right world edge is the finish line
    pub fn world_width(&self) -> f32 {
        self.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.world_height
    }

    /// Y coordinate of the ground surface (y grows downward)
    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    /// Hurdle start x positions, strictly increasing
    pub fn hurdle_positions(&self) -> &[f32] {
        &self.hurdle_positions
    }

    /// Center and size of the ground body
    pub fn ground_rect(&self) -> (Vec2, Vec2) {
        let size = Vec2::new(self.world_width, self.ground_thickness);
        let center = Vec2::new(self.world_width / 2.0, self.ground_y + self.ground_thickness / 2.0);
        (center, size)
    }
}
