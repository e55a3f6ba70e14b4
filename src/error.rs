//! Error types
//!
//! The simulation has no fallible I/O; these cover broken preconditions at
//! construction time and settings loading.

use thiserror::Error;

use crate::sim::{BodyHandle, CharacterId};

/// Precondition violations detected while building or ranking a race
#[derive(Debug, Error, PartialEq)]
pub enum RaceError {
    #[error("invalid track: {0}")]
    InvalidTrack(&'static str),
    #[error("ranking needs at least 3 competitors, found {found}")]
    NotEnoughCompetitors { found: usize },
    #[error("character {0:?} is already racing")]
    DuplicateCharacter(CharacterId),
    #[error("body {0:?} is not registered with the physics world")]
    UnknownBody(BodyHandle),
}

/// Failures while reading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
