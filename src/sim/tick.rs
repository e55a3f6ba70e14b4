//! Fixed timestep simulation tick
//!
//! Order within a tick: human update, computer updates, physics step,
//! hurdle knockback (and runner stumble) for each contact, then finish
//! detection for each right-edge hit.

use super::body::Side;
use super::collision::Axis;
use super::state::{RaceEvent, RaceState};
use crate::error::RaceError;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// The one button was pressed this tick
    pub jump: bool,
}

/// Advance the race by one fixed timestep
///
/// Does nothing once the race has finished.
pub fn tick(state: &mut RaceState, input: &TickInput, dt: f32) -> Result<(), RaceError> {
    if state.is_finished() {
        return Ok(());
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    let hurdle_xs = state.hurdle_positions()?;
    for competitor in &mut state.competitors {
        let body = state.world.body_mut(competitor.body)?;
        if competitor.update(body, input, &hurdle_xs) {
            state.events.push(RaceEvent::Jumped {
                character: competitor.character,
            });
        }
    }

    let report = state.world.step(dt);

    for contact in &report.contacts {
        let (Some(hurdle), Some(runner)) = (
            state.hurdles.iter().find(|h| h.body == contact.a),
            state.competitors.iter_mut().find(|c| c.body == contact.b),
        ) else {
            continue;
        };
        let runner_x = state.world.body(runner.body)?.pos.x;
        let body = state.world.body_mut(hurdle.body)?;
        // Only running into a hurdle costs pace, not landing on one
        if contact.axis == Axis::Horizontal && runner_x < body.pos.x {
            runner.stumble();
        }
        let knockback = state.resolver.strike(body, contact.touching_from_above);
        log::debug!(
            "{} struck hurdle {} ({:?}): vx={:.0} vy={:?}",
            runner.character.as_str(),
            hurdle.index,
            contact.axis,
            knockback.vx,
            knockback.vy
        );
        state.events.push(RaceEvent::HurdleStruck {
            hurdle: hurdle.index,
            character: runner.character,
            knockback,
        });
    }

    for hit in report.bounds_hits.iter().filter(|h| h.side == Side::Right) {
        if state.competitor_by_body(hit.body).is_none() {
            continue;
        }
        let standings = state.standings()?;
        if let Some(result) = state.detector.on_world_bounds(standings, state.elapsed)? {
            state.result = Some(result.clone());
            state.events.push(RaceEvent::Finished(result));
        }
    }

    Ok(())
}
