//! Finish detection and ranking
//!
//! The race ends the first time any runner reaches the right edge of the
//! world. Everyone is ranked by where they stand at that moment, including
//! runners still far from the line.

use serde::{Deserialize, Serialize};

use super::competitor::CharacterId;
use crate::consts::*;
use crate::error::RaceError;

/// A competitor's position when the race ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub character: CharacterId,
    pub x: f32,
}

/// Final ranking, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub standings: Vec<Standing>,
    /// Race clock when the finish fired (seconds)
    pub elapsed: f32,
}

impl RaceResult {
    pub fn first(&self) -> CharacterId {
        self.standings[0].character
    }

    pub fn second(&self) -> CharacterId {
        self.standings[1].character
    }

    pub fn third(&self) -> CharacterId {
        self.standings[2].character
    }

    /// 1-based place of a character, if it raced
    pub fn place_of(&self, character: CharacterId) -> Option<usize> {
        self.standings
            .iter()
            .position(|s| s.character == character)
            .map(|i| i + 1)
    }

    /// Payload for the results display
    pub fn payload(&self) -> ResultsPayload {
        ResultsPayload {
            name: EVENT_NAME.to_string(),
            first: self.first(),
            second: self.second(),
            third: self.third(),
        }
    }
}

/// Scene data handed to the results display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsPayload {
    pub name: String,
    pub first: CharacterId,
    pub second: CharacterId,
    pub third: CharacterId,
}

/// Sort standings furthest first
///
/// The sort is stable, so competitors on exactly the same x keep their
/// insertion order.
pub fn rank(mut standings: Vec<Standing>, elapsed: f32) -> Result<RaceResult, RaceError> {
    if standings.len() < MIN_COMPETITORS {
        return Err(RaceError::NotEnoughCompetitors {
            found: standings.len(),
        });
    }
    standings.sort_by(|a, b| b.x.total_cmp(&a.x));
    Ok(RaceResult { standings, elapsed })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FinishState {
    #[default]
    Racing,
    Finished,
}

/// One-shot finish line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinishDetector {
    state: FinishState,
    /// Boundary events seen after the finish fired
    suppressed: u32,
}

impl FinishDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FinishState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == FinishState::Finished
    }

    pub fn suppressed(&self) -> u32 {
        self.suppressed
    }

    /// Handle a finish-line crossing
    ///
    /// Ranks `standings` and returns the result the first time; later calls
    /// return `Ok(None)`. The detector stays in `Racing` if ranking fails.
    pub fn on_world_bounds(
        &mut self,
        standings: Vec<Standing>,
        elapsed: f32,
    ) -> Result<Option<RaceResult>, RaceError> {
        if self.is_finished() {
            self.suppressed += 1;
            log::debug!("finish already recorded, ignoring boundary event #{}", self.suppressed);
            return Ok(None);
        }

        let result = rank(standings, elapsed)?;
        self.state = FinishState::Finished;
        log::info!(
            "Race finished after {:.2}s: 1st {} 2nd {} 3rd {}",
            elapsed,
            result.first().as_str(),
            result.second().as_str(),
            result.third().as_str()
        );
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use crate::sim::competitor::CharacterId::*;

    fn standings(entries: &[(CharacterId, f32)]) -> Vec<Standing> {
        entries
            .iter()
            .map(|&(character, x)| Standing { character, x })
            .collect()
    }

    #[test]
    fn test_rank_with_tie_keeps_insertion_order() {
        let snapshot = standings(&[
            (VirtualGuy, 120.0),
            (MaskDude, 340.0),
            (NinjaFrog, 340.0),
            (PinkMan, 90.0),
        ]);

        for _ in 0..10 {
            let result = rank(snapshot.clone(), 0.0).unwrap();
            assert_eq!(result.first(), MaskDude);
            assert_eq!(result.second(), NinjaFrog);
            assert_eq!(result.third(), VirtualGuy);
            assert_eq!(result.standings[3].character, PinkMan);
        }
    }

    #[test]
    fn test_rank_needs_three() {
        let snapshot = standings(&[(VirtualGuy, 10.0), (MaskDude, 20.0)]);
        assert_eq!(
            rank(snapshot, 0.0),
            Err(RaceError::NotEnoughCompetitors { found: 2 })
        );
    }

    #[test]
    fn test_detector_fires_once() {
        let mut detector = FinishDetector::new();
        let snapshot = standings(&[(VirtualGuy, 2740.0), (MaskDude, 2700.0), (PinkMan, 10.0)]);

        let first = detector.on_world_bounds(snapshot.clone(), 17.0).unwrap();
        assert!(first.is_some());
        assert_eq!(detector.state(), FinishState::Finished);

        for _ in 0..5 {
            assert_eq!(detector.on_world_bounds(snapshot.clone(), 18.0).unwrap(), None);
        }
        assert_eq!(detector.suppressed(), 5);
        assert!(detector.is_finished());
    }

    #[test]
    fn test_detector_stays_racing_on_bad_roster() {
        let mut detector = FinishDetector::new();
        let result = detector.on_world_bounds(standings(&[(VirtualGuy, 1.0)]), 0.0);
        assert!(result.is_err());
        assert_eq!(detector.state(), FinishState::Racing);
    }

    #[test]
    fn test_payload_and_places() {
        let result = rank(
            standings(&[(PinkMan, 5.0), (NinjaFrog, 50.0), (MaskDude, 25.0)]),
            3.5,
        )
        .unwrap();
        let payload = result.payload();
        assert_eq!(payload.name, "HURDLES");
        assert_eq!(payload.first, NinjaFrog);
        assert_eq!(payload.second, MaskDude);
        assert_eq!(payload.third, PinkMan);
        assert_eq!(result.place_of(PinkMan), Some(3));
        assert_eq!(result.place_of(VirtualGuy), None);

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"first\":\"ninja-frog\""));
    }

    proptest! {
        #[test]
        fn prop_rank_is_descending_permutation(xs in prop::collection::vec(-100.0f32..3000.0, 4)) {
            let snapshot: Vec<Standing> = CharacterId::ALL
                .iter()
                .zip(&xs)
                .map(|(&character, &x)| Standing { character, x })
                .collect();
            let result = rank(snapshot.clone(), 0.0).unwrap();

            prop_assert_eq!(result.standings.len(), snapshot.len());
            prop_assert!(result.standings.windows(2).all(|w| w[0].x >= w[1].x));
            for s in &snapshot {
                prop_assert!(result.standings.contains(s));
            }
        }
    }
}
