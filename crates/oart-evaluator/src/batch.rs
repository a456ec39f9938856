//! Parallel scoring of many passes.
//!
//! Passes are split into contiguous chunks, each scored on a scoped worker thread. Results
//! are written back in input order, so the output is identical to scoring sequentially.

use std::{num::NonZeroUsize, thread};

use oart_core::{MissingFieldError, PassEvent, PlayerId};
use serde::{Deserialize, Serialize};

use crate::event_evaluator::{OartResult, OartScorer};

/// Number of workers used when the caller does not choose one.
#[must_use]
pub fn default_workers() -> NonZeroUsize {
    thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

/// Scores every pass, returning one result per pass in input order.
pub fn score_batch(
    scorer: &OartScorer<'_>,
    passes: &[PassEvent],
    workers: NonZeroUsize,
) -> Vec<Result<OartResult, MissingFieldError>> {
    let chunk_size = passes.len().div_ceil(workers.get()).max(1);
    let mut slots = vec![None; passes.len()];

    thread::scope(|s| {
        for (passes, slots) in passes.chunks(chunk_size).zip(slots.chunks_mut(chunk_size)) {
            s.spawn(move || {
                for (pass, slot) in passes.iter().zip(slots) {
                    *slot = Some(scorer.score(pass));
                }
            });
        }
    });

    slots.into_iter().flatten().collect()
}

/// A scored pass, as written by the `score` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPass {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    pub player: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_distance: Option<f64>,
    #[serde(flatten)]
    pub result: OartResult,
}

impl ScoredPass {
    #[must_use]
    pub fn new(pass: &PassEvent, result: OartResult) -> Self {
        let pass_distance = pass
            .location
            .zip(pass.pass_end_location)
            .map(|(start, end)| start.distance_to(end));
        Self {
            event_id: pass.id.clone(),
            player: pass.player.clone(),
            pass_distance,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use oart_core::{Location, PlayerObservation};
    use oart_features::{FeatureId, FeatureVector};

    use super::*;
    use crate::oracle::FnOracle;

    fn passes() -> Vec<PassEvent> {
        (0..23)
            .map(|i| {
                let passer = Location::new(30.0 + f64::from(i), 40.0);
                let receiver = Location::new(50.0 + f64::from(i % 7) * 5.0, 30.0);
                let mut pass = PassEvent::new(format!("p{}", i % 4), passer, receiver)
                    .with_id(format!("e{i}"));
                if i % 5 != 0 {
                    pass = pass.with_freeze_frame(vec![
                        PlayerObservation::actor(passer),
                        PlayerObservation::teammate(Location::new(55.0, 40.0)),
                        PlayerObservation::teammate(Location::new(65.0, 20.0)),
                        PlayerObservation::teammate(receiver),
                        PlayerObservation::opponent(Location::new(60.0, 35.0)),
                    ]);
                }
                if i == 11 {
                    pass.location = None;
                }
                pass
            })
            .collect()
    }

    #[test]
    fn test_batch_matches_sequential_order() {
        let oracle =
            FnOracle::new(|f: &FeatureVector| 1.0 / (1.0 + f.value(FeatureId::PassDistance)));
        let scorer = OartScorer::new(Box::new(oracle));
        let passes = passes();

        let sequential = passes.iter().map(|p| scorer.score(p)).collect::<Vec<_>>();
        for workers in [1, 3, 8, 64] {
            let batch = score_batch(&scorer, &passes, NonZeroUsize::new(workers).unwrap());
            assert_eq!(batch, sequential);
        }
        assert!(sequential[11].is_err());
        assert!(sequential[0].as_ref().unwrap().is_undefined());
    }

    #[test]
    fn test_empty_batch() {
        let scorer = OartScorer::new(Box::new(FnOracle::new(|_: &FeatureVector| 0.5)));
        assert!(score_batch(&scorer, &[], default_workers()).is_empty());
    }

    #[test]
    fn test_scored_pass_row() {
        let pass = PassEvent::new("a", Location::new(0.0, 0.0), Location::new(3.0, 4.0))
            .with_id("e1");
        let result = OartScorer::new(Box::new(FnOracle::new(|_: &FeatureVector| 0.5)))
            .score(&pass)
            .unwrap();
        let row = ScoredPass::new(&pass, result);
        assert_eq!(row.pass_distance, Some(5.0));

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["event_id"], "e1");
        assert_eq!(json["player"], "a");
        assert_eq!(json["status"], "undefined");
        assert_eq!(json["reason"], "missing_freeze_frame");
    }
}
