//! Player aggregation: reducing per-pass OART scores to a per-player tendency.
//!
//! This module implements the second level of the evaluator architecture. A player's risk
//! tendency is the mean of their defined OART scores, reported with the population standard
//! deviation.
//!
//! # Sample Size
//!
//! Means over a handful of passes are dominated by noise. Players with fewer than
//! `min_events` defined scores (default [`DEFAULT_MIN_EVENTS`]) get
//! [`AggregateStatus::Insufficient`] instead of a mean. Undefined per-pass results never
//! count toward the sample.
//!
//! ```
//! use oart_core::PlayerId;
//! use oart_evaluator::player_aggregator::aggregate_scores;
//!
//! let agg = aggregate_scores(PlayerId::new("a"), [0.2, 0.4, 0.6], 3);
//! assert!(agg.is_valid());
//! assert!((agg.mean().unwrap() - 0.4).abs() < 1e-12);
//!
//! let small = aggregate_scores(PlayerId::new("b"), [0.2, 0.4], 3);
//! assert!(!small.is_valid());
//! assert_eq!(small.n_events, 2);
//! ```

use std::collections::BTreeMap;

use oart_core::{MissingFieldError, PassEvent, PlayerId};
use serde::{Deserialize, Serialize};

use crate::{batch::ScoredPass, event_evaluator::OartScorer};

/// Minimum number of defined OART scores for a valid player aggregate.
pub const DEFAULT_MIN_EVENTS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AggregateStatus {
    Valid { mean: f64, std_dev: f64 },
    Insufficient { min_events: usize },
}

/// A player's OART tendency over a set of passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAggregate {
    pub player: PlayerId,
    /// Number of defined OART scores.
    pub n_events: usize,
    #[serde(flatten)]
    pub status: AggregateStatus,
}

impl PlayerAggregate {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        match self.status {
            AggregateStatus::Valid { mean, .. } => Some(mean),
            AggregateStatus::Insufficient { .. } => None,
        }
    }

    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        match self.status {
            AggregateStatus::Valid { std_dev, .. } => Some(std_dev),
            AggregateStatus::Insufficient { .. } => None,
        }
    }
}

/// Aggregates already-computed OART values of one player.
#[must_use]
pub fn aggregate_scores<I>(player: PlayerId, scores: I, min_events: usize) -> PlayerAggregate
where
    I: IntoIterator<Item = f64>,
{
    let scores = scores.into_iter().collect::<Vec<_>>();
    let n_events = scores.len();
    let status = match (
        oart_stats::descriptive::mean(&scores),
        oart_stats::descriptive::population_std_dev(&scores),
    ) {
        (Some(mean), Some(std_dev)) if n_events >= min_events => {
            AggregateStatus::Valid { mean, std_dev }
        }
        _ => {
            tracing::debug!(%player, n_events, min_events, "too few scored passes");
            AggregateStatus::Insufficient { min_events }
        }
    };
    PlayerAggregate {
        player,
        n_events,
        status,
    }
}

/// Scores `passes` and aggregates the defined results under `player`.
pub fn aggregate<'e, I>(
    scorer: &OartScorer<'_>,
    player: PlayerId,
    passes: I,
    min_events: usize,
) -> Result<PlayerAggregate, MissingFieldError>
where
    I: IntoIterator<Item = &'e PassEvent>,
{
    let mut scores = vec![];
    for pass in passes {
        if let Some(oart) = scorer.score(pass)?.oart() {
            scores.push(oart);
        }
    }
    Ok(aggregate_scores(player, scores, min_events))
}

/// Groups passes by player and aggregates each group, sorted by player id.
pub fn aggregate_by_player(
    scorer: &OartScorer<'_>,
    passes: &[PassEvent],
    min_events: usize,
) -> Result<Vec<PlayerAggregate>, MissingFieldError> {
    let mut groups = BTreeMap::<&PlayerId, Vec<&PassEvent>>::new();
    for pass in passes {
        groups.entry(&pass.player).or_default().push(pass);
    }
    groups
        .into_iter()
        .map(|(player, passes)| aggregate(scorer, player.clone(), passes, min_events))
        .collect()
}

/// Aggregates the defined results of already-scored passes, sorted by player id.
#[must_use]
pub fn aggregate_scored(scored: &[ScoredPass], min_events: usize) -> Vec<PlayerAggregate> {
    let mut groups = BTreeMap::<&PlayerId, Vec<f64>>::new();
    for row in scored {
        let scores = groups.entry(&row.player).or_default();
        if let Some(oart) = row.result.oart() {
            scores.push(oart);
        }
    }
    groups
        .into_iter()
        .map(|(player, scores)| aggregate_scores(player.clone(), scores, min_events))
        .collect()
}

#[cfg(test)]
mod tests {
    use oart_core::{Location, PassField, PlayerObservation};
    use oart_features::{FeatureId, FeatureVector};

    use super::*;
    use crate::oracle::FnOracle;

    fn tied_pass(player: &str) -> PassEvent {
        let passer = Location::new(60.0, 40.0);
        PassEvent::new(player, passer, Location::new(70.0, 40.0)).with_freeze_frame(vec![
            PlayerObservation::actor(passer),
            PlayerObservation::teammate(Location::new(70.0, 40.0)),
            PlayerObservation::teammate(Location::new(65.0, 30.0)),
        ])
    }

    fn pass_to(player: &str, receiver: Location) -> PassEvent {
        let passer = Location::new(60.0, 40.0);
        PassEvent::new(player, passer, receiver).with_freeze_frame(vec![
            PlayerObservation::actor(passer),
            PlayerObservation::teammate(Location::new(65.0, 40.0)),
            PlayerObservation::teammate(Location::new(70.0, 40.0)),
            PlayerObservation::teammate(Location::new(80.0, 40.0)),
        ])
    }

    #[test]
    fn test_aggregate_thirty_mixed_passes() {
        // shorter passes are safer: the three options score 1/6, 1/2 and 5/6
        let scorer = OartScorer::new(Box::new(FnOracle::new(|f: &FeatureVector| {
            1.0 / (1.0 + f.value(FeatureId::PassDistance))
        })));
        let passes = [
            (Location::new(65.0, 40.0), 12),
            (Location::new(70.0, 40.0), 10),
            (Location::new(80.0, 40.0), 8),
        ]
        .into_iter()
        .flat_map(|(receiver, n)| vec![pass_to("a", receiver); n])
        .collect::<Vec<_>>();
        assert_eq!(passes.len(), 30);

        let agg = aggregate(&scorer, PlayerId::new("a"), &passes, DEFAULT_MIN_EVENTS).unwrap();
        assert!(agg.is_valid());
        assert_eq!(agg.n_events, 30);
        assert!((agg.mean().unwrap() - 41.0 / 90.0).abs() < 1e-12);
        assert!((agg.std_dev().unwrap() - 146.0_f64.sqrt() / 45.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_mean_and_population_std() {
        let scores = [0.1, 0.3, 0.5, 0.7, 0.9];
        let agg = aggregate_scores(PlayerId::new("a"), scores, 5);
        assert_eq!(agg.n_events, 5);
        assert!((agg.mean().unwrap() - 0.5).abs() < 1e-12);
        assert!((agg.std_dev().unwrap() - 0.08_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_insufficient_below_threshold() {
        let agg = aggregate_scores(PlayerId::new("a"), vec![0.5; 24], DEFAULT_MIN_EVENTS);
        assert_eq!(agg.status, AggregateStatus::Insufficient { min_events: 25 });
        assert_eq!(agg.mean(), None);

        let agg = aggregate_scores(PlayerId::new("a"), vec![0.5; 25], DEFAULT_MIN_EVENTS);
        assert_eq!(
            agg.status,
            AggregateStatus::Valid {
                mean: 0.5,
                std_dev: 0.0
            }
        );
    }

    #[test]
    fn test_no_scores_is_insufficient_even_without_threshold() {
        let agg = aggregate_scores(PlayerId::new("a"), [], 0);
        assert!(agg.status.is_insufficient());
        assert_eq!(agg.n_events, 0);
    }

    #[test]
    fn test_aggregate_skips_undefined() {
        let scorer = OartScorer::new(Box::new(FnOracle::new(|_: &FeatureVector| 0.8)));
        let mut passes = vec![tied_pass("a"); 3];
        passes.push(PassEvent::new(
            "a",
            Location::new(0.0, 0.0),
            Location::new(1.0, 1.0),
        ));
        let agg = aggregate(&scorer, PlayerId::new("a"), &passes, 3).unwrap();
        assert_eq!(agg.n_events, 3);
        assert_eq!(agg.mean(), Some(0.5));
    }

    #[test]
    fn test_aggregate_propagates_missing_fields() {
        let scorer = OartScorer::new(Box::new(FnOracle::new(|_: &FeatureVector| 0.8)));
        let mut pass = tied_pass("a");
        pass.location = None;
        assert_eq!(
            aggregate(&scorer, PlayerId::new("a"), [&pass], 1),
            Err(MissingFieldError {
                field: PassField::Location
            })
        );
    }

    #[test]
    fn test_aggregate_by_player_sorted() {
        let scorer = OartScorer::new(Box::new(FnOracle::new(|_: &FeatureVector| 0.8)));
        let passes = vec![tied_pass("b"), tied_pass("a"), tied_pass("b")];
        let aggs = aggregate_by_player(&scorer, &passes, 2).unwrap();
        let players = aggs.iter().map(|a| a.player.as_str()).collect::<Vec<_>>();
        assert_eq!(players, ["a", "b"]);
        assert!(!aggs[0].is_valid());
        assert!(aggs[1].is_valid());

        let scored = passes
            .iter()
            .map(|p| ScoredPass::new(p, scorer.score(p).unwrap()))
            .collect::<Vec<_>>();
        assert_eq!(aggregate_scored(&scored, 2), aggs);
    }

    #[test]
    fn test_aggregate_serialization() {
        let agg = aggregate_scores(PlayerId::new("a"), [0.25, 0.75], 2);
        let json = serde_json::to_value(&agg).unwrap();
        assert_eq!(json["player"], "a");
        assert_eq!(json["status"], "valid");
        assert_eq!(json["mean"], 0.5);
        assert_eq!(json["n_events"], 2);
    }
}
