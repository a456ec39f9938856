//! Split-half reliability of per-player OART means.
//!
//! A metric that describes a stable player trait should give similar values on two disjoint
//! samples of the same player's passes. For each iteration this crate:
//!
//! 1. Shuffles every qualifying player's OART values with a generator seeded by the
//!    iteration index
//! 2. Splits them into a first half of `⌊n/2⌋` values and the remainder
//! 3. Correlates the half means across players (Pearson)
//!
//! The mean correlation over iterations estimates how much of the between-player variance
//! is signal rather than sampling noise.
//!
//! # Reproducibility
//!
//! Shuffles use [`Pcg32`] seeded with the iteration index, so results are identical across
//! runs and independent of the number of worker threads.
//!
//! ```
//! use oart_core::PlayerId;
//! use oart_reliability::{EventScore, ReliabilityParams, split_half_reliability};
//!
//! let table = (0..3)
//!     .flat_map(|p| (0..4).map(move |_| EventScore::new(PlayerId::new(format!("p{p}")), 0.5)))
//!     .collect::<Vec<_>>();
//! let summary = split_half_reliability(&table, &ReliabilityParams::default());
//! // not enough players to correlate
//! assert_eq!(summary.mean, None);
//! assert!(summary.correlations.is_empty());
//! ```

use std::{collections::BTreeMap, num::NonZeroUsize, thread};

use oart_core::PlayerId;
use oart_evaluator::{batch::ScoredPass, player_aggregator::DEFAULT_MIN_EVENTS};
use oart_stats::{correlation, descriptive};
use rand::{SeedableRng as _, seq::SliceRandom};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Default number of shuffle iterations.
pub const DEFAULT_ITERATIONS: usize = 100;

/// Default number of players that must be exceeded before a correlation is computed.
pub const DEFAULT_MIN_PLAYERS: usize = 10;

/// One defined OART score of a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventScore {
    pub player: PlayerId,
    pub oart: f64,
}

impl EventScore {
    #[must_use]
    pub fn new(player: PlayerId, oart: f64) -> Self {
        Self { player, oart }
    }

    /// Builds the score table from scored passes, dropping undefined results.
    #[must_use]
    pub fn from_scored(scored: &[ScoredPass]) -> Vec<Self> {
        scored
            .iter()
            .filter_map(|row| Some(Self::new(row.player.clone(), row.result.oart()?)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliabilityParams {
    /// Minimum scores for a player to take part.
    pub min_events: usize,
    pub n_iterations: usize,
    /// A correlation is computed only when more than this many players take part.
    pub min_players: usize,
}

impl Default for ReliabilityParams {
    fn default() -> Self {
        Self {
            min_events: DEFAULT_MIN_EVENTS,
            n_iterations: DEFAULT_ITERATIONS,
            min_players: DEFAULT_MIN_PLAYERS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilitySummary {
    /// Mean of the recorded correlations.
    pub mean: Option<f64>,
    /// Population standard deviation of the recorded correlations.
    pub std_dev: Option<f64>,
    /// Number of players with at least `min_events` scores.
    pub n_players: usize,
    /// Recorded correlations in iteration order. Degenerate iterations are absent.
    pub correlations: Vec<f64>,
}

/// Estimates split-half reliability using all available cores.
#[must_use]
pub fn split_half_reliability(
    table: &[EventScore],
    params: &ReliabilityParams,
) -> ReliabilitySummary {
    let workers = thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
    split_half_reliability_with_workers(table, params, workers)
}

/// Estimates split-half reliability with iterations spread over `workers` threads.
#[must_use]
pub fn split_half_reliability_with_workers(
    table: &[EventScore],
    params: &ReliabilityParams,
    workers: NonZeroUsize,
) -> ReliabilitySummary {
    let mut groups = BTreeMap::<&PlayerId, Vec<f64>>::new();
    for row in table {
        groups.entry(&row.player).or_default().push(row.oart);
    }
    let groups = groups
        .into_values()
        .filter(|scores| scores.len() >= params.min_events)
        .collect::<Vec<_>>();
    tracing::info!(
        players = groups.len(),
        iterations = params.n_iterations,
        "estimating split-half reliability"
    );

    let mut slots = vec![None; params.n_iterations];
    let chunk_size = params.n_iterations.div_ceil(workers.get()).max(1);
    thread::scope(|s| {
        for (chunk_index, slots) in slots.chunks_mut(chunk_size).enumerate() {
            let groups = &groups;
            s.spawn(move || {
                for (offset, slot) in slots.iter_mut().enumerate() {
                    let iteration = chunk_index * chunk_size + offset;
                    *slot = split_half_correlation(groups, iteration, params.min_players);
                }
            });
        }
    });

    let correlations = slots.into_iter().flatten().collect::<Vec<_>>();
    let summary = ReliabilitySummary {
        mean: descriptive::mean(&correlations),
        std_dev: descriptive::population_std_dev(&correlations),
        n_players: groups.len(),
        correlations,
    };
    tracing::info!(
        recorded = summary.correlations.len(),
        mean = ?summary.mean,
        "split-half reliability done"
    );
    summary
}

fn split_half_correlation(
    groups: &[Vec<f64>],
    iteration: usize,
    min_players: usize,
) -> Option<f64> {
    let mut first_means = Vec::with_capacity(groups.len());
    let mut second_means = Vec::with_capacity(groups.len());
    let mut shuffled = vec![];
    for scores in groups {
        shuffled.clone_from(scores);
        let mut rng = Pcg32::seed_from_u64(iteration as u64);
        shuffled.shuffle(&mut rng);
        let (first, second) = shuffled.split_at(shuffled.len() / 2);
        if let (Some(a), Some(b)) = (descriptive::mean(first), descriptive::mean(second)) {
            first_means.push(a);
            second_means.push(b);
        }
    }

    if first_means.len() <= min_players {
        tracing::debug!(
            iteration,
            players = first_means.len(),
            "too few players to correlate"
        );
        return None;
    }
    let r = correlation::pearson(&first_means, &second_means);
    if r.is_none() {
        tracing::debug!(iteration, "degenerate correlation");
    }
    r
}
