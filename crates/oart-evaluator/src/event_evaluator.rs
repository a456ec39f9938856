//! Event evaluation: scoring one pass against every option the passer had.
//!
//! This module implements the first level of the evaluator architecture: given a single
//! pass with its freeze-frame, ask the oracle how likely each available pass option was to
//! succeed and place the chosen pass within that distribution.
//!
//! # How It Works
//!
//! 1. **Enumerate Options** - Every teammate in the freeze-frame except the passer
//! 2. **Score Each Option** - Extract features for (passer, option) and query the oracle
//! 3. **Score the Choice** - Extract features for (passer, actual receiver) and query the oracle
//! 4. **Rank** - Count options strictly safer than, and equally safe as, the chosen pass
//!
//! # OART
//!
//! ```text
//! OART = (better_alternatives + 0.5 · tied_alternatives) / option_set_size
//! ```
//!
//! `0.0` means no option was safer than the pass actually played; `1.0` means every option
//! was strictly safer. Ties count half, so OART is invariant to the order options appear
//! in the freeze-frame.
//!
//! # Undefined Scores
//!
//! OART is undefined, not zero, when the pass cannot be compared to alternatives:
//!
//! - [`UndefinedReason::MissingFreezeFrame`] - No freeze-frame, or an empty one
//! - [`UndefinedReason::InsufficientOptions`] - Fewer than [`MIN_OPTIONS`] teammates visible
//!
//! Missing passer or receiver locations are data errors and are reported as
//! [`MissingFieldError`] instead.
//!
//! # Usage
//!
//! ```
//! use oart_core::{Location, PassEvent, PlayerObservation};
//! use oart_evaluator::{event_evaluator::OartScorer, oracle::FnOracle};
//! use oart_features::{FeatureId, FeatureVector};
//!
//! let oracle = FnOracle::new(|f: &FeatureVector| 1.0 / (1.0 + f.value(FeatureId::PassDistance)));
//! let scorer = OartScorer::new(Box::new(oracle));
//!
//! let passer = Location::new(60.0, 40.0);
//! let pass = PassEvent::new("a", passer, Location::new(75.0, 45.0)).with_freeze_frame(vec![
//!     PlayerObservation::actor(passer),
//!     PlayerObservation::teammate(Location::new(70.0, 40.0)),
//!     PlayerObservation::teammate(Location::new(65.0, 30.0)),
//!     PlayerObservation::teammate(Location::new(75.0, 45.0)),
//! ]);
//!
//! let result = scorer.score(&pass).unwrap();
//! assert!((result.oart().unwrap() - 2.5 / 3.0).abs() < 1e-12);
//! ```

use oart_core::{MissingFieldError, PassEvent, event};
use oart_features::extract_all_features;
use serde::{Deserialize, Serialize};

use crate::oracle::SuccessProbabilityOracle;

/// Minimum number of pass options for OART to be defined.
pub const MIN_OPTIONS: usize = 2;

/// Why OART could not be computed for a pass.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    #[display("missing freeze-frame")]
    MissingFreezeFrame,
    #[display("fewer than two pass options")]
    InsufficientOptions,
}

/// A defined OART score with its diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OartScore {
    /// In \[0.0, 1.0\].
    pub oart: f64,
    pub option_set_size: usize,
    /// Oracle probability of the pass actually played.
    pub chosen_prob: f64,
    pub max_prob: f64,
    pub mean_prob: f64,
    /// 1-based rank of the chosen pass among options and itself, highest probability first.
    pub prob_rank: usize,
    /// Options strictly safer than the chosen pass.
    pub better_alternatives: usize,
    /// Options exactly as safe as the chosen pass.
    pub tied_alternatives: usize,
}

impl OartScore {
    /// Places `chosen_prob` within the option probabilities.
    ///
    /// Returns `None` if there are no options.
    #[must_use]
    #[expect(clippy::cast_precision_loss, clippy::float_cmp)]
    pub fn from_probabilities(option_probs: &[f64], chosen_prob: f64) -> Option<Self> {
        let mean_prob = oart_stats::descriptive::mean(option_probs)?;
        let max_prob = option_probs
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        let better_alternatives = option_probs.iter().filter(|&&p| p > chosen_prob).count();
        let tied_alternatives = option_probs.iter().filter(|&&p| p == chosen_prob).count();
        let option_set_size = option_probs.len();
        let oart = (better_alternatives as f64 + 0.5 * tied_alternatives as f64)
            / option_set_size as f64;

        let mut ranked = option_probs.to_vec();
        ranked.push(chosen_prob);
        ranked.sort_by(|a, b| b.total_cmp(a));
        let prob_rank = ranked
            .iter()
            .position(|&p| p == chosen_prob)
            .map_or(ranked.len(), |i| i + 1);

        Some(Self {
            oart,
            option_set_size,
            chosen_prob,
            max_prob,
            mean_prob,
            prob_rank,
            better_alternatives,
            tied_alternatives,
        })
    }
}

/// OART could not be computed for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndefinedOart {
    pub reason: UndefinedReason,
    /// Number of options seen, when a freeze-frame was available.
    pub option_set_size: Option<usize>,
}

/// Outcome of scoring one pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OartResult {
    Defined(OartScore),
    Undefined(UndefinedOart),
}

impl OartResult {
    #[must_use]
    pub fn oart(&self) -> Option<f64> {
        self.score().map(|s| s.oart)
    }

    #[must_use]
    pub fn score(&self) -> Option<&OartScore> {
        match self {
            Self::Defined(score) => Some(score),
            Self::Undefined(_) => None,
        }
    }

    #[must_use]
    pub fn undefined_reason(&self) -> Option<UndefinedReason> {
        match self {
            Self::Defined(_) => None,
            Self::Undefined(undefined) => Some(undefined.reason),
        }
    }

    #[must_use]
    pub fn option_set_size(&self) -> Option<usize> {
        match self {
            Self::Defined(score) => Some(score.option_set_size),
            Self::Undefined(undefined) => undefined.option_set_size,
        }
    }
}

/// Scores passes against their alternatives using a success-probability oracle.
///
/// The scorer holds no mutable state; share one instance across threads.
#[derive(Debug)]
pub struct OartScorer<'a> {
    oracle: Box<dyn SuccessProbabilityOracle + 'a>,
}

impl<'a> OartScorer<'a> {
    #[must_use]
    pub fn new(oracle: Box<dyn SuccessProbabilityOracle + 'a>) -> Self {
        Self { oracle }
    }

    #[must_use]
    pub fn oracle(&self) -> &dyn SuccessProbabilityOracle {
        self.oracle.as_ref()
    }

    /// Computes OART for one pass.
    ///
    /// The freeze-frame and option-set checks come first, so a pass without a usable
    /// freeze-frame is reported as undefined even if its locations are also missing.
    pub fn score(&self, pass: &PassEvent) -> Result<OartResult, MissingFieldError> {
        let Some(frame) = pass.populated_freeze_frame() else {
            tracing::debug!(
                pass = ?pass.id,
                reason = %UndefinedReason::MissingFreezeFrame,
                "OART undefined"
            );
            return Ok(OartResult::Undefined(UndefinedOart {
                reason: UndefinedReason::MissingFreezeFrame,
                option_set_size: None,
            }));
        };

        let options = event::options(frame)
            .map(|p| p.location)
            .collect::<Vec<_>>();
        if options.len() < MIN_OPTIONS {
            tracing::debug!(
                pass = ?pass.id,
                reason = %UndefinedReason::InsufficientOptions,
                options = options.len(),
                "OART undefined"
            );
            return Ok(OartResult::Undefined(UndefinedOart {
                reason: UndefinedReason::InsufficientOptions,
                option_set_size: Some(options.len()),
            }));
        }

        let passer = pass.passer_location()?;
        let receiver = pass.receiver_location()?;
        let context = pass.context();
        let predict = |target| {
            let features = extract_all_features(passer, target, Some(frame), &context);
            self.oracle.predict(&features)
        };

        let option_probs = options.iter().map(|&loc| predict(loc)).collect::<Vec<_>>();
        let chosen_prob = predict(receiver);

        match OartScore::from_probabilities(&option_probs, chosen_prob) {
            Some(score) => Ok(OartResult::Defined(score)),
            None => Ok(OartResult::Undefined(UndefinedOart {
                reason: UndefinedReason::InsufficientOptions,
                option_set_size: Some(0),
            })),
        }
    }
}
