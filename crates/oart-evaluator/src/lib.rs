//! Evaluator system for scoring the risk of pass decisions.
//!
//! This crate implements a two-level evaluation architecture:
//!
//! 1. **Event Evaluation** ([`event_evaluator`]) - Scores a single pass by asking the oracle
//!    how likely every available option was to succeed, then ranking the chosen pass among
//!    them (OART, Opportunity-Adjusted Risk Taking).
//!
//! 2. **Player Aggregation** ([`player_aggregator`]) - Reduces a player's defined OART scores
//!    to a mean tendency with a minimum sample size.
//!
//! # Architecture
//!
//! ```text
//! Player Aggregation (mean OART per player)
//!     ↓ uses
//! Event Evaluation (OART per pass)
//!     ↓ uses
//! Success-Probability Oracle (p(success) per option)
//!     ↓ uses
//! Geometry Features (19 features per passer/option pair)
//! ```
//!
//! # Supporting Modules
//!
//! - [`oracle`] - The [`SuccessProbabilityOracle`](oracle::SuccessProbabilityOracle) trait,
//!   a logistic-regression implementation loaded from a JSON artifact, and a closure adapter
//! - [`batch`] - Order-preserving parallel scoring on scoped threads
//! - [`risk_profile`] - Risk bands and two-player comparison
//!
//! # Design Principles
//!
//! ## Opportunity, Not Outcome
//!
//! A long pass is not risky by itself. OART compares the pass actually played to the passes
//! that were available at the same instant, so the score measures the decision rather than
//! the situation.
//!
//! ## Undefined Is Not Zero
//!
//! A pass without a freeze-frame or with a single visible teammate has no meaningful OART.
//! Such passes produce [`OartResult::Undefined`](event_evaluator::OartResult::Undefined) and
//! are excluded from aggregates, instead of being scored as risk-free.
//!
//! # Example: Scoring a Player
//!
//! ```rust,no_run
//! use oart_evaluator::{
//!     event_evaluator::OartScorer,
//!     oracle::OracleBuilder,
//!     player_aggregator::{self, DEFAULT_MIN_EVENTS},
//! };
//! # let passes: Vec<oart_core::PassEvent> = vec![];
//!
//! let oracle = OracleBuilder::new().model_path("model.json").build()?;
//! let scorer = OartScorer::new(Box::new(oracle));
//! let aggregates = player_aggregator::aggregate_by_player(&scorer, &passes, DEFAULT_MIN_EVENTS)?;
//! for aggregate in &aggregates {
//!     println!("{}: {:?}", aggregate.player, aggregate.mean());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod batch;
pub mod event_evaluator;
pub mod oracle;
pub mod player_aggregator;
pub mod risk_profile;
