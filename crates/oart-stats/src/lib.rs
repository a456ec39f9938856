//! Statistical utilities for OART scoring.
//!
//! - **Descriptive statistics**: mean and population standard deviation
//! - **Correlation**: Pearson product-moment correlation with explicit degenerate cases
//!
//! # Modules
//!
//! - [`descriptive`]: Summaries of a single sample
//! - [`correlation`]: Correlation between paired samples
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use oart_stats::descriptive::{mean, population_std_dev};
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(mean(&values), Some(3.0));
//! assert_eq!(population_std_dev(&values), Some(2.0_f64.sqrt()));
//! assert_eq!(mean(&[]), None);
//! ```
//!
//! ## Correlating paired samples
//!
//! ```
//! use oart_stats::correlation::pearson;
//!
//! let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
//! assert!((r - 1.0).abs() < 1e-12);
//!
//! // Zero variance has no defined correlation
//! assert_eq!(pearson(&[1.0, 1.0, 1.0], &[2.0, 4.0, 6.0]), None);
//! ```

pub mod correlation;
pub mod descriptive;
