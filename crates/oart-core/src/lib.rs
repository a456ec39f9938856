//! Core data model for Opportunity-Adjusted Risk Taking (OART) scoring.
//!
//! This crate defines the immutable inputs consumed by the scoring pipeline:
//!
//! - [`Location`] - A point in the 120×80 pitch coordinate system (attacking goal at x=120)
//! - [`PlayerObservation`] - One player visible in a freeze-frame
//! - [`PassEvent`] - A pass with its passer, chosen receiver, freeze-frame, and match context
//! - [`PassContext`] - The match context of a pass (minute, period, pressure, play pattern)
//!
//! Events are produced by an external loader from provider-specific payloads; this crate only
//! fixes their shape. Fields that the scorer requires by contract (passer and receiver
//! locations) are optional in the type so that a malformed event is reported as a
//! [`MissingFieldError`] instead of failing during deserialization.
//!
//! # Example
//!
//! ```
//! use oart_core::{Location, PassEvent, PlayerObservation};
//!
//! let event = PassEvent::new("player-1", Location::new(60.0, 40.0), Location::new(70.0, 40.0))
//!     .with_freeze_frame(vec![
//!         PlayerObservation::actor(Location::new(60.0, 40.0)),
//!         PlayerObservation::teammate(Location::new(70.0, 40.0)),
//!         PlayerObservation::opponent(Location::new(65.0, 42.0)),
//!     ]);
//!
//! assert_eq!(event.option_count(), Some(1));
//! ```

pub use self::{event::*, location::*};

pub mod event;
pub mod location;

/// A required field of [`PassEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PassField {
    /// Passer location.
    #[display("location")]
    Location,
    /// Chosen receiver location.
    #[display("pass_end_location")]
    PassEndLocation,
}

/// A pass event lacks a location the scorer requires.
///
/// Callers are expected to always supply the passer and receiver locations, so this is a
/// contract violation rather than an expected data gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("pass event is missing required field `{field}`")]
pub struct MissingFieldError {
    pub field: PassField,
}
