//! Geometry and context features for pass options.
//!
//! Every candidate pass (passer → receiver location) is described by 19 features in four
//! groups:
//!
//! - **Spatial** ([`spatial::SpatialFeatures`]) - pass distance and angle, distances to goal
//! - **Zone** ([`spatial::ZoneFeatures`]) - one-hot pitch third of the start and end x
//! - **Tactical** ([`tactical::TacticalFeatures`]) - option set size, opponents in the
//!   passing lane, nearest opponent, teammates ahead (from the freeze-frame)
//! - **Contextual** ([`contextual::ContextualFeatures`]) - match minute, half, play pattern,
//!   pressure
//!
//! All groups are plain functions of their inputs. [`extract_all_features()`] combines them
//! into a [`FeatureVector`]; oracles lay the vector out in their own [`FeatureSchema`] order
//! with [`FeatureVector::to_row()`].
//!
//! # Pitch Convention
//!
//! Coordinates follow a 120×80 pitch with the attacking goal centered at (120, 40).
//!
//! # Missing Tracking Data
//!
//! When the freeze-frame is missing or empty, the tactical group is replaced with fixed
//! values (see [`tactical::TacticalFeatures::fallback()`]) so scoring never fails for lack
//! of tracking data.
//!
//! # Example
//!
//! ```
//! use oart_core::{Location, PassContext, PlayerObservation};
//! use oart_features::{FeatureId, FeatureSchema, extract_all_features};
//!
//! let frame = [
//!     PlayerObservation::actor(Location::new(60.0, 40.0)),
//!     PlayerObservation::teammate(Location::new(70.0, 40.0)),
//! ];
//! let features = extract_all_features(
//!     Location::new(60.0, 40.0),
//!     Location::new(70.0, 40.0),
//!     Some(&frame),
//!     &PassContext::default(),
//! );
//! assert_eq!(features.value(FeatureId::PassDistance), 10.0);
//! assert_eq!(features.to_row(&FeatureSchema::canonical()).len(), 19);
//! ```

use oart_core::{Location, PassContext, PlayerObservation};

pub use self::schema::{FeatureGroup, FeatureId, FeatureSchema, FeatureVector};

use self::{
    contextual::ContextualFeatures,
    spatial::{SpatialFeatures, ZoneFeatures},
    tactical::TacticalFeatures,
};

pub mod contextual;
pub mod schema;
pub mod spatial;
pub mod tactical;

/// Computes all features for passing from `passer` to `receiver`.
#[must_use]
pub fn extract_all_features(
    passer: Location,
    receiver: Location,
    freeze_frame: Option<&[PlayerObservation]>,
    context: &PassContext,
) -> FeatureVector {
    let mut vector = FeatureVector::default();
    SpatialFeatures::new(passer, receiver).fill(&mut vector);
    ZoneFeatures::new(passer.x, receiver.x).fill(&mut vector);
    TacticalFeatures::new(freeze_frame, passer, receiver).fill(&mut vector);
    ContextualFeatures::new(context).fill(&mut vector);
    vector
}

#[cfg(test)]
mod tests {
    use oart_core::PlayPattern;

    use super::*;

    #[test]
    fn test_extract_all_without_freeze_frame() {
        let context = PassContext {
            minute: 30,
            period: 1,
            under_pressure: true,
            play_pattern: PlayPattern::FromFreeKick,
        };
        let v = extract_all_features(
            Location::new(30.0, 10.0),
            Location::new(90.0, 50.0),
            None,
            &context,
        );
        let row = v.to_row(&FeatureSchema::canonical());
        let expected_distance = (60.0_f64 * 60.0 + 40.0 * 40.0).sqrt();
        assert_eq!(row[0], expected_distance);
        assert_eq!(row[1], 40.0_f64.atan2(60.0));
        // under_pressure_int
        assert_eq!(row[4], 1.0);
        // tactical fallback
        assert_eq!(&row[5..9], &[5.0_f64.ln_1p(), 1.0, 10.0, 3.0]);
        assert_eq!(row[9], 30.0 / 90.0);
        // second half, set piece, regular play
        assert_eq!(&row[10..13], &[0.0, 1.0, 0.0]);
        // start defensive, end attacking
        assert_eq!(&row[13..19], &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_iteration_is_canonical() {
        let v = extract_all_features(
            Location::new(50.0, 40.0),
            Location::new(60.0, 40.0),
            None,
            &PassContext::default(),
        );
        let ids = v.iter().map(|(id, _)| id).collect::<Vec<_>>();
        assert_eq!(ids, FeatureId::ALL);
    }
}
