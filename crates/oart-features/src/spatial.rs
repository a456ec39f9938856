//! Spatial and zone features: pure geometry of the passer and receiver locations.

use oart_core::{GOAL_CENTER, Location};

use crate::schema::{FeatureId, FeatureVector};

/// Upper x bound (inclusive) of the defensive third.
pub const DEFENSIVE_THIRD_MAX_X: f64 = 40.0;

/// Upper x bound (inclusive) of the middle third.
pub const MIDDLE_THIRD_MAX_X: f64 = 80.0;

/// Distances and direction of a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialFeatures {
    pub pass_distance: f64,
    /// `atan2(Δy, Δx)` in radians.
    pub pass_angle: f64,
    pub distance_to_goal_start: f64,
    pub distance_to_goal_end: f64,
}

impl SpatialFeatures {
    #[must_use]
    pub fn new(start: Location, end: Location) -> Self {
        Self {
            pass_distance: start.distance_to(end),
            pass_angle: start.angle_to(end),
            distance_to_goal_start: start.distance_to(GOAL_CENTER),
            distance_to_goal_end: end.distance_to(GOAL_CENTER),
        }
    }

    pub fn fill(&self, vector: &mut FeatureVector) {
        vector.set(FeatureId::PassDistance, self.pass_distance);
        vector.set(FeatureId::PassAngle, self.pass_angle);
        vector.set(FeatureId::DistanceToGoalStart, self.distance_to_goal_start);
        vector.set(FeatureId::DistanceToGoalEnd, self.distance_to_goal_end);
    }
}

/// One-hot pitch third of an x coordinate.
///
/// At most one flag is set; a non-finite x sets none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneOneHot {
    pub defensive: bool,
    pub middle: bool,
    pub attacking: bool,
}

impl ZoneOneHot {
    #[must_use]
    pub fn of(x: f64) -> Self {
        Self {
            defensive: x <= DEFENSIVE_THIRD_MAX_X,
            middle: DEFENSIVE_THIRD_MAX_X < x && x <= MIDDLE_THIRD_MAX_X,
            attacking: x > MIDDLE_THIRD_MAX_X,
        }
    }
}

/// Pitch thirds of the pass start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneFeatures {
    pub start: ZoneOneHot,
    pub end: ZoneOneHot,
}

impl ZoneFeatures {
    #[must_use]
    pub fn new(start_x: f64, end_x: f64) -> Self {
        Self {
            start: ZoneOneHot::of(start_x),
            end: ZoneOneHot::of(end_x),
        }
    }

    pub fn fill(&self, vector: &mut FeatureVector) {
        let flag = |b: bool| f64::from(u8::from(b));
        vector.set(FeatureId::StartDefensive, flag(self.start.defensive));
        vector.set(FeatureId::StartMiddle, flag(self.start.middle));
        vector.set(FeatureId::StartAttacking, flag(self.start.attacking));
        vector.set(FeatureId::EndDefensive, flag(self.end.defensive));
        vector.set(FeatureId::EndMiddle, flag(self.end.middle));
        vector.set(FeatureId::EndAttacking, flag(self.end.attacking));
    }
}
