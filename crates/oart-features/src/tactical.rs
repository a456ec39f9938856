//! Tactical features read from the freeze-frame.

use oart_core::{Location, PlayerObservation, event};

use crate::schema::{FeatureId, FeatureVector};

/// Vertical half-width added around the pass when counting opponents in the lane.
pub const PASSING_LANE_MARGIN: f64 = 5.0;

/// Nearest-opponent distance reported when the freeze-frame has no opponents.
pub const NO_OPPONENT_DISTANCE: f64 = 50.0;

/// Option set size assumed when no freeze-frame is available.
pub const FALLBACK_OPTION_SET_SIZE: u32 = 5;
/// Opponents in the passing lane assumed when no freeze-frame is available.
pub const FALLBACK_OPPONENTS_IN_PATH: u32 = 1;
/// Nearest-opponent distance assumed when no freeze-frame is available.
pub const FALLBACK_NEAREST_OPPONENT_DIST: f64 = 10.0;
/// Teammates ahead of the ball assumed when no freeze-frame is available.
pub const FALLBACK_TEAMMATES_AHEAD: u32 = 3;

/// Pressure and support around a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TacticalFeatures {
    /// `ln(1 + option set size)`.
    pub log_option_set_size: f64,
    pub opponents_in_path: u32,
    pub nearest_opponent_dist: f64,
    pub teammates_ahead: u32,
}

impl TacticalFeatures {
    /// Computes tactical features, substituting [`TacticalFeatures::fallback()`] when the
    /// freeze-frame is missing or empty.
    #[must_use]
    pub fn new(freeze_frame: Option<&[PlayerObservation]>, start: Location, end: Location) -> Self {
        match freeze_frame {
            Some(frame) if !frame.is_empty() => Self::from_frame(frame, start, end),
            _ => Self::fallback(),
        }
    }

    /// Fixed values standing in for unavailable tracking data.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            log_option_set_size: f64::from(FALLBACK_OPTION_SET_SIZE).ln_1p(),
            opponents_in_path: FALLBACK_OPPONENTS_IN_PATH,
            nearest_opponent_dist: FALLBACK_NEAREST_OPPONENT_DIST,
            teammates_ahead: FALLBACK_TEAMMATES_AHEAD,
        }
    }

    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn from_frame(frame: &[PlayerObservation], start: Location, end: Location) -> Self {
        let option_set_size = event::options(frame).count();

        let min_x = start.x.min(end.x);
        let max_x = start.x.max(end.x);
        let min_y = start.y.min(end.y) - PASSING_LANE_MARGIN;
        let max_y = start.y.max(end.y) + PASSING_LANE_MARGIN;
        let opponents_in_path = event::opponents(frame)
            .filter(|p| {
                let Location { x, y } = p.location;
                min_x <= x && x <= max_x && min_y <= y && y <= max_y
            })
            .count();

        let nearest_opponent_dist = event::opponents(frame)
            .map(|p| p.location.distance_to(start))
            .min_by(f64::total_cmp)
            .unwrap_or(NO_OPPONENT_DISTANCE);

        let teammates_ahead = event::options(frame)
            .filter(|p| p.location.x > start.x)
            .count();

        Self {
            log_option_set_size: (option_set_size as f64).ln_1p(),
            opponents_in_path: opponents_in_path as u32,
            nearest_opponent_dist,
            teammates_ahead: teammates_ahead as u32,
        }
    }

    pub fn fill(&self, vector: &mut FeatureVector) {
        vector.set(FeatureId::LogOptionSetSize, self.log_option_set_size);
        vector.set(
            FeatureId::OpponentsInPath,
            f64::from(self.opponents_in_path),
        );
        vector.set(FeatureId::NearestOpponentDist, self.nearest_opponent_dist);
        vector.set(FeatureId::TeammatesAhead, f64::from(self.teammates_ahead));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(x: f64, y: f64) -> Location {
        Location::new(x, y)
    }

    #[test]
    fn test_fallback_constants() {
        let f = TacticalFeatures::new(None, loc(60.0, 40.0), loc(70.0, 40.0));
        assert_eq!(f.log_option_set_size, 5.0_f64.ln_1p());
        assert_eq!(f.opponents_in_path, 1);
        assert_eq!(f.nearest_opponent_dist, 10.0);
        assert_eq!(f.teammates_ahead, 3);

        let empty = TacticalFeatures::new(Some(&[]), loc(60.0, 40.0), loc(70.0, 40.0));
        assert_eq!(empty, f);
    }

    #[test]
    fn test_counts_from_frame() {
        let frame = [
            PlayerObservation::actor(loc(60.0, 40.0)),
            PlayerObservation::teammate(loc(70.0, 40.0)),
            PlayerObservation::teammate(loc(55.0, 30.0)),
            PlayerObservation::teammate(loc(60.0, 20.0)),
            // inside the lane box [60, 70] x [35, 45]
            PlayerObservation::opponent(loc(65.0, 44.0)),
            // on the box boundary
            PlayerObservation::opponent(loc(70.0, 35.0)),
            // outside in y
            PlayerObservation::opponent(loc(65.0, 46.0)),
            // outside in x
            PlayerObservation::opponent(loc(75.0, 40.0)).with_keeper(),
        ];
        let f = TacticalFeatures::new(Some(&frame), loc(60.0, 40.0), loc(70.0, 40.0));
        assert_eq!(f.log_option_set_size, 3.0_f64.ln_1p());
        assert_eq!(f.opponents_in_path, 2);
        assert_eq!(f.nearest_opponent_dist, (25.0_f64 + 16.0).sqrt());
        // x = 60.0 is not strictly ahead of the passer
        assert_eq!(f.teammates_ahead, 1);
    }

    #[test]
    fn test_no_opponents_sentinel() {
        let frame = [
            PlayerObservation::actor(loc(60.0, 40.0)),
            PlayerObservation::teammate(loc(70.0, 40.0)),
        ];
        let f = TacticalFeatures::new(Some(&frame), loc(60.0, 40.0), loc(70.0, 40.0));
        assert_eq!(f.nearest_opponent_dist, 50.0);
        assert_eq!(f.opponents_in_path, 0);
    }

    #[test]
    fn test_actor_is_not_an_option() {
        let frame = [PlayerObservation::actor(loc(60.0, 40.0))];
        let f = TacticalFeatures::new(Some(&frame), loc(60.0, 40.0), loc(70.0, 40.0));
        assert_eq!(f.log_option_set_size, 0.0);
        assert_eq!(f.teammates_ahead, 0);
    }

    #[test]
    fn test_player_without_side_is_not_an_opponent() {
        let unflagged = PlayerObservation {
            location: loc(65.0, 40.0),
            teammate: None,
            actor: false,
            keeper: false,
        };
        let frame = [
            PlayerObservation::actor(loc(60.0, 40.0)),
            PlayerObservation::teammate(loc(70.0, 40.0)),
            unflagged,
        ];
        let f = TacticalFeatures::new(Some(&frame), loc(60.0, 40.0), loc(70.0, 40.0));
        assert_eq!(f.opponents_in_path, 0);
        assert_eq!(f.nearest_opponent_dist, NO_OPPONENT_DISTANCE);
        assert_eq!(f.log_option_set_size, 1.0_f64.ln_1p());
    }
}
