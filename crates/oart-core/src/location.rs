use serde::{Deserialize, Serialize};

/// Pitch length in provider units.
pub const PITCH_LENGTH: f64 = 120.0;

/// Pitch width in provider units.
pub const PITCH_WIDTH: f64 = 80.0;

/// Center of the attacking goal.
pub const GOAL_CENTER: Location = Location::new(PITCH_LENGTH, PITCH_WIDTH / 2.0);

/// A position on the pitch.
///
/// Serialized as a two-element array `[x, y]`, the layout used by event providers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two locations.
    #[must_use]
    pub fn distance_to(self, other: Location) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of the vector from `self` to `other`, in radians (`atan2(Δy, Δx)`).
    #[must_use]
    pub fn angle_to(self, other: Location) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl From<[f64; 2]> for Location {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Location> for [f64; 2] {
    fn from(loc: Location) -> Self {
        [loc.x, loc.y]
    }
}
