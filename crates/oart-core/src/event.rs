use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Location, MissingFieldError, PassField};

/// Identity of the player who made a pass.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new<S>(id: S) -> Self
    where
        S: Into<String>,
    {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// How the possession containing a pass started.
///
/// Uses the provider's display strings on the wire (`"Regular Play"`, `"From Corner"`, ...).
/// Unrecognized strings deserialize as [`PlayPattern::Other`].
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
#[serde(from = "String", into = "String")]
pub enum PlayPattern {
    #[default]
    RegularPlay,
    FromCorner,
    FromFreeKick,
    FromThrowIn,
    FromGoalKick,
    FromCounter,
    FromKeeper,
    FromKickOff,
    Other,
}

impl PlayPattern {
    pub const ALL: [PlayPattern; 9] = [
        PlayPattern::RegularPlay,
        PlayPattern::FromCorner,
        PlayPattern::FromFreeKick,
        PlayPattern::FromThrowIn,
        PlayPattern::FromGoalKick,
        PlayPattern::FromCounter,
        PlayPattern::FromKeeper,
        PlayPattern::FromKickOff,
        PlayPattern::Other,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RegularPlay => "Regular Play",
            Self::FromCorner => "From Corner",
            Self::FromFreeKick => "From Free Kick",
            Self::FromThrowIn => "From Throw In",
            Self::FromGoalKick => "From Goal Kick",
            Self::FromCounter => "From Counter",
            Self::FromKeeper => "From Keeper",
            Self::FromKickOff => "From Kick Off",
            Self::Other => "Other",
        }
    }

    /// Whether the pass belongs to a dead-ball restart (corner, free kick, throw-in, goal kick).
    #[must_use]
    pub const fn is_set_piece(self) -> bool {
        matches!(
            self,
            Self::FromCorner | Self::FromFreeKick | Self::FromThrowIn | Self::FromGoalKick
        )
    }
}

impl fmt::Display for PlayPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for PlayPattern {
    fn from(name: String) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .unwrap_or(Self::Other)
    }
}

impl From<PlayPattern> for String {
    fn from(pattern: PlayPattern) -> Self {
        pattern.name().to_owned()
    }
}

/// A player visible in the freeze-frame at the instant of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerObservation {
    pub location: Location,
    /// `None` when the frame does not say which side the player is on; such a player is
    /// neither a pass option nor an opponent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teammate: Option<bool>,
    /// Set only for the passer.
    #[serde(default)]
    pub actor: bool,
    #[serde(default)]
    pub keeper: bool,
}

impl PlayerObservation {
    /// The passer.
    #[must_use]
    pub const fn actor(location: Location) -> Self {
        Self {
            location,
            teammate: Some(true),
            actor: true,
            keeper: false,
        }
    }

    /// A teammate of the passer (a candidate receiver).
    #[must_use]
    pub const fn teammate(location: Location) -> Self {
        Self {
            location,
            teammate: Some(true),
            actor: false,
            keeper: false,
        }
    }

    /// A player of the defending team.
    #[must_use]
    pub const fn opponent(location: Location) -> Self {
        Self {
            location,
            teammate: Some(false),
            actor: false,
            keeper: false,
        }
    }

    #[must_use]
    pub const fn with_keeper(mut self) -> Self {
        self.keeper = true;
        self
    }

    /// Whether this player is an available pass option (a teammate other than the passer).
    #[must_use]
    pub const fn is_option(&self) -> bool {
        matches!(self.teammate, Some(true)) && !self.actor
    }

    #[must_use]
    pub const fn is_opponent(&self) -> bool {
        matches!(self.teammate, Some(false))
    }
}

/// Iterates over the pass options (teammates excluding the passer) of a freeze-frame.
pub fn options(frame: &[PlayerObservation]) -> impl Iterator<Item = &PlayerObservation> {
    frame.iter().filter(|p| p.is_option())
}

/// Iterates over the opponents of a freeze-frame.
pub fn opponents(frame: &[PlayerObservation]) -> impl Iterator<Item = &PlayerObservation> {
    frame.iter().filter(|p| p.is_opponent())
}

/// Match context shared by every option of a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassContext {
    pub minute: u32,
    pub period: u8,
    pub under_pressure: bool,
    pub play_pattern: PlayPattern,
}

impl Default for PassContext {
    fn default() -> Self {
        Self {
            minute: DEFAULT_MINUTE,
            period: DEFAULT_PERIOD,
            under_pressure: false,
            play_pattern: PlayPattern::RegularPlay,
        }
    }
}

const DEFAULT_MINUTE: u32 = 45;
const DEFAULT_PERIOD: u8 = 1;

fn default_minute() -> u32 {
    DEFAULT_MINUTE
}

fn default_period() -> u8 {
    DEFAULT_PERIOD
}

/// A pass as seen by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub player: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Passer location.
    #[serde(default)]
    pub location: Option<Location>,
    /// Chosen receiver location.
    #[serde(default)]
    pub pass_end_location: Option<Location>,
    #[serde(default)]
    pub freeze_frame: Option<Vec<PlayerObservation>>,
    #[serde(default = "default_minute")]
    pub minute: u32,
    #[serde(default = "default_period")]
    pub period: u8,
    #[serde(default)]
    pub under_pressure: bool,
    #[serde(default)]
    pub play_pattern: PlayPattern,
}

impl PassEvent {
    /// Creates a pass with default context and no freeze-frame.
    #[must_use]
    pub fn new<P>(player: P, location: Location, pass_end_location: Location) -> Self
    where
        P: Into<PlayerId>,
    {
        let context = PassContext::default();
        Self {
            id: None,
            player: player.into(),
            team: None,
            location: Some(location),
            pass_end_location: Some(pass_end_location),
            freeze_frame: None,
            minute: context.minute,
            period: context.period,
            under_pressure: context.under_pressure,
            play_pattern: context.play_pattern,
        }
    }

    #[must_use]
    pub fn with_id<S>(mut self, id: S) -> Self
    where
        S: Into<String>,
    {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_freeze_frame(mut self, freeze_frame: Vec<PlayerObservation>) -> Self {
        self.freeze_frame = Some(freeze_frame);
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: PassContext) -> Self {
        let PassContext {
            minute,
            period,
            under_pressure,
            play_pattern,
        } = context;
        self.minute = minute;
        self.period = period;
        self.under_pressure = under_pressure;
        self.play_pattern = play_pattern;
        self
    }

    #[must_use]
    pub fn context(&self) -> PassContext {
        PassContext {
            minute: self.minute,
            period: self.period,
            under_pressure: self.under_pressure,
            play_pattern: self.play_pattern,
        }
    }

    /// Returns the freeze-frame if it is present and non-empty.
    #[must_use]
    pub fn populated_freeze_frame(&self) -> Option<&[PlayerObservation]> {
        self.freeze_frame.as_deref().filter(|f| !f.is_empty())
    }

    /// Number of pass options in the freeze-frame, `None` without a usable freeze-frame.
    #[must_use]
    pub fn option_count(&self) -> Option<usize> {
        self.populated_freeze_frame()
            .map(|frame| options(frame).count())
    }

    pub fn passer_location(&self) -> Result<Location, MissingFieldError> {
        self.location.ok_or(MissingFieldError {
            field: PassField::Location,
        })
    }

    pub fn receiver_location(&self) -> Result<Location, MissingFieldError> {
        self.pass_end_location.ok_or(MissingFieldError {
            field: PassField::PassEndLocation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_pattern_names() {
        for pattern in PlayPattern::ALL {
            assert_eq!(PlayPattern::from(pattern.name().to_owned()), pattern);
        }
        assert_eq!(
            PlayPattern::from("From Penalty".to_owned()),
            PlayPattern::Other
        );
    }

    #[test]
    fn test_set_piece_patterns() {
        let set_pieces = PlayPattern::ALL
            .into_iter()
            .filter(|p| p.is_set_piece())
            .collect::<Vec<_>>();
        assert_eq!(
            set_pieces,
            [
                PlayPattern::FromCorner,
                PlayPattern::FromFreeKick,
                PlayPattern::FromThrowIn,
                PlayPattern::FromGoalKick,
            ]
        );
        assert!(PlayPattern::RegularPlay.is_regular_play());
        assert!(!PlayPattern::FromCounter.is_regular_play());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "player": "Lionel Messi",
            "location": [60.0, 40.0],
            "pass_end_location": [70.0, 40.0],
            "play_pattern": "From Throw In",
            "freeze_frame": [
                {"location": [60.0, 40.0], "teammate": true, "actor": true},
                {"location": [70.0, 40.0], "teammate": true},
                {"location": [64.0, 41.0], "teammate": false, "keeper": false}
            ]
        }"#;
        let event: PassEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.player.as_str(), "Lionel Messi");
        assert_eq!(event.minute, 45);
        assert_eq!(event.period, 1);
        assert!(!event.under_pressure);
        assert_eq!(event.play_pattern, PlayPattern::FromThrowIn);
        assert_eq!(event.option_count(), Some(1));

        let frame = event.populated_freeze_frame().unwrap();
        assert_eq!(opponents(frame).count(), 1);
    }

    #[test]
    fn test_observation_without_side_is_ignored() {
        let json = r#"[
            {"location": [60.0, 40.0], "teammate": true, "actor": true},
            {"location": [70.0, 40.0], "teammate": true},
            {"location": [65.0, 40.0]}
        ]"#;
        let frame: Vec<PlayerObservation> = serde_json::from_str(json).unwrap();
        assert_eq!(frame[2].teammate, None);
        assert!(!frame[2].is_option());
        assert!(!frame[2].is_opponent());
        assert_eq!(options(&frame).count(), 1);
        assert_eq!(opponents(&frame).count(), 0);

        let json = serde_json::to_value(frame[2]).unwrap();
        assert!(json.get("teammate").is_none());
        let json = serde_json::to_value(PlayerObservation::opponent(Location::new(1.0, 2.0)))
            .unwrap();
        assert_eq!(json["teammate"], false);
    }

    #[test]
    fn test_missing_locations() {
        let json = r#"{"player": "p", "pass_end_location": [1.0, 2.0]}"#;
        let event: PassEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event.passer_location(),
            Err(MissingFieldError {
                field: PassField::Location
            })
        );
        assert_eq!(event.receiver_location(), Ok(Location::new(1.0, 2.0)));
        assert_eq!(
            MissingFieldError {
                field: PassField::PassEndLocation
            }
            .to_string(),
            "pass event is missing required field `pass_end_location`"
        );
    }

    #[test]
    fn test_empty_freeze_frame_is_unusable() {
        let event = PassEvent::new("p", Location::new(0.0, 0.0), Location::new(1.0, 1.0))
            .with_freeze_frame(vec![]);
        assert!(event.populated_freeze_frame().is_none());
        assert_eq!(event.option_count(), None);
    }
}
