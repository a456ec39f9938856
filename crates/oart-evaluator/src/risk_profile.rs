//! Risk profiles: coarse labels for player OART tendencies, and head-to-head comparison.

use oart_core::PlayerId;
use serde::{Deserialize, Serialize};

use crate::player_aggregator::PlayerAggregate;

/// Band of a player's mean OART.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    /// Mean OART below 0.3.
    #[display("Conservative")]
    Conservative,
    /// Mean OART in \[0.3, 0.5).
    #[display("Moderate")]
    Moderate,
    /// Mean OART in \[0.5, 0.7).
    #[display("Risky")]
    Risky,
    /// Mean OART of 0.7 or more.
    #[display("Very Risky")]
    VeryRisky,
}

impl RiskProfile {
    #[must_use]
    pub fn from_oart(mean: f64) -> Self {
        if mean < 0.3 {
            Self::Conservative
        } else if mean < 0.5 {
            Self::Moderate
        } else if mean < 0.7 {
            Self::Risky
        } else {
            Self::VeryRisky
        }
    }
}

/// One side of a [`PlayerComparison`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: PlayerId,
    pub n_events: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub profile: RiskProfile,
}

impl PlayerSummary {
    /// Summarizes a valid aggregate; `None` if the aggregate is insufficient.
    #[must_use]
    pub fn from_aggregate(aggregate: &PlayerAggregate) -> Option<Self> {
        let mean = aggregate.mean()?;
        let std_dev = aggregate.std_dev()?;
        Some(Self {
            player: aggregate.player.clone(),
            n_events: aggregate.n_events,
            mean,
            std_dev,
            profile: RiskProfile::from_oart(mean),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerComparison {
    pub players: [PlayerSummary; 2],
    /// The player with the higher mean OART; `None` on an exact tie.
    pub more_risky: Option<PlayerId>,
    /// Absolute difference of the two means.
    pub difference: f64,
}

/// Compares two players' risk tendencies. Returns `None` unless both aggregates are valid.
#[must_use]
pub fn compare_players(a: &PlayerAggregate, b: &PlayerAggregate) -> Option<PlayerComparison> {
    let a = PlayerSummary::from_aggregate(a)?;
    let b = PlayerSummary::from_aggregate(b)?;
    let more_risky = if a.mean > b.mean {
        Some(a.player.clone())
    } else if b.mean > a.mean {
        Some(b.player.clone())
    } else {
        None
    };
    Some(PlayerComparison {
        difference: (a.mean - b.mean).abs(),
        more_risky,
        players: [a, b],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player_aggregator::aggregate_scores;

    #[test]
    fn test_profile_bands() {
        assert_eq!(RiskProfile::from_oart(0.0), RiskProfile::Conservative);
        assert_eq!(RiskProfile::from_oart(0.29), RiskProfile::Conservative);
        assert_eq!(RiskProfile::from_oart(0.3), RiskProfile::Moderate);
        assert_eq!(RiskProfile::from_oart(0.5), RiskProfile::Risky);
        assert_eq!(RiskProfile::from_oart(0.7), RiskProfile::VeryRisky);
        assert_eq!(RiskProfile::from_oart(1.0), RiskProfile::VeryRisky);
        assert_eq!(RiskProfile::VeryRisky.to_string(), "Very Risky");
    }

    #[test]
    fn test_compare_players() {
        let a = aggregate_scores(PlayerId::new("a"), [0.2, 0.2], 2);
        let b = aggregate_scores(PlayerId::new("b"), [0.6, 0.6], 2);
        let cmp = compare_players(&a, &b).unwrap();
        assert_eq!(cmp.more_risky, Some(PlayerId::new("b")));
        assert!((cmp.difference - 0.4).abs() < 1e-12);
        assert_eq!(cmp.players[0].profile, RiskProfile::Conservative);
        assert_eq!(cmp.players[1].profile, RiskProfile::Risky);
    }

    #[test]
    fn test_compare_tie_and_invalid() {
        let a = aggregate_scores(PlayerId::new("a"), [0.5, 0.5], 2);
        let b = aggregate_scores(PlayerId::new("b"), [0.5, 0.5], 2);
        let cmp = compare_players(&a, &b).unwrap();
        assert_eq!(cmp.more_risky, None);
        assert_eq!(cmp.difference, 0.0);

        let small = aggregate_scores(PlayerId::new("c"), [0.5], 2);
        assert!(compare_players(&a, &small).is_none());
        assert!(compare_players(&small, &a).is_none());
    }
}
