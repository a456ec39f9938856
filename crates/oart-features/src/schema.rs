//! Feature identities, the ordered schema consumed by oracles, and feature vectors.

use std::{fmt, sync::Arc};

/// Feature group a feature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureGroup {
    Spatial,
    Zone,
    Tactical,
    Contextual,
}

impl FeatureGroup {
    pub const ALL: [FeatureGroup; 4] = [
        FeatureGroup::Spatial,
        FeatureGroup::Zone,
        FeatureGroup::Tactical,
        FeatureGroup::Contextual,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spatial => "Spatial",
            Self::Zone => "Zone",
            Self::Tactical => "Tactical",
            Self::Contextual => "Contextual",
        }
    }

    /// Features of this group in canonical order.
    pub fn features(self) -> impl Iterator<Item = FeatureId> {
        FeatureId::ALL.into_iter().filter(move |id| id.group() == self)
    }
}

impl fmt::Display for FeatureGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the 19 features describing a (passer, candidate receiver) pair.
///
/// Variants are declared in canonical order; [`FeatureSchema::canonical()`] follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureId {
    PassDistance,
    PassAngle,
    DistanceToGoalStart,
    DistanceToGoalEnd,
    UnderPressure,
    LogOptionSetSize,
    OpponentsInPath,
    NearestOpponentDist,
    TeammatesAhead,
    MatchMinuteNormalized,
    IsSecondHalf,
    IsSetPiece,
    IsRegularPlay,
    StartDefensive,
    StartMiddle,
    StartAttacking,
    EndDefensive,
    EndMiddle,
    EndAttacking,
}

impl FeatureId {
    pub const LEN: usize = 19;

    pub const ALL: [FeatureId; Self::LEN] = [
        FeatureId::PassDistance,
        FeatureId::PassAngle,
        FeatureId::DistanceToGoalStart,
        FeatureId::DistanceToGoalEnd,
        FeatureId::UnderPressure,
        FeatureId::LogOptionSetSize,
        FeatureId::OpponentsInPath,
        FeatureId::NearestOpponentDist,
        FeatureId::TeammatesAhead,
        FeatureId::MatchMinuteNormalized,
        FeatureId::IsSecondHalf,
        FeatureId::IsSetPiece,
        FeatureId::IsRegularPlay,
        FeatureId::StartDefensive,
        FeatureId::StartMiddle,
        FeatureId::StartAttacking,
        FeatureId::EndDefensive,
        FeatureId::EndMiddle,
        FeatureId::EndAttacking,
    ];

    /// Stable identifier used in model artifacts.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::PassDistance => "pass_distance",
            Self::PassAngle => "pass_angle",
            Self::DistanceToGoalStart => "distance_to_goal_start",
            Self::DistanceToGoalEnd => "distance_to_goal_end",
            Self::UnderPressure => "under_pressure_int",
            Self::LogOptionSetSize => "log_option_set_size",
            Self::OpponentsInPath => "opponents_in_path",
            Self::NearestOpponentDist => "nearest_opponent_dist",
            Self::TeammatesAhead => "teammates_ahead",
            Self::MatchMinuteNormalized => "match_minute_normalized",
            Self::IsSecondHalf => "is_second_half",
            Self::IsSetPiece => "is_set_piece",
            Self::IsRegularPlay => "is_regular_play",
            Self::StartDefensive => "start_defensive",
            Self::StartMiddle => "start_middle",
            Self::StartAttacking => "start_attacking",
            Self::EndDefensive => "end_defensive",
            Self::EndMiddle => "end_middle",
            Self::EndAttacking => "end_attacking",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PassDistance => "Pass Distance",
            Self::PassAngle => "Pass Angle",
            Self::DistanceToGoalStart => "Passer Distance to Goal",
            Self::DistanceToGoalEnd => "Receiver Distance to Goal",
            Self::UnderPressure => "Under Pressure",
            Self::LogOptionSetSize => "Log Option Set Size",
            Self::OpponentsInPath => "Opponents in Passing Lane",
            Self::NearestOpponentDist => "Nearest Opponent Distance",
            Self::TeammatesAhead => "Teammates Ahead",
            Self::MatchMinuteNormalized => "Match Minute (normalized)",
            Self::IsSecondHalf => "Second Half",
            Self::IsSetPiece => "Set Piece",
            Self::IsRegularPlay => "Regular Play",
            Self::StartDefensive => "Start in Defensive Third",
            Self::StartMiddle => "Start in Middle Third",
            Self::StartAttacking => "Start in Attacking Third",
            Self::EndDefensive => "End in Defensive Third",
            Self::EndMiddle => "End in Middle Third",
            Self::EndAttacking => "End in Attacking Third",
        }
    }

    #[must_use]
    pub const fn group(self) -> FeatureGroup {
        match self {
            Self::PassDistance
            | Self::PassAngle
            | Self::DistanceToGoalStart
            | Self::DistanceToGoalEnd => FeatureGroup::Spatial,
            Self::StartDefensive
            | Self::StartMiddle
            | Self::StartAttacking
            | Self::EndDefensive
            | Self::EndMiddle
            | Self::EndAttacking => FeatureGroup::Zone,
            Self::LogOptionSetSize
            | Self::OpponentsInPath
            | Self::NearestOpponentDist
            | Self::TeammatesAhead => FeatureGroup::Tactical,
            Self::UnderPressure
            | Self::MatchMinuteNormalized
            | Self::IsSecondHalf
            | Self::IsSetPiece
            | Self::IsRegularPlay => FeatureGroup::Contextual,
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Ordered list of feature names an oracle expects its input rows in.
///
/// A schema is an immutable value: clones share the same storage. Names that do not
/// correspond to a known [`FeatureId`] are kept in place and always read as `0.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Arc<[String]>,
    slots: Arc<[Option<FeatureId>]>,
}

impl FeatureSchema {
    /// The 19 features in canonical order.
    #[must_use]
    pub fn canonical() -> Self {
        Self::from_names(FeatureId::ALL.map(FeatureId::id))
    }

    /// Builds a schema from feature names in the order a model expects them.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect::<Arc<[String]>>();
        let slots = names
            .iter()
            .map(|name| FeatureId::from_id(name))
            .collect::<Arc<[_]>>();
        Self { names, slots }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names in this schema that no extracted feature provides.
    pub fn unknown_names(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .zip(self.slots.iter())
            .filter(|(_, slot)| slot.is_none())
            .map(|(name, _)| name.as_str())
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Values of all features for one (passer, candidate receiver) pair.
///
/// Iteration order is the canonical order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FeatureId::LEN],
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            values: [0.0; FeatureId::LEN],
        }
    }
}

impl FeatureVector {
    #[must_use]
    pub fn value(&self, id: FeatureId) -> f64 {
        self.values[id.index()]
    }

    pub fn set(&mut self, id: FeatureId, value: f64) {
        self.values[id.index()] = value;
    }

    /// Looks a feature up by name; unknown names read as `0.0`.
    #[must_use]
    pub fn get(&self, name: &str) -> f64 {
        FeatureId::from_id(name).map_or(0.0, |id| self.value(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, f64)> + '_ {
        FeatureId::ALL.into_iter().map(|id| (id, self.value(id)))
    }

    /// Values in `schema` order, without allocating.
    pub fn values_in<'a>(&'a self, schema: &'a FeatureSchema) -> impl Iterator<Item = f64> + 'a {
        schema
            .slots
            .iter()
            .map(|slot| slot.map_or(0.0, |id| self.value(id)))
    }

    /// Values laid out in `schema` order.
    #[must_use]
    pub fn to_row(&self, schema: &FeatureSchema) -> Vec<f64> {
        self.values_in(schema).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let schema = FeatureSchema::canonical();
        let names = schema.names().collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "pass_distance",
                "pass_angle",
                "distance_to_goal_start",
                "distance_to_goal_end",
                "under_pressure_int",
                "log_option_set_size",
                "opponents_in_path",
                "nearest_opponent_dist",
                "teammates_ahead",
                "match_minute_normalized",
                "is_second_half",
                "is_set_piece",
                "is_regular_play",
                "start_defensive",
                "start_middle",
                "start_attacking",
                "end_defensive",
                "end_middle",
                "end_attacking",
            ]
        );
        assert_eq!(schema.unknown_names().count(), 0);
    }

    #[test]
    fn test_variant_order_matches_all() {
        for (i, id) in FeatureId::ALL.into_iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(FeatureId::from_id(id.id()), Some(id));
        }
    }

    #[test]
    fn test_row_follows_schema_and_defaults_to_zero() {
        let mut vector = FeatureVector::default();
        vector.set(FeatureId::PassDistance, 12.5);
        vector.set(FeatureId::TeammatesAhead, 3.0);

        let schema = FeatureSchema::from_names(["teammates_ahead", "xg_chain", "pass_distance"]);
        assert_eq!(vector.to_row(&schema), vec![3.0, 0.0, 12.5]);
        assert_eq!(schema.unknown_names().collect::<Vec<_>>(), ["xg_chain"]);
        assert_eq!(vector.get("xg_chain"), 0.0);
        assert_eq!(vector.get("pass_distance"), 12.5);
    }

    #[test]
    fn test_groups_partition_features() {
        let sizes = FeatureGroup::ALL.map(|group| group.features().count());
        assert_eq!(sizes, [4, 6, 4, 5]);
        assert_eq!(sizes.iter().sum::<usize>(), FeatureId::LEN);
        assert_eq!(
            FeatureGroup::Tactical.features().collect::<Vec<_>>(),
            [
                FeatureId::LogOptionSetSize,
                FeatureId::OpponentsInPath,
                FeatureId::NearestOpponentDist,
                FeatureId::TeammatesAhead,
            ]
        );
        assert_eq!(FeatureId::UnderPressure.group(), FeatureGroup::Contextual);
        assert_eq!(FeatureGroup::Zone.to_string(), "Zone");
        assert_eq!(FeatureId::OpponentsInPath.name(), "Opponents in Passing Lane");
    }

    #[test]
    fn test_schema_clones_share_storage() {
        let a = FeatureSchema::canonical();
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.names, &b.names));
        assert_eq!(a, b);
    }
}
