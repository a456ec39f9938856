//! Contextual features: match time, pressure, and play pattern.

use oart_core::PassContext;

use crate::schema::{FeatureId, FeatureVector};

/// Length of a regulation match in minutes, used to normalize the match minute.
pub const REGULATION_MINUTES: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextualFeatures {
    /// `minute / 90`; exceeds 1.0 in stoppage and extra time.
    pub match_minute_normalized: f64,
    pub is_second_half: bool,
    pub is_set_piece: bool,
    pub is_regular_play: bool,
    pub under_pressure: bool,
}

impl ContextualFeatures {
    #[must_use]
    pub fn new(context: &PassContext) -> Self {
        Self {
            match_minute_normalized: f64::from(context.minute) / REGULATION_MINUTES,
            is_second_half: context.period == 2,
            is_set_piece: context.play_pattern.is_set_piece(),
            is_regular_play: context.play_pattern.is_regular_play(),
            under_pressure: context.under_pressure,
        }
    }

    pub fn fill(&self, vector: &mut FeatureVector) {
        let flag = |b: bool| f64::from(u8::from(b));
        vector.set(
            FeatureId::MatchMinuteNormalized,
            self.match_minute_normalized,
        );
        vector.set(FeatureId::IsSecondHalf, flag(self.is_second_half));
        vector.set(FeatureId::IsSetPiece, flag(self.is_set_piece));
        vector.set(FeatureId::IsRegularPlay, flag(self.is_regular_play));
        vector.set(FeatureId::UnderPressure, flag(self.under_pressure));
    }
}
