//! Turns scored periods into user-facing recommendations.

use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::metrics::PeriodMetrics;
use crate::strategy::{PeriodMetadata, ScoredPeriod, StrategyKind};

const BRIDGE_MULTIPLIER: f64 = 1.2;
const IMPORTANCE_MULTIPLIER: f64 = 0.2;
const FULL_RECESS_MULTIPLIER: f64 = 1.3;
const PARTIAL_RECESS_MULTIPLIER: f64 = 1.1;

const GAIN_WEIGHT: f64 = 0.6;
const STRATEGIC_WEIGHT: f64 = 0.4;

/// A ranked leave suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub kind: StrategyKind,
    pub title: String,
    pub description: String,
    pub suggested_range: DateRange,
    /// Percent gain over spending plain business days.
    pub efficiency_gain: f64,
    /// Raw strategy score, unmodified.
    pub strategic_score: f64,
    pub final_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fractioned_periods: Option<Vec<PeriodMetrics>>,
}

impl Recommendation {
    pub fn with_fractions(mut self, fractions: Vec<PeriodMetrics>) -> Self {
        self.fractioned_periods = Some(fractions);
        self
    }
}

/// Ranking score: `efficiency_gain * 0.6 + strategic_score * 100 * 0.4`.
pub fn final_score(efficiency_gain: f64, strategic_score: f64) -> f64 {
    efficiency_gain * GAIN_WEIGHT + strategic_score * 100.0 * STRATEGIC_WEIGHT
}

/// Kind-specific multiplier applied to the raw score.
pub fn efficiency_multiplier(metadata: &PeriodMetadata) -> f64 {
    match metadata {
        PeriodMetadata::Continuous { .. } => 1.0,
        PeriodMetadata::Bridge { .. } => BRIDGE_MULTIPLIER,
        PeriodMetadata::HolidayAdjacent { importance, .. } => 1.0 + importance * IMPORTANCE_MULTIPLIER,
        PeriodMetadata::Recess { full_recess: true, .. } => FULL_RECESS_MULTIPLIER,
        PeriodMetadata::Recess { full_recess: false, .. } => PARTIAL_RECESS_MULTIPLIER,
    }
}

/// Percent gain implied by a raw score and its multiplier, never negative.
pub fn efficiency_gain(period: &ScoredPeriod) -> f64 {
    ((period.raw_score * efficiency_multiplier(&period.metadata) - 1.0) * 100.0).max(0.0)
}

fn non_working_label(is_holiday: bool) -> &'static str {
    if is_holiday {
        "holiday"
    } else {
        "weekend"
    }
}

fn describe(period: &ScoredPeriod) -> (String, String) {
    let m = &period.metrics;
    match &period.metadata {
        PeriodMetadata::Continuous { length } => (
            format!("{length}-day leave starting {}", m.start),
            format!(
                "Take {} business days between {} and {} ({} calendar days, {:?} efficiency).",
                m.business_days, m.start, m.end, m.total_days, m.rating
            ),
        ),
        PeriodMetadata::Bridge {
            preceding,
            following,
            preceding_is_holiday,
            following_is_holiday,
            gap_days,
        } => (
            format!(
                "Bridge {gap_days} day{} between {preceding} and {following}",
                if *gap_days == 1 { "" } else { "s" }
            ),
            format!(
                "Taking {} to {} off links the {} on {preceding} with the {} on {following}.",
                m.start,
                m.end,
                non_working_label(*preceding_is_holiday),
                non_working_label(*following_is_holiday),
            ),
        ),
        PeriodMetadata::HolidayAdjacent {
            holiday_name,
            holiday_date,
            side,
            importance,
        } => (
            format!("{} days {} {holiday_name}", m.total_days, side.label()),
            format!(
                "Leave from {} to {} extends the {holiday_name} holiday on {holiday_date} (importance {importance:.1}).",
                m.start, m.end
            ),
        ),
        PeriodMetadata::Recess { full_recess, recess } => (
            if *full_recess {
                "Leave during the institutional recess".to_string()
            } else {
                "Leave overlapping the institutional recess".to_string()
            },
            format!(
                "{} days from {} to {} alongside the recess ({recess}).",
                m.total_days, m.start, m.end
            ),
        ),
    }
}

/// Build a recommendation with a fresh id.
pub fn build_recommendation(period: &ScoredPeriod) -> Recommendation {
    let (title, description) = describe(period);
    let gain = efficiency_gain(period);

    Recommendation {
        id: uuid::Uuid::new_v4().to_string(),
        kind: period.kind,
        title,
        description,
        suggested_range: period.range(),
        efficiency_gain: gain,
        strategic_score: period.raw_score,
        final_score: final_score(gain, period.raw_score),
        fractioned_periods: None,
    }
}
