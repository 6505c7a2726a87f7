//! Bridge-period strategy.
//!
//! A bridge is a short run of business days sitting between two non-working
//! days. Taking the bridge off joins both non-working stretches into one
//! break.

use chrono::{Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::{PeriodMetadata, ScoredPeriod};
use crate::calendar::{is_holiday, is_non_working, year_bounds, DateRange, HolidayCalendar};
use crate::config::OptimizationConfig;
use crate::error::ValidationError;
use crate::metrics::PeriodMetrics;

const SIZE_STEP: f64 = 0.2;
const HOLIDAY_NEIGHBOR_BONUS: f64 = 0.3;
const WEEKDAY_BONUS: f64 = 0.2;

/// A run of business days between two non-working days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeCandidate {
    pub range: DateRange,
    /// Number of business days in the bridge.
    pub gap_days: u32,
    /// Non-working day right before the bridge
    pub preceding: NaiveDate,
    /// Non-working day right after the bridge
    pub following: NaiveDate,
    pub preceding_is_holiday: bool,
    pub following_is_holiday: bool,
    pub score: f64,
}

/// Bridge score; shorter bridges and holiday neighbors score higher.
fn bridge_score(
    range: &DateRange,
    gap_days: u32,
    max_bridge_size: u32,
    preceding_is_holiday: bool,
    following_is_holiday: bool,
) -> f64 {
    // gap_days never exceeds max_bridge_size
    let size_bonus = f64::from(max_bridge_size - gap_days) + 1.0;
    let mut score = 1.0 + size_bonus * SIZE_STEP;
    if preceding_is_holiday {
        score += HOLIDAY_NEIGHBOR_BONUS;
    }
    if following_is_holiday {
        score += HOLIDAY_NEIGHBOR_BONUS;
    }
    if range.starts_on(Weekday::Mon) {
        score += WEEKDAY_BONUS;
    }
    if range.ends_on(Weekday::Fri) {
        score += WEEKDAY_BONUS;
    }
    score
}

/// All bridges of `1..=max_bridge_size` business days in `year`.
///
/// # Errors
///
/// Returns an error if `year` cannot be represented.
pub fn find_potential_bridges(
    year: i32,
    max_bridge_size: u32,
    holidays: &HolidayCalendar,
) -> Result<Vec<BridgeCandidate>, ValidationError> {
    let (first, last) = year_bounds(year)?;
    let year_range = DateRange::new(first, last)?;

    let non_working: Vec<NaiveDate> = year_range
        .days()
        .filter(|day| is_non_working(*day, holidays))
        .collect();

    let mut bridges = Vec::new();
    for pair in non_working.windows(2) {
        let (preceding, following) = (pair[0], pair[1]);
        let gap = (following - preceding).num_days() - 1;
        if gap < 1 || gap > i64::from(max_bridge_size) {
            continue;
        }

        let range = DateRange::new(
            preceding + Duration::days(1),
            following - Duration::days(1),
        )?;
        // A bridge must be pure business days.
        if holidays.in_range(&range).next().is_some() {
            continue;
        }

        let gap_days = gap as u32;
        let preceding_is_holiday = is_holiday(preceding, holidays);
        let following_is_holiday = is_holiday(following, holidays);
        bridges.push(BridgeCandidate {
            range,
            gap_days,
            preceding,
            following,
            preceding_is_holiday,
            following_is_holiday,
            score: bridge_score(
                &range,
                gap_days,
                max_bridge_size,
                preceding_is_holiday,
                following_is_holiday,
            ),
        });
    }

    Ok(bridges)
}

pub fn find_bridge_periods(config: &OptimizationConfig) -> Result<Vec<ScoredPeriod>, ValidationError> {
    let mut periods = Vec::new();

    for year in config.years() {
        for bridge in find_potential_bridges(year, config.max_bridge_size, &config.holidays)? {
            let metrics = PeriodMetrics::for_range(&bridge.range, &config.holidays);
            periods.push(ScoredPeriod::new(
                metrics,
                bridge.score * config.score_weights.strategic,
                PeriodMetadata::Bridge {
                    preceding: bridge.preceding,
                    following: bridge.following,
                    preceding_is_holiday: bridge.preceding_is_holiday,
                    following_is_holiday: bridge.following_is_holiday,
                    gap_days: bridge.gap_days,
                },
            ));
        }
    }

    tracing::debug!(candidates = periods.len(), "bridge strategy scanned");
    Ok(periods)
}
