//! Fractionation search.
//!
//! Two questions about dividing leave:
//!
//! - [`find_optimal_split`]: is one long period better taken as two halves?
//! - [`find_optimal_fractioned_periods`]: which `count` non-overlapping
//!   windows of a fixed length make the best use of a year?
//!
//! Both use the canonical score from [`crate::scoring`].

use std::cmp::Ordering;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{year_bounds, DateRange, HolidayCalendar};
use crate::error::ValidationError;
use crate::metrics::{PeriodMetrics, MIN_PERIOD_DAYS};
use crate::scoring::count_days;

/// Shortest period worth splitting: two halves of at least the minimum.
pub const MIN_SPLIT_DAYS: u32 = 2 * MIN_PERIOD_DAYS;

const FLEXIBILITY_BONUS: f64 = 0.03;
const MIN_DISTRIBUTION_RATIO: f64 = 0.3;
const BALANCED_DURATION_RATIO: f64 = 0.65;

const WEEKEND_RESTART_PENALTY: f64 = 0.1;
const SPLIT_BOUNDARY_BONUS: f64 = 0.05;

const WEEKEND_START_PENALTY: f64 = 0.3;
const WINDOW_EDGE_BONUS: f64 = 0.1;
const SHORT_WINDOW_DAYS: u32 = 5;
const SHORT_WINDOW_WEEKEND_COST: f64 = 0.15;
const WEEKDAY_HOLIDAY_BONUS: f64 = 0.15;

/// Two halves of a period and their combined score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitResult {
    pub first: PeriodMetrics,
    pub second: PeriodMetrics,
    pub combined_score: f64,
}

/// Best non-overlapping windows found across a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionationResult {
    /// Selected windows, in date order.
    pub periods: Vec<PeriodMetrics>,
    /// Mean canonical score of the selected windows.
    pub combined_efficiency: f64,
    /// `(combined_efficiency - 1) * 100`.
    pub efficiency_gain: f64,
}

fn is_weekend_day(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// `1 - |a - b| / (a + b)`; two halves with no non-working days are
/// perfectly balanced.
fn distribution_ratio(a: u32, b: u32) -> f64 {
    let total = a + b;
    if total == 0 {
        return 1.0;
    }
    1.0 - f64::from(a.abs_diff(b)) / f64::from(total)
}

fn split_adjustment(first: &DateRange, second: &DateRange) -> f64 {
    let mut adjustment = 0.0;
    if is_weekend_day(second.start().weekday()) {
        adjustment -= WEEKEND_RESTART_PENALTY;
    }
    if first.ends_on(Weekday::Fri) {
        adjustment += SPLIT_BOUNDARY_BONUS;
    }
    if second.starts_on(Weekday::Mon) {
        adjustment += SPLIT_BOUNDARY_BONUS;
    }
    for half in [first, second] {
        if half.is_monday_to_friday() {
            adjustment += SPLIT_BOUNDARY_BONUS;
        }
    }

    let (a, b) = (first.total_days(), second.total_days());
    if f64::from(a.min(b)) / f64::from(a.max(b)) >= BALANCED_DURATION_RATIO {
        adjustment += SPLIT_BOUNDARY_BONUS;
    }
    adjustment
}

/// Best way to take `period` as two separate halves.
///
/// Only periods of at least [`MIN_SPLIT_DAYS`] days are considered, and each
/// half keeps at least [`MIN_PERIOD_DAYS`]. A split qualifies only when its
/// non-working days are spread across both halves (distribution ratio above
/// `0.3`). The best qualifying split is returned if its combined score beats
/// the period taken whole.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidRange`] if the period ends before it starts.
pub fn find_optimal_split(
    period: &PeriodMetrics,
    holidays: &HolidayCalendar,
) -> Result<Option<SplitResult>, ValidationError> {
    let range = DateRange::new(period.start, period.end)?;
    let total = range.total_days();
    if total < MIN_SPLIT_DAYS {
        return Ok(None);
    }

    let whole = PeriodMetrics::for_range(&range, holidays).score;
    let mut best: Option<SplitResult> = None;

    for first_days in MIN_PERIOD_DAYS..=total - MIN_PERIOD_DAYS {
        let Some((a, b)) = range.split_at(first_days) else {
            continue;
        };
        let first = PeriodMetrics::for_range(&a, holidays);
        let second = PeriodMetrics::for_range(&b, holidays);

        if distribution_ratio(first.non_working_days(), second.non_working_days())
            <= MIN_DISTRIBUTION_RATIO
        {
            continue;
        }

        let weighted = (first.score * f64::from(first.total_days)
            + second.score * f64::from(second.total_days))
            / f64::from(total);
        let combined_score = weighted + FLEXIBILITY_BONUS + split_adjustment(&a, &b);

        if combined_score <= whole {
            continue;
        }
        if best.as_ref().map_or(true, |b| combined_score > b.combined_score) {
            best = Some(SplitResult {
                first,
                second,
                combined_score,
            });
        }
    }

    if let Some(split) = &best {
        tracing::debug!(
            period = %range,
            split_at = %split.second.start,
            combined = split.combined_score,
            "split found"
        );
    }
    Ok(best)
}

/// Ranking bonus for a fixed-length window in the N-period search.
fn window_bonus(range: &DateRange, weekend_days: u32, weekday_holidays: u32) -> f64 {
    let mut bonus = 0.0;
    if is_weekend_day(range.start().weekday()) {
        bonus -= WEEKEND_START_PENALTY;
    }
    if range.starts_on(Weekday::Mon) {
        bonus += WINDOW_EDGE_BONUS;
    }
    if range.ends_on(Weekday::Fri) {
        bonus += WINDOW_EDGE_BONUS;
    }
    if range.is_monday_to_friday() {
        bonus += WINDOW_EDGE_BONUS;
    }
    if range.total_days() == SHORT_WINDOW_DAYS {
        bonus -= SHORT_WINDOW_WEEKEND_COST * f64::from(weekend_days);
    }
    bonus + WEEKDAY_HOLIDAY_BONUS * f64::from(weekday_holidays)
}

/// Selection priority; lower is picked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    /// Monday to Friday with every day a business day
    CleanWeek,
    /// Contains a holiday on a weekday
    WeekdayHoliday,
    Other,
}

struct Window {
    range: DateRange,
    metrics: PeriodMetrics,
    rank: f64,
    tier: Tier,
}

fn by_tier_then_rank(a: &Window, b: &Window) -> Ordering {
    a.tier
        .cmp(&b.tier)
        .then_with(|| b.rank.total_cmp(&a.rank))
        .then_with(|| a.range.start().cmp(&b.range.start()))
}

/// Best `count` non-overlapping `length`-day windows inside `year`.
///
/// Returns `Ok(None)` when no window fits in the year.
///
/// # Errors
///
/// Returns an error if `count` or `length` is zero, or `year` is out of range.
pub fn find_optimal_fractioned_periods(
    year: i32,
    count: usize,
    length: u32,
    holidays: &HolidayCalendar,
) -> Result<Option<FractionationResult>, ValidationError> {
    if count == 0 {
        return Err(ValidationError::InvalidValue {
            field: "count".into(),
            message: "must be at least 1".into(),
        });
    }
    if length == 0 {
        return Err(ValidationError::InvalidValue {
            field: "length".into(),
            message: "must be at least 1".into(),
        });
    }

    let (first, last) = year_bounds(year)?;
    let year_range = DateRange::new(first, last)?;
    if length > year_range.total_days() {
        return Ok(None);
    }

    let mut windows = Vec::new();
    for start in year_range.days() {
        let range = DateRange::with_length(start, length);
        if range.end() > last {
            break;
        }
        let counts = count_days(&range, holidays);
        let metrics = PeriodMetrics::for_range(&range, holidays);
        let tier = if range.is_monday_to_friday() && counts.business == counts.total {
            Tier::CleanWeek
        } else if counts.weekday_holiday > 0 {
            Tier::WeekdayHoliday
        } else {
            Tier::Other
        };
        windows.push(Window {
            range,
            rank: metrics.score + window_bonus(&range, counts.weekend, counts.weekday_holiday),
            metrics,
            tier,
        });
    }
    windows.sort_by(by_tier_then_rank);

    let mut selected: Vec<Window> = Vec::with_capacity(count);
    for window in windows {
        if selected.len() == count {
            break;
        }
        if selected.iter().any(|s| s.range.overlaps(&window.range)) {
            continue;
        }
        selected.push(window);
    }

    if selected.is_empty() {
        return Ok(None);
    }
    selected.sort_by_key(|w| w.range.start());

    let periods: Vec<PeriodMetrics> = selected.into_iter().map(|w| w.metrics).collect();
    let combined_efficiency =
        periods.iter().map(|p| p.score).sum::<f64>() / periods.len() as f64;

    tracing::debug!(year, count, length, selected = periods.len(), combined_efficiency, "fractionation done");
    Ok(Some(FractionationResult {
        periods,
        combined_efficiency,
        efficiency_gain: (combined_efficiency - 1.0) * 100.0,
    }))
}
