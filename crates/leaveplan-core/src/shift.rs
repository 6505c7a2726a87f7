//! Shift search: slide a period a few days to a better position.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{DateRange, HolidayCalendar};
use crate::error::ValidationError;
use crate::metrics::PeriodMetrics;

/// Smallest improvement worth suggesting.
pub const MIN_SHIFT_GAIN: f64 = 0.03;

const GOOD_EDGE_BONUS: f64 = 0.3;
const WRONG_EDGE_PENALTY: f64 = 0.3;
const WEEKEND_EDGE_PENALTY: f64 = 0.5;
const PERFECT_WEEK_BONUS: f64 = 0.2;
const NEARBY_HOLIDAY_BONUS: f64 = 0.15;
const NEARBY_HOLIDAY_DAYS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftResult {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Improvement of score plus positional adjustment over the original.
    pub gain: f64,
    /// Negative shifts move the period earlier.
    pub days_shifted: i64,
    pub metrics: PeriodMetrics,
}

/// Positional adjustment used to compare shifted windows.
///
/// A period should start on Monday and end on Friday; starting on a Friday or
/// ending on a Monday wastes the weekend, and starting or ending on a weekend
/// wastes leave. Holidays just outside the period are rewarded too.
pub fn positional_score(range: &DateRange, holidays: &HolidayCalendar) -> f64 {
    let mut score = match range.start().weekday() {
        Weekday::Mon => GOOD_EDGE_BONUS,
        Weekday::Fri => -WRONG_EDGE_PENALTY,
        Weekday::Sat | Weekday::Sun => -WEEKEND_EDGE_PENALTY,
        _ => 0.0,
    };
    score += match range.end().weekday() {
        Weekday::Fri => GOOD_EDGE_BONUS,
        Weekday::Mon => -WRONG_EDGE_PENALTY,
        Weekday::Sat | Weekday::Sun => -WEEKEND_EDGE_PENALTY,
        _ => 0.0,
    };
    if range.is_monday_to_friday() {
        score += PERFECT_WEEK_BONUS;
    }

    let nearby = (1..=NEARBY_HOLIDAY_DAYS)
        .flat_map(|n| {
            [
                range.start().checked_sub_signed(Duration::days(n)),
                range.end().checked_add_signed(Duration::days(n)),
            ]
        })
        .flatten()
        .filter(|day| holidays.contains(*day))
        .count();
    score + NEARBY_HOLIDAY_BONUS * nearby as f64
}

fn shifted(range: &DateRange, days: i64) -> Option<DateRange> {
    let start = range.start().checked_add_signed(Duration::days(days))?;
    let end = range.end().checked_add_signed(Duration::days(days))?;
    DateRange::new(start, end).ok()
}

/// Shift offsets nearest first: -1, +1, -2, +2, ...
fn offsets(max_window: u32) -> impl Iterator<Item = i64> {
    (1..=i64::from(max_window)).flat_map(|n| [-n, n])
}

/// Best same-length window within `max_window` days of `period`.
///
/// Every shift is scored as canonical score plus [`positional_score`]. The
/// best gain wins, ties go to the better positional score and then to the
/// smaller shift. `Ok(None)` unless the gain exceeds [`MIN_SHIFT_GAIN`].
///
/// # Errors
///
/// Returns [`ValidationError::InvalidRange`] if the period ends before it starts.
pub fn find_optimal_shift(
    period: &PeriodMetrics,
    max_window: u32,
    holidays: &HolidayCalendar,
) -> Result<Option<ShiftResult>, ValidationError> {
    let range = DateRange::new(period.start, period.end)?;
    let base = PeriodMetrics::for_range(&range, holidays).score + positional_score(&range, holidays);

    let mut best: Option<(ShiftResult, f64)> = None;
    for days in offsets(max_window) {
        let Some(candidate) = shifted(&range, days) else {
            continue;
        };
        let metrics = PeriodMetrics::for_range(&candidate, holidays);
        let positional = positional_score(&candidate, holidays);
        let gain = metrics.score + positional - base;

        let better = match &best {
            None => true,
            Some((current, current_positional)) => {
                gain > current.gain || (gain == current.gain && positional > *current_positional)
            }
        };
        if better {
            best = Some((
                ShiftResult {
                    start: candidate.start(),
                    end: candidate.end(),
                    gain,
                    days_shifted: days,
                    metrics,
                },
                positional,
            ));
        }
    }

    Ok(best
        .map(|(result, _)| result)
        .filter(|result| result.gain > MIN_SHIFT_GAIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HolidayRecord;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn metrics(start: NaiveDate, end: NaiveDate) -> PeriodMetrics {
        PeriodMetrics::for_range(&DateRange::new(start, end).unwrap(), &HolidayCalendar::empty())
    }

    #[test]
    fn offsets_alternate_outward() {
        assert_eq!(offsets(3).collect::<Vec<_>>(), vec![-1, 1, -2, 2, -3, 3]);
        assert_eq!(offsets(0).count(), 0);
    }

    #[test]
    fn positional_score_rewards_clean_week_and_nearby_holiday() {
        let week = DateRange::new(d(2024, 7, 8), d(2024, 7, 12)).unwrap();
        assert!((positional_score(&week, &HolidayCalendar::empty()) - 0.8).abs() < 1e-9);

        let cal = HolidayCalendar::new(vec![HolidayRecord::national(d(2024, 7, 15), "Monday")]);
        assert!((positional_score(&week, &cal) - 0.95).abs() < 1e-9);

        let weekend_end = DateRange::new(d(2024, 7, 10), d(2024, 7, 14)).unwrap();
        assert!((positional_score(&weekend_end, &HolidayCalendar::empty()) + 0.5).abs() < 1e-9);
    }

    #[test]
    fn slides_back_to_monday() {
        // Wed 2024-07-10 .. Sun 2024-07-14
        let period = metrics(d(2024, 7, 10), d(2024, 7, 14));
        let shift = find_optimal_shift(&period, 3, &HolidayCalendar::empty()).unwrap().unwrap();

        assert_eq!(shift.days_shifted, -2);
        assert_eq!(shift.start, d(2024, 7, 8));
        assert_eq!(shift.end, d(2024, 7, 12));
        // (1.15 + 0.8) - (1.0 - 0.5)
        assert!((shift.gain - 1.45).abs() < 1e-9, "got {}", shift.gain);
        assert_eq!(shift.metrics.total_days, 5);
    }

    #[test]
    fn clean_week_stays_put() {
        let period = metrics(d(2024, 7, 8), d(2024, 7, 12));
        assert!(find_optimal_shift(&period, 2, &HolidayCalendar::empty()).unwrap().is_none());
    }

    #[test]
    fn zero_window_finds_nothing() {
        let period = metrics(d(2024, 7, 10), d(2024, 7, 14));
        assert!(find_optimal_shift(&period, 0, &HolidayCalendar::empty()).unwrap().is_none());
    }
}
