//! Period metrics: day counts, canonical score, rating and validity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{DateRange, HolidayCalendar};
use crate::error::ValidationError;
use crate::scoring::{canonical_score, count_days, DayCounts};

/// Shortest period that may be taken as leave.
pub const MIN_PERIOD_DAYS: u32 = 5;

pub const HIGH_RATING_THRESHOLD: f64 = 1.4;
pub const MEDIUM_RATING_THRESHOLD: f64 = 1.2;

const MIN_PERIOD_MESSAGE: &str = "Leave periods must be at least 5 consecutive days";

/// Categorical view of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    High,
    Medium,
    Low,
}

impl Rating {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_RATING_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_RATING_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Scored view of one inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_days: u32,
    pub business_days: u32,
    pub weekend_days: u32,
    pub holiday_days: u32,
    pub score: f64,
    pub rating: Rating,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_reason: Option<String>,
}

impl PeriodMetrics {
    /// Compute metrics for an already validated range.
    pub fn for_range(range: &DateRange, holidays: &HolidayCalendar) -> Self {
        let counts = count_days(range, holidays);
        let score = canonical_score(range, &counts, holidays);
        Self::from_parts(range, &counts, score)
    }

    fn from_parts(range: &DateRange, counts: &DayCounts, score: f64) -> Self {
        let valid = counts.total >= MIN_PERIOD_DAYS;
        Self {
            start: range.start(),
            end: range.end(),
            total_days: counts.total,
            business_days: counts.business,
            weekend_days: counts.weekend,
            holiday_days: counts.holiday,
            score,
            rating: Rating::from_score(score),
            valid,
            invalid_reason: (!valid).then(|| MIN_PERIOD_MESSAGE.to_string()),
        }
    }

    pub fn range(&self) -> DateRange {
        // Constructed from a DateRange, so the order always holds.
        DateRange::new(self.start, self.end).unwrap_or_else(|_| DateRange::single(self.start))
    }

    pub fn non_working_days(&self) -> u32 {
        self.weekend_days + self.holiday_days
    }
}

/// Compute metrics for `[start, end]`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidRange`] when `end < start`. Periods that
/// are too short are not an error; they come back with `valid == false`.
pub fn compute_metrics(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &HolidayCalendar,
) -> Result<PeriodMetrics, ValidationError> {
    let range = DateRange::new(start, end)?;
    Ok(PeriodMetrics::for_range(&range, holidays))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HolidayRecord;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn new_year_2024() -> HolidayCalendar {
        HolidayCalendar::new(vec![HolidayRecord::national(d(2024, 1, 1), "Confraternização Universal")])
    }

    #[test]
    fn first_week_of_2024() {
        let m = compute_metrics(d(2024, 1, 1), d(2024, 1, 5), &new_year_2024()).unwrap();
        assert_eq!(m.total_days, 5);
        assert_eq!(m.holiday_days, 1);
        assert_eq!(m.weekend_days, 0);
        assert_eq!(m.business_days, 4);
        assert!(m.valid);
        assert!(m.invalid_reason.is_none());
        // 1 + 1/4 + 0.15 - 0.35/4
        assert!((m.score - 1.3125).abs() < 1e-9, "got {}", m.score);
        assert_eq!(m.rating, Rating::Medium);
    }

    #[test]
    fn short_period_is_invalid_not_error() {
        let m = compute_metrics(d(2024, 3, 4), d(2024, 3, 7), &HolidayCalendar::empty()).unwrap();
        assert_eq!(m.total_days, 4);
        assert!(!m.valid);
        assert!(m.invalid_reason.as_deref().unwrap().contains("at least 5"));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = compute_metrics(d(2024, 3, 7), d(2024, 3, 4), &HolidayCalendar::empty()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidRange {
                start: d(2024, 3, 7),
                end: d(2024, 3, 4)
            }
        );
    }

    #[test]
    fn holiday_on_weekend_counts_once() {
        let cal = HolidayCalendar::new(vec![HolidayRecord::national(d(2024, 9, 7), "Independência do Brasil")]);
        let m = compute_metrics(d(2024, 9, 2), d(2024, 9, 8), &cal).unwrap();
        assert_eq!(m.total_days, 7);
        assert_eq!(m.holiday_days, 1);
        assert_eq!(m.weekend_days, 1);
        assert_eq!(m.business_days, 5);
    }

    #[test]
    fn rating_thresholds() {
        assert_eq!(Rating::from_score(1.4), Rating::High);
        assert_eq!(Rating::from_score(1.39), Rating::Medium);
        assert_eq!(Rating::from_score(1.2), Rating::Medium);
        assert_eq!(Rating::from_score(1.19), Rating::Low);
    }
}
