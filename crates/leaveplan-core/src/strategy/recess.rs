//! Institutional-recess strategy.
//!
//! The recess runs from December 20 through January 6 of the following year.
//! Christmas and New Year's Day are reserved, so no candidate may cover them.
//! Unlike the other strategies, longer use of the recess scores higher.

use chrono::{Datelike, NaiveDate};

use super::{PeriodMetadata, ScoredPeriod};
use crate::calendar::{year_bounds, DateRange};
use crate::config::OptimizationConfig;
use crate::error::ValidationError;
use crate::metrics::PeriodMetrics;

pub const RECESS_LENGTHS: [u32; 4] = [5, 7, 10, 15];

const BASE_SCORE: f64 = 1.0;
const RECESS_BONUS: f64 = 0.5;
const FULL_RECESS_BONUS: f64 = 0.3;
const LENGTH_BONUS: f64 = 0.5;
const EDGE_BONUS: f64 = 0.2;
const EDGE_TOLERANCE_DAYS: i64 = 3;

/// Recess window that opens in December of `year`.
pub fn recess_window(year: i32) -> Result<DateRange, ValidationError> {
    year_bounds(year)?;
    let start = NaiveDate::from_ymd_opt(year, 12, 20).ok_or(ValidationError::YearOutOfRange(year))?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 6).ok_or(ValidationError::YearOutOfRange(year))?;
    DateRange::new(start, end)
}

/// Christmas Day and New Year's Day.
pub fn is_protected_day(date: NaiveDate) -> bool {
    matches!((date.month(), date.day()), (12, 25) | (1, 1))
}

fn recess_score(range: &DateRange, recess: &DateRange, length: u32) -> (f64, bool) {
    let full = recess.contains(range.start()) && recess.contains(range.end());

    let mut score = BASE_SCORE + RECESS_BONUS;
    if full {
        score += FULL_RECESS_BONUS;
    }
    score += f64::from(length) / 30.0 * LENGTH_BONUS;
    if (range.start() - recess.start()).num_days().abs() <= EDGE_TOLERANCE_DAYS {
        score += EDGE_BONUS;
    }
    if (range.end() - recess.end()).num_days().abs() <= EDGE_TOLERANCE_DAYS {
        score += EDGE_BONUS;
    }
    (score, full)
}

pub fn find_recess_periods(config: &OptimizationConfig) -> Result<Vec<ScoredPeriod>, ValidationError> {
    let mut periods = Vec::new();

    for year in config.years() {
        let recess = recess_window(year)?;

        // Starts slide across the whole window; ends may run past it.
        for start in recess.days() {
            for length in RECESS_LENGTHS {
                let range = DateRange::with_length(start, length);
                if range.days().any(is_protected_day) {
                    continue;
                }

                let (score, full_recess) = recess_score(&range, &recess, length);
                let metrics = PeriodMetrics::for_range(&range, &config.holidays);
                periods.push(ScoredPeriod::new(
                    metrics,
                    score * config.score_weights.recess,
                    PeriodMetadata::Recess {
                        full_recess,
                        recess,
                    },
                ));
            }
        }
    }

    tracing::debug!(candidates = periods.len(), "recess strategy scanned");
    Ok(periods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HolidayCalendar;
    use crate::config::ScoreWeights;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn window_spans_year_end() {
        let recess = recess_window(2024).unwrap();
        assert_eq!(recess.start(), d(2024, 12, 20));
        assert_eq!(recess.end(), d(2025, 1, 6));
        assert_eq!(recess.total_days(), 18);
    }

    #[test]
    fn never_covers_protected_days() {
        let config = OptimizationConfig::new(2024, HolidayCalendar::empty());
        let periods = find_recess_periods(&config).unwrap();

        assert!(!periods.is_empty());
        for p in &periods {
            assert!(!p.range().days().any(is_protected_day), "{} covers a protected day", p.range());
        }
    }

    #[test]
    fn full_flag_and_score() {
        let config = OptimizationConfig::new(2024, HolidayCalendar::empty());
        let periods = find_recess_periods(&config).unwrap();

        // Dec 20..24: full, starts on recess start.
        let opening = periods
            .iter()
            .find(|p| p.metrics.start == d(2024, 12, 20) && p.metrics.total_days == 5)
            .unwrap();
        assert!(matches!(opening.metadata, PeriodMetadata::Recess { full_recess: true, .. }));
        // 1.0 + 0.5 + 0.3 + 5/30*0.5 + 0.2
        assert!((opening.raw_score - (2.0 + 5.0 / 60.0)).abs() < 1e-9);

        // Jan 2..16: runs past the window.
        let late = periods
            .iter()
            .find(|p| p.metrics.start == d(2025, 1, 2) && p.metrics.total_days == 15)
            .unwrap();
        assert!(matches!(late.metadata, PeriodMetadata::Recess { full_recess: false, .. }));
    }

    #[test]
    fn recess_weight_multiplies() {
        let weights = ScoreWeights {
            recess: 2.0,
            ..Default::default()
        };
        let base = find_recess_periods(&OptimizationConfig::new(2024, HolidayCalendar::empty())).unwrap();
        let doubled = find_recess_periods(
            &OptimizationConfig::new(2024, HolidayCalendar::empty()).with_weights(weights),
        )
        .unwrap();

        assert_eq!(base.len(), doubled.len());
        for (a, b) in base.iter().zip(&doubled) {
            assert!((b.raw_score - 2.0 * a.raw_score).abs() < 1e-9);
        }
    }
}
