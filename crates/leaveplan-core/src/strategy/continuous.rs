//! Continuous-period strategy: the exhaustive plain-span baseline.
//!
//! Every business day of every searched year is tried as a start date for each
//! length in [`CONTINUOUS_LENGTHS`]. The raw score is the canonical score plus
//! a small positional bonus; no adjacency search beyond what the metrics
//! already include.

use chrono::Weekday;

use super::{PeriodMetadata, ScoredPeriod};
use crate::calendar::{is_business_day, year_bounds, DateRange};
use crate::config::OptimizationConfig;
use crate::error::ValidationError;
use crate::metrics::PeriodMetrics;

pub const CONTINUOUS_LENGTHS: [u32; 6] = [5, 10, 15, 20, 25, 30];

const MONDAY_START_BONUS: f64 = 0.1;
const FRIDAY_END_BONUS: f64 = 0.1;

/// Strategic bonus for plain spans.
pub fn continuous_positional_bonus(range: &DateRange) -> f64 {
    let mut bonus = 0.0;
    if range.starts_on(Weekday::Mon) {
        bonus += MONDAY_START_BONUS;
    }
    if range.ends_on(Weekday::Fri) {
        bonus += FRIDAY_END_BONUS;
    }
    bonus
}

pub fn find_continuous_periods(
    config: &OptimizationConfig,
) -> Result<Vec<ScoredPeriod>, ValidationError> {
    let weights = &config.score_weights;
    let mut periods = Vec::new();

    for year in config.years() {
        let (first, last) = year_bounds(year)?;
        let year_range = DateRange::new(first, last)?;

        for start in year_range.days() {
            if !is_business_day(start, &config.holidays) {
                continue;
            }
            for length in CONTINUOUS_LENGTHS {
                let range = DateRange::with_length(start, length);
                if range.end() > last {
                    break;
                }
                let metrics = PeriodMetrics::for_range(&range, &config.holidays);
                let raw_score = metrics.score * weights.efficiency
                    + continuous_positional_bonus(&range) * weights.strategic;
                periods.push(ScoredPeriod::new(
                    metrics,
                    raw_score,
                    PeriodMetadata::Continuous { length },
                ));
            }
        }
    }

    tracing::debug!(candidates = periods.len(), "continuous strategy scanned");
    Ok(periods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{HolidayCalendar, HolidayRecord};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn emits_every_length_for_each_business_start() {
        let config = OptimizationConfig::new(2024, HolidayCalendar::empty());
        let periods = find_continuous_periods(&config).unwrap();

        // 2024 has 262 weekdays; late-December starts drop the longer lengths.
        let starting_jan_2: Vec<_> = periods.iter().filter(|p| p.metrics.start == d(2024, 1, 2)).collect();
        assert_eq!(starting_jan_2.len(), CONTINUOUS_LENGTHS.len());
        assert!(periods.iter().all(|p| p.metrics.end <= d(2024, 12, 31)));
        assert!(periods.iter().all(|p| p.metrics.business_days > 0));
    }

    #[test]
    fn never_starts_on_non_working_day() {
        let cal = HolidayCalendar::new(vec![HolidayRecord::national(d(2024, 5, 1), "Dia do Trabalho")]);
        let config = OptimizationConfig::new(2024, cal);
        let periods = find_continuous_periods(&config).unwrap();

        assert!(periods.iter().all(|p| p.metrics.start != d(2024, 5, 1)));
        assert!(periods.iter().all(|p| p.metrics.start != d(2024, 5, 4)));
    }

    #[test]
    fn raw_score_adds_weighted_positional_bonus() {
        let config = OptimizationConfig::new(2024, HolidayCalendar::empty());
        let periods = find_continuous_periods(&config).unwrap();
        let week = periods
            .iter()
            .find(|p| p.metrics.start == d(2024, 7, 8) && p.metrics.total_days == 5)
            .unwrap();

        // canonical 1.15 plus Monday and Friday bonuses
        assert!((week.raw_score - 1.35).abs() < 1e-9);
    }

    #[test]
    fn invalid_year_is_an_error() {
        let config = OptimizationConfig::new(i32::MAX, HolidayCalendar::empty());
        assert!(find_continuous_periods(&config).is_err());
    }
}
