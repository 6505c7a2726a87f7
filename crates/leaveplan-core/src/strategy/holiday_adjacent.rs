//! Holiday-adjacency strategy.
//!
//! Builds periods that end the day before a holiday or start the day after
//! one, so the holiday extends the break for free.

use chrono::{Datelike, Duration, Weekday};
use serde::{Deserialize, Serialize};

use super::{PeriodMetadata, ScoredPeriod};
use crate::calendar::{DateRange, HolidayRecord};
use crate::config::OptimizationConfig;
use crate::error::ValidationError;
use crate::metrics::PeriodMetrics;

pub const ADJACENT_LENGTHS: [u32; 3] = [7, 10, 15];

pub const DEFAULT_IMPORTANCE: f64 = 0.3;

const WEEKDAY_BONUS: f64 = 0.3;
const WEEKEND_DAY_COST: f64 = 0.1;
/// Shortness bonus numerator; a 7-day period earns 0.1.
const SHORTNESS_FACTOR: f64 = 0.7;

/// Relative weight of well-known holidays, matched case-insensitively by name.
const HOLIDAY_IMPORTANCE: &[(&str, f64)] = &[
    ("natal", 1.0),
    ("confraternização universal", 0.9),
    ("carnaval", 0.9),
    ("sexta-feira santa", 0.7),
    ("corpus christi", 0.6),
    ("tiradentes", 0.5),
    ("dia do trabalho", 0.5),
    ("independência do brasil", 0.5),
    ("nossa senhora aparecida", 0.5),
    ("finados", 0.4),
    ("proclamação da república", 0.4),
    ("dia nacional de zumbi e da consciência negra", 0.4),
];

/// Which side of the holiday the period sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjacentSide {
    Before,
    After,
}

impl AdjacentSide {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

pub fn holiday_importance(name: &str) -> f64 {
    let name = name.trim().to_lowercase();
    HOLIDAY_IMPORTANCE
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, weight)| *weight)
        .unwrap_or(DEFAULT_IMPORTANCE)
}

fn adjacency_score(metrics: &PeriodMetrics, range: &DateRange, importance: f64, length: u32) -> f64 {
    let mut score = 1.0 + importance;
    if range.starts_on(Weekday::Mon) {
        score += WEEKDAY_BONUS;
    }
    if range.ends_on(Weekday::Fri) {
        score += WEEKDAY_BONUS;
    }
    score -= WEEKEND_DAY_COST * f64::from(metrics.weekend_days);
    score += SHORTNESS_FACTOR / f64::from(length);
    score.max(0.0)
}

fn candidate_range(holiday: &HolidayRecord, side: AdjacentSide, length: u32) -> DateRange {
    match side {
        AdjacentSide::Before => {
            DateRange::with_length(holiday.date - Duration::days(i64::from(length)), length)
        }
        AdjacentSide::After => DateRange::with_length(holiday.date + Duration::days(1), length),
    }
}

pub fn find_holiday_adjacent_periods(
    config: &OptimizationConfig,
) -> Result<Vec<ScoredPeriod>, ValidationError> {
    let years = config.years();
    let mut periods = Vec::new();

    for holiday in config.holidays.iter().filter(|h| years.contains(&h.date.year())) {
        let importance = holiday_importance(&holiday.name);

        for length in ADJACENT_LENGTHS {
            for side in [AdjacentSide::Before, AdjacentSide::After] {
                let range = candidate_range(holiday, side, length);
                if config.holidays.in_range(&range).next().is_some() {
                    continue;
                }

                let metrics = PeriodMetrics::for_range(&range, &config.holidays);
                let score = adjacency_score(&metrics, &range, importance, length);
                periods.push(ScoredPeriod::new(
                    metrics,
                    score * config.score_weights.holiday,
                    PeriodMetadata::HolidayAdjacent {
                        holiday_name: holiday.name.clone(),
                        holiday_date: holiday.date,
                        side,
                        importance,
                    },
                ));
            }
        }
    }

    tracing::debug!(candidates = periods.len(), "holiday-adjacent strategy scanned");
    Ok(periods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HolidayCalendar;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn importance_lookup() {
        assert_eq!(holiday_importance("Natal"), 1.0);
        assert_eq!(holiday_importance("  TIRADENTES "), 0.5);
        assert_eq!(holiday_importance("Aniversário da Cidade"), DEFAULT_IMPORTANCE);
    }

    #[test]
    fn builds_both_sides_for_each_length() {
        let cal = HolidayCalendar::new(vec![HolidayRecord::national(d(2024, 4, 21), "Tiradentes")]);
        let config = OptimizationConfig::new(2024, cal);
        let periods = find_holiday_adjacent_periods(&config).unwrap();

        assert_eq!(periods.len(), ADJACENT_LENGTHS.len() * 2);
        let after_7 = periods
            .iter()
            .find(|p| p.metrics.start == d(2024, 4, 22) && p.metrics.total_days == 7)
            .unwrap();
        assert_eq!(after_7.metrics.end, d(2024, 4, 28));

        let before_7 = periods
            .iter()
            .find(|p| p.metrics.end == d(2024, 4, 20) && p.metrics.total_days == 7)
            .unwrap();
        assert_eq!(before_7.metrics.start, d(2024, 4, 14));
    }

    #[test]
    fn discards_candidates_containing_other_holidays() {
        // Dia do Trabalho falls ten days after Tiradentes.
        let cal = HolidayCalendar::new(vec![
            HolidayRecord::national(d(2024, 4, 21), "Tiradentes"),
            HolidayRecord::national(d(2024, 5, 1), "Dia do Trabalho"),
        ]);
        let config = OptimizationConfig::new(2024, cal);
        let periods = find_holiday_adjacent_periods(&config).unwrap();

        for p in &periods {
            let range = p.range();
            assert!(config.holidays.in_range(&range).next().is_none(), "{range} contains a holiday");
        }
        // 10- and 15-day periods after Tiradentes would swallow May 1st.
        assert!(!periods.iter().any(|p| p.metrics.start == d(2024, 4, 22) && p.metrics.total_days >= 10));
    }

    #[test]
    fn score_follows_formula() {
        // Monday 2024-04-22 .. Sunday 2024-04-28 after Tiradentes.
        let cal = HolidayCalendar::new(vec![HolidayRecord::national(d(2024, 4, 21), "Tiradentes")]);
        let config = OptimizationConfig::new(2024, cal);
        let periods = find_holiday_adjacent_periods(&config).unwrap();
        let p = periods
            .iter()
            .find(|p| p.metrics.start == d(2024, 4, 22) && p.metrics.total_days == 7)
            .unwrap();

        // 1 + 0.5 + Monday 0.3 - 2 weekend days * 0.1 + 0.7 / 7
        assert!((p.raw_score - 1.7).abs() < 1e-9, "got {}", p.raw_score);
        assert!(matches!(
            p.metadata,
            PeriodMetadata::HolidayAdjacent { side: AdjacentSide::After, .. }
        ));
    }

    #[test]
    fn holidays_outside_years_are_ignored() {
        let cal = HolidayCalendar::new(vec![HolidayRecord::national(d(2023, 4, 21), "Tiradentes")]);
        let config = OptimizationConfig::new(2024, cal);
        assert!(find_holiday_adjacent_periods(&config).unwrap().is_empty());
    }
}
