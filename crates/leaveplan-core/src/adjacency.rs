//! Boundary adjacency and contiguous-block analysis.
//!
//! Walks outward from both ends of a period through weekends and holidays to
//! find the full non-working block the period would join.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{is_holiday, is_non_working, DateRange, HolidayCalendar};

/// Upper bound on days walked per side.
pub const MAX_ADJACENCY_WALK: u32 = 366;

/// Result of walking outward from a period's boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacency {
    /// A holiday was met walking backward from the day before the start.
    pub adjacent_before: bool,
    /// A holiday was met walking forward from the day after the end.
    pub adjacent_after: bool,
    /// Period days plus every non-working day walked on both sides.
    pub block_size: u32,
    pub days_before: u32,
    pub days_after: u32,
    pub holidays_before: Vec<NaiveDate>,
    pub holidays_after: Vec<NaiveDate>,
}

impl Adjacency {
    pub fn is_adjacent(&self) -> bool {
        self.adjacent_before || self.adjacent_after
    }

    /// Full non-working block: first walked day through last walked day.
    pub fn block(&self, period: &DateRange) -> DateRange {
        period_with_margins(period, self.days_before, self.days_after)
    }
}

fn period_with_margins(period: &DateRange, before: u32, after: u32) -> DateRange {
    let start = period.start() - chrono::Duration::days(i64::from(before));
    let end = period.end() + chrono::Duration::days(i64::from(after));
    DateRange::new(start, end).unwrap_or(*period)
}

/// Detect holiday adjacency on both sides of `period`.
pub fn detect_adjacency(period: &DateRange, holidays: &HolidayCalendar) -> Adjacency {
    let (days_before, holidays_before) = walk(period.start(), holidays, NaiveDate::pred_opt);
    let (days_after, holidays_after) = walk(period.end(), holidays, NaiveDate::succ_opt);

    Adjacency {
        adjacent_before: !holidays_before.is_empty(),
        adjacent_after: !holidays_after.is_empty(),
        block_size: period.total_days() + days_before + days_after,
        days_before,
        days_after,
        holidays_before,
        holidays_after,
    }
}

fn walk(
    from: NaiveDate,
    holidays: &HolidayCalendar,
    step: fn(&NaiveDate) -> Option<NaiveDate>,
) -> (u32, Vec<NaiveDate>) {
    let mut walked = 0;
    let mut found = Vec::new();
    let mut cursor = step(&from);

    while let Some(day) = cursor {
        if walked >= MAX_ADJACENCY_WALK || !is_non_working(day, holidays) {
            break;
        }
        if is_holiday(day, holidays) {
            found.push(day);
        }
        walked += 1;
        cursor = step(&day);
    }

    (walked, found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HolidayRecord;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekends_alone_are_not_adjacency() {
        // Mon 2024-07-08 .. Fri 2024-07-12, plain weekends on both sides.
        let period = DateRange::new(d(2024, 7, 8), d(2024, 7, 12)).unwrap();
        let adj = detect_adjacency(&period, &HolidayCalendar::empty());

        assert!(!adj.is_adjacent());
        assert_eq!(adj.days_before, 2);
        assert_eq!(adj.days_after, 2);
        assert_eq!(adj.block_size, 9);
    }

    #[test]
    fn holiday_behind_weekend_counts_as_adjacent() {
        // Period ends Friday; following Monday is a holiday.
        let cal = HolidayCalendar::new(vec![HolidayRecord::national(d(2024, 7, 15), "Test")]);
        let period = DateRange::new(d(2024, 7, 8), d(2024, 7, 12)).unwrap();
        let adj = detect_adjacency(&period, &cal);

        assert!(!adj.adjacent_before);
        assert!(adj.adjacent_after);
        assert_eq!(adj.holidays_after, vec![d(2024, 7, 15)]);
        assert_eq!(adj.days_after, 3);
        assert_eq!(adj.block_size, 2 + 5 + 3);
        assert_eq!(adj.block(&period), DateRange::new(d(2024, 7, 6), d(2024, 7, 15)).unwrap());
    }

    #[test]
    fn holiday_directly_before_start() {
        // Thursday holiday, period starts Friday.
        let cal = HolidayCalendar::new(vec![HolidayRecord::national(d(2024, 5, 30), "Corpus Christi")]);
        let period = DateRange::new(d(2024, 5, 31), d(2024, 6, 6)).unwrap();
        let adj = detect_adjacency(&period, &cal);

        assert!(adj.adjacent_before);
        assert_eq!(adj.days_before, 1);
    }

    #[test]
    fn walk_is_bounded() {
        // A year where every day is a holiday still terminates.
        let start = d(2029, 1, 1);
        let cal: HolidayCalendar = start
            .iter_days()
            .take(1200)
            .map(|day| HolidayRecord::national(day, "Everything"))
            .collect();
        let period = DateRange::single(d(2031, 1, 1));
        let adj = detect_adjacency(&period, &cal);

        assert_eq!(adj.days_before, MAX_ADJACENCY_WALK);
        assert_eq!(adj.days_after, MAX_ADJACENCY_WALK);
    }
}
