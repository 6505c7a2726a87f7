//! Inclusive date ranges.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An inclusive `[start, end]` range of calendar days with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawRange> for DateRange {
    type Error = ValidationError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Create a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range of `days` calendar days beginning at `start`. Zero is treated as one.
    pub fn with_length(start: NaiveDate, days: u32) -> Self {
        let end = start + Duration::days(i64::from(days.max(1)) - 1);
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days, both ends included.
    pub fn total_days(&self) -> u32 {
        // Bounded by the chrono calendar span, always fits.
        ((self.end - self.start).num_days() + 1) as u32
    }

    /// Iterate every day in the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.total_days() as usize)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Inclusive-bound overlap: true when the two ranges share at least one day.
    ///
    /// A range ending on day N and another starting on N+1 do not overlap; a
    /// range ending exactly on the other's start date does.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Same length, moved by `days` (negative moves earlier).
    pub fn shifted(&self, days: i64) -> Self {
        Self {
            start: self.start + Duration::days(days),
            end: self.end + Duration::days(days),
        }
    }

    /// First `days` days of this range plus the remainder, or `None` when
    /// either side would be empty.
    pub fn split_at(&self, days: u32) -> Option<(DateRange, DateRange)> {
        if days == 0 || days >= self.total_days() {
            return None;
        }
        let first = DateRange::with_length(self.start, days);
        let second = DateRange {
            start: first.end + Duration::days(1),
            end: self.end,
        };
        Some((first, second))
    }

    pub fn starts_on(&self, weekday: Weekday) -> bool {
        self.start.weekday() == weekday
    }

    pub fn ends_on(&self, weekday: Weekday) -> bool {
        self.end.weekday() == weekday
    }

    /// Starts on a Monday and ends on a Friday.
    pub fn is_monday_to_friday(&self) -> bool {
        self.starts_on(Weekday::Mon) && self.ends_on(Weekday::Fri)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn r(a: (u32, u32), b: (u32, u32)) -> DateRange {
        DateRange::new(d(2024, a.0, a.1), d(2024, b.0, b.1)).unwrap()
    }

    /// Containment form: either endpoint of one range inside the other, or the
    /// other's start inside the first.
    fn overlaps_by_containment(a: &DateRange, b: &DateRange) -> bool {
        b.contains(a.start()) || b.contains(a.end()) || a.contains(b.start())
    }

    #[test]
    fn rejects_end_before_start() {
        let err = DateRange::new(d(2024, 3, 10), d(2024, 3, 9)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRange { .. }));
    }

    #[test]
    fn single_day_range_is_valid() {
        let range = DateRange::new(d(2024, 3, 10), d(2024, 3, 10)).unwrap();
        assert_eq!(range.total_days(), 1);
        assert_eq!(range.days().count(), 1);
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        let a = r((7, 1), (7, 5));
        let b = r((7, 6), (7, 10));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn shared_endpoint_overlaps() {
        let a = r((7, 1), (7, 5));
        let b = r((7, 5), (7, 10));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn nested_ranges_overlap() {
        let outer = r((7, 1), (7, 31));
        let inner = r((7, 10), (7, 12));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn overlap_matches_containment_form_at_every_boundary() {
        let base = r((3, 10), (3, 14));
        for start_offset in -8i64..=8 {
            for len in 1u32..=7 {
                let other = DateRange::with_length(base.start() + Duration::days(start_offset), len);
                assert_eq!(
                    base.overlaps(&other),
                    overlaps_by_containment(&base, &other),
                    "mismatch for {other}"
                );
                assert_eq!(
                    other.overlaps(&base),
                    overlaps_by_containment(&other, &base),
                    "mismatch for {other} (reversed)"
                );
            }
        }
    }

    #[test]
    fn split_at_keeps_both_sides_contiguous() {
        let range = r((7, 1), (7, 10));
        let (first, second) = range.split_at(4).unwrap();
        assert_eq!(first, r((7, 1), (7, 4)));
        assert_eq!(second, r((7, 5), (7, 10)));
        assert!(range.split_at(0).is_none());
        assert!(range.split_at(10).is_none());
    }

    #[test]
    fn deserialize_validates_order() {
        let bad = serde_json::json!({ "start": "2024-05-10", "end": "2024-05-01" });
        assert!(serde_json::from_value::<DateRange>(bad).is_err());

        let good = serde_json::json!({ "start": "2024-05-01", "end": "2024-05-10" });
        let range: DateRange = serde_json::from_value(good).unwrap();
        assert_eq!(range.total_days(), 10);
    }
}
