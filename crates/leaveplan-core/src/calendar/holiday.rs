//! Holiday records and the immutable holiday snapshot.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DateRange;

/// Category tag supplied by the holiday store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayCategory {
    National,
    Judicial,
    Recess,
}

/// A single holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub date: NaiveDate,
    pub name: String,
    pub category: HolidayCategory,
    /// Free-form coverage note (e.g. the court or region it applies to).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<String>,
}

impl HolidayRecord {
    /// Create a national holiday.
    pub fn national(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            category: HolidayCategory::National,
            coverage: None,
        }
    }

    /// Create a holiday with an explicit category.
    pub fn new(date: NaiveDate, name: impl Into<String>, category: HolidayCategory) -> Self {
        Self {
            date,
            name: name.into(),
            category,
            coverage: None,
        }
    }

    pub fn with_coverage(mut self, coverage: impl Into<String>) -> Self {
        self.coverage = Some(coverage.into());
        self
    }
}

/// Immutable, date-indexed snapshot of holidays.
///
/// Built once per request from the records handed over by the holiday store.
/// Records are kept sorted by date and de-duplicated by calendar day; when two
/// records share a date, the one supplied first is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<HolidayRecord>", into = "Vec<HolidayRecord>")]
pub struct HolidayCalendar {
    records: Vec<HolidayRecord>,
    index: HashMap<NaiveDate, usize>,
}

impl HolidayCalendar {
    pub fn new(records: impl IntoIterator<Item = HolidayRecord>) -> Self {
        let mut records: Vec<HolidayRecord> = records.into_iter().collect();
        // Stable sort keeps input order among equal dates, so dedup keeps the first.
        records.sort_by_key(|r| r.date);
        records.dedup_by_key(|r| r.date);

        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.date, i))
            .collect();

        Self { records, index }
    }

    /// An empty snapshot (weekends are then the only non-working days).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up the holiday on a calendar day.
    pub fn get(&self, date: NaiveDate) -> Option<&HolidayRecord> {
        self.index.get(&date).map(|&i| &self.records[i])
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index.contains_key(&date)
    }

    /// All records, sorted by date.
    pub fn records(&self) -> &[HolidayRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &HolidayRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Holidays falling inside an inclusive range.
    pub fn in_range(&self, range: &DateRange) -> impl Iterator<Item = &HolidayRecord> {
        let (start, end) = (range.start(), range.end());
        let from = self.records.partition_point(|r| r.date < start);
        self.records[from..]
            .iter()
            .take_while(move |r| r.date <= end)
    }

    /// Holidays in a calendar year.
    pub fn in_year(&self, year: i32) -> impl Iterator<Item = &HolidayRecord> {
        self.records.iter().filter(move |r| r.date.year() == year)
    }

    /// Combine two snapshots; on a shared date the record from `self` wins.
    pub fn merge(&self, other: &HolidayCalendar) -> HolidayCalendar {
        HolidayCalendar::new(self.records.iter().chain(other.records.iter()).cloned())
    }
}

impl From<Vec<HolidayRecord>> for HolidayCalendar {
    fn from(records: Vec<HolidayRecord>) -> Self {
        Self::new(records)
    }
}

impl From<HolidayCalendar> for Vec<HolidayRecord> {
    fn from(calendar: HolidayCalendar) -> Self {
        calendar.records
    }
}

impl FromIterator<HolidayRecord> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = HolidayRecord>>(iter: I) -> Self {
        Self::new(iter)
    }
}
