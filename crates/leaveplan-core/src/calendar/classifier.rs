//! Day classification against a holiday snapshot.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Serialize};

use super::HolidayCalendar;

/// Classification of a single calendar day. Holidays take precedence over
/// weekends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    Business,
    Weekend,
    Holiday,
}

impl DayKind {
    pub fn is_working(&self) -> bool {
        matches!(self, DayKind::Business)
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_holiday(date: NaiveDate, holidays: &HolidayCalendar) -> bool {
    holidays.contains(date)
}

/// Holiday check for a timestamp; only its calendar day is compared.
pub fn is_holiday_at<Tz: TimeZone>(at: &DateTime<Tz>, holidays: &HolidayCalendar) -> bool {
    is_holiday(at.date_naive(), holidays)
}

pub fn is_business_day(date: NaiveDate, holidays: &HolidayCalendar) -> bool {
    !is_weekend(date) && !is_holiday(date, holidays)
}

/// Holiday or weekend.
pub fn is_non_working(date: NaiveDate, holidays: &HolidayCalendar) -> bool {
    !is_business_day(date, holidays)
}

pub fn classify(date: NaiveDate, holidays: &HolidayCalendar) -> DayKind {
    if is_holiday(date, holidays) {
        DayKind::Holiday
    } else if is_weekend(date) {
        DayKind::Weekend
    } else {
        DayKind::Business
    }
}
