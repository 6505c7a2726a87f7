//! Calendar primitives: holiday snapshots, inclusive date ranges and day
//! classification.
//!
//! Everything here is pure. Holidays are always passed in as an immutable
//! [`HolidayCalendar`]; nothing in the core keeps holiday state of its own.

mod classifier;
mod holiday;
mod range;

pub use classifier::{
    classify, is_business_day, is_holiday, is_holiday_at, is_non_working, is_weekend, DayKind,
};
pub use holiday::{HolidayCalendar, HolidayCategory, HolidayRecord};
pub use range::DateRange;

use chrono::NaiveDate;

use crate::error::ValidationError;

/// First and last day of a year, or an error for years chrono cannot represent
/// with room for the following January.
pub fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    let last = NaiveDate::from_ymd_opt(year, 12, 31);
    let next = year
        .checked_add(1)
        .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 31));

    match (first, last, next) {
        (Some(first), Some(last), Some(_)) => Ok((first, last)),
        _ => Err(ValidationError::YearOutOfRange(year)),
    }
}
