//! Holiday sources.
//!
//! A source produces [`HolidayRecord`]s for a year. Sources are combined into
//! one immutable [`HolidayCalendar`] before any optimization starts; the core
//! never holds holiday state of its own.

mod national;
mod snapshot;

pub use national::{easter_sunday, BrazilianCalendar};
pub use snapshot::{load_json, JsonSnapshot};

use std::ops::RangeInclusive;

use crate::calendar::{HolidayCalendar, HolidayRecord};
use crate::error::CoreError;

/// Anything that can list the holidays of a year.
pub trait HolidaySource {
    /// Holidays falling in `year`, in any order.
    fn holidays_for_year(&self, year: i32) -> Result<Vec<HolidayRecord>, CoreError>;

    /// Snapshot covering every year in `years`.
    fn calendar(&self, years: RangeInclusive<i32>) -> Result<HolidayCalendar, CoreError> {
        let mut records = Vec::new();
        for year in years {
            records.extend(self.holidays_for_year(year)?);
        }
        Ok(HolidayCalendar::new(records))
    }
}

/// Build one calendar from several sources. Earlier sources win on shared dates.
pub fn combine(
    sources: &[&dyn HolidaySource],
    years: RangeInclusive<i32>,
) -> Result<HolidayCalendar, CoreError> {
    let mut calendar = HolidayCalendar::empty();
    for source in sources {
        calendar = calendar.merge(&source.calendar(years.clone())?);
    }
    Ok(calendar)
}
