//! Shared helpers for CLI commands.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::Args;
use serde::Serialize;

use leaveplan_core::holidays::{BrazilianCalendar, HolidaySource, JsonSnapshot};
use leaveplan_core::{HolidayCalendar, PeriodMetrics, Settings};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Holiday options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct HolidayArgs {
    /// JSON file of extra holiday records; wins over built-in holidays on shared dates
    #[arg(long = "holidays", value_name = "FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Include federal-justice holidays
    #[arg(long, global = true)]
    pub judicial: bool,

    /// Treat the December 20 to January 6 forensic recess as holidays
    #[arg(long, global = true)]
    pub recess: bool,
}

/// Global options handed to each command.
pub struct Context {
    pub json: bool,
    pub holidays: HolidayArgs,
}

impl Context {
    /// Holiday calendar for `years`, combining flags with saved settings.
    pub fn calendar(
        &self,
        settings: &Settings,
        years: RangeInclusive<i32>,
    ) -> Result<HolidayCalendar, Box<dyn std::error::Error>> {
        let national = BrazilianCalendar::new(
            self.holidays.judicial || settings.holidays.judicial,
            self.holidays.recess || settings.holidays.recess,
        );
        let mut calendar = national.calendar(years.clone())?;

        let extra = self
            .holidays
            .file
            .clone()
            .or_else(|| settings.holidays.extra_file.as_ref().map(PathBuf::from));
        if let Some(path) = extra {
            let snapshot = JsonSnapshot::load(&path)?;
            calendar = snapshot.calendar(years)?.merge(&calendar);
        }

        tracing::debug!(holidays = calendar.len(), "calendar ready");
        Ok(calendar)
    }

    /// Calendar for `years` plus one neighbouring year on each side.
    ///
    /// Neighbouring years the holiday source rejects are left out, so a
    /// supported year never fails because of the year next to it.
    pub fn calendar_with_margin(
        &self,
        settings: &Settings,
        years: RangeInclusive<i32>,
    ) -> Result<HolidayCalendar, Box<dyn std::error::Error>> {
        let (first, last) = (*years.start(), *years.end());
        let mut calendar = self.calendar(settings, years)?;

        for year in [first.checked_sub(1), last.checked_add(1)].into_iter().flatten() {
            match self.calendar(settings, year..=year) {
                Ok(margin) => calendar = calendar.merge(&margin),
                Err(e) => tracing::debug!(year, "margin year skipped: {e}"),
            }
        }
        Ok(calendar)
    }

    /// Calendar covering a period plus a year of margin on both sides.
    pub fn calendar_around(
        &self,
        settings: &Settings,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HolidayCalendar, Box<dyn std::error::Error>> {
        self.calendar_with_margin(settings, start.year()..=end.year())
    }

    /// Print `value` as pretty JSON when `--json` is set, otherwise run `text`.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce()) -> CliResult {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text();
        }
        Ok(())
    }
}

/// clap value parser for `YYYY-MM-DD` dates.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

/// One-line human summary of a period.
pub fn describe_period(m: &PeriodMetrics) -> String {
    let mut line = format!(
        "{} .. {}  {} days ({} business, {} weekend, {} holiday)  score {:.3} [{:?}]",
        m.start,
        m.end,
        m.total_days,
        m.business_days,
        m.weekend_days,
        m.holiday_days,
        m.score,
        m.rating
    );
    if let Some(reason) = &m.invalid_reason {
        line.push_str(&format!("  invalid: {reason}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2024-02-29"), Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("29/02/2024").is_err());
    }
}
