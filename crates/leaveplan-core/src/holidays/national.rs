//! Computed Brazilian holiday calendar.
//!
//! Fixed-date national holidays plus the Easter-relative movable feasts
//! (Carnaval, Sexta-feira Santa, Corpus Christi). Federal-justice holidays
//! and the year-end forensic recess are opt-in.

use chrono::{Duration, NaiveDate};

use super::HolidaySource;
use crate::calendar::{year_bounds, HolidayCategory, HolidayRecord};
use crate::error::{CoreError, ValidationError};

/// First year of the Gregorian computus.
const FIRST_GREGORIAN_YEAR: i32 = 1583;
/// Consciência Negra became a national holiday in 2024.
const CONSCIENCIA_NEGRA_SINCE: i32 = 2024;

const JUDICIAL_COVERAGE: &str = "justiça federal";

const FIXED_NATIONAL: &[(u32, u32, &str)] = &[
    (1, 1, "Confraternização Universal"),
    (4, 21, "Tiradentes"),
    (5, 1, "Dia do Trabalho"),
    (9, 7, "Independência do Brasil"),
    (10, 12, "Nossa Senhora Aparecida"),
    (11, 2, "Finados"),
    (11, 15, "Proclamação da República"),
    (12, 25, "Natal"),
];

/// (days from Easter Sunday, name)
const MOVABLE_NATIONAL: &[(i64, &str)] = &[
    (-48, "Carnaval"),
    (-47, "Carnaval"),
    (-2, "Sexta-feira Santa"),
    (60, "Corpus Christi"),
];

const FIXED_JUDICIAL: &[(u32, u32, &str)] = &[
    (8, 11, "Dia do Advogado"),
    (11, 1, "Dia de Todos os Santos"),
    (12, 8, "Dia da Justiça"),
];

const MOVABLE_JUDICIAL: &[(i64, &str)] = &[(-4, "Quarta-feira Santa"), (-3, "Quinta-feira Santa")];

/// Easter Sunday (Gregorian computus, Meeus/Jones/Butcher).
///
/// `None` before 1583 or outside chrono's date range.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    if year < FIRST_GREGORIAN_YEAR {
        return None;
    }
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Brazilian national calendar, optionally with federal-justice holidays and
/// the December 20 to January 6 forensic recess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrazilianCalendar {
    pub include_judicial: bool,
    pub include_recess: bool,
}

impl BrazilianCalendar {
    pub fn new(include_judicial: bool, include_recess: bool) -> Self {
        Self {
            include_judicial,
            include_recess,
        }
    }

    fn fixed(year: i32, table: &[(u32, u32, &str)], category: HolidayCategory) -> Vec<HolidayRecord> {
        table
            .iter()
            .filter_map(|&(month, day, name)| {
                NaiveDate::from_ymd_opt(year, month, day).map(|date| HolidayRecord::new(date, name, category))
            })
            .collect()
    }

    fn movable(easter: NaiveDate, table: &[(i64, &str)], category: HolidayCategory) -> Vec<HolidayRecord> {
        table
            .iter()
            .map(|&(offset, name)| HolidayRecord::new(easter + Duration::days(offset), name, category))
            .collect()
    }

    /// Recess days inside `year`: January 1-6 and December 20-31.
    fn recess(year: i32) -> Vec<HolidayRecord> {
        let january = (1..=6).filter_map(|day| NaiveDate::from_ymd_opt(year, 1, day));
        let december = (20..=31).filter_map(|day| NaiveDate::from_ymd_opt(year, 12, day));
        january
            .chain(december)
            .map(|date| {
                HolidayRecord::new(date, "Recesso forense", HolidayCategory::Recess)
                    .with_coverage(JUDICIAL_COVERAGE)
            })
            .collect()
    }
}

impl HolidaySource for BrazilianCalendar {
    fn holidays_for_year(&self, year: i32) -> Result<Vec<HolidayRecord>, CoreError> {
        year_bounds(year)?;
        let easter = easter_sunday(year).ok_or(ValidationError::YearOutOfRange(year))?;

        let mut records = Self::fixed(year, FIXED_NATIONAL, HolidayCategory::National);
        records.extend(Self::movable(easter, MOVABLE_NATIONAL, HolidayCategory::National));
        if year >= CONSCIENCIA_NEGRA_SINCE {
            if let Some(date) = NaiveDate::from_ymd_opt(year, 11, 20) {
                records.push(HolidayRecord::national(
                    date,
                    "Dia Nacional de Zumbi e da Consciência Negra",
                ));
            }
        }

        if self.include_judicial {
            let judicial = Self::fixed(year, FIXED_JUDICIAL, HolidayCategory::Judicial)
                .into_iter()
                .chain(Self::movable(easter, MOVABLE_JUDICIAL, HolidayCategory::Judicial))
                .map(|h| h.with_coverage(JUDICIAL_COVERAGE));
            records.extend(judicial);
        }
        // Pushed last so national and judicial names win on shared dates.
        if self.include_recess {
            records.extend(Self::recess(year));
        }

        tracing::trace!(year, count = records.len(), "generated holidays");
        Ok(records)
    }
}
