//! Canonical period scoring.
//!
//! Every score in the crate is produced by [`canonical_score`]. A score of
//! `1.0` means "no gain over spending plain business days"; anything above is
//! an efficiency gain.
//!
//! ## Terms
//!
//! | Term | Value |
//! |------|-------|
//! | Holiday gain | `weekday holidays / business days` |
//! | Monday start | `+0.05` |
//! | Friday end | `+0.05` |
//! | Monday to Friday | `+0.05` more |
//! | Adjacent holiday block | `+0.8` |
//! | Block longer than 10 days | `+0.3` (only with adjacency) |
//! | Wasted non-working days | `-sum(0.35 * 1.8^k) / business days` |
//!
//! Periods without business days short-circuit to `1.0`, and the total is
//! clamped to that floor.

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::adjacency::detect_adjacency;
use crate::calendar::{classify, DateRange, DayKind, HolidayCalendar};

/// Neutral score: no gain over business days.
pub const BASELINE_SCORE: f64 = 1.0;

pub const POSITIONAL_BONUS: f64 = 0.05;
pub const ADJACENCY_BONUS: f64 = 0.8;
pub const LONG_BLOCK_BONUS: f64 = 0.3;
/// Blocks strictly longer than this earn [`LONG_BLOCK_BONUS`].
pub const LONG_BLOCK_DAYS: u32 = 10;
pub const WASTED_DAY_COST: f64 = 0.35;
pub const WASTED_DAY_GROWTH: f64 = 1.8;

/// Day counts for one period, holidays taking precedence over weekends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCounts {
    pub total: u32,
    pub business: u32,
    pub weekend: u32,
    pub holiday: u32,
    /// Holidays that fall Monday through Friday.
    pub weekday_holiday: u32,
}

impl DayCounts {
    pub fn non_working(&self) -> u32 {
        self.weekend + self.holiday
    }
}

/// Classify every day of `range` once.
pub fn count_days(range: &DateRange, holidays: &HolidayCalendar) -> DayCounts {
    let mut counts = DayCounts::default();
    for day in range.days() {
        counts.total += 1;
        match classify(day, holidays) {
            DayKind::Holiday => {
                counts.holiday += 1;
                if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                    counts.weekday_holiday += 1;
                }
            }
            DayKind::Weekend => counts.weekend += 1,
            DayKind::Business => counts.business += 1,
        }
    }
    counts
}

/// Term-by-term view of a canonical score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub holiday_gain: f64,
    pub positional: f64,
    pub adjacency: f64,
    pub long_block: f64,
    pub penalty: f64,
    /// Final clamped score.
    pub total: f64,
}

impl ScoreBreakdown {
    fn neutral() -> Self {
        Self {
            holiday_gain: 0.0,
            positional: 0.0,
            adjacency: 0.0,
            long_block: 0.0,
            penalty: 0.0,
            total: BASELINE_SCORE,
        }
    }

    fn finish(mut self) -> Self {
        let raw = BASELINE_SCORE
            + self.holiday_gain
            + self.positional
            + self.adjacency
            + self.long_block
            - self.penalty;
        self.total = raw.max(BASELINE_SCORE);
        self
    }
}

/// Monday-start / Friday-end bonus of the canonical score.
pub fn positional_bonus(range: &DateRange) -> f64 {
    let monday = range.starts_on(Weekday::Mon);
    let friday = range.ends_on(Weekday::Fri);

    let mut bonus = 0.0;
    if monday {
        bonus += POSITIONAL_BONUS;
    }
    if friday {
        bonus += POSITIONAL_BONUS;
    }
    if monday && friday {
        bonus += POSITIONAL_BONUS;
    }
    bonus
}

/// Super-linear cost of absorbing non-working days into a period.
///
/// The first wasted day costs `0.35`, each further day 80% more than the one
/// before; the sum is spread over the business days.
pub fn wasted_day_penalty(non_work_days: u32, business_days: u32) -> f64 {
    if non_work_days == 0 || business_days == 0 {
        return 0.0;
    }
    let sum: f64 = (0..non_work_days)
        .map(|k| WASTED_DAY_COST * WASTED_DAY_GROWTH.powi(k as i32))
        .sum();
    sum / f64::from(business_days)
}

/// Full breakdown of the canonical score for a period.
pub fn explain_score(
    range: &DateRange,
    counts: &DayCounts,
    holidays: &HolidayCalendar,
) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::neutral();
    if counts.business == 0 {
        return breakdown;
    }

    breakdown.holiday_gain = f64::from(counts.weekday_holiday) / f64::from(counts.business);
    breakdown.positional = positional_bonus(range);

    let adjacency = detect_adjacency(range, holidays);
    if adjacency.is_adjacent() {
        breakdown.adjacency = ADJACENCY_BONUS;
        if adjacency.block_size > LONG_BLOCK_DAYS {
            breakdown.long_block = LONG_BLOCK_BONUS;
        }
    }

    breakdown.penalty = wasted_day_penalty(counts.non_working(), counts.business);
    breakdown.finish()
}

/// The canonical score. Never below [`BASELINE_SCORE`].
pub fn canonical_score(range: &DateRange, counts: &DayCounts, holidays: &HolidayCalendar) -> f64 {
    explain_score(range, counts, holidays).total
}
