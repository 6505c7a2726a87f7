//! Period-discovery strategies.
//!
//! The set is closed: exactly four strategies, each a variant of
//! [`StrategyKind`]. Every strategy reads an [`OptimizationConfig`], never
//! mutates it, and returns its own top candidates as [`ScoredPeriod`]s.
//!
//! - [`continuous`]: exhaustive plain spans of 5..=30 days
//! - [`bridge`]: 1..=N business days linking two non-working days
//! - [`holiday_adjacent`]: periods immediately before/after a holiday
//! - [`recess`]: periods inside the year-end institutional recess

pub mod bridge;
pub mod continuous;
pub mod holiday_adjacent;
pub mod recess;

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::config::OptimizationConfig;
use crate::error::ValidationError;
use crate::metrics::PeriodMetrics;

pub use bridge::{find_potential_bridges, BridgeCandidate};
pub use holiday_adjacent::{holiday_importance, AdjacentSide};

/// The four search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Continuous,
    Bridge,
    HolidayAdjacent,
    Recess,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Continuous,
        StrategyKind::Bridge,
        StrategyKind::HolidayAdjacent,
        StrategyKind::Recess,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::Bridge => "bridge",
            Self::HolidayAdjacent => "holiday-adjacent",
            Self::Recess => "recess",
        }
    }

    /// Run this strategy and keep its best `candidates_per_strategy` periods.
    pub fn find_periods(
        &self,
        config: &OptimizationConfig,
    ) -> Result<Vec<ScoredPeriod>, ValidationError> {
        let candidates = match self {
            Self::Continuous => continuous::find_continuous_periods(config)?,
            Self::Bridge => bridge::find_bridge_periods(config)?,
            Self::HolidayAdjacent => holiday_adjacent::find_holiday_adjacent_periods(config)?,
            Self::Recess => recess::find_recess_periods(config)?,
        };
        Ok(keep_top(candidates, config.candidates_per_strategy))
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Strategy-specific facts about a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PeriodMetadata {
    Continuous {
        length: u32,
    },
    Bridge {
        preceding: NaiveDate,
        following: NaiveDate,
        preceding_is_holiday: bool,
        following_is_holiday: bool,
        gap_days: u32,
    },
    HolidayAdjacent {
        holiday_name: String,
        holiday_date: NaiveDate,
        side: AdjacentSide,
        importance: f64,
    },
    Recess {
        full_recess: bool,
        recess: DateRange,
    },
}

impl PeriodMetadata {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Continuous { .. } => StrategyKind::Continuous,
            Self::Bridge { .. } => StrategyKind::Bridge,
            Self::HolidayAdjacent { .. } => StrategyKind::HolidayAdjacent,
            Self::Recess { .. } => StrategyKind::Recess,
        }
    }
}

/// A candidate period produced by one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPeriod {
    #[serde(flatten)]
    pub metrics: PeriodMetrics,
    pub kind: StrategyKind,
    pub raw_score: f64,
    pub metadata: PeriodMetadata,
}

impl ScoredPeriod {
    pub fn new(metrics: PeriodMetrics, raw_score: f64, metadata: PeriodMetadata) -> Self {
        Self {
            metrics,
            kind: metadata.kind(),
            raw_score,
            metadata,
        }
    }

    pub fn range(&self) -> DateRange {
        self.metrics.range()
    }
}

/// Descending raw score, then earliest start, then strategy order.
pub fn by_raw_score_desc(a: &ScoredPeriod, b: &ScoredPeriod) -> Ordering {
    b.raw_score
        .total_cmp(&a.raw_score)
        .then_with(|| a.metrics.start.cmp(&b.metrics.start))
        .then_with(|| a.kind.cmp(&b.kind))
        .then_with(|| a.metrics.end.cmp(&b.metrics.end))
}

/// Best `limit` candidates by raw score.
pub fn keep_top(mut candidates: Vec<ScoredPeriod>, limit: usize) -> Vec<ScoredPeriod> {
    candidates.sort_by(by_raw_score_desc);
    candidates.truncate(limit);
    candidates
}
