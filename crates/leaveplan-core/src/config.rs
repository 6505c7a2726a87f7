//! Per-request optimization configuration.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::calendar::{year_bounds, HolidayCalendar};
use crate::error::ValidationError;

/// Weights applied to each strategy family's raw score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the canonical score in continuous periods
    #[serde(default = "default_weight")]
    pub efficiency: f64,
    /// Weight of positional bonuses and bridge scores
    #[serde(default = "default_weight")]
    pub strategic: f64,
    /// Weight of holiday-adjacent periods
    #[serde(default = "default_weight")]
    pub holiday: f64,
    /// Multiplier for institutional-recess periods
    #[serde(default = "default_weight")]
    pub recess: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            efficiency: 1.0,
            strategic: 1.0,
            holiday: 1.0,
            recess: 1.0,
        }
    }
}

impl ScoreWeights {
    /// Validate that all weights are finite and non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let weights = [
            ("efficiency", self.efficiency),
            ("strategic", self.strategic),
            ("holiday", self.holiday),
            ("recess", self.recess),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: format!("score_weights.{name}"),
                    message: format!("must be a non-negative number, got {weight}"),
                });
            }
        }
        Ok(())
    }
}

pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_MAX_BRIDGE_SIZE: u32 = 3;
/// Upper bound accepted for `max_bridge_size`.
pub const MAX_BRIDGE_SIZE_LIMIT: u32 = 31;
pub const DEFAULT_CANDIDATES_PER_STRATEGY: usize = 10;

/// Everything one optimization run needs. Strategies only ever borrow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationConfig {
    pub start_year: i32,
    /// Additional years after `start_year` to search.
    #[serde(default)]
    pub future_years: u32,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub score_weights: ScoreWeights,
    /// Longest run of business days treated as a bridge.
    #[serde(default = "default_max_bridge_size")]
    pub max_bridge_size: u32,
    /// Per-strategy cap on candidates handed to the optimizer.
    #[serde(default = "default_candidates_per_strategy")]
    pub candidates_per_strategy: usize,
    /// Run strategies on scoped worker threads.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default)]
    pub holidays: HolidayCalendar,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}
fn default_max_bridge_size() -> u32 {
    DEFAULT_MAX_BRIDGE_SIZE
}
fn default_candidates_per_strategy() -> usize {
    DEFAULT_CANDIDATES_PER_STRATEGY
}
fn default_parallel() -> bool {
    true
}

impl OptimizationConfig {
    pub fn new(start_year: i32, holidays: HolidayCalendar) -> Self {
        Self {
            start_year,
            future_years: 0,
            max_results: DEFAULT_MAX_RESULTS,
            score_weights: ScoreWeights::default(),
            max_bridge_size: DEFAULT_MAX_BRIDGE_SIZE,
            candidates_per_strategy: DEFAULT_CANDIDATES_PER_STRATEGY,
            parallel: true,
            holidays,
        }
    }

    pub fn with_future_years(mut self, future_years: u32) -> Self {
        self.future_years = future_years;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.score_weights = weights;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Years searched, `start_year` through `start_year + future_years`.
    pub fn years(&self) -> RangeInclusive<i32> {
        let last = i32::try_from(self.future_years)
            .ok()
            .and_then(|n| self.start_year.checked_add(n))
            .unwrap_or(i32::MAX);
        self.start_year..=last
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        year_bounds(*self.years().start())?;
        year_bounds(*self.years().end())?;
        self.score_weights.validate()?;

        if self.max_results == 0 {
            return Err(ValidationError::InvalidValue {
                field: "max_results".into(),
                message: "must be at least 1".into(),
            });
        }
        if !(1..=MAX_BRIDGE_SIZE_LIMIT).contains(&self.max_bridge_size) {
            return Err(ValidationError::InvalidValue {
                field: "max_bridge_size".into(),
                message: format!("must be between 1 and {MAX_BRIDGE_SIZE_LIMIT}"),
            });
        }
        Ok(())
    }
}
