//! # Leaveplan Core Library
//!
//! This library scores candidate leave periods against a calendar of
//! weekends and holidays and combines several search strategies into a
//! ranked list of non-overlapping recommendations. The `leaveplan-cli`
//! binary is a thin layer over the same entry points.
//!
//! ## Architecture
//!
//! - **Calendar**: holiday snapshots, inclusive date ranges, day classification
//! - **Scoring**: one canonical score per period, plus adjacency analysis
//! - **Strategies**: continuous, bridge, holiday-adjacent and recess searches
//! - **Optimizer**: merges strategy output and resolves overlaps
//! - **Fractionation / Shift**: split or slide a period to a better position
//! - **Holidays**: computed national calendar and JSON snapshots
//! - **Storage**: TOML-based settings
//!
//! ## Key Entry Points
//!
//! - [`generate_recommendations`]: full multi-strategy run
//! - [`compute_metrics`]: metrics for one period
//! - [`find_optimal_split`], [`find_optimal_fractioned_periods`]
//! - [`find_optimal_shift`]
//! - [`find_potential_bridges`]
//!
//! Holidays are always passed in as an immutable [`HolidayCalendar`].

pub mod adjacency;
pub mod calendar;
pub mod config;
pub mod error;
pub mod fractionation;
pub mod holidays;
pub mod metrics;
pub mod optimizer;
pub mod recommendation;
pub mod scoring;
pub mod shift;
pub mod storage;
pub mod strategy;

pub use adjacency::{detect_adjacency, Adjacency};
pub use calendar::{DateRange, HolidayCalendar, HolidayCategory, HolidayRecord};
pub use config::{OptimizationConfig, ScoreWeights};
pub use error::{ConfigError, CoreError, HolidaySourceError, StrategyError, ValidationError};
pub use fractionation::{
    find_optimal_fractioned_periods, find_optimal_split, FractionationResult, SplitResult,
};
pub use holidays::{BrazilianCalendar, HolidaySource, JsonSnapshot};
pub use metrics::{compute_metrics, PeriodMetrics, Rating};
pub use optimizer::{generate_recommendations, OptimizationReport, Optimizer};
pub use recommendation::Recommendation;
pub use scoring::{explain_score, ScoreBreakdown};
pub use shift::{find_optimal_shift, ShiftResult};
pub use storage::Settings;
pub use strategy::{find_potential_bridges, BridgeCandidate, ScoredPeriod, StrategyKind};
