//! Core error types for leaveplan-core.
//!
//! This module defines the error hierarchy using thiserror. Validation errors
//! on single-period entry points are returned to the caller; strategy errors
//! are produced inside an optimization run and are absorbed by the optimizer.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::strategy::StrategyKind;

/// Core error type for leaveplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A single search strategy failed
    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Holiday source errors
    #[error("Holiday source error: {0}")]
    Holidays(#[from] HolidaySourceError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// End date precedes start date
    #[error("Invalid date range: end ({end}) must not be before start ({start})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A year that cannot be represented as a calendar date
    #[error("Year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors raised by a single search strategy during an optimization run.
#[derive(Error, Debug)]
pub enum StrategyError {
    /// The strategy returned an error
    #[error("{strategy} strategy failed: {source}")]
    Execution {
        strategy: StrategyKind,
        #[source]
        source: ValidationError,
    },

    /// The strategy panicked on its worker thread
    #[error("{strategy} strategy panicked")]
    Panicked { strategy: StrategyKind },
}

impl StrategyError {
    /// The strategy that produced this error.
    pub fn strategy(&self) -> StrategyKind {
        match self {
            Self::Execution { strategy, .. } | Self::Panicked { strategy } => *strategy,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Configuration directory could not be resolved
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Errors reading an external holiday snapshot.
#[derive(Error, Debug)]
pub enum HolidaySourceError {
    /// Failed to read the snapshot file
    #[error("Failed to read holidays from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not a valid list of holiday records
    #[error("Failed to parse holidays from {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
