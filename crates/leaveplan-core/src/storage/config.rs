//! TOML-backed settings.
//!
//! Stored at `<data_dir>/settings.toml`. Missing keys fall back to defaults.

use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::calendar::HolidayCalendar;
use crate::config::{
    OptimizationConfig, ScoreWeights, DEFAULT_CANDIDATES_PER_STRATEGY, DEFAULT_MAX_BRIDGE_SIZE,
    DEFAULT_MAX_RESULTS, MAX_BRIDGE_SIZE_LIMIT,
};
use crate::error::ConfigError;

const FILE_NAME: &str = "settings.toml";

/// Optimizer defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// First year searched; the current year when unset
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub future_years: u32,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_max_bridge_size")]
    pub max_bridge_size: u32,
    #[serde(default = "default_candidates_per_strategy")]
    pub candidates_per_strategy: usize,
    #[serde(default = "default_true")]
    pub parallel: bool,
}

/// Which built-in holidays to load and an optional extra snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HolidaySettings {
    #[serde(default)]
    pub judicial: bool,
    #[serde(default)]
    pub recess: bool,
    /// JSON file of extra holiday records
    #[serde(default)]
    pub extra_file: Option<String>,
}

/// Persistent settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub optimizer: OptimizerSettings,
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub holidays: HolidaySettings,
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
fn default_true() -> bool {
    true
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            start_year: None,
            future_years: 0,
            max_results: DEFAULT_MAX_RESULTS,
            max_bridge_size: DEFAULT_MAX_BRIDGE_SIZE,
            candidates_per_strategy: DEFAULT_CANDIDATES_PER_STRATEGY,
            parallel: true,
        }
    }
}

impl Settings {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn parse_leaf(key: &str, existing: &serde_json::Value, value: &str) -> Result<serde_json::Value, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let parsed = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<i64>() {
                    serde_json::Value::Number(n.into())
                } else if let Ok(n) = value.parse::<f64>() {
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                } else {
                    return Err(invalid(format!("cannot parse '{value}' as number")));
                }
            }
            // Unset optional: take the most specific reading of the text.
            serde_json::Value::Null => {
                if let Ok(n) = value.parse::<i64>() {
                    serde_json::Value::Number(n.into())
                } else if let Ok(b) = value.parse::<bool>() {
                    serde_json::Value::Bool(b)
                } else {
                    serde_json::Value::String(value.into())
                }
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            serde_json::Value::String(_) => serde_json::Value::String(value.into()),
        };
        Ok(parsed)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        if key.is_empty() {
            return Err(unknown());
        }

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;
                let new_value = Self::parse_leaf(key, existing, value)?;
                obj.insert(part.to_string(), new_value);
                return Ok(());
            }
            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Settings file location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join(FILE_NAME))
    }

    /// Load from the settings directory, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// defaults cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let settings = Self::default();
            settings.save_to(&path)?;
            Ok(settings)
        }
    }

    /// Load from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        let settings: Settings = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Persist to the settings directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("using default settings: {e}");
            Self::default()
        })
    }

    /// Get a value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse as
    /// the key's type or fails validation. `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Settings = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values no optimization could run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate().map_err(|e| ConfigError::InvalidValue {
            key: "weights".into(),
            message: e.to_string(),
        })?;
        if self.optimizer.max_results == 0 {
            return Err(ConfigError::InvalidValue {
                key: "optimizer.max_results".into(),
                message: "must be at least 1".into(),
            });
        }
        if !(1..=MAX_BRIDGE_SIZE_LIMIT).contains(&self.optimizer.max_bridge_size) {
            return Err(ConfigError::InvalidValue {
                key: "optimizer.max_bridge_size".into(),
                message: format!("must be between 1 and {MAX_BRIDGE_SIZE_LIMIT}"),
            });
        }
        Ok(())
    }

    /// First searched year, falling back to the current local year.
    pub fn start_year(&self) -> i32 {
        self.optimizer
            .start_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    /// Optimization request for these settings over `holidays`.
    pub fn to_optimization_config(&self, holidays: HolidayCalendar) -> OptimizationConfig {
        let optimizer = &self.optimizer;
        OptimizationConfig {
            start_year: self.start_year(),
            future_years: optimizer.future_years,
            max_results: optimizer.max_results,
            score_weights: self.weights,
            max_bridge_size: optimizer.max_bridge_size,
            candidates_per_strategy: optimizer.candidates_per_strategy,
            parallel: optimizer.parallel,
            holidays,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
        assert!(!toml_str.contains("start_year"));
    }

    #[test]
    fn partial_file_uses_defaults() {
        let parsed: Settings = toml::from_str("[weights]\nholiday = 1.5\n").unwrap();
        assert_eq!(parsed.weights.holiday, 1.5);
        assert_eq!(parsed.weights.recess, 1.0);
        assert_eq!(parsed.optimizer.max_results, 10);
        assert!(parsed.optimizer.parallel);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let settings = Settings::default();
        assert_eq!(settings.get("optimizer.max_bridge_size").as_deref(), Some("3"));
        assert_eq!(settings.get("holidays.judicial").as_deref(), Some("false"));
        assert_eq!(settings.get("weights.strategic").as_deref(), Some("1.0"));
        assert_eq!(settings.get("optimizer.start_year").as_deref(), Some("null"));
        assert!(settings.get("optimizer.missing").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut settings = Settings::default();
        settings.set("holidays.judicial", "true").unwrap();
        settings.set("weights.holiday", "1.25").unwrap();
        settings.set("optimizer.max_results", "4").unwrap();
        settings.set("optimizer.start_year", "2026").unwrap();
        settings.set("holidays.extra_file", "/tmp/extra.json").unwrap();

        assert!(settings.holidays.judicial);
        assert_eq!(settings.weights.holiday, 1.25);
        assert_eq!(settings.optimizer.max_results, 4);
        assert_eq!(settings.optimizer.start_year, Some(2026));
        assert_eq!(settings.holidays.extra_file.as_deref(), Some("/tmp/extra.json"));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut settings = Settings::default();
        let err = settings.set("optimizer.nonexistent", "1").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut settings = Settings::default();
        assert!(settings.set("holidays.judicial", "maybe").is_err());
        assert!(settings.set("optimizer.max_results", "many").is_err());
    }

    #[test]
    fn set_rejects_invalid_value_and_keeps_state() {
        let mut settings = Settings::default();
        assert!(settings.set("weights.recess", "-1").is_err());
        assert!(settings.set("optimizer.max_results", "0").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn set_rejects_oversized_bridge() {
        let mut settings = Settings::default();
        assert!(settings.set("optimizer.max_bridge_size", "100").is_err());
        assert_eq!(settings.optimizer.max_bridge_size, 3);
        settings.set("optimizer.max_bridge_size", "5").unwrap();
        assert_eq!(settings.optimizer.max_bridge_size, 5);
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = Settings::default();
        settings.set("optimizer.future_years", "2").unwrap();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.optimizer.future_years, 2);
    }

    #[test]
    fn corrupt_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "optimizer = 3").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(ConfigError::LoadFailed { .. })));
    }

    #[test]
    fn optimization_config_follows_settings() {
        let mut settings = Settings::default();
        settings.set("optimizer.start_year", "2025").unwrap();
        settings.set("optimizer.parallel", "false").unwrap();
        let config = settings.to_optimization_config(HolidayCalendar::empty());

        assert_eq!(config.start_year, 2025);
        assert!(!config.parallel);
        assert_eq!(config.max_bridge_size, 3);
        assert!(config.validate().is_ok());
    }
}
