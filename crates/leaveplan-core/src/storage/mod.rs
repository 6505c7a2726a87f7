mod config;

pub use config::{HolidaySettings, OptimizerSettings, Settings};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable overriding the settings directory.
pub const HOME_ENV: &str = "LEAVEPLAN_HOME";

/// Returns `$LEAVEPLAN_HOME` if set, otherwise `~/.config/leaveplan/`.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => dirs::home_dir()
            .ok_or_else(|| ConfigError::DirUnavailable("home directory not found".into()))?
            .join(".config")
            .join("leaveplan"),
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
