use clap::Subcommand;
use leaveplan_core::Settings;

use crate::common::{CliResult, Context};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a setting
    Get {
        /// Dot-separated key (e.g. "weights.holiday", "optimizer.max_results")
        key: String,
    },
    /// Set a setting
    Set {
        /// Dot-separated key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List,
    /// Reset settings to defaults
    Reset,
    /// Print the settings file location
    Path,
}

pub fn run(action: ConfigAction, ctx: &Context) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let settings = Settings::load()?;
            let value = settings
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load()?;
            settings.set(&key, &value)?;
            settings.save()?;
            println!("ok");
        }
        ConfigAction::List => {
            let settings = Settings::load()?;
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                print!("{}", toml::to_string_pretty(&settings)?);
            }
        }
        ConfigAction::Reset => {
            Settings::default().save()?;
            println!("settings reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", Settings::path()?.display());
        }
    }
    Ok(())
}
