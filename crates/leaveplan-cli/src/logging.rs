//! stderr logging for the planner binary.
//!
//! `-v` flags raise the level of the planner crates only; dependencies stay
//! quiet. `RUST_LOG` replaces the whole filter when set.

use tracing::level_filters::LevelFilter;
use tracing::Span;
use tracing_subscriber::EnvFilter;

/// Crates whose events the `-v` flags control.
const PLANNER_TARGETS: [&str; 2] = ["leaveplan_cli", "leaveplan_core"];

/// warn by default, then info, debug and trace for each extra `-v`.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn planner_filter(verbosity: u8) -> String {
    let level = level_for(verbosity).to_string().to_lowercase();
    PLANNER_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(planner_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}

/// Span wrapping one subcommand, so core events carry the command name.
pub fn command_span(command: &'static str, json: bool) -> Span {
    tracing::info_span!("command", name = command, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_flags_raise_the_level() {
        assert_eq!(level_for(0), LevelFilter::WARN);
        assert_eq!(level_for(2), LevelFilter::DEBUG);
        assert_eq!(level_for(9), LevelFilter::TRACE);
    }

    #[test]
    fn filter_names_only_planner_crates() {
        assert_eq!(planner_filter(1), "leaveplan_cli=info,leaveplan_core=info");
    }
}
