use clap::Args;

use leaveplan_core::{find_potential_bridges, Settings};

use crate::common::{CliResult, Context};

#[derive(Args)]
pub struct BridgesArgs {
    /// Year to search (defaults to settings, then the current year)
    #[arg(long)]
    pub year: Option<i32>,
    /// Longest bridge in business days (defaults to settings)
    #[arg(long)]
    pub max_size: Option<u32>,
}

pub fn run(args: BridgesArgs, ctx: &Context) -> CliResult {
    let settings = Settings::load()?;
    let year = args.year.unwrap_or_else(|| settings.start_year());
    let max_size = args.max_size.unwrap_or(settings.optimizer.max_bridge_size);
    let holidays = ctx.calendar_with_margin(&settings, year..=year)?;
    let bridges = find_potential_bridges(year, max_size, &holidays)?;

    ctx.emit(&bridges, || {
        if bridges.is_empty() {
            println!("No bridges in {year}");
        }
        for bridge in &bridges {
            println!(
                "{}  {} day(s) between {} and {}  score {:.2}",
                bridge.range, bridge.gap_days, bridge.preceding, bridge.following, bridge.score
            );
        }
    })
}
