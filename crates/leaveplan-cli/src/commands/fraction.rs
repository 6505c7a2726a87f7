use clap::Args;

use leaveplan_core::{find_optimal_fractioned_periods, Settings};

use crate::common::{describe_period, CliResult, Context};

#[derive(Args)]
pub struct FractionArgs {
    /// Year to search (defaults to settings, then the current year)
    #[arg(long)]
    pub year: Option<i32>,
    /// Number of periods
    #[arg(long, default_value_t = 3)]
    pub count: usize,
    /// Days per period
    #[arg(long, default_value_t = 10)]
    pub length: u32,
}

pub fn run(args: FractionArgs, ctx: &Context) -> CliResult {
    let settings = Settings::load()?;
    let year = args.year.unwrap_or_else(|| settings.start_year());
    let holidays = ctx.calendar_with_margin(&settings, year..=year)?;
    let result = find_optimal_fractioned_periods(year, args.count, args.length, &holidays)?;

    ctx.emit(&result, || match &result {
        Some(result) => {
            for period in &result.periods {
                println!("{}", describe_period(period));
            }
            println!(
                "Combined efficiency {:.3} ({:+.1}%)",
                result.combined_efficiency, result.efficiency_gain
            );
        }
        None => println!("No {}-day periods fit in {year}", args.length),
    })
}
