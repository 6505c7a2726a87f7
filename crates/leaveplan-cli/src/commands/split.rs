use chrono::NaiveDate;
use clap::Args;

use leaveplan_core::{compute_metrics, find_optimal_split, Settings};

use crate::common::{describe_period, parse_date, CliResult, Context};

#[derive(Args)]
pub struct SplitArgs {
    /// First day of the period (YYYY-MM-DD)
    #[arg(value_parser = parse_date)]
    pub start: NaiveDate,
    /// Last day of the period, inclusive (YYYY-MM-DD)
    #[arg(value_parser = parse_date)]
    pub end: NaiveDate,
}

pub fn run(args: SplitArgs, ctx: &Context) -> CliResult {
    let settings = Settings::load()?;
    let holidays = ctx.calendar_around(&settings, args.start, args.end)?;
    let period = compute_metrics(args.start, args.end, &holidays)?;
    let split = find_optimal_split(&period, &holidays)?;

    ctx.emit(&split, || match &split {
        Some(split) => {
            println!("Whole:  {}", describe_period(&period));
            println!("First:  {}", describe_period(&split.first));
            println!("Second: {}", describe_period(&split.second));
            println!("Combined score {:.3}", split.combined_score);
        }
        None => println!("No split scores better than {}", describe_period(&period)),
    })
}
