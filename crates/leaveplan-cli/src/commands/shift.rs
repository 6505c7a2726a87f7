use chrono::NaiveDate;
use clap::Args;

use leaveplan_core::{compute_metrics, find_optimal_shift, Settings};

use crate::common::{describe_period, parse_date, CliResult, Context};

#[derive(Args)]
pub struct ShiftArgs {
    /// First day of the period (YYYY-MM-DD)
    #[arg(value_parser = parse_date)]
    pub start: NaiveDate,
    /// Last day of the period, inclusive (YYYY-MM-DD)
    #[arg(value_parser = parse_date)]
    pub end: NaiveDate,
    /// Largest shift tried in either direction, in days
    #[arg(long, default_value_t = 7)]
    pub window: u32,
}

pub fn run(args: ShiftArgs, ctx: &Context) -> CliResult {
    let settings = Settings::load()?;
    let holidays = ctx.calendar_around(&settings, args.start, args.end)?;
    let period = compute_metrics(args.start, args.end, &holidays)?;
    let shift = find_optimal_shift(&period, args.window, &holidays)?;

    ctx.emit(&shift, || match &shift {
        Some(shift) => {
            let direction = if shift.days_shifted < 0 { "earlier" } else { "later" };
            println!(
                "Move {} day(s) {direction}: {}",
                shift.days_shifted.abs(),
                describe_period(&shift.metrics)
            );
            println!("Gain {:+.3}", shift.gain);
        }
        None => println!("Already well placed: {}", describe_period(&period)),
    })
}
