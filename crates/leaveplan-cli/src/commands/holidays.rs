use clap::Args;

use leaveplan_core::{HolidayRecord, Settings};

use crate::common::{CliResult, Context};

#[derive(Args)]
pub struct HolidaysArgs {
    /// Year to list (defaults to settings, then the current year)
    #[arg(long)]
    pub year: Option<i32>,
}

pub fn run(args: HolidaysArgs, ctx: &Context) -> CliResult {
    let settings = Settings::load()?;
    let year = args.year.unwrap_or_else(|| settings.start_year());
    let calendar = ctx.calendar(&settings, year..=year)?;
    let records: Vec<&HolidayRecord> = calendar.in_year(year).collect();

    ctx.emit(&records, || {
        for h in &records {
            println!("{}  {:<3}  {:?}  {}", h.date, h.date.format("%a"), h.category, h.name);
        }
    })
}
