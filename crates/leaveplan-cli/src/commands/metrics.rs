use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use leaveplan_core::scoring::count_days;
use leaveplan_core::{compute_metrics, detect_adjacency, explain_score, PeriodMetrics, ScoreBreakdown, Settings};

use crate::common::{describe_period, parse_date, CliResult, Context};

#[derive(Args)]
pub struct MetricsArgs {
    /// First day of the period (YYYY-MM-DD)
    #[arg(value_parser = parse_date)]
    pub start: NaiveDate,
    /// Last day of the period, inclusive (YYYY-MM-DD)
    #[arg(value_parser = parse_date)]
    pub end: NaiveDate,
    /// Show how the score is made up
    #[arg(long)]
    pub explain: bool,
}

#[derive(Serialize)]
struct MetricsOutput {
    #[serde(flatten)]
    metrics: PeriodMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<ScoreBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    block_size: Option<u32>,
}

pub fn run(args: MetricsArgs, ctx: &Context) -> CliResult {
    let settings = Settings::load()?;
    let holidays = ctx.calendar_around(&settings, args.start, args.end)?;
    let metrics = compute_metrics(args.start, args.end, &holidays)?;

    let (breakdown, block_size) = if args.explain {
        let range = metrics.range();
        let counts = count_days(&range, &holidays);
        (
            Some(explain_score(&range, &counts, &holidays)),
            Some(detect_adjacency(&range, &holidays).block_size),
        )
    } else {
        (None, None)
    };

    let output = MetricsOutput {
        metrics,
        breakdown,
        block_size,
    };
    ctx.emit(&output, || {
        println!("{}", describe_period(&output.metrics));
        if let Some(b) = &output.breakdown {
            println!("  holiday gain  {:+.4}", b.holiday_gain);
            println!("  positional    {:+.4}", b.positional);
            println!("  adjacency     {:+.4}", b.adjacency);
            println!("  long block    {:+.4}", b.long_block);
            println!("  penalty       {:+.4}", -b.penalty);
            println!("  total         {:.4}", b.total);
        }
        if let Some(size) = output.block_size {
            println!("  block size    {size} days");
        }
    })
}
