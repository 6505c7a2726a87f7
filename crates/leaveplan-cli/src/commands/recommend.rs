use clap::Args;
use serde::Serialize;

use leaveplan_core::{
    find_optimal_fractioned_periods, OptimizationReport, Optimizer, PeriodMetrics, Recommendation,
    Settings,
};

use crate::common::{describe_period, CliResult, Context};

#[derive(Args)]
pub struct RecommendArgs {
    /// First year to search (defaults to settings, then the current year)
    #[arg(long)]
    pub year: Option<i32>,
    /// Additional years to search after the first
    #[arg(long)]
    pub future_years: Option<u32>,
    /// Maximum number of recommendations
    #[arg(long)]
    pub max_results: Option<usize>,
    /// Run strategies one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Serialize)]
struct RecommendOutput {
    #[serde(flatten)]
    report: OptimizationReport,
    /// Best single week, offered when nothing was recommended
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<PeriodMetrics>,
}

fn print_recommendation(index: usize, rec: &Recommendation) {
    println!("{}. [{}] {}", index + 1, rec.kind, rec.title);
    println!(
        "   {}  gain {:.1}%  score {:.1}",
        rec.suggested_range, rec.efficiency_gain, rec.final_score
    );
    println!("   {}", rec.description);
    if let Some(fractions) = &rec.fractioned_periods {
        println!("   or split:");
        for fraction in fractions {
            println!("     {}", describe_period(fraction));
        }
    }
}

pub fn run(args: RecommendArgs, ctx: &Context) -> CliResult {
    let settings = Settings::load()?;
    let start_year = args.year.unwrap_or_else(|| settings.start_year());
    let future_years = args.future_years.unwrap_or(settings.optimizer.future_years);
    let last_year = start_year.saturating_add(i32::try_from(future_years)?);

    // The recess window of the last year runs into January of the next one.
    let holidays = ctx.calendar_with_margin(&settings, start_year..=last_year)?;
    let mut config = settings.to_optimization_config(holidays);
    config.start_year = start_year;
    config.future_years = future_years;
    if let Some(max_results) = args.max_results {
        config.max_results = max_results;
    }
    if args.sequential {
        config.parallel = false;
    }

    let report = Optimizer::new(&config)?.run();
    let fallback = if report.recommendations.is_empty() {
        find_optimal_fractioned_periods(start_year, 1, 5, &config.holidays)?
            .and_then(|found| found.periods.into_iter().next())
    } else {
        None
    };

    let output = RecommendOutput { report, fallback };
    ctx.emit(&output, || {
        for failure in &output.report.failures {
            eprintln!("warning: {failure}");
        }
        if output.report.recommendations.is_empty() {
            println!("No recommendations found.");
            if let Some(week) = &output.fallback {
                println!("Suggested week: {}", describe_period(week));
            }
            return;
        }
        for (i, rec) in output.report.recommendations.iter().enumerate() {
            print_recommendation(i, rec);
        }
    })
}
