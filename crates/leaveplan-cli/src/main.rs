use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod common;
mod logging;

use common::{Context, HolidayArgs};

#[derive(Parser)]
#[command(name = "leaveplan-cli", version, about = "Leave period planner")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    holidays: HolidayArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ranked leave recommendations
    Recommend(commands::recommend::RecommendArgs),
    /// Metrics and score of one period
    Metrics(commands::metrics::MetricsArgs),
    /// Best way to take one period as two halves
    Split(commands::split::SplitArgs),
    /// Best nearby position for one period
    Shift(commands::shift::ShiftArgs),
    /// Best non-overlapping fixed-length periods in a year
    Fraction(commands::fraction::FractionArgs),
    /// Bridge days between holidays and weekends
    Bridges(commands::bridges::BridgesArgs),
    /// List the holiday calendar of a year
    Holidays(commands::holidays::HolidaysArgs),
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Recommend(_) => "recommend",
            Self::Metrics(_) => "metrics",
            Self::Split(_) => "split",
            Self::Shift(_) => "shift",
            Self::Fraction(_) => "fraction",
            Self::Bridges(_) => "bridges",
            Self::Holidays(_) => "holidays",
            Self::Config { .. } => "config",
            Self::Completions { .. } => "completions",
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let span = logging::command_span(cli.command.name(), cli.json);
    let _entered = span.enter();

    let ctx = Context {
        json: cli.json,
        holidays: cli.holidays,
    };
    let result = match cli.command {
        Commands::Recommend(args) => commands::recommend::run(args, &ctx),
        Commands::Metrics(args) => commands::metrics::run(args, &ctx),
        Commands::Split(args) => commands::split::run(args, &ctx),
        Commands::Shift(args) => commands::shift::run(args, &ctx),
        Commands::Fraction(args) => commands::fraction::run(args, &ctx),
        Commands::Bridges(args) => commands::bridges::run(args, &ctx),
        Commands::Holidays(args) => commands::holidays::run(args, &ctx),
        Commands::Config { action } => commands::config::run(action, &ctx),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "leaveplan-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
