mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::dashboard::{DashboardArgs, SummaryArgs};
use commands::metadata::{ClassifyArgs, MetadataArgs};
use commands::sales::SalesArgs;

/// Financial KPI derivation for periodic company data
#[derive(Parser)]
#[command(
    name = "bizmetrics",
    version,
    about = "Derive financial and operational KPIs from periodic company data",
    long_about = "Derives ~30 business KPIs (margins, liquidity, customer economics, \
                  cash runway, growth deltas, rolling averages) from per-period \
                  records, with traffic-light classification and an executive \
                  summary. Records are read as JSON from a file or stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the full dashboard: per-period KPI maps plus summary
    Dashboard(DashboardArgs),
    /// Derive only the executive summary
    Summary(SummaryArgs),
    /// List KPI definitions (units, formulas, traffic-light rules)
    Metadata(MetadataArgs),
    /// Classify a KPI value against its traffic-light rule
    Classify(ClassifyArgs),
    /// Group a sales ledger into monthly facturada/confirmada totals
    SalesSummary(SalesArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Dashboard(args) => commands::dashboard::run_dashboard(args),
        Commands::Summary(args) => commands::dashboard::run_summary(args),
        Commands::Metadata(args) => commands::metadata::run_metadata(args),
        Commands::Classify(args) => commands::metadata::run_classify(args),
        Commands::SalesSummary(args) => commands::sales::run_sales_summary(args),
        Commands::Version => {
            println!("bizmetrics {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
