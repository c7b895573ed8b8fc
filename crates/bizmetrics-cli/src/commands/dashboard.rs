use clap::Args;
use serde_json::Value;

use bizmetrics_core::dashboard::{self, DashboardOptions};
use bizmetrics_core::RawPeriodRecord;

use crate::input;

/// Arguments for the full dashboard derivation
#[derive(Args)]
pub struct DashboardArgs {
    /// Path to a JSON file holding an array of period records
    #[arg(long)]
    pub input: Option<String>,

    /// Inclusive lower period bound (YYYY-MM)
    #[arg(long)]
    pub from: Option<String>,

    /// Inclusive upper period bound (YYYY-MM)
    #[arg(long)]
    pub to: Option<String>,
}

/// Arguments for the executive summary
#[derive(Args)]
pub struct SummaryArgs {
    /// Path to a JSON file holding an array of period records
    #[arg(long)]
    pub input: Option<String>,

    /// Inclusive lower period bound (YYYY-MM)
    #[arg(long)]
    pub from: Option<String>,

    /// Inclusive upper period bound (YYYY-MM)
    #[arg(long)]
    pub to: Option<String>,
}

pub fn run_dashboard(args: DashboardArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = read_records(args.input.as_deref())?;
    let options = DashboardOptions {
        from: args.from,
        to: args.to,
    };
    let result = dashboard::build_dashboard(records, &options)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = read_records(args.input.as_deref())?;
    let options = DashboardOptions {
        from: args.from,
        to: args.to,
    };
    let result = dashboard::build_summary(records, &options)?;
    Ok(serde_json::to_value(result)?)
}

fn read_records(path: Option<&str>) -> Result<Vec<RawPeriodRecord>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        input::file::read_json(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err("--input FILE is required (or pipe a records JSON array via stdin)".into())
    }
}
