use clap::Args;
use serde_json::Value;

use bizmetrics_core::sales::{self, SaleRecord};

use crate::input;

/// Arguments for the monthly sales summary
#[derive(Args)]
pub struct SalesArgs {
    /// Path to a JSON file holding an array of sale records
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sales_summary(args: SalesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sales: Vec<SaleRecord> = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input FILE is required (or pipe a sales JSON array via stdin)".into());
    };

    let summary = sales::summarize_sales(&sales)?;
    Ok(serde_json::to_value(summary)?)
}
