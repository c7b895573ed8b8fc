use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use bizmetrics_core::registry::{self, Unit};
use bizmetrics_core::status::{self, Status};

/// Arguments for the KPI metadata listing
#[derive(Args)]
pub struct MetadataArgs {
    /// Show a single KPI definition instead of the full registry
    #[arg(long)]
    pub key: Option<String>,
}

/// Arguments for one-off KPI classification
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ClassifyArgs {
    /// KPI key, e.g. margen_neto
    #[arg(long)]
    pub kpi: String,

    /// Computed value as a fraction (0.12 for 12%); omit for "undefined"
    #[arg(long)]
    pub value: Option<Decimal>,
}

#[derive(Serialize)]
struct ClassifyReport {
    kpi: String,
    value: Option<Decimal>,
    title: &'static str,
    unit: Unit,
    status: Status,
}

pub fn run_metadata(args: MetadataArgs) -> Result<Value, Box<dyn std::error::Error>> {
    match args.key {
        Some(key) => {
            let def = registry::lookup(&key);
            if def.key.is_empty() {
                return Err(format!("Unknown KPI key '{key}'").into());
            }
            Ok(serde_json::to_value(def)?)
        }
        None => Ok(serde_json::json!({ "kpis": registry::all() })),
    }
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let def = registry::lookup(&args.kpi);
    let report = ClassifyReport {
        status: status::classify(args.value, def),
        kpi: args.kpi,
        value: args.value,
        title: def.title,
        unit: def.unit,
    };
    Ok(serde_json::to_value(report)?)
}
