use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct DashboardBindingInput {
    records: Vec<bizmetrics_core::RawPeriodRecord>,
    #[serde(default)]
    options: bizmetrics_core::dashboard::DashboardOptions,
}

#[napi]
pub fn compute_dashboard(input_json: String) -> NapiResult<String> {
    let input: DashboardBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizmetrics_core::dashboard::build_dashboard(input.records, &input.options)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn dashboard_summary(input_json: String) -> NapiResult<String> {
    let input: DashboardBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizmetrics_core::dashboard::build_summary(input.records, &input.options)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Registry / classification
// ---------------------------------------------------------------------------

#[napi]
pub fn kpi_metadata() -> NapiResult<String> {
    serde_json::to_string(&serde_json::json!({ "kpis": bizmetrics_core::registry::all() }))
        .map_err(to_napi_error)
}

#[napi]
pub fn classify_kpi(key: String, value_json: String) -> NapiResult<String> {
    let value: Option<rust_decimal::Decimal> =
        serde_json::from_str(&value_json).map_err(to_napi_error)?;
    let def = bizmetrics_core::registry::lookup(&key);
    let status = bizmetrics_core::status::classify(value, def);
    serde_json::to_string(&status).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sales ledger
// ---------------------------------------------------------------------------

#[napi]
pub fn sales_summary(input_json: String) -> NapiResult<String> {
    let sales: Vec<bizmetrics_core::sales::SaleRecord> =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizmetrics_core::sales::summarize_sales(&sales).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
