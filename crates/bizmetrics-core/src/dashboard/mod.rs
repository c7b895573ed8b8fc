pub mod cross_period;
pub mod single_period;
pub mod summary;

use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::{self, canonicalize_period};
use crate::types::{with_metadata, ComputationOutput, PeriodKpis, RawPeriodRecord};
use crate::MetricsResult;

use summary::DashboardSummary;

// ---------------------------------------------------------------------------
// Types — Dashboard assembly
// ---------------------------------------------------------------------------

/// Optional period-range restriction for a dashboard request.
///
/// Bounds are inclusive period keys. Cross-period KPIs are always computed
/// against the full history, so the first period inside the range still
/// compares against the period just before it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// One period's raw fields together with its derived KPI map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodEntry {
    #[serde(flatten)]
    pub record: RawPeriodRecord,
    pub kpis: PeriodKpis,
}

/// Full dashboard payload: annotated periods plus the executive summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOutput {
    pub periods: Vec<PeriodEntry>,
    pub summary: DashboardSummary,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Division that treats an absent or zero denominator as "no answer".
/// This is the central missing-data policy: a ratio over nothing is
/// undefined, never zero and never an error.
pub(crate) fn div(numerator: Option<Decimal>, denominator: Option<Decimal>) -> Option<Decimal> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if !d.is_zero() => Some(n / d),
        _ => None,
    }
}

/// Subtraction over optional operands; undefined if either side is absent.
pub(crate) fn sub(a: Option<Decimal>, b: Option<Decimal>) -> Option<Decimal> {
    Some(a? - b?)
}

/// Period-over-period change as a fraction of the previous value.
pub(crate) fn pct_change(current: Option<Decimal>, previous: Option<Decimal>) -> Option<Decimal> {
    match (current, previous) {
        (Some(c), Some(p)) if !p.is_zero() => Some((c - p) / p),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

fn compute_rows(
    records: Vec<RawPeriodRecord>,
    options: &DashboardOptions,
    warnings: &mut Vec<String>,
) -> MetricsResult<Vec<PeriodEntry>> {
    let from = options.from.as_deref().map(canonicalize_period).transpose()?;
    let to = options.to.as_deref().map(canonicalize_period).transpose()?;

    let series = period::normalize(records)?;
    for p in series.replaced_periods() {
        warnings.push(format!("Duplicate period {p}: kept the latest record"));
    }

    let mut kpis: Vec<PeriodKpis> = series.records().iter().map(single_period::compute).collect();
    cross_period::annotate(series.records(), &mut kpis);

    let mut rows: Vec<PeriodEntry> = series
        .records()
        .iter()
        .cloned()
        .zip(kpis)
        .map(|(record, kpis)| PeriodEntry { record, kpis })
        .collect();

    if from.is_some() || to.is_some() {
        rows.retain(|row| {
            from.as_deref().map_or(true, |f| row.record.period.as_str() >= f)
                && to.as_deref().map_or(true, |t| row.record.period.as_str() <= t)
        });
        if rows.is_empty() && !series.is_empty() {
            warnings.push("No periods fall inside the requested range".to_string());
        }
    }

    Ok(rows)
}

/// Derive the complete dashboard for one company's record set: normalize,
/// compute per-period KPIs, annotate cross-period KPIs over the full
/// history, apply the optional range filter, and summarize.
pub fn build_dashboard(
    records: Vec<RawPeriodRecord>,
    options: &DashboardOptions,
) -> MetricsResult<ComputationOutput<DashboardOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let record_count = records.len();
    let periods = compute_rows(records, options, &mut warnings)?;
    let summary = summary::summarize(&periods);

    let output = DashboardOutput { periods, summary };
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Periodic KPI derivation with cross-period comparatives and traffic-light thresholds",
        &serde_json::json!({
            "records_submitted": record_count,
            "periods_returned": output.periods.len(),
            "from": options.from,
            "to": options.to,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Executive-summary-only variant of [`build_dashboard`], for callers that
/// render a single overview card instead of the full period table.
pub fn build_summary(
    records: Vec<RawPeriodRecord>,
    options: &DashboardOptions,
) -> MetricsResult<ComputationOutput<DashboardSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let record_count = records.len();
    let periods = compute_rows(records, options, &mut warnings)?;
    let summary = summary::summarize(&periods);

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Executive summary over derived periodic KPIs",
        &serde_json::json!({
            "records_submitted": record_count,
            "periods_considered": periods.len(),
            "from": options.from,
            "to": options.to,
        }),
        warnings,
        elapsed,
        summary,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
