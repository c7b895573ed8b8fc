use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, PeriodKpis, Rate};

use super::PeriodEntry;

// ---------------------------------------------------------------------------
// Types — Executive summary
// ---------------------------------------------------------------------------

/// Direction of the most recent revenue move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// First and last period keys of the summarized window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

/// Sums over every period where the underlying field is defined. A field
/// that is defined as zero counts; an absent field does not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub ingresos: Money,
    pub utilidad: Money,
    pub costos: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryAverages {
    pub ingresos_promedio: Option<Money>,
    pub margen_neto_promedio: Option<Rate>,
}

/// Executive reduction of a full annotated series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_periods: usize,
    pub date_range: Option<DateRange>,
    pub totals: SummaryTotals,
    pub averages: SummaryAverages,
    pub trend: Trend,
    pub latest_period: Option<String>,
    pub latest_kpis: Option<PeriodKpis>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

fn sum_defined(values: impl Iterator<Item = Option<Decimal>>) -> Decimal {
    values.flatten().sum()
}

fn mean_defined(values: impl Iterator<Item = Option<Decimal>>) -> Option<Decimal> {
    let defined: Vec<Decimal> = values.flatten().collect();
    if defined.is_empty() {
        None
    } else {
        Some(defined.iter().sum::<Decimal>() / Decimal::from(defined.len() as u64))
    }
}

/// Compare the two most recent revenues. Neutral when they are equal or
/// when either side is undefined; a missing month is not a downturn.
fn revenue_trend(entries: &[PeriodEntry]) -> Trend {
    let [.., prev, latest] = entries else {
        return Trend::Neutral;
    };
    match (latest.record.ingresos_netos, prev.record.ingresos_netos) {
        (Some(current), Some(previous)) if current > previous => Trend::Up,
        (Some(current), Some(previous)) if current < previous => Trend::Down,
        _ => Trend::Neutral,
    }
}

/// Reduce an annotated, chronologically ordered series to its executive
/// summary: latest state, totals and averages, date coverage, and the
/// revenue trend.
pub fn summarize(entries: &[PeriodEntry]) -> DashboardSummary {
    let latest = entries.last();

    DashboardSummary {
        total_periods: entries.len(),
        date_range: match (entries.first(), latest) {
            (Some(first), Some(last)) => Some(DateRange {
                from: first.record.period.clone(),
                to: last.record.period.clone(),
            }),
            _ => None,
        },
        totals: SummaryTotals {
            ingresos: sum_defined(entries.iter().map(|e| e.record.ingresos_netos)),
            utilidad: sum_defined(entries.iter().map(|e| e.record.utilidad_neta)),
            costos: sum_defined(entries.iter().map(|e| e.record.costos_directos)),
        },
        averages: SummaryAverages {
            ingresos_promedio: mean_defined(entries.iter().map(|e| e.record.ingresos_netos)),
            margen_neto_promedio: mean_defined(entries.iter().map(|e| e.kpis.margen_neto)),
        },
        trend: revenue_trend(entries),
        latest_period: latest.map(|e| e.record.period.clone()),
        latest_kpis: latest.map(|e| e.kpis.clone()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
