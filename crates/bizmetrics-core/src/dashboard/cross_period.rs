use rust_decimal::Decimal;

use crate::types::{PeriodKpis, RawPeriodRecord};

use super::{pct_change, sub};

/// Fill the cross-period KPI slots over an already-ordered series.
///
/// One forward pass that carries the previous record, the running
/// cashflow total, and the last two revenue values, without re-scanning
/// earlier periods. `records` and `kpis` are parallel slices produced by
/// the normalizer and the single-period calculator.
///
/// Policies:
/// - growth/delta KPIs are undefined at the first period and whenever the
///   needed side is absent (or, for growth, the previous value is zero);
/// - the cumulative cashflow starts at zero and an undefined
///   flujo_operativo contributes zero without resetting the total, so the
///   KPI is defined for every period of a non-empty series;
/// - the trailing 3-period revenue average uses whatever defined values
///   the window holds; it is undefined only when the window has none.
pub fn annotate(records: &[RawPeriodRecord], kpis: &mut [PeriodKpis]) {
    debug_assert_eq!(records.len(), kpis.len());

    let mut acumulado = Decimal::ZERO;
    let mut prev_revenue: Option<Decimal> = None;
    let mut prev2_revenue: Option<Decimal> = None;

    for (i, (record, kpi)) in records.iter().zip(kpis.iter_mut()).enumerate() {
        if i > 0 {
            let prev = &records[i - 1];
            kpi.crecimiento_ingresos_pct = pct_change(record.ingresos_netos, prev.ingresos_netos);
            kpi.crecimiento_utilidad_pct = pct_change(record.utilidad_neta, prev.utilidad_neta);
            kpi.variacion_costos_pct = pct_change(record.costos_directos, prev.costos_directos);
            kpi.delta_ingresos = sub(record.ingresos_netos, prev.ingresos_netos);
            kpi.delta_utilidad = sub(record.utilidad_neta, prev.utilidad_neta);
        }

        acumulado += kpi.flujo_operativo.unwrap_or(Decimal::ZERO);
        kpi.cashflow_acumulado = Some(acumulado);

        let window = [prev2_revenue, prev_revenue, record.ingresos_netos];
        let defined: Vec<Decimal> = window.into_iter().flatten().collect();
        kpi.promedio_ingresos_3m = if defined.is_empty() {
            None
        } else {
            Some(defined.iter().sum::<Decimal>() / Decimal::from(defined.len() as u64))
        };

        prev2_revenue = prev_revenue;
        prev_revenue = record.ingresos_netos;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
