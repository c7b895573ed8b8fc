use bizmetrics_core::dashboard::{build_dashboard, build_summary, DashboardOptions};
use bizmetrics_core::dashboard::summary::Trend;
use bizmetrics_core::{MetricsError, RawPeriodRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// End-to-end dashboard derivation
// ===========================================================================

/// Three months of a small services company finding its footing:
/// revenue grows, January runs at a loss, March churn drops to zero.
fn sample_services_company() -> Vec<RawPeriodRecord> {
    vec![
        RawPeriodRecord {
            period: "2024-01".to_string(),
            ingresos_netos: Some(dec!(40_000)),
            costos_directos: Some(dec!(18_000)),
            costos_fijos: Some(dec!(14_000)),
            gastos_operativos: Some(dec!(25_000)),
            utilidad_neta: Some(dec!(-3_000)),
            utilidad_operativa: Some(dec!(-1_500)),
            activo_corriente: Some(dec!(20_000)),
            pasivo_corriente: Some(dec!(16_000)),
            caja_efectivo: Some(dec!(90_000)),
            egresos_totales: Some(dec!(45_000)),
            clientes_activos: Some(dec!(80)),
            clientes_nuevos: Some(dec!(12)),
            clientes_perdidos: Some(dec!(8)),
            gasto_comercial: Some(dec!(6_000)),
            ..Default::default()
        },
        RawPeriodRecord {
            period: "2024-02".to_string(),
            ingresos_netos: Some(dec!(50_000)),
            costos_directos: Some(dec!(20_000)),
            costos_fijos: Some(dec!(14_000)),
            gastos_operativos: Some(dec!(24_000)),
            utilidad_neta: Some(dec!(2_500)),
            utilidad_operativa: Some(dec!(4_000)),
            activo_corriente: Some(dec!(24_000)),
            pasivo_corriente: Some(dec!(15_000)),
            caja_efectivo: Some(dec!(88_000)),
            egresos_totales: Some(dec!(44_000)),
            clientes_activos: Some(dec!(90)),
            clientes_nuevos: Some(dec!(14)),
            clientes_perdidos: Some(dec!(4)),
            gasto_comercial: Some(dec!(7_000)),
            ..Default::default()
        },
        RawPeriodRecord {
            period: "2024-03".to_string(),
            ingresos_netos: Some(dec!(60_000)),
            costos_directos: Some(dec!(21_000)),
            costos_fijos: Some(dec!(14_000)),
            gastos_operativos: Some(dec!(24_000)),
            utilidad_neta: Some(dec!(9_000)),
            utilidad_operativa: Some(dec!(12_000)),
            activo_corriente: Some(dec!(30_000)),
            pasivo_corriente: Some(dec!(14_000)),
            caja_efectivo: Some(dec!(93_000)),
            egresos_totales: Some(dec!(48_000)),
            clientes_activos: Some(dec!(100)),
            clientes_nuevos: Some(dec!(14)),
            clientes_perdidos: Some(dec!(0)),
            gasto_comercial: Some(dec!(7_000)),
            ..Default::default()
        },
    ]
}

#[test]
fn test_full_derivation_over_three_months() {
    let output = build_dashboard(sample_services_company(), &DashboardOptions::default()).unwrap();
    let result = &output.result;

    assert_eq!(result.periods.len(), 3);
    assert!(output.warnings.is_empty());

    let january = &result.periods[0].kpis;
    let march = &result.periods[2].kpis;

    // January: -3000 / 40000
    assert_eq!(january.margen_neto, Some(dec!(-0.075)));
    // No previous period, so no comparatives yet
    assert_eq!(january.crecimiento_ingresos_pct, None);
    assert_eq!(january.delta_ingresos, None);

    // March margins: 9000 / 60000 and (60000 - 21000) / 60000
    assert_eq!(march.margen_neto, Some(dec!(0.15)));
    assert_eq!(march.margen_bruto, Some(dec!(0.65)));
    // Growth vs February: (60000 - 50000) / 50000
    assert_eq!(march.crecimiento_ingresos_pct, Some(dec!(0.2)));
    assert_eq!(march.delta_ingresos, Some(dec!(10_000)));
    // Zero churn in March: full retention, LTV undefined
    assert_eq!(march.churn_rate, Some(dec!(0)));
    assert_eq!(march.retencion, Some(dec!(1)));
    assert_eq!(march.ltv, None);

    // Cumulative operating flow:
    // Jan 40000-18000-25000 = -3000; Feb 50000-20000-24000 = 6000;
    // Mar 60000-21000-24000 = 15000
    let acumulado: Vec<Option<Decimal>> = result
        .periods
        .iter()
        .map(|p| p.kpis.cashflow_acumulado)
        .collect();
    assert_eq!(
        acumulado,
        vec![Some(dec!(-3000)), Some(dec!(3000)), Some(dec!(18000))]
    );

    // Trailing revenue average at March: (40000 + 50000 + 60000) / 3
    assert_eq!(march.promedio_ingresos_3m, Some(dec!(50_000)));
}

#[test]
fn test_summary_over_the_series() {
    let output = build_summary(sample_services_company(), &DashboardOptions::default()).unwrap();
    let summary = &output.result;

    assert_eq!(summary.total_periods, 3);
    let range = summary.date_range.as_ref().unwrap();
    assert_eq!(range.from, "2024-01");
    assert_eq!(range.to, "2024-03");

    assert_eq!(summary.totals.ingresos, dec!(150_000));
    assert_eq!(summary.totals.utilidad, dec!(8_500));
    assert_eq!(summary.totals.costos, dec!(59_000));

    assert_eq!(summary.averages.ingresos_promedio, Some(dec!(50_000)));
    // margins: -0.075, 0.05, 0.15 => mean = 0.125 / 3
    assert_eq!(
        summary.averages.margen_neto_promedio.map(|v| v.round_dp(6)),
        Some(dec!(0.041667))
    );

    assert_eq!(summary.trend, Trend::Up);
    assert_eq!(summary.latest_period.as_deref(), Some("2024-03"));
    let latest = summary.latest_kpis.as_ref().unwrap();
    assert_eq!(latest.margen_neto, Some(dec!(0.15)));
}

#[test]
fn test_out_of_order_and_duplicate_submission() {
    let mut records = sample_services_company();
    records.reverse();
    // Re-upload February with corrected revenue; the re-upload wins.
    let mut corrected = records[1].clone();
    assert_eq!(corrected.period, "2024-02");
    corrected.ingresos_netos = Some(dec!(52_000));
    records.push(corrected);

    let output = build_dashboard(records, &DashboardOptions::default()).unwrap();
    let periods: Vec<&str> = output
        .result
        .periods
        .iter()
        .map(|p| p.record.period.as_str())
        .collect();
    assert_eq!(periods, ["2024-01", "2024-02", "2024-03"]);
    assert_eq!(
        output.result.periods[1].record.ingresos_netos,
        Some(dec!(52_000))
    );
    assert!(output.warnings.iter().any(|w| w.contains("2024-02")));

    // February's growth compares against January, not March:
    // (52000 - 40000) / 40000 = 0.3
    assert_eq!(
        output.result.periods[1].kpis.crecimiento_ingresos_pct,
        Some(dec!(0.3))
    );
}

#[test]
fn test_range_filter_with_history_behind_it() {
    let options = DashboardOptions {
        from: Some("2024-03".to_string()),
        to: None,
    };
    let output = build_dashboard(sample_services_company(), &options).unwrap();

    assert_eq!(output.result.periods.len(), 1);
    let march = &output.result.periods[0];
    assert_eq!(march.record.period, "2024-03");
    // Cross-period context survives the filter
    assert_eq!(march.kpis.crecimiento_ingresos_pct, Some(dec!(0.2)));
    assert_eq!(march.kpis.cashflow_acumulado, Some(dec!(18_000)));

    // The summary only covers the filtered window
    assert_eq!(output.result.summary.total_periods, 1);
    assert_eq!(output.result.summary.totals.ingresos, dec!(60_000));
    assert_eq!(output.result.summary.trend, Trend::Neutral);
}

#[test]
fn test_sparse_records_degrade_gracefully() {
    // Only revenue is known; everything that needs more stays undefined,
    // everything that doesn't still computes.
    let records = vec![RawPeriodRecord {
        period: "2024-01".to_string(),
        ingresos_netos: Some(dec!(10_000)),
        ..Default::default()
    }];
    let output = build_dashboard(records, &DashboardOptions::default()).unwrap();
    let kpis = &output.result.periods[0].kpis;

    assert_eq!(kpis.arr_anualizado, Some(dec!(120_000)));
    assert_eq!(kpis.promedio_ingresos_3m, Some(dec!(10_000)));
    assert_eq!(kpis.margen_neto, None);
    assert_eq!(kpis.liquidez_corriente, None);
    assert_eq!(kpis.runway_meses, None);
}

#[test]
fn test_bad_period_rejects_whole_batch() {
    let mut records = sample_services_company();
    records[1].period = "febrero".to_string();
    let err = build_dashboard(records, &DashboardOptions::default()).unwrap_err();
    assert!(matches!(err, MetricsError::InvalidPeriodFormat { .. }));
}
