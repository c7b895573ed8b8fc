use rust_decimal_macros::dec;

use crate::types::{PeriodKpis, RawPeriodRecord};

use super::{div, sub};

/// Compute every KPI that depends on a single period's raw fields.
///
/// Stateless per record: running this twice over the same input yields the
/// same map. Any formula whose divisor is absent or zero comes out
/// undefined; any subtraction with an absent operand likewise. A field
/// that is present but zero is a legitimate value everywhere else; only
/// its use as a denominator makes the dependent ratio undefined.
///
/// Cross-period slots (growth, deltas, cumulative, rolling) are left
/// undefined here and filled in by [`super::cross_period::annotate`].
pub fn compute(r: &RawPeriodRecord) -> PeriodKpis {
    // Contribution margin feeds margen_bruto and the break-even ratio.
    let margen_contribucion = sub(r.ingresos_netos, r.costos_directos);
    let flujo_operativo = sub(margen_contribucion, r.gastos_operativos);

    let arpu = div(r.ingresos_netos, r.clientes_activos);
    let churn_rate = div(r.clientes_perdidos, r.clientes_activos);
    // Zero churn would mean an infinite customer lifetime: LTV stays
    // undefined rather than pretending otherwise.
    let ltv = div(arpu, churn_rate);
    let cac = div(r.gasto_comercial, r.clientes_nuevos);

    // Burn is the period's total outflows taken as-is; runway divides the
    // closing cash position by it.
    let burn_rate = r.egresos_totales;
    let runway_meses = div(r.caja_efectivo, burn_rate);

    PeriodKpis {
        // Rentabilidad
        margen_neto: div(r.utilidad_neta, r.ingresos_netos),
        margen_bruto: div(margen_contribucion, r.ingresos_netos),
        margen_operativo: div(r.utilidad_operativa, r.ingresos_netos),
        margen_contribucion,
        ratio_costos_fijos: div(r.costos_fijos, r.ingresos_netos),

        // Liquidez y flujo
        liquidez_corriente: div(r.activo_corriente, r.pasivo_corriente),
        flujo_operativo,
        burn_rate,
        runway_meses,
        arr_anualizado: r.ingresos_netos.map(|v| v * dec!(12)),
        punto_equilibrio_ratio: div(r.costos_fijos, margen_contribucion),

        // Clientes
        arpu,
        arpu_anualizado: arpu.map(|v| v * dec!(12)),
        churn_rate,
        retencion: churn_rate.map(|c| dec!(1) - c),
        ltv,

        // Adquisición
        cac,
        ltv_cac: div(ltv, cac),
        payback_cac_meses: div(cac, arpu),

        // Productividad
        utilizacion_personal: div(r.horas_facturadas, r.horas_disponibles),
        productividad_ingreso_por_hora: div(r.ingresos_netos, r.horas_facturadas),

        // Tributario
        ventas_vs_compras: sub(r.ventas_netas, r.compras_netas),
        resultado_igv: sub(r.igv_ventas, r.igv_compras),

        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn full_record() -> RawPeriodRecord {
        RawPeriodRecord {
            period: "2024-01".to_string(),
            ingresos_netos: Some(dec!(50000)),
            costos_directos: Some(dec!(20000)),
            costos_fijos: Some(dec!(15000)),
            gastos_operativos: Some(dec!(8000)),
            utilidad_neta: Some(dec!(7000)),
            utilidad_operativa: Some(dec!(10000)),
            activo_corriente: Some(dec!(25000)),
            pasivo_corriente: Some(dec!(10000)),
            caja_efectivo: Some(dec!(30000)),
            egresos_totales: Some(dec!(43000)),
            clientes_activos: Some(dec!(100)),
            clientes_nuevos: Some(dec!(15)),
            clientes_perdidos: Some(dec!(5)),
            horas_disponibles: Some(dec!(160)),
            horas_facturadas: Some(dec!(140)),
            gasto_comercial: Some(dec!(3000)),
            ventas_netas: Some(dec!(60000)),
            compras_netas: Some(dec!(25000)),
            igv_ventas: Some(dec!(10800)),
            igv_compras: Some(dec!(4500)),
        }
    }

    #[test]
    fn test_margins_on_complete_record() {
        let kpis = compute(&full_record());
        assert_eq!(kpis.margen_neto, Some(dec!(0.14)));
        assert_eq!(kpis.margen_bruto, Some(dec!(0.6)));
        assert_eq!(kpis.margen_operativo, Some(dec!(0.2)));
        assert_eq!(kpis.margen_contribucion, Some(dec!(30000)));
        assert_eq!(kpis.ratio_costos_fijos, Some(dec!(0.3)));
        assert_eq!(kpis.punto_equilibrio_ratio, Some(dec!(0.5)));
    }

    #[test]
    fn test_liquidity_and_flow() {
        let kpis = compute(&full_record());
        assert_eq!(kpis.liquidez_corriente, Some(dec!(2.5)));
        // 50000 - 20000 - 8000
        assert_eq!(kpis.flujo_operativo, Some(dec!(22000)));
        assert_eq!(kpis.burn_rate, Some(dec!(43000)));
        // 30000 / 43000
        assert_eq!(
            kpis.runway_meses.map(|v| v.round_dp(4)),
            Some(dec!(0.6977))
        );
        assert_eq!(kpis.arr_anualizado, Some(dec!(600000)));
    }

    #[test]
    fn test_customer_economics() {
        let kpis = compute(&full_record());
        assert_eq!(kpis.arpu, Some(dec!(500)));
        assert_eq!(kpis.arpu_anualizado, Some(dec!(6000)));
        assert_eq!(kpis.churn_rate, Some(dec!(0.05)));
        assert_eq!(kpis.retencion, Some(dec!(0.95)));
        // arpu / churn = 500 / 0.05
        assert_eq!(kpis.ltv, Some(dec!(10000)));
        assert_eq!(kpis.cac, Some(dec!(200)));
        assert_eq!(kpis.ltv_cac, Some(dec!(50)));
        assert_eq!(kpis.payback_cac_meses, Some(dec!(0.4)));
    }

    #[test]
    fn test_productivity_and_tax() {
        let kpis = compute(&full_record());
        assert_eq!(kpis.utilizacion_personal, Some(dec!(0.875)));
        // 50000 / 140
        assert_eq!(
            kpis.productividad_ingreso_por_hora.map(|v| v.round_dp(2)),
            Some(dec!(357.14))
        );
        assert_eq!(kpis.ventas_vs_compras, Some(dec!(35000)));
        assert_eq!(kpis.resultado_igv, Some(dec!(6300)));
    }

    #[test]
    fn test_zero_revenue_undefines_revenue_denominator_kpis() {
        let mut r = full_record();
        r.ingresos_netos = Some(dec!(0));
        let kpis = compute(&r);
        assert_eq!(kpis.margen_neto, None);
        assert_eq!(kpis.margen_bruto, None);
        assert_eq!(kpis.margen_operativo, None);
        assert_eq!(kpis.ratio_costos_fijos, None);
        // Numerator-only formulas still compute
        assert_eq!(kpis.margen_contribucion, Some(dec!(-20000)));
        assert_eq!(kpis.arr_anualizado, Some(dec!(0)));
        // and ARPU is zero, not undefined: the division is by customers
        assert_eq!(kpis.arpu, Some(dec!(0)));
        assert_eq!(kpis.productividad_ingreso_por_hora, Some(dec!(0)));
    }

    #[test]
    fn test_absent_revenue_undefines_dependents() {
        let mut r = full_record();
        r.ingresos_netos = None;
        let kpis = compute(&r);
        assert_eq!(kpis.margen_neto, None);
        assert_eq!(kpis.margen_bruto, None);
        assert_eq!(kpis.margen_contribucion, None);
        assert_eq!(kpis.arpu, None);
        assert_eq!(kpis.arr_anualizado, None);
        assert_eq!(kpis.flujo_operativo, None);
        assert_eq!(kpis.productividad_ingreso_por_hora, None);
        // Independent KPIs are unaffected
        assert_eq!(kpis.liquidez_corriente, Some(dec!(2.5)));
        assert_eq!(kpis.resultado_igv, Some(dec!(6300)));
    }

    #[test]
    fn test_retention_tracks_churn() {
        // Defined together...
        let kpis = compute(&full_record());
        assert_eq!(
            kpis.retencion,
            kpis.churn_rate.map(|c| dec!(1) - c)
        );

        // ...and undefined together when clientes_activos is absent.
        let mut r = full_record();
        r.clientes_activos = None;
        let kpis = compute(&r);
        assert_eq!(kpis.churn_rate, None);
        assert_eq!(kpis.retencion, None);
    }

    #[test]
    fn test_zero_churn_gives_full_retention_but_no_ltv() {
        let mut r = full_record();
        r.clientes_perdidos = Some(dec!(0));
        let kpis = compute(&r);
        assert_eq!(kpis.churn_rate, Some(dec!(0)));
        assert_eq!(kpis.retencion, Some(dec!(1)));
        assert_eq!(kpis.ltv, None);
        assert_eq!(kpis.ltv_cac, None);
    }

    #[test]
    fn test_zero_burn_leaves_runway_undefined() {
        let mut r = full_record();
        r.egresos_totales = Some(dec!(0));
        let kpis = compute(&r);
        assert_eq!(kpis.burn_rate, Some(dec!(0)));
        assert_eq!(kpis.runway_meses, None);
    }

    #[test]
    fn test_breakeven_undefined_at_zero_contribution() {
        let mut r = full_record();
        r.costos_directos = r.ingresos_netos;
        let kpis = compute(&r);
        assert_eq!(kpis.margen_contribucion, Some(dec!(0)));
        assert_eq!(kpis.punto_equilibrio_ratio, None);
    }

    #[test]
    fn test_operating_margin_requires_operating_income() {
        // No proxy from revenue/costs: absent utilidad_operativa means
        // an undefined operating margin even with everything else present.
        let mut r = full_record();
        r.utilidad_operativa = None;
        let kpis = compute(&r);
        assert_eq!(kpis.margen_operativo, None);
    }

    #[test]
    fn test_empty_record_computes_nothing() {
        let kpis = compute(&RawPeriodRecord {
            period: "2024-01".to_string(),
            ..Default::default()
        });
        assert_eq!(kpis, PeriodKpis::default());
    }

    #[test]
    fn test_idempotent() {
        let r = full_record();
        assert_eq!(compute(&r), compute(&r));
    }
}
