use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Types — Metric Registry
// ---------------------------------------------------------------------------

/// Semantic unit of a KPI, used by the rendering layer to pick a formatter.
/// Percentages are stored as fractions; the unit only says how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[serde(rename = "pct")]
    Percent,
    Money,
    Ratio,
    Months,
    None,
}

/// Traffic-light band rule for a KPI.
///
/// `HighGood`: bigger is better. Below `red_max` is critical, below
/// `yellow_max` is warning, everything else healthy. `LowGood`: smaller
/// is better. Up to `green_max` is healthy, up to `yellow_max` warning,
/// everything above critical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusRule {
    HighGood { red_max: Decimal, yellow_max: Decimal },
    LowGood { green_max: Decimal, yellow_max: Decimal },
}

/// Static definition of a derivable KPI. The registry is the single source
/// of truth for units and thresholds; calculators never carry their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDefinition {
    pub key: &'static str,
    pub title: &'static str,
    pub unit: Unit,
    /// Human-readable formula, for the metadata surface
    pub formula: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<StatusRule>,
}

// ---------------------------------------------------------------------------
// The registry table
// ---------------------------------------------------------------------------

/// Definition resolved for unknown keys: renders as a plain number,
/// never classified.
pub const UNKNOWN_METRIC: MetricDefinition = MetricDefinition {
    key: "",
    title: "",
    unit: Unit::None,
    formula: "",
    rule: None,
};

pub static METRICS: &[MetricDefinition] = &[
    // Rentabilidad
    MetricDefinition {
        key: "margen_neto",
        title: "Margen Neto",
        unit: Unit::Percent,
        formula: "utilidad_neta / ingresos_netos",
        rule: Some(StatusRule::HighGood { red_max: dec!(0.05), yellow_max: dec!(0.15) }),
    },
    MetricDefinition {
        key: "margen_bruto",
        title: "Margen Bruto",
        unit: Unit::Percent,
        formula: "(ingresos_netos - costos_directos) / ingresos_netos",
        rule: Some(StatusRule::HighGood { red_max: dec!(0.20), yellow_max: dec!(0.35) }),
    },
    MetricDefinition {
        key: "margen_operativo",
        title: "Margen Operativo",
        unit: Unit::Percent,
        formula: "utilidad_operativa / ingresos_netos",
        rule: Some(StatusRule::HighGood { red_max: dec!(0.08), yellow_max: dec!(0.15) }),
    },
    MetricDefinition {
        key: "margen_contribucion",
        title: "Margen Contribución",
        unit: Unit::Money,
        formula: "ingresos_netos - costos_directos",
        rule: None,
    },
    MetricDefinition {
        key: "ratio_costos_fijos",
        title: "Ratio Costos Fijos",
        unit: Unit::Percent,
        formula: "costos_fijos / ingresos_netos",
        rule: None,
    },
    // Liquidez y flujo
    MetricDefinition {
        key: "liquidez_corriente",
        title: "Liquidez Corriente",
        unit: Unit::Ratio,
        formula: "activo_corriente / pasivo_corriente",
        rule: Some(StatusRule::HighGood { red_max: dec!(1.0), yellow_max: dec!(1.5) }),
    },
    MetricDefinition {
        key: "flujo_operativo",
        title: "Flujo Operativo",
        unit: Unit::Money,
        formula: "ingresos_netos - costos_directos - gastos_operativos",
        rule: None,
    },
    MetricDefinition {
        key: "burn_rate",
        title: "Burn Rate",
        unit: Unit::Money,
        formula: "egresos_totales",
        rule: None,
    },
    MetricDefinition {
        key: "runway_meses",
        title: "Runway",
        unit: Unit::Months,
        formula: "caja_efectivo / burn_rate",
        rule: Some(StatusRule::HighGood { red_max: dec!(3.0), yellow_max: dec!(6.0) }),
    },
    MetricDefinition {
        key: "arr_anualizado",
        title: "ARR (anualizado)",
        unit: Unit::Money,
        formula: "ingresos_netos * 12",
        rule: None,
    },
    MetricDefinition {
        key: "punto_equilibrio_ratio",
        title: "Punto Equilibrio",
        unit: Unit::Percent,
        formula: "costos_fijos / margen_contribucion",
        rule: None,
    },
    // Clientes
    MetricDefinition {
        key: "arpu",
        title: "ARPU",
        unit: Unit::Money,
        formula: "ingresos_netos / clientes_activos",
        rule: None,
    },
    MetricDefinition {
        key: "arpu_anualizado",
        title: "ARPU anualizado",
        unit: Unit::Money,
        formula: "arpu * 12",
        rule: None,
    },
    MetricDefinition {
        key: "churn_rate",
        title: "Churn Rate",
        unit: Unit::Percent,
        formula: "clientes_perdidos / clientes_activos",
        rule: Some(StatusRule::LowGood { green_max: dec!(0.05), yellow_max: dec!(0.10) }),
    },
    MetricDefinition {
        key: "retencion",
        title: "Retención",
        unit: Unit::Percent,
        formula: "1 - churn_rate",
        rule: Some(StatusRule::HighGood { red_max: dec!(0.80), yellow_max: dec!(0.90) }),
    },
    MetricDefinition {
        key: "ltv",
        title: "LTV",
        unit: Unit::Money,
        formula: "arpu / churn_rate",
        rule: None,
    },
    // Adquisición
    MetricDefinition {
        key: "cac",
        title: "CAC",
        unit: Unit::Money,
        formula: "gasto_comercial / clientes_nuevos",
        rule: None,
    },
    MetricDefinition {
        key: "ltv_cac",
        title: "LTV/CAC",
        unit: Unit::Ratio,
        formula: "ltv / cac",
        rule: Some(StatusRule::HighGood { red_max: dec!(2.0), yellow_max: dec!(3.0) }),
    },
    MetricDefinition {
        key: "payback_cac_meses",
        title: "Payback CAC",
        unit: Unit::Months,
        formula: "cac / arpu",
        rule: Some(StatusRule::LowGood { green_max: dec!(3.0), yellow_max: dec!(6.0) }),
    },
    // Productividad
    MetricDefinition {
        key: "utilizacion_personal",
        title: "Utilización personal",
        unit: Unit::Percent,
        formula: "horas_facturadas / horas_disponibles",
        rule: None,
    },
    MetricDefinition {
        key: "productividad_ingreso_por_hora",
        title: "Productividad (ingreso por hora)",
        unit: Unit::Money,
        formula: "ingresos_netos / horas_facturadas",
        rule: None,
    },
    // Tributario
    MetricDefinition {
        key: "ventas_vs_compras",
        title: "Ventas vs Compras",
        unit: Unit::Money,
        formula: "ventas_netas - compras_netas",
        rule: None,
    },
    MetricDefinition {
        key: "resultado_igv",
        title: "Resultado IGV",
        unit: Unit::Money,
        formula: "igv_ventas - igv_compras",
        rule: None,
    },
    // Comparativos
    MetricDefinition {
        key: "crecimiento_ingresos_pct",
        title: "Crecimiento Ingresos",
        unit: Unit::Percent,
        formula: "(actual - anterior) / anterior",
        rule: None,
    },
    MetricDefinition {
        key: "crecimiento_utilidad_pct",
        title: "Crecimiento Utilidad",
        unit: Unit::Percent,
        formula: "(actual - anterior) / anterior",
        rule: None,
    },
    MetricDefinition {
        key: "variacion_costos_pct",
        title: "Variación Costos",
        unit: Unit::Percent,
        formula: "(actual - anterior) / anterior",
        rule: None,
    },
    MetricDefinition {
        key: "delta_ingresos",
        title: "Delta Ingresos",
        unit: Unit::Money,
        formula: "actual - anterior",
        rule: None,
    },
    MetricDefinition {
        key: "delta_utilidad",
        title: "Delta Utilidad",
        unit: Unit::Money,
        formula: "actual - anterior",
        rule: None,
    },
    // Rolling
    MetricDefinition {
        key: "cashflow_acumulado",
        title: "Cashflow Acumulado",
        unit: Unit::Money,
        formula: "suma(flujo_operativo)",
        rule: None,
    },
    MetricDefinition {
        key: "promedio_ingresos_3m",
        title: "Promedio 3M",
        unit: Unit::Money,
        formula: "promedio(ingresos_netos, 3 periodos)",
        rule: None,
    },
];

/// Resolve a KPI key to its definition. Total: unknown keys get
/// [`UNKNOWN_METRIC`] so callers can always render something.
pub fn lookup(key: &str) -> &'static MetricDefinition {
    METRICS.iter().find(|m| m.key == key).unwrap_or(&UNKNOWN_METRIC)
}

/// The full registry, for the metadata surface.
pub fn all() -> &'static [MetricDefinition] {
    METRICS
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
