use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// One uploaded record per (company, period). Every numeric field is
/// optional: an absent field leaves the KPIs that depend on it undefined,
/// which is not the same as the field being zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPeriodRecord {
    /// Period key in canonical "YYYY-MM" form
    pub period: String,

    // Finanzas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingresos_netos: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costos_directos: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costos_fijos: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gastos_operativos: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilidad_neta: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilidad_operativa: Option<Money>,

    // Liquidez y caja
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activo_corriente: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pasivo_corriente: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caja_efectivo: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub egresos_totales: Option<Money>,

    // Clientes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clientes_activos: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clientes_nuevos: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clientes_perdidos: Option<Decimal>,

    // Productividad
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horas_disponibles: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horas_facturadas: Option<Decimal>,

    // Adquisición
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gasto_comercial: Option<Money>,

    // Tributario / comercial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ventas_netas: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compras_netas: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub igv_ventas: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub igv_compras: Option<Money>,
}

/// The full derived KPI set for one period. Undefined KPIs serialize as
/// `null`; the key is always present so the rendering layer can show
/// every card, populated or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodKpis {
    // Rentabilidad
    pub margen_neto: Option<Rate>,
    pub margen_bruto: Option<Rate>,
    pub margen_operativo: Option<Rate>,
    pub margen_contribucion: Option<Money>,
    pub ratio_costos_fijos: Option<Rate>,

    // Liquidez y flujo
    pub liquidez_corriente: Option<Decimal>,
    pub flujo_operativo: Option<Money>,
    pub burn_rate: Option<Money>,
    pub runway_meses: Option<Decimal>,
    pub arr_anualizado: Option<Money>,
    pub punto_equilibrio_ratio: Option<Rate>,

    // Clientes
    pub arpu: Option<Money>,
    pub arpu_anualizado: Option<Money>,
    pub churn_rate: Option<Rate>,
    pub retencion: Option<Rate>,
    pub ltv: Option<Money>,

    // Adquisición
    pub cac: Option<Money>,
    pub ltv_cac: Option<Decimal>,
    pub payback_cac_meses: Option<Decimal>,

    // Productividad
    pub utilizacion_personal: Option<Rate>,
    pub productividad_ingreso_por_hora: Option<Money>,

    // Tributario
    pub ventas_vs_compras: Option<Money>,
    pub resultado_igv: Option<Money>,

    // Comparativos (vs periodo anterior)
    pub crecimiento_ingresos_pct: Option<Rate>,
    pub crecimiento_utilidad_pct: Option<Rate>,
    pub variacion_costos_pct: Option<Rate>,
    pub delta_ingresos: Option<Money>,
    pub delta_utilidad: Option<Money>,

    // Rolling / acumulados
    pub cashflow_acumulado: Option<Money>,
    pub promedio_ingresos_3m: Option<Money>,
}

impl PeriodKpis {
    /// Keyed access for callers that address KPIs by registry key
    /// (classification, summaries, rendering). Unknown keys read as
    /// undefined rather than failing.
    pub fn get(&self, key: &str) -> Option<Decimal> {
        match key {
            "margen_neto" => self.margen_neto,
            "margen_bruto" => self.margen_bruto,
            "margen_operativo" => self.margen_operativo,
            "margen_contribucion" => self.margen_contribucion,
            "ratio_costos_fijos" => self.ratio_costos_fijos,
            "liquidez_corriente" => self.liquidez_corriente,
            "flujo_operativo" => self.flujo_operativo,
            "burn_rate" => self.burn_rate,
            "runway_meses" => self.runway_meses,
            "arr_anualizado" => self.arr_anualizado,
            "punto_equilibrio_ratio" => self.punto_equilibrio_ratio,
            "arpu" => self.arpu,
            "arpu_anualizado" => self.arpu_anualizado,
            "churn_rate" => self.churn_rate,
            "retencion" => self.retencion,
            "ltv" => self.ltv,
            "cac" => self.cac,
            "ltv_cac" => self.ltv_cac,
            "payback_cac_meses" => self.payback_cac_meses,
            "utilizacion_personal" => self.utilizacion_personal,
            "productividad_ingreso_por_hora" => self.productividad_ingreso_por_hora,
            "ventas_vs_compras" => self.ventas_vs_compras,
            "resultado_igv" => self.resultado_igv,
            "crecimiento_ingresos_pct" => self.crecimiento_ingresos_pct,
            "crecimiento_utilidad_pct" => self.crecimiento_utilidad_pct,
            "variacion_costos_pct" => self.variacion_costos_pct,
            "delta_ingresos" => self.delta_ingresos,
            "delta_utilidad" => self.delta_utilidad,
            "cashflow_acumulado" => self.cashflow_acumulado,
            "promedio_ingresos_3m" => self.promedio_ingresos_3m,
            _ => None,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
