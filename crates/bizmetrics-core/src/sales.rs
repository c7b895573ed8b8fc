use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MetricsError;
use crate::period::canonicalize_period;
use crate::types::Money;
use crate::MetricsResult;

// ---------------------------------------------------------------------------
// Types — Sales ledger
// ---------------------------------------------------------------------------

/// Billing state of a sale. `facturada` is invoiced work; `confirmada` is
/// committed but not yet invoiced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    #[default]
    Facturada,
    Confirmada,
}

/// One sale entry as recorded in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Month key, "YYYY-MM"
    pub month: String,
    pub cliente: String,
    pub monto: Money,
    #[serde(default)]
    pub estado: SaleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nota: Option<String>,
}

/// Per-month totals split by billing state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month: String,
    pub facturada: Money,
    pub confirmada: Money,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Group a sales ledger into per-month facturada/confirmada totals,
/// ascending by month. Month keys are canonicalized with the same rules
/// as period keys; a non-positive amount rejects the batch.
pub fn summarize_sales(sales: &[SaleRecord]) -> MetricsResult<Vec<MonthlySales>> {
    let mut by_month: BTreeMap<String, MonthlySales> = BTreeMap::new();

    for sale in sales {
        if sale.monto <= Decimal::ZERO {
            return Err(MetricsError::InvalidInput {
                field: "monto".to_string(),
                reason: format!("sale amount must be positive, got {}", sale.monto),
            });
        }
        let month = canonicalize_period(&sale.month)?;
        let entry = by_month
            .entry(month.clone())
            .or_insert_with(|| MonthlySales {
                month,
                facturada: Decimal::ZERO,
                confirmada: Decimal::ZERO,
            });
        match sale.estado {
            SaleStatus::Facturada => entry.facturada += sale.monto,
            SaleStatus::Confirmada => entry.confirmada += sale.monto,
        }
    }

    Ok(by_month.into_values().collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
