use rust_decimal::Decimal;
use serde::Serialize;

use crate::registry::{MetricDefinition, StatusRule};

// ---------------------------------------------------------------------------
// Types — Status Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Healthy,
    None,
}

/// A classified KPI value: semantic severity plus the traffic-light color
/// the dashboard paints the card with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status {
    pub severity: Severity,
    pub label: &'static str,
}

impl From<Severity> for Status {
    fn from(severity: Severity) -> Self {
        let label = match severity {
            Severity::Critical => "red",
            Severity::Warning => "yellow",
            Severity::Healthy => "green",
            Severity::None => "none",
        };
        Status { severity, label }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a computed KPI value against its definition's band rule.
///
/// Total and stateless: an undefined value or a rule-less definition maps
/// to [`Severity::None`]. A value sitting exactly on a threshold falls
/// into the better band.
pub fn classify(value: Option<Decimal>, def: &MetricDefinition) -> Status {
    let (value, rule) = match (value, def.rule) {
        (Some(v), Some(r)) => (v, r),
        _ => return Severity::None.into(),
    };

    let severity = match rule {
        StatusRule::HighGood { red_max, yellow_max } => {
            if value < red_max {
                Severity::Critical
            } else if value < yellow_max {
                Severity::Warning
            } else {
                Severity::Healthy
            }
        }
        StatusRule::LowGood { green_max, yellow_max } => {
            if value <= green_max {
                Severity::Healthy
            } else if value <= yellow_max {
                Severity::Warning
            } else {
                Severity::Critical
            }
        }
    };

    severity.into()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
