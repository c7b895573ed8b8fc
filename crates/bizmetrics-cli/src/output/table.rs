use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Raw fields shown in the period table; the rest stay in JSON output.
const HEADLINE_FIELDS: &[&str] = &["ingresos_netos", "utilidad_neta"];

/// KPIs shown in the period table.
const HEADLINE_KPIS: &[&str] = &[
    "margen_neto",
    "margen_bruto",
    "flujo_operativo",
    "crecimiento_ingresos_pct",
    "cashflow_acumulado",
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result);
                print_envelope_footer(map);
            } else if let Some(Value::Array(kpis)) = map.get("kpis") {
                // Registry metadata listing
                print_rows(kpis);
            } else {
                print_object(value);
            }
        }
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value) {
    match result {
        Value::Object(map) => {
            if let Some(Value::Array(periods)) = map.get("periods") {
                if periods.is_empty() {
                    println!("(no periods)");
                } else {
                    print_periods(periods);
                }
                if let Some(summary) = map.get("summary") {
                    println!("\nSummary:");
                    print_object(summary);
                }
            } else {
                print_object(result);
            }
        }
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", result),
    }
}

/// Period table: one row per period, headline columns only.
fn print_periods(periods: &[Value]) {
    let mut builder = Builder::default();

    let mut header = vec!["period"];
    header.extend(HEADLINE_FIELDS);
    header.extend(HEADLINE_KPIS);
    builder.push_record(header);

    for entry in periods {
        let Value::Object(map) = entry else { continue };
        let kpis = map.get("kpis");

        let mut row = vec![map.get("period").map(format_value).unwrap_or_default()];
        for field in HEADLINE_FIELDS {
            row.push(map.get(*field).map(format_value).unwrap_or_default());
        }
        for kpi in HEADLINE_KPIS {
            row.push(
                kpis.and_then(|k| k.get(*kpi))
                    .map(format_value)
                    .unwrap_or_default(),
            );
        }
        builder.push_record(row);
    }

    println!("{}", Table::from(builder));
}

/// Generic key/value table for flat objects (summary, classification).
fn print_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", value);
    }
}

/// Table over an array of homogeneous objects (sales months, registry).
fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", format_value(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_footer(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // Undefined KPIs render as a dash, the way the dashboard leaves
        // the card blank.
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
