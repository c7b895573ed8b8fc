use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Dashboard results flatten to one row per period with the KPI map
/// spread into `kpis.<key>` columns; other arrays become plain row sets;
/// flat objects fall back to field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let target = value.get("result").unwrap_or(value);

    if let Some(Value::Array(periods)) = target.get("periods") {
        write_period_rows(&mut wtr, periods);
    } else if let Some(Value::Array(kpis)) = target.get("kpis") {
        write_rows(&mut wtr, kpis);
    } else {
        match target {
            Value::Array(arr) => write_rows(&mut wtr, arr),
            Value::Object(map) => {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
            _ => {
                let _ = wtr.write_record([&format_csv_value(target)]);
            }
        }
    }

    let _ = wtr.flush();
}

/// One row per period; headers from the first entry, KPI columns prefixed.
fn write_period_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, periods: &[Value]) {
    let Some(Value::Object(first)) = periods.first() else {
        return;
    };

    let mut headers: Vec<String> = first.keys().filter(|k| *k != "kpis").cloned().collect();
    if let Some(Value::Object(kpis)) = first.get("kpis") {
        headers.extend(kpis.keys().map(|k| format!("kpis.{k}")));
    }
    let _ = wtr.write_record(&headers);

    for entry in periods {
        let Value::Object(map) = entry else { continue };
        let row: Vec<String> = headers
            .iter()
            .map(|h| {
                let val = match h.strip_prefix("kpis.") {
                    Some(kpi) => map.get("kpis").and_then(|k| k.get(kpi)),
                    None => map.get(h.as_str()),
                };
                val.map(format_csv_value).unwrap_or_default()
            })
            .collect();
        let _ = wtr.write_record(&row);
    }
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
