use serde_json::Value;

/// Print just the headline answer from the output.
///
/// Classification results print the traffic-light label; dashboard and
/// summary results print the trend; anything else falls back to the first
/// field of the result object.
pub fn print_minimal(value: &Value) {
    let result = value.get("result").unwrap_or(value);

    // Classification verdict
    if let Some(label) = result.pointer("/status/label").and_then(Value::as_str) {
        println!("{}", label);
        return;
    }

    // Dashboard payloads carry the headline inside the summary
    let headline = result.get("summary").unwrap_or(result);

    let priority_keys = ["trend", "latest_period", "total_periods"];
    if let Value::Object(map) = headline {
        for key in priority_keys {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(headline));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
