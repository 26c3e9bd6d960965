use serde_json::Value;
use std::io;

/// Write output as CSV to stdout. Nested objects (allocations,
/// breakdowns, bands) are flattened into dotted field paths so the whole
/// result fits a single two-column sheet.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        Value::Object(_) => {
            let mut rows = Vec::new();
            flatten("", value, &mut rows);
            let _ = wtr.write_record(["field", "value"]);
            for (field, val) in rows {
                let _ = wtr.write_record([field.as_str(), val.as_str()]);
            }
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, val, rows);
            }
        }
        Value::Array(arr) if arr.iter().any(|v| v.is_object() || v.is_array()) => {
            for (index, val) in arr.iter().enumerate() {
                flatten(&format!("{prefix}.{index}"), val, rows);
            }
        }
        Value::Array(arr) => {
            let joined: Vec<String> = arr.iter().map(format_csv_value).collect();
            rows.push((prefix.to_string(), joined.join("; ")));
        }
        _ => rows.push((prefix.to_string(), format_csv_value(value))),
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    // Extract headers from the first object
    if let Some(Value::Object(first)) = arr.first() {
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
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
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
