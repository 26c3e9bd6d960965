use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::money::format_inr;

/// Render output as tables. Plan, drift and trade shapes get dedicated
/// layouts; anything else falls back to a flat field/value table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key("allocations") && map.contains_key("sip_breakdown") {
                print_plan(map);
            } else if map.contains_key("drifted_funds") {
                print_drift(map);
            } else if map.contains_key("trades") {
                print_trades(map);
            } else if map.contains_key("current_allocation") {
                print_current_allocation(map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_plan(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for key in [
        "equity_strategy",
        "debt_strategy",
        "equity_percentage",
        "debt_percentage",
        "total_funds",
    ] {
        if let Some(val) = map.get(key) {
            builder.push_record([key, &format_value(val)]);
        }
    }
    println!("{}", Table::from(builder));

    let sip = map.get("sip_breakdown").and_then(Value::as_object);
    let lumpsum = map.get("lumpsum_breakdown").and_then(Value::as_object);
    let bands = map.get("rebalance_bands").and_then(Value::as_object);
    if let Some(allocations) = map.get("allocations").and_then(Value::as_object) {
        let mut builder = Builder::default();
        builder.push_record(["Category", "Target %", "Monthly SIP", "Lumpsum", "Band"]);
        for (category, pct) in allocations {
            let sip_amount = lookup(sip, category).map(as_inr).unwrap_or_default();
            let lumpsum_amount = lookup(lumpsum, category).map(as_inr).unwrap_or_default();
            let band = lookup(bands, category).map(format_band).unwrap_or_default();
            builder.push_record([
                category.as_str(),
                &format_value(pct),
                &sip_amount,
                &lumpsum_amount,
                &band,
            ]);
        }
        println!("\n{}", Table::from(builder));
    }

    print_string_list(map, "warnings", "Warnings");
    print_string_list(map, "recommendations", "Recommendations");
}

fn print_drift(map: &serde_json::Map<String, Value>) {
    let needed = map
        .get("needs_rebalance")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    println!("Rebalancing needed: {}", if needed { "yes" } else { "no" });

    let Some(drifted) = map.get("drifted_funds").and_then(Value::as_array) else {
        return;
    };
    if drifted.is_empty() {
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["Category", "Current %", "Target %", "Deviation"]);
    for fund in drifted {
        if let Value::Object(fund) = fund {
            builder.push_record([
                fund.get("category").map(format_value).unwrap_or_default(),
                fund.get("current").map(format_value).unwrap_or_default(),
                fund.get("target").map(format_value).unwrap_or_default(),
                fund.get("deviation").map(format_value).unwrap_or_default(),
            ]);
        }
    }
    println!("\n{}", Table::from(builder));
}

fn print_trades(map: &serde_json::Map<String, Value>) {
    if let Some(total) = map.get("total_value") {
        println!("Total portfolio value: {}", as_inr(total));
    }
    let Some(trades) = map.get("trades").and_then(Value::as_object) else {
        return;
    };
    let mut builder = Builder::default();
    builder.push_record(["Category", "Action", "Amount"]);
    for (category, amount) in trades {
        let decimal = as_decimal(amount).unwrap_or_default();
        let action = if decimal > Decimal::ZERO {
            "buy"
        } else if decimal < Decimal::ZERO {
            "sell"
        } else {
            "hold"
        };
        builder.push_record([category.as_str(), action, &format_inr(&decimal.abs())]);
    }
    println!("\n{}", Table::from(builder));
}

fn print_current_allocation(map: &serde_json::Map<String, Value>) {
    if let Some(total) = map.get("total_value") {
        println!("Total portfolio value: {}", as_inr(total));
    }
    let Some(allocation) = map.get("current_allocation").and_then(Value::as_object) else {
        return;
    };
    let mut builder = Builder::default();
    builder.push_record(["Category", "Current %"]);
    for (category, pct) in allocation {
        builder.push_record([category.as_str(), &format_value(pct)]);
    }
    println!("\n{}", Table::from(builder));
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
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
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn print_string_list(map: &serde_json::Map<String, Value>, key: &str, title: &str) {
    if let Some(Value::Array(items)) = map.get(key) {
        if items.is_empty() {
            return;
        }
        println!("\n{title}:");
        for item in items {
            if let Value::String(s) = item {
                println!("  - {}", s);
            }
        }
    }
}

fn lookup<'a>(
    section: Option<&'a serde_json::Map<String, Value>>,
    key: &str,
) -> Option<&'a Value> {
    section.and_then(|map| map.get(key))
}

fn format_band(value: &Value) -> String {
    let Value::Object(band) = value else {
        return format_value(value);
    };
    let lower = band.get("lower").map(format_value).unwrap_or_default();
    let upper = band.get("upper").map(format_value).unwrap_or_default();
    format!("{lower} to {upper}")
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

fn as_inr(value: &Value) -> String {
    match as_decimal(value) {
        Some(decimal) => format_inr(&decimal),
        None => format_value(value),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
