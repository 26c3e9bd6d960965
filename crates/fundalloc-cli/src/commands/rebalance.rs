use std::collections::BTreeMap;

use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use fundalloc_core::rebalancing;

use crate::input;

type CategoryMap = BTreeMap<String, Decimal>;

#[derive(Debug, Serialize, Deserialize)]
struct CurrentAllocationOutput {
    current_allocation: CategoryMap,
    total_value: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
struct TradesOutput {
    total_value: Decimal,
    trades: CategoryMap,
}

/// Arguments for the current-allocation view
#[derive(Args)]
pub struct CurrentAllocationArgs {
    /// Path to a JSON/YAML file with { "values": { category: amount } }
    #[arg(long)]
    pub input: Option<String>,

    /// Comma-separated holdings, e.g. "largecap=400000,fd=270000"
    #[arg(long)]
    pub values: Option<String>,
}

/// Arguments for drift checking
#[derive(Args)]
pub struct DriftCheckArgs {
    /// Path to a JSON/YAML file with { "current": {...}, "targets": {...} }
    #[arg(long)]
    pub input: Option<String>,

    /// Current percentages, e.g. "largecap=40,midcap=15"
    #[arg(long)]
    pub current: Option<String>,

    /// Target percentages, e.g. "largecap=45,midcap=30"
    #[arg(long)]
    pub targets: Option<String>,

    /// Drift threshold in percentage points
    #[arg(long, default_value = "5")]
    pub threshold: Decimal,
}

/// Arguments for trade generation
#[derive(Args)]
pub struct TradesArgs {
    /// Path to a JSON/YAML file with { "values": {...}, "targets": {...} }
    #[arg(long)]
    pub input: Option<String>,

    /// Comma-separated holdings, e.g. "largecap=400000,fd=270000"
    #[arg(long)]
    pub values: Option<String>,

    /// Target percentages, e.g. "largecap=45,fd=0"
    #[arg(long)]
    pub targets: Option<String>,
}

fn parse_category_map(spec: &str) -> Result<CategoryMap, Box<dyn std::error::Error>> {
    let mut map = CategoryMap::new();
    for pair in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((category, amount)) = pair.split_once('=') else {
            return Err(format!("Expected 'category=value', got '{pair}'").into());
        };
        let value: Decimal = amount
            .trim()
            .parse()
            .map_err(|e| format!("Bad value in '{pair}': {e}"))?;
        map.insert(category.trim().to_string(), value);
    }
    if map.is_empty() {
        return Err("No category=value pairs given".into());
    }
    Ok(map)
}

fn read_input_value(path: &Option<String>) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(ref path) = path {
        return input::file::read_value(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(data);
    }
    Err("Provide category maps as flags, an --input file, or piped stdin JSON".into())
}

/// Pull a category map out of `data[key]`, accepting a bare top-level
/// object as a shorthand when only one map is expected.
fn section_map(data: &Value, key: &str, allow_bare: bool) -> Result<CategoryMap, Box<dyn std::error::Error>> {
    let section = match data.get(key) {
        Some(section) => section,
        None if allow_bare => data,
        None => return Err(format!("Input is missing the '{key}' object").into()),
    };
    serde_json::from_value(section.clone())
        .map_err(|e| format!("Expected an object of category values for '{key}': {e}").into())
}

pub fn run_current_allocation(
    args: CurrentAllocationArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let values = match args.values {
        Some(ref spec) => parse_category_map(spec)?,
        None => section_map(&read_input_value(&args.input)?, "values", true)?,
    };

    let allocation = rebalancing::calculate_current_allocation(&values)?;
    let output = CurrentAllocationOutput {
        current_allocation: allocation,
        total_value: values.values().sum(),
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_drift_check(args: DriftCheckArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (current, targets) = match (&args.current, &args.targets) {
        (Some(current), Some(targets)) => {
            (parse_category_map(current)?, parse_category_map(targets)?)
        }
        (None, None) => {
            let data = read_input_value(&args.input)?;
            (
                section_map(&data, "current", false)?,
                section_map(&data, "targets", false)?,
            )
        }
        _ => return Err("--current and --targets must be given together".into()),
    };

    let check = rebalancing::check_rebalancing_needed(&current, &targets, args.threshold)?;
    Ok(serde_json::to_value(check)?)
}

pub fn run_trades(args: TradesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (values, targets) = match (&args.values, &args.targets) {
        (Some(values), Some(targets)) => {
            (parse_category_map(values)?, parse_category_map(targets)?)
        }
        (None, None) => {
            let data = read_input_value(&args.input)?;
            (
                section_map(&data, "values", false)?,
                section_map(&data, "targets", false)?,
            )
        }
        _ => return Err("--values and --targets must be given together".into()),
    };

    let output = TradesOutput {
        trades: rebalancing::calculate_rebalance_trades(&values, &targets)?,
        total_value: values.values().sum(),
    };
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_category_map() {
        let map = parse_category_map("largecap=400000, midcap=150000,fd=270000").unwrap();
        assert_eq!(map["largecap"], dec!(400_000));
        assert_eq!(map["midcap"], dec!(150_000));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_parse_category_map_negative_and_decimal() {
        let map = parse_category_map("fd=-270000.50").unwrap();
        assert_eq!(map["fd"], dec!(-270_000.50));
    }

    #[test]
    fn test_parse_category_map_rejects_garbage() {
        assert!(parse_category_map("largecap").is_err());
        assert!(parse_category_map("largecap=abc").is_err());
        assert!(parse_category_map("").is_err());
    }

    #[test]
    fn test_section_map_bare_shorthand() {
        let data = json!({ "largecap": 400000, "fd": "270000" });
        let map = section_map(&data, "values", true).unwrap();
        assert_eq!(map["largecap"], dec!(400_000));
        assert_eq!(map["fd"], dec!(270_000));
    }

    #[test]
    fn test_section_map_requires_key_when_ambiguous() {
        let data = json!({ "current": { "largecap": 40 } });
        assert!(section_map(&data, "targets", false).is_err());
        let map = section_map(&data, "current", false).unwrap();
        assert_eq!(map["largecap"], dec!(40));
    }
}
