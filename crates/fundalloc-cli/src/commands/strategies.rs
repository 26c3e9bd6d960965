use serde_json::{json, Value};

use fundalloc_core::strategy::StrategyCatalog;

pub fn run_strategies() -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = StrategyCatalog::with_presets();
    let equity: Vec<_> = catalog.equity_strategies().collect();
    let debt: Vec<_> = catalog.debt_strategies().collect();
    Ok(json!({ "equity": equity, "debt": debt }))
}
