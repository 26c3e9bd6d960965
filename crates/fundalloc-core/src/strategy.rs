//! Strategy catalog.
//!
//! Named equity and debt strategies mapping fund categories to weights
//! that sum to exactly 100. The catalog is an immutable value handed to
//! the allocation engine at construction; registration is append-only,
//! so custom strategies and built-in presets are interchangeable.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::types::Percent;
use crate::PlannerResult;

/// A named weighting of fund categories. Weights sum to exactly 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyDefinition {
    pub name: String,
    pub description: String,
    pub weights: BTreeMap<String, Percent>,
}

/// Registry of equity and debt strategies, keyed by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyCatalog {
    equity: BTreeMap<String, StrategyDefinition>,
    debt: BTreeMap<String, StrategyDefinition>,
}

fn weights(pairs: &[(&str, Percent)]) -> BTreeMap<String, Percent> {
    pairs.iter().map(|(k, w)| (k.to_string(), *w)).collect()
}

impl StrategyCatalog {
    /// Empty catalog, for callers that supply their own strategy set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-loaded with the curated presets.
    pub fn with_presets() -> Self {
        let mut catalog = Self::new();

        // Preset weights are curated constants; registration cannot fail.
        let presets: &[(&str, &str, &[(&str, Percent)])] = &[
            (
                "index_core",
                "100% large-cap index funds for low-cost market returns",
                &[("largecap", dec!(100))],
            ),
            (
                "market_weighted",
                "70% large-cap, 20% mid-cap, 10% small-cap; mirrors market composition",
                &[
                    ("largecap", dec!(70)),
                    ("midcap", dec!(20)),
                    ("smallcap", dec!(10)),
                ],
            ),
            (
                "balanced_growth",
                "45% large-cap, 30% mid-cap, 25% small-cap; balanced risk-return",
                &[
                    ("largecap", dec!(45)),
                    ("midcap", dec!(30)),
                    ("smallcap", dec!(25)),
                ],
            ),
            (
                "aggressive_growth",
                "35% large-cap, 35% mid-cap, 30% small-cap; maximum growth potential",
                &[
                    ("largecap", dec!(35)),
                    ("midcap", dec!(35)),
                    ("smallcap", dec!(30)),
                ],
            ),
        ];
        for (name, description, table) in presets {
            catalog
                .register_equity(name, description, weights(table))
                .expect("preset equity strategy is valid");
        }

        catalog
            .register_debt(
                "long_term",
                "Fixed deposits for safe long-term low-risk returns",
                weights(&[("fd", dec!(100))]),
            )
            .expect("preset debt strategy is valid");

        catalog
    }

    /// Register an equity strategy. Append-only: an existing name is
    /// rejected rather than overwritten.
    pub fn register_equity(
        &mut self,
        name: &str,
        description: &str,
        weights: BTreeMap<String, Percent>,
    ) -> PlannerResult<()> {
        Self::register(&mut self.equity, "equity", name, description, weights)
    }

    /// Register a debt strategy. Same append-only contract.
    pub fn register_debt(
        &mut self,
        name: &str,
        description: &str,
        weights: BTreeMap<String, Percent>,
    ) -> PlannerResult<()> {
        Self::register(&mut self.debt, "debt", name, description, weights)
    }

    pub fn equity_strategy(&self, name: &str) -> PlannerResult<&StrategyDefinition> {
        self.equity.get(name).ok_or_else(|| PlannerError::UnknownStrategy {
            kind: "equity".into(),
            name: name.into(),
        })
    }

    pub fn debt_strategy(&self, name: &str) -> PlannerResult<&StrategyDefinition> {
        self.debt.get(name).ok_or_else(|| PlannerError::UnknownStrategy {
            kind: "debt".into(),
            name: name.into(),
        })
    }

    pub fn equity_strategy_names(&self) -> Vec<&str> {
        self.equity.keys().map(String::as_str).collect()
    }

    pub fn debt_strategy_names(&self) -> Vec<&str> {
        self.debt.keys().map(String::as_str).collect()
    }

    pub fn equity_strategies(&self) -> impl Iterator<Item = &StrategyDefinition> {
        self.equity.values()
    }

    pub fn debt_strategies(&self) -> impl Iterator<Item = &StrategyDefinition> {
        self.debt.values()
    }

    fn register(
        registry: &mut BTreeMap<String, StrategyDefinition>,
        kind: &str,
        name: &str,
        description: &str,
        weights: BTreeMap<String, Percent>,
    ) -> PlannerResult<()> {
        if name.trim().is_empty() {
            return Err(PlannerError::InvalidAllocationInput {
                field: format!("{kind} strategy name"),
                reason: "name must be non-empty".into(),
            });
        }
        if registry.contains_key(name) {
            return Err(PlannerError::InvalidAllocationInput {
                field: format!("{kind} strategy name"),
                reason: format!("'{name}' is already registered"),
            });
        }
        validate_weights(kind, name, &weights)?;
        registry.insert(
            name.to_string(),
            StrategyDefinition {
                name: name.to_string(),
                description: description.to_string(),
                weights,
            },
        );
        Ok(())
    }
}

fn validate_weights(
    kind: &str,
    name: &str,
    weights: &BTreeMap<String, Percent>,
) -> PlannerResult<()> {
    if weights.is_empty() {
        return Err(PlannerError::InvalidAllocationInput {
            field: format!("{kind} strategy '{name}'"),
            reason: "at least one category weight is required".into(),
        });
    }
    for (category, weight) in weights {
        if *weight < Decimal::ZERO {
            return Err(PlannerError::InvalidAllocationInput {
                field: format!("{kind} strategy '{name}'"),
                reason: format!("negative weight for '{category}'"),
            });
        }
    }
    let total: Decimal = weights.values().sum();
    if total != dec!(100) {
        return Err(PlannerError::InvalidAllocationInput {
            field: format!("{kind} strategy '{name}'"),
            reason: format!("weights must sum to 100, got {total}"),
        });
    }
    Ok(())
}
