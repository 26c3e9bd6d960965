//! Asset allocation engine.
//!
//! Turns an investor profile plus strategy choices into a complete plan:
//! 1. **Split** -- derive the equity/debt percentages
//! 2. **Weighting** -- scale strategy weights into portfolio percentages,
//!    optionally carving an international slice out of the largest equity
//!    category
//! 3. **Rounding** -- 2 dp half-up, residual assigned to the largest
//!    category so the total is exactly 100
//! 4. **Amounts** -- convert percentages into SIP and lumpsum breakdowns
//!    that sum exactly to the profile's stated totals
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::profile::UserProfile;
use crate::strategy::StrategyCatalog;
use crate::types::{Money, Percent};
use crate::PlannerResult;

use super::advice;
use super::plan::{InvestmentPlan, RebalanceBand};
use super::split::{equity_debt_split, SplitMethod};

/// Share of the equity allocation diverted into international funds, in
/// percent of the equity portion.
const INTERNATIONAL_SLICE: Decimal = dec!(10);

const INTERNATIONAL_CATEGORY: &str = "international";

pub fn default_drift_threshold() -> Percent {
    dec!(5)
}

/// Everything `create_plan` needs, gathered by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub profile: UserProfile,
    pub equity_strategy: String,
    pub debt_strategy: String,
    pub split: SplitMethod,
    #[serde(default)]
    pub add_international: bool,
    /// Width of the advisory rebalance bands, in percentage points.
    #[serde(default = "default_drift_threshold")]
    pub drift_threshold: Percent,
}

/// The engine holds only the injected strategy catalog; every call is a
/// pure computation over its inputs.
#[derive(Debug, Clone)]
pub struct AssetAllocationEngine {
    catalog: StrategyCatalog,
}

impl AssetAllocationEngine {
    pub fn new(catalog: StrategyCatalog) -> Self {
        Self { catalog }
    }

    pub fn with_presets() -> Self {
        Self::new(StrategyCatalog::with_presets())
    }

    pub fn catalog(&self) -> &StrategyCatalog {
        &self.catalog
    }

    pub fn create_plan(&self, request: &PlanRequest) -> PlannerResult<InvestmentPlan> {
        request.profile.validate()?;
        if request.drift_threshold <= Decimal::ZERO {
            return Err(PlannerError::InvalidThreshold(request.drift_threshold));
        }

        let equity = self.catalog.equity_strategy(&request.equity_strategy)?;
        let debt = self.catalog.debt_strategy(&request.debt_strategy)?;
        let (equity_pct, debt_pct) = equity_debt_split(request.profile.age, &request.split)?;

        // Equity first: the international carve applies to equity
        // categories only and must never touch the debt side.
        let mut allocations = scale_weights(&equity.weights, equity_pct);
        if request.add_international {
            carve_international(&mut allocations, equity_pct)?;
        }
        for (category, weight) in scale_weights(&debt.weights, debt_pct) {
            *allocations.entry(category).or_insert(Decimal::ZERO) += weight;
        }

        for pct in allocations.values_mut() {
            *pct = round2(*pct);
        }
        assign_residual(&mut allocations, Decimal::ONE_HUNDRED);

        let sip_breakdown = monetary_breakdown(&allocations, request.profile.monthly_investment);
        let lumpsum_breakdown =
            monetary_breakdown(&allocations, request.profile.lump_sum_investment);
        let rebalance_bands = rebalance_bands(&allocations, request.drift_threshold);

        Ok(InvestmentPlan {
            equity_percentage: round2(equity_pct),
            debt_percentage: round2(debt_pct),
            equity_strategy: equity.name.clone(),
            debt_strategy: debt.name.clone(),
            warnings: advice::profile_warnings(&request.profile, equity_pct),
            recommendations: advice::plan_recommendations(&request.profile, equity_pct),
            allocations,
            sip_breakdown,
            lumpsum_breakdown,
            rebalance_bands,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Strategy weights scaled onto the portfolio. Zero-valued categories are
/// dropped so plans only carry funds the investor actually holds.
fn scale_weights(weights: &BTreeMap<String, Percent>, portion_pct: Percent) -> BTreeMap<String, Percent> {
    weights
        .iter()
        .map(|(category, weight)| (category.clone(), portion_pct * *weight / Decimal::ONE_HUNDRED))
        .filter(|(_, scaled)| !scaled.is_zero())
        .collect()
}

/// Largest value wins; ties resolve to the lexicographically first name.
fn largest_category(map: &BTreeMap<String, Decimal>) -> Option<String> {
    map.iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(name, _)| name.clone())
}

/// Move a fixed slice of the equity portion out of the largest equity
/// category into `international`.
fn carve_international(
    equity_allocations: &mut BTreeMap<String, Percent>,
    equity_pct: Percent,
) -> PlannerResult<()> {
    let slice = equity_pct * INTERNATIONAL_SLICE / Decimal::ONE_HUNDRED;
    if slice.is_zero() {
        return Ok(());
    }
    let Some(largest) = largest_category(equity_allocations) else {
        return Ok(());
    };
    if let Some(weight) = equity_allocations.get_mut(&largest) {
        if *weight < slice {
            return Err(PlannerError::InvalidAllocationInput {
                field: "add_international".into(),
                reason: format!(
                    "international slice {slice} exceeds the largest equity category '{largest}' at {weight}"
                ),
            });
        }
        *weight -= slice;
        if weight.is_zero() {
            equity_allocations.remove(&largest);
        }
    }
    *equity_allocations
        .entry(INTERNATIONAL_CATEGORY.to_string())
        .or_insert(Decimal::ZERO) += slice;
    Ok(())
}

/// After rounding, push the leftover into the largest entry so the map
/// sums exactly to `expected_total`.
fn assign_residual(map: &mut BTreeMap<String, Decimal>, expected_total: Decimal) {
    let sum: Decimal = map.values().sum();
    let residual = expected_total - sum;
    if residual.is_zero() {
        return;
    }
    if let Some(largest) = largest_category(map) {
        if let Some(value) = map.get_mut(&largest) {
            *value += residual;
        }
    }
}

/// Convert percentage allocations into monetary amounts summing exactly
/// to `total`.
fn monetary_breakdown(allocations: &BTreeMap<String, Percent>, total: Money) -> BTreeMap<String, Money> {
    let mut breakdown: BTreeMap<String, Money> = allocations
        .iter()
        .map(|(category, pct)| (category.clone(), round2(total * *pct / Decimal::ONE_HUNDRED)))
        .collect();
    assign_residual(&mut breakdown, total);
    breakdown
}

fn rebalance_bands(
    allocations: &BTreeMap<String, Percent>,
    threshold: Percent,
) -> BTreeMap<String, RebalanceBand> {
    allocations
        .iter()
        .map(|(category, target)| {
            (
                category.clone(),
                RebalanceBand {
                    lower: round2((*target - threshold).max(Decimal::ZERO)),
                    upper: round2((*target + threshold).min(Decimal::ONE_HUNDRED)),
                },
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
