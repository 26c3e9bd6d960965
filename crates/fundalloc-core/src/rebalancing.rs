//! Portfolio drift analysis and rebalancing trades.
//!
//! Covers:
//! 1. **Current Allocation** -- percentage view of held values
//! 2. **Drift Check** -- which categories sit further from target than a
//!    threshold allows
//! 3. **Trade Generation** -- signed buy/sell amounts restoring the
//!    target weights without injecting or removing capital
//!
//! Independent of the allocation engine: it only consumes a target
//! mapping of category to percentage, wherever that came from.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::types::{Money, Percent};
use crate::PlannerResult;

/// Drift threshold applied when the caller does not choose one, in
/// percentage points.
pub fn default_drift_threshold() -> Percent {
    dec!(5)
}

/// One category sitting outside the drift threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundDrift {
    pub category: String,
    pub current: Percent,
    pub target: Percent,
    /// Absolute deviation in percentage points.
    pub deviation: Percent,
}

/// Outcome of a drift check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftCheck {
    pub needs_rebalance: bool,
    pub drifted_funds: Vec<FundDrift>,
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn validate_values(current_values: &BTreeMap<String, Money>, context: &str) -> PlannerResult<Money> {
    for (category, value) in current_values {
        if *value < Decimal::ZERO {
            return Err(PlannerError::InvalidAllocationInput {
                field: format!("current_values['{category}']"),
                reason: "holdings cannot be negative".into(),
            });
        }
    }
    let total: Money = current_values.values().sum();
    if total.is_zero() {
        return Err(PlannerError::EmptyPortfolio {
            context: context.into(),
        });
    }
    Ok(total)
}

/// Percentage view of the held values, rounded to 2 dp.
///
/// Diagnostic only: unlike plan allocations, no residual adjustment is
/// applied, so the result may sum to slightly off 100.
pub fn calculate_current_allocation(
    current_values: &BTreeMap<String, Money>,
) -> PlannerResult<BTreeMap<String, Percent>> {
    let total = validate_values(current_values, "cannot compute percentages of a zero-value portfolio")?;
    Ok(current_values
        .iter()
        .map(|(category, value)| {
            (category.clone(), round2(*value * Decimal::ONE_HUNDRED / total))
        })
        .collect())
}

/// Compare current against target percentages over the union of
/// categories (absent means zero). A category has drifted only when its
/// absolute deviation strictly exceeds the threshold.
pub fn check_rebalancing_needed(
    current_pct: &BTreeMap<String, Percent>,
    target_allocations: &BTreeMap<String, Percent>,
    drift_threshold: Percent,
) -> PlannerResult<DriftCheck> {
    if drift_threshold <= Decimal::ZERO {
        return Err(PlannerError::InvalidThreshold(drift_threshold));
    }

    let categories: BTreeSet<&String> =
        current_pct.keys().chain(target_allocations.keys()).collect();

    let mut drifted_funds = Vec::new();
    for category in categories {
        let current = current_pct.get(category).copied().unwrap_or(Decimal::ZERO);
        let target = target_allocations
            .get(category)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let deviation = (current - target).abs();
        if deviation > drift_threshold {
            drifted_funds.push(FundDrift {
                category: category.clone(),
                current,
                target,
                deviation,
            });
        }
    }

    Ok(DriftCheck {
        needs_rebalance: !drifted_funds.is_empty(),
        drifted_funds,
    })
}

/// Signed trade per category (positive = buy, negative = sell) moving the
/// held values onto the target weights of the same total. Trades sum to
/// zero: the rebalancer never injects or removes capital.
///
/// Categories held but absent from the target are sold to zero. Callers
/// who want to leave such holdings alone must include them in the target
/// at their current weight.
pub fn calculate_rebalance_trades(
    current_values: &BTreeMap<String, Money>,
    target_allocations: &BTreeMap<String, Percent>,
) -> PlannerResult<BTreeMap<String, Money>> {
    let total = validate_values(current_values, "cannot rebalance a zero-value portfolio")?;

    for (category, pct) in target_allocations {
        if *pct < Decimal::ZERO {
            return Err(PlannerError::InvalidAllocationInput {
                field: format!("target_allocations['{category}']"),
                reason: "target percentage cannot be negative".into(),
            });
        }
    }
    let target_total: Percent = target_allocations.values().sum();
    if (target_total - Decimal::ONE_HUNDRED).abs() > dec!(0.01) {
        return Err(PlannerError::InvalidAllocationInput {
            field: "target_allocations".into(),
            reason: format!("target percentages must sum to 100, got {target_total}"),
        });
    }

    let categories: BTreeSet<&String> = current_values
        .keys()
        .chain(target_allocations.keys())
        .collect();

    Ok(categories
        .into_iter()
        .map(|category| {
            let target_pct = target_allocations
                .get(category)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let current = current_values.get(category).copied().unwrap_or(Decimal::ZERO);
            let target_value = total * target_pct / Decimal::ONE_HUNDRED;
            (category.clone(), target_value - current)
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn money_map(pairs: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn make_portfolio() -> BTreeMap<String, Money> {
        money_map(&[
            ("largecap", dec!(400_000)),
            ("midcap", dec!(150_000)),
            ("smallcap", dec!(180_000)),
            ("fd", dec!(270_000)),
        ])
    }

    fn make_targets() -> BTreeMap<String, Percent> {
        money_map(&[
            ("largecap", dec!(45)),
            ("midcap", dec!(30)),
            ("smallcap", dec!(25)),
            ("fd", dec!(0)),
        ])
    }

    // --- Current allocation ---

    #[test]
    fn test_current_allocation() {
        let pct = calculate_current_allocation(&make_portfolio()).unwrap();
        assert_eq!(pct["largecap"], dec!(40));
        assert_eq!(pct["midcap"], dec!(15));
        assert_eq!(pct["smallcap"], dec!(18));
        assert_eq!(pct["fd"], dec!(27));
    }

    #[test]
    fn test_current_allocation_rounds_without_residual_fix() {
        let pct =
            calculate_current_allocation(&money_map(&[("a", dec!(1)), ("b", dec!(1)), ("c", dec!(1))]))
                .unwrap();
        // Each third rounds to 33.33; the total is allowed to miss 100.
        assert_eq!(pct["a"], dec!(33.33));
        let total: Decimal = pct.values().sum();
        assert_eq!(total, dec!(99.99));
    }

    #[test]
    fn test_empty_portfolio_rejected() {
        let err = calculate_current_allocation(&BTreeMap::new()).unwrap_err();
        assert!(matches!(err, PlannerError::EmptyPortfolio { .. }));

        let err =
            calculate_current_allocation(&money_map(&[("largecap", dec!(0)), ("fd", dec!(0))]))
                .unwrap_err();
        assert!(matches!(err, PlannerError::EmptyPortfolio { .. }));
    }

    #[test]
    fn test_negative_holding_rejected() {
        let err = calculate_current_allocation(&money_map(&[("largecap", dec!(-1))])).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidAllocationInput { .. }));
    }

    // --- Drift check ---

    #[test]
    fn test_drift_detection() {
        let current = calculate_current_allocation(&make_portfolio()).unwrap();
        let check = check_rebalancing_needed(&current, &make_targets(), dec!(5)).unwrap();

        assert!(check.needs_rebalance);
        // largecap sits exactly 5.0 from target, which is not a drift.
        let drifted: Vec<&str> = check
            .drifted_funds
            .iter()
            .map(|d| d.category.as_str())
            .collect();
        assert_eq!(drifted, vec!["fd", "midcap", "smallcap"]);

        let midcap = check
            .drifted_funds
            .iter()
            .find(|d| d.category == "midcap")
            .unwrap();
        assert_eq!(midcap.deviation, dec!(15));
        let fd = check.drifted_funds.iter().find(|d| d.category == "fd").unwrap();
        assert_eq!(fd.deviation, dec!(27));
    }

    #[test]
    fn test_exact_threshold_is_not_drift() {
        let current = money_map(&[("largecap", dec!(45)), ("fd", dec!(55))]);
        let targets = money_map(&[("largecap", dec!(50)), ("fd", dec!(50))]);
        // Both deviations are exactly 5.0.
        let check = check_rebalancing_needed(&current, &targets, dec!(5)).unwrap();
        assert!(!check.needs_rebalance);
        assert!(check.drifted_funds.is_empty());
    }

    #[test]
    fn test_just_above_threshold_is_drift() {
        let current = money_map(&[("largecap", dec!(44.99)), ("fd", dec!(55.01))]);
        let targets = money_map(&[("largecap", dec!(50)), ("fd", dec!(50))]);
        let check = check_rebalancing_needed(&current, &targets, dec!(5)).unwrap();
        assert!(check.needs_rebalance);
        assert_eq!(check.drifted_funds.len(), 2);
    }

    #[test]
    fn test_categories_missing_on_either_side_count_from_zero() {
        let current = money_map(&[("largecap", dec!(90)), ("legacy", dec!(10))]);
        let targets = money_map(&[("largecap", dec!(90)), ("international", dec!(10))]);
        let check = check_rebalancing_needed(&current, &targets, dec!(5)).unwrap();
        let drifted: Vec<&str> = check
            .drifted_funds
            .iter()
            .map(|d| d.category.as_str())
            .collect();
        assert_eq!(drifted, vec!["international", "legacy"]);
    }

    #[test]
    fn test_non_positive_threshold_rejected() {
        let current = money_map(&[("largecap", dec!(50))]);
        let targets = money_map(&[("largecap", dec!(50))]);
        assert!(matches!(
            check_rebalancing_needed(&current, &targets, Decimal::ZERO),
            Err(PlannerError::InvalidThreshold(_))
        ));
        assert!(check_rebalancing_needed(&current, &targets, dec!(-1)).is_err());
    }

    // --- Trades ---

    #[test]
    fn test_rebalance_trades() {
        let trades = calculate_rebalance_trades(&make_portfolio(), &make_targets()).unwrap();

        assert_eq!(trades["largecap"], dec!(50_000));
        assert_eq!(trades["midcap"], dec!(150_000));
        assert_eq!(trades["smallcap"], dec!(70_000));
        assert_eq!(trades["fd"], dec!(-270_000));

        let net: Decimal = trades.values().sum();
        assert_eq!(net, Decimal::ZERO);
    }

    #[test]
    fn test_trades_sum_to_zero_with_fractional_targets() {
        let values = money_map(&[("a", dec!(123_456.78)), ("b", dec!(7_654.32))]);
        let targets = money_map(&[("a", dec!(33.33)), ("b", dec!(66.67))]);
        let trades = calculate_rebalance_trades(&values, &targets).unwrap();
        let net: Decimal = trades.values().sum();
        assert_eq!(net, Decimal::ZERO);
    }

    #[test]
    fn test_target_absent_category_is_fully_sold() {
        let values = money_map(&[("largecap", dec!(60_000)), ("gold", dec!(40_000))]);
        let targets = money_map(&[("largecap", dec!(100))]);
        let trades = calculate_rebalance_trades(&values, &targets).unwrap();
        assert_eq!(trades["gold"], dec!(-40_000));
        assert_eq!(trades["largecap"], dec!(40_000));
    }

    #[test]
    fn test_unheld_target_category_is_pure_buy() {
        let values = money_map(&[("largecap", dec!(100_000))]);
        let targets = money_map(&[("largecap", dec!(75)), ("international", dec!(25))]);
        let trades = calculate_rebalance_trades(&values, &targets).unwrap();
        assert_eq!(trades["international"], dec!(25_000));
        assert_eq!(trades["largecap"], dec!(-25_000));
    }

    #[test]
    fn test_trades_reject_bad_target_sum() {
        let err = calculate_rebalance_trades(
            &make_portfolio(),
            &money_map(&[("largecap", dec!(45)), ("midcap", dec!(30))]),
        )
        .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidAllocationInput { .. }));
    }

    #[test]
    fn test_trades_accept_target_sum_within_tolerance() {
        let targets = money_map(&[("largecap", dec!(49.995)), ("fd", dec!(50))]);
        let values = money_map(&[("largecap", dec!(1000)), ("fd", dec!(1000))]);
        assert!(calculate_rebalance_trades(&values, &targets).is_ok());
    }

    #[test]
    fn test_trades_reject_negative_target() {
        let err = calculate_rebalance_trades(
            &make_portfolio(),
            &money_map(&[("largecap", dec!(150)), ("fd", dec!(-50))]),
        )
        .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidAllocationInput { .. }));
    }

    #[test]
    fn test_trades_reject_empty_portfolio() {
        let err = calculate_rebalance_trades(&BTreeMap::new(), &make_targets()).unwrap_err();
        assert!(matches!(err, PlannerError::EmptyPortfolio { .. }));
    }

    #[test]
    fn test_already_balanced_portfolio_trades_are_zero() {
        let values = money_map(&[("largecap", dec!(450_000)), ("fd", dec!(550_000))]);
        let targets = money_map(&[("largecap", dec!(45)), ("fd", dec!(55))]);
        let trades = calculate_rebalance_trades(&values, &targets).unwrap();
        assert!(trades.values().all(|t| t.is_zero()));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let current = calculate_current_allocation(&make_portfolio()).unwrap();
        let check = check_rebalancing_needed(&current, &make_targets(), dec!(5)).unwrap();
        let json = serde_json::to_string(&check).unwrap();
        let _: DriftCheck = serde_json::from_str(&json).unwrap();
    }
}
