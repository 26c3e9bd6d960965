//! Equity/debt split rules.
//!
//! Three ways to arrive at the split:
//! 1. **Risk profile** -- per-tier age curve `clamp(base - age, floor, cap)`
//! 2. **Age based** -- the classic `100 - age`, bounded to [20, 80]
//! 3. **Custom** -- caller-supplied equity percentage in [0, 100]
//!
//! Debt is always `100 - equity`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::types::Percent;
use crate::PlannerResult;

/// Risk tolerance tier. Each tier carries its own age-to-equity curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

/// How the equity/debt split is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    RiskProfile(RiskProfile),
    AgeBased,
    Custom(Percent),
}

/// Derive the (equity, debt) percentages for a given age and method.
pub fn equity_debt_split(age: u32, method: &SplitMethod) -> PlannerResult<(Percent, Percent)> {
    let equity = match method {
        SplitMethod::RiskProfile(profile) => {
            let (base, floor, cap) = match profile {
                RiskProfile::Conservative => (90, 20, 60),
                RiskProfile::Moderate => (100, 30, 75),
                RiskProfile::Aggressive => (110, 40, 90),
            };
            age_curve(age, base, floor, cap)
        }
        SplitMethod::AgeBased => age_curve(age, 100, 20, 80),
        SplitMethod::Custom(pct) => {
            if *pct < Decimal::ZERO || *pct > Decimal::ONE_HUNDRED {
                return Err(PlannerError::InvalidAllocationInput {
                    field: "equity_percentage".into(),
                    reason: format!("must be between 0 and 100, got {pct}"),
                });
            }
            *pct
        }
    };
    Ok((equity, Decimal::ONE_HUNDRED - equity))
}

fn age_curve(age: u32, base: i64, floor: i64, cap: i64) -> Percent {
    Decimal::from((base - i64::from(age)).clamp(floor, cap))
}

/// Equity strategy suggested for an investor's age.
pub fn recommended_strategy_for_age(age: u32) -> &'static str {
    if age < 35 {
        "aggressive_growth"
    } else if age < 50 {
        "balanced_growth"
    } else {
        "market_weighted"
    }
}

/// Risk tier suggested for an investor's age.
pub fn risk_profile_from_age(age: u32) -> RiskProfile {
    if age < 35 {
        RiskProfile::Aggressive
    } else if age < 55 {
        RiskProfile::Moderate
    } else {
        RiskProfile::Conservative
    }
}
