use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Money, Percent};
use crate::PlannerResult;

/// Advisory band around a category target; drifting outside it is the
/// caller's cue to rebalance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalanceBand {
    pub lower: Percent,
    pub upper: Percent,
}

/// The complete allocation plan. Immutable value object: identical
/// engine inputs produce an identical plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentPlan {
    pub equity_percentage: Percent,
    pub debt_percentage: Percent,
    pub equity_strategy: String,
    pub debt_strategy: String,
    /// Category -> percentage of the total portfolio. Sums to 100.
    pub allocations: BTreeMap<String, Percent>,
    /// Category -> monthly SIP amount. Sums to the profile's SIP exactly.
    pub sip_breakdown: BTreeMap<String, Money>,
    /// Category -> one-time amount. Sums to the profile's lumpsum exactly.
    pub lumpsum_breakdown: BTreeMap<String, Money>,
    pub rebalance_bands: BTreeMap<String, RebalanceBand>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Summary statistics over a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub total_funds: usize,
    pub equity_percentage: Percent,
    pub debt_percentage: Percent,
    pub monthly_sip_total: Money,
    pub lumpsum_total: Money,
}

impl InvestmentPlan {
    /// Number of fund categories carrying a non-zero weight.
    pub fn total_funds_count(&self) -> usize {
        self.allocations
            .values()
            .filter(|pct| **pct > Decimal::ZERO)
            .count()
    }

    pub fn allocation_summary(&self) -> AllocationSummary {
        AllocationSummary {
            total_funds: self.total_funds_count(),
            equity_percentage: self.equity_percentage,
            debt_percentage: self.debt_percentage,
            monthly_sip_total: self.sip_breakdown.values().sum(),
            lumpsum_total: self.lumpsum_breakdown.values().sum(),
        }
    }

    /// Flat representation for the export collaborator (CSV/JSON writer,
    /// UI tables). The core defines only this shape, not any file format.
    pub fn export(&self) -> PlannerResult<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            map.insert("total_funds".into(), Value::from(self.total_funds_count()));
        }
        Ok(value)
    }
}
