pub mod advice;
pub mod engine;
pub mod plan;
pub mod split;

pub use engine::{default_drift_threshold, AssetAllocationEngine, PlanRequest};
pub use plan::{AllocationSummary, InvestmentPlan, RebalanceBand};
pub use split::{
    equity_debt_split, recommended_strategy_for_age, risk_profile_from_age, RiskProfile,
    SplitMethod,
};
