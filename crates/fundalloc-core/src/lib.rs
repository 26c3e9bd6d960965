pub mod error;
pub mod profile;
pub mod strategy;
pub mod types;

#[cfg(feature = "planning")]
pub mod allocation;

#[cfg(feature = "rebalancing")]
pub mod rebalancing;

#[cfg(feature = "projection")]
pub mod projection;

pub use error::PlannerError;
pub use types::*;

/// Standard result type for all planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
