pub mod plan;
pub mod projection;
pub mod rebalance;
pub mod strategies;
