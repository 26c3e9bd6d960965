use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid profile: {field} — {reason}")]
    InvalidProfile { field: String, reason: String },

    #[error("Unknown {kind} strategy: '{name}'")]
    UnknownStrategy { kind: String, name: String },

    #[error("Invalid allocation input: {field} — {reason}")]
    InvalidAllocationInput { field: String, reason: String },

    #[error("Empty portfolio: {context}")]
    EmptyPortfolio { context: String },

    #[error("Invalid drift threshold: {0} (must be > 0)")]
    InvalidThreshold(Decimal),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PlannerError {
    fn from(e: serde_json::Error) -> Self {
        PlannerError::SerializationError(e.to_string())
    }
}
