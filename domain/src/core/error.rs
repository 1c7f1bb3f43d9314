//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Subscriber id cannot be empty")]
    EmptySubscriber,

    #[error("Unknown subscription tier: {0}")]
    UnknownTier(String),

    #[error("Unknown synthesis strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid limit value: {0}")]
    InvalidLimit(String),

    #[error("Invalid persona '{id}': {reason}")]
    InvalidPersona { id: String, reason: String },
}
