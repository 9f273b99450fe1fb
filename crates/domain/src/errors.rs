//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the scheduling engine
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SchedulerError {
    /// The supplied time expression could not be parsed into any date/time.
    #[error("Invalid time expression: {0}")]
    InvalidExpression(String),

    /// The resolved instant is not strictly in the future.
    #[error("Date must be in the future: {0}")]
    PastDate(String),

    /// The calendar provider rejected or failed a request.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Inbound webhook signature verification failed.
    #[error("Webhook signature verification failed")]
    SignatureInvalid,

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SchedulerError {
    /// Stable label suitable for metrics/logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InvalidExpression(_) => "invalid_expression",
            Self::PastDate(_) => "past_date",
            Self::Provider(_) => "provider",
            Self::SignatureInvalid => "signature_invalid",
            Self::Auth(_) => "auth",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for scheduling operations
pub type Result<T> = std::result::Result<T, SchedulerError>;
