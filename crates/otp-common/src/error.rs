//! Common error types for the challenge handler.

use thiserror::Error;

/// Errors raised while issuing a challenge
#[derive(Debug, Error)]
pub enum ChallengeError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS provider rejected or failed the send
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl ChallengeError {
    /// Short stable label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Delivery(_) => "delivery",
        }
    }

    /// Returns true if the orchestrator may reasonably retry the invocation
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Delivery(_))
    }
}
