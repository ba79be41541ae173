//! Application state and shared resources.

use std::sync::Arc;

use crate::challenge::ChallengeIssuer;
use crate::config::AppConfig;
use crate::delivery::{SmsSender, SnsSender};

/// Shared application state, built once per cold start
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Challenge issuer
    pub issuer: Arc<ChallengeIssuer>,
}

impl AppState {
    /// Create state backed by SNS delivery
    pub async fn new(config: AppConfig) -> Self {
        let sender = Arc::new(SnsSender::from_env().await);
        Self::with_sender(config, sender)
    }

    /// Create state with an explicit delivery capability
    pub fn with_sender(config: AppConfig, sender: Arc<dyn SmsSender>) -> Self {
        let issuer = Arc::new(ChallengeIssuer::new(config.otp_ttl_minutes, sender));
        Self { config, issuer }
    }
}
