//! SNS-backed SMS delivery.

use async_trait::async_trait;
use aws_sdk_sns::Client;
use aws_sdk_sns::error::DisplayErrorContext;

use otp_common::ChallengeError;

use super::SmsSender;

/// Publishes text messages directly to phone numbers through SNS
#[derive(Debug, Clone)]
pub struct SnsSender {
    client: Client,
}

impl SnsSender {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default credential and region chain
    pub async fn from_env() -> Self {
        let sdk_config = aws_config::load_from_env().await;
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl SmsSender for SnsSender {
    async fn send(&self, phone_number: &str, message: &str) -> Result<(), ChallengeError> {
        let output = self
            .client
            .publish()
            .phone_number(phone_number)
            .message(message)
            .send()
            .await
            .map_err(|err| ChallengeError::Delivery(DisplayErrorContext(&err).to_string()))?;

        tracing::debug!(
            message_id = output.message_id().unwrap_or_default(),
            "SMS published"
        );

        Ok(())
    }
}
