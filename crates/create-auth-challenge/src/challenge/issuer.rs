//! Challenge issuer: code generation, expiry, response population, delivery.

use std::sync::Arc;

use otp_common::constants::MILLIS_PER_MINUTE;
use otp_common::{ChallengeError, CreateAuthChallengeEvent, IssuedChallenge, OtpCode};

use crate::delivery::{SmsSender, hash_phone_number};

/// Issues SMS one-time code challenges
pub struct ChallengeIssuer {
    /// Code validity in minutes
    ttl_minutes: u32,
    sender: Arc<dyn SmsSender>,
}

impl ChallengeIssuer {
    pub fn new(ttl_minutes: u32, sender: Arc<dyn SmsSender>) -> Self {
        Self {
            ttl_minutes,
            sender,
        }
    }

    /// Populate the challenge fields of `event` and text the code to the user.
    ///
    /// A missing phone number is not an error: the challenge is still
    /// issued, nothing is sent. A failed send fails the whole invocation.
    pub async fn issue(
        &self,
        event: CreateAuthChallengeEvent,
    ) -> Result<CreateAuthChallengeEvent, ChallengeError> {
        // ThreadRng is not Send; draw before any await
        let code = OtpCode::generate(&mut rand::rng());
        let now_ms = chrono::Utc::now().timestamp_millis();

        self.issue_at(event, code, now_ms).await
    }

    /// Expiry for a challenge issued at `now_ms`
    pub fn expires_at(&self, now_ms: i64) -> i64 {
        now_ms + i64::from(self.ttl_minutes) * MILLIS_PER_MINUTE
    }

    async fn issue_at(
        &self,
        mut event: CreateAuthChallengeEvent,
        code: OtpCode,
        now_ms: i64,
    ) -> Result<CreateAuthChallengeEvent, ChallengeError> {
        let issued = IssuedChallenge {
            code,
            expires_at_ms: self.expires_at(now_ms),
        };
        issued.apply_to(event.response_mut());

        match event.request.phone_number() {
            Some(phone_number) => {
                let phone_hash = hash_phone_number(phone_number);

                if let Err(err) = self.sender.send(phone_number, &code.sms_message()).await {
                    tracing::error!(
                        user = ?event.user_name(),
                        phone_hash = %phone_hash,
                        error = %err,
                        kind = err.kind(),
                        "Failed to deliver one-time code"
                    );
                    return Err(err);
                }

                tracing::info!(
                    user = ?event.user_name(),
                    phone_hash = %phone_hash,
                    expires_at = issued.expires_at_ms,
                    delivered = true,
                    "Challenge issued"
                );
            }
            None => {
                tracing::warn!(
                    user = ?event.user_name(),
                    expires_at = issued.expires_at_ms,
                    delivered = false,
                    "Challenge issued without delivery: user has no phone number"
                );
            }
        }

        Ok(event)
    }
}
