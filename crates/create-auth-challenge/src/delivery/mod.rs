//! SMS delivery of one-time codes.
//!
//! The issuer only sees the narrow `SmsSender` capability; the SNS-backed
//! implementation is wired in at startup and tests substitute a recorder.

mod sns;
#[cfg(test)]
pub mod testing;

pub use sns::SnsSender;

use async_trait::async_trait;
use otp_common::ChallengeError;
use sha2::{Digest, Sha256};

/// Sends a text message to a phone number
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Deliver `message` to `phone_number`.
    ///
    /// Provider failures are reported as `ChallengeError::Delivery`.
    async fn send(&self, phone_number: &str, message: &str) -> Result<(), ChallengeError>;
}

/// SHA-256 hex digest of a phone number, for log fields
pub fn hash_phone_number(phone_number: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(phone_number.as_bytes());
    format!("{:x}", hasher.finalize())
}
