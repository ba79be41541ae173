//! Test double for `SmsSender`.

use std::sync::Mutex;

use async_trait::async_trait;
use otp_common::ChallengeError;

use super::SmsSender;

/// Records every send; optionally fails each one
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
    fail_with: Option<String>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sender whose every call fails with a delivery error
    pub fn failing(reason: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(reason.to_string()),
        }
    }

    /// (phone_number, message) pairs in call order
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsSender for RecordingSender {
    async fn send(&self, phone_number: &str, message: &str) -> Result<(), ChallengeError> {
        self.sent
            .lock()
            .unwrap()
            .push((phone_number.to_string(), message.to_string()));

        match &self.fail_with {
            Some(reason) => Err(ChallengeError::Delivery(reason.clone())),
            None => Ok(()),
        }
    }
}
