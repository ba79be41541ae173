//! Core types shared across the challenge handler.
//!
//! The trigger event is only partially typed: the fields this handler reads
//! or writes are named, everything else is captured in `extra` maps so the
//! event can be handed back to the orchestrator without losing data.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::constants::{
    keys, CHALLENGE_METADATA_PREFIX, DELIVERY_SMS, OTP_CODE_MAX, OTP_CODE_MIN, SMS_MESSAGE_PREFIX,
};

/// Six digit one-time code.
///
/// Always within `[100000, 999999]`, so its decimal form is exactly six
/// digits without padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OtpCode(u32);

impl OtpCode {
    /// Draw a code uniformly from the inclusive code range
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self(rng.random_range(OTP_CODE_MIN..=OTP_CODE_MAX))
    }

    /// Wrap an existing value, rejecting anything outside the code range
    pub fn new(value: u32) -> Option<Self> {
        (OTP_CODE_MIN..=OTP_CODE_MAX)
            .contains(&value)
            .then_some(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Tag surfaced as `challengeMetadata`.
    ///
    /// NOTE: carries the code in cleartext.
    pub fn metadata_tag(&self) -> String {
        format!("{}{}", CHALLENGE_METADATA_PREFIX, self)
    }

    /// Text message body delivered to the user
    pub fn sms_message(&self) -> String {
        format!("{}{}", SMS_MESSAGE_PREFIX, self)
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A code together with its expiry, ready to be written into a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuedChallenge {
    pub code: OtpCode,

    /// Expiry timestamp (Unix epoch milliseconds)
    pub expires_at_ms: i64,
}

impl IssuedChallenge {
    /// Overwrite the challenge fields of `response`.
    ///
    /// The code and expiry only ever go into the private parameters; the
    /// public parameters carry nothing but the delivery hint.
    pub fn apply_to(&self, response: &mut ChallengeResponse) {
        response.private_challenge_parameters = HashMap::from([
            (keys::CODE.to_string(), self.code.to_string()),
            (keys::EXPIRES_AT.to_string(), self.expires_at_ms.to_string()),
        ]);
        response.public_challenge_parameters =
            HashMap::from([(keys::DELIVERY.to_string(), DELIVERY_SMS.to_string())]);
        response.challenge_metadata = Some(self.code.metadata_tag());
    }
}

/// "Create auth challenge" trigger event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthChallengeEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub request: ChallengeRequest,

    /// Populated by this handler; may arrive absent or null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ChallengeResponse>,

    /// Fields passed through untouched (version, region, userPoolId, userName, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateAuthChallengeEvent {
    /// Name of the user being authenticated, when the event carries one
    pub fn user_name(&self) -> Option<&str> {
        self.extra.get(keys::USER_NAME).and_then(Value::as_str)
    }

    /// Response section, created empty if the event arrived without one
    pub fn response_mut(&mut self) -> &mut ChallengeResponse {
        self.response.get_or_insert_with(ChallengeResponse::default)
    }
}

/// Request section of the trigger event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Attribute values are read leniently; only the phone number is interpreted
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_attributes: Map<String, Value>,

    /// challengeName, session, userNotFound, clientMetadata, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChallengeRequest {
    /// Registered phone number, if the user has a non-empty one
    pub fn phone_number(&self) -> Option<&str> {
        self.user_attributes
            .get(keys::PHONE_NUMBER)
            .and_then(Value::as_str)
            .filter(|phone| !phone.is_empty())
    }
}

/// Response section of the trigger event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    /// Visible to the client
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_challenge_parameters: HashMap<String, String>,

    /// Server-side only, read back by the verification step
    #[serde(default, deserialize_with = "null_as_default")]
    pub private_challenge_parameters: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_metadata: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
