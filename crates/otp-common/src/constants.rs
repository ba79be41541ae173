//! Shared constants for the challenge handler.

/// Default one-time code validity in minutes
pub const DEFAULT_OTP_TTL_MINUTES: u32 = 10;

/// Milliseconds per minute, used for expiry arithmetic
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Smallest code that can be issued (inclusive)
pub const OTP_CODE_MIN: u32 = 100_000;

/// Largest code that can be issued (inclusive)
pub const OTP_CODE_MAX: u32 = 999_999;

/// Delivery channel hint exposed to the client
pub const DELIVERY_SMS: &str = "sms";

/// Prefix of the challenge metadata tag
pub const CHALLENGE_METADATA_PREFIX: &str = "CODE-";

/// Body sent to the user, followed by the code
pub const SMS_MESSAGE_PREFIX: &str = "Your verification code is: ";

/// Environment variable names
pub mod env {
    /// Code validity in whole minutes
    pub const OTP_TTL_MINUTES: &str = "OTP_TTL_MINUTES";

    /// Log level fallback when RUST_LOG is unset
    pub const LOG_LEVEL: &str = "LOG_LEVEL";

    /// Emit JSON formatted logs
    pub const JSON_LOGS: &str = "JSON_LOGS";
}

/// Keys used inside the trigger event
pub mod keys {
    /// Top-level event field naming the user
    pub const USER_NAME: &str = "userName";

    /// User attribute holding the E.164 phone number
    pub const PHONE_NUMBER: &str = "phone_number";

    /// Private parameter: the issued code
    pub const CODE: &str = "code";

    /// Private parameter: expiry in epoch milliseconds
    pub const EXPIRES_AT: &str = "expiresAt";

    /// Public parameter: how the code was delivered
    pub const DELIVERY: &str = "delivery";
}
