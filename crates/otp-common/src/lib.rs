//! # OTP Common
//!
//! Shared types and utilities for the SMS one-time code challenge handler.
//!
//! ## Modules
//! - `types` - Trigger event shapes and the `OtpCode` newtype
//! - `error` - Common error types
//! - `constants` - Wire keys, defaults, and code bounds

pub mod constants;
pub mod error;
pub mod types;

pub use error::ChallengeError;
pub use types::*;
