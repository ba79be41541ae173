//! Configuration management for the challenge handler.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use otp_common::ChallengeError;
use otp_common::constants::DEFAULT_OTP_TTL_MINUTES;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// One-time code validity in minutes
    #[serde(default = "default_otp_ttl_minutes")]
    pub otp_ttl_minutes: u32,
}

/// Values taken from CLI arguments or their environment fallbacks
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub otp_ttl_minutes: Option<u32>,
}

fn default_otp_ttl_minutes() -> u32 { DEFAULT_OTP_TTL_MINUTES }

impl AppConfig {
    /// Load configuration from file, with CLI/env overrides
    pub fn load(config_path: &str, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Self::default()
        };

        if let Some(ttl) = overrides.otp_ttl_minutes {
            config.otp_ttl_minutes = ttl;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would issue already-expired codes
    pub fn validate(&self) -> Result<(), ChallengeError> {
        if self.otp_ttl_minutes == 0 {
            return Err(ChallengeError::Config(
                "otp_ttl_minutes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            otp_ttl_minutes: default_otp_ttl_minutes(),
        }
    }
}
