//! # Create Auth Challenge - SMS one-time code trigger
//!
//! Runs as the "create auth challenge" step of a custom authentication
//! flow. Each invocation draws a six digit code, hides it (with its expiry)
//! in the private challenge parameters for the verification step, exposes
//! only a delivery hint to the client, and texts the code to the user.
//!
//! ## Architecture
//! ```text
//! Orchestrator → create-auth-challenge → SNS (SMS)
//!                       ↓
//!        privateChallengeParameters → verify step
//! ```

use anyhow::Result;
use clap::Parser;
use lambda_runtime::{LambdaEvent, service_fn};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use otp_common::CreateAuthChallengeEvent;
use otp_common::constants::env as env_keys;

mod challenge;
mod config;
mod delivery;
mod handler;
mod state;

use config::{AppConfig, ConfigOverrides};
use state::AppState;

/// SMS one-time code challenge issuer
#[derive(Parser, Debug)]
#[command(name = "create-auth-challenge")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/create-auth-challenge.toml")]
    config: String,

    /// One-time code validity in minutes (overrides config)
    #[arg(long, env = env_keys::OTP_TTL_MINUTES)]
    otp_ttl_minutes: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = env_keys::LOG_LEVEL)]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, env = env_keys::JSON_LOGS)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Local runs read credentials and overrides from .env
    let _ = dotenvy::dotenv();

    // Parse CLI arguments (env fallbacks included)
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level, args.json_logs)?;

    info!(
        "Starting create-auth-challenge v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let overrides = ConfigOverrides {
        otp_ttl_minutes: args.otp_ttl_minutes,
    };
    let config = AppConfig::load(&args.config, &overrides)?;
    info!("Configuration loaded from {}", args.config);

    // Build SNS client and application state
    let state = Arc::new(AppState::new(config).await);
    info!(
        otp_ttl_minutes = state.config.otp_ttl_minutes,
        "SNS delivery ready"
    );

    // Serve invocations until the runtime shuts us down
    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<CreateAuthChallengeEvent>| {
            let state = state.clone();
            async move { handler::create_auth_challenge(&state, event).await }
        },
    ))
    .await
    .map_err(|err| anyhow::anyhow!("Lambda runtime error: {}", err))?;

    Ok(())
}

/// Initialize structured logging with tracing.
///
/// The log sink stamps every line itself, so timestamps and ANSI colors are off.
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().without_time())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_ansi(false).without_time())
            .init();
    }

    Ok(())
}
