//! Lambda entry point for the "create auth challenge" trigger.

use lambda_runtime::{Error, LambdaEvent};
use tracing::Instrument;

use otp_common::CreateAuthChallengeEvent;

use crate::state::AppState;

/// Issue a challenge for one trigger invocation.
///
/// The invocation context only contributes the request id to the span.
pub async fn create_auth_challenge(
    state: &AppState,
    event: LambdaEvent<CreateAuthChallengeEvent>,
) -> Result<CreateAuthChallengeEvent, Error> {
    let (payload, context) = event.into_parts();
    let span = tracing::info_span!("create_auth_challenge", request_id = %context.request_id);

    state
        .issuer
        .issue(payload)
        .instrument(span)
        .await
        .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::delivery::testing::RecordingSender;
    use lambda_runtime::Context;
    use serde_json::json;
    use std::sync::Arc;

    fn trigger_event(phone: Option<&str>) -> CreateAuthChallengeEvent {
        let mut attributes = json!({ "sub": "5b1c7e0a", "email_verified": "true" });
        if let Some(phone) = phone {
            attributes["phone_number"] = json!(phone);
        }
        serde_json::from_value(json!({
            "version": "1",
            "region": "us-east-1",
            "userPoolId": "us-east-1_example",
            "userName": "alice",
            "callerContext": { "awsSdkVersion": "aws-sdk-unknown-unknown", "clientId": "client" },
            "triggerSource": "CreateAuthChallenge_Authentication",
            "request": {
                "userAttributes": attributes,
                "challengeName": "CUSTOM_CHALLENGE",
                "session": [],
                "userNotFound": false
            },
            "response": {
                "publicChallengeParameters": null,
                "privateChallengeParameters": null,
                "challengeMetadata": null
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_handler_populates_response_and_sends_sms() {
        let sender = Arc::new(RecordingSender::new());
        let state = AppState::with_sender(AppConfig::default(), sender.clone());

        let event = LambdaEvent::new(trigger_event(Some("+15551234567")), Context::default());
        let output = create_auth_challenge(&state, event).await.unwrap();
        let output = serde_json::to_value(&output).unwrap();

        let code = output["response"]["privateChallengeParameters"]["code"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert!(output["response"]["privateChallengeParameters"]["expiresAt"].is_string());
        assert_eq!(
            output["response"]["publicChallengeParameters"],
            json!({ "delivery": "sms" })
        );
        assert_eq!(output["response"]["challengeMetadata"], format!("CODE-{}", code));

        // Everything else goes back to the orchestrator as it came in
        assert_eq!(output["userPoolId"], "us-east-1_example");
        assert_eq!(output["triggerSource"], "CreateAuthChallenge_Authentication");
        assert_eq!(output["request"]["challengeName"], "CUSTOM_CHALLENGE");
        assert_eq!(output["request"]["userAttributes"]["sub"], "5b1c7e0a");

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+15551234567");
        assert!(sent[0].1.contains(&code));
    }

    #[tokio::test]
    async fn test_handler_without_phone_number() {
        let sender = Arc::new(RecordingSender::new());
        let state = AppState::with_sender(AppConfig::default(), sender.clone());

        let event = LambdaEvent::new(trigger_event(None), Context::default());
        let output = create_auth_challenge(&state, event).await.unwrap();

        assert!(sender.sent().is_empty());
        assert_eq!(
            output.response.unwrap().public_challenge_parameters["delivery"],
            "sms"
        );
    }

    #[tokio::test]
    async fn test_handler_surfaces_delivery_failure() {
        let sender = Arc::new(RecordingSender::failing("invalid parameter"));
        let state = AppState::with_sender(AppConfig::default(), sender);

        let event = LambdaEvent::new(trigger_event(Some("+15551234567")), Context::default());
        let err = create_auth_challenge(&state, event).await.unwrap_err();

        assert!(err.to_string().contains("invalid parameter"));
    }

    #[tokio::test]
    async fn test_handler_uses_configured_ttl() {
        let sender = Arc::new(RecordingSender::new());
        let config = AppConfig { otp_ttl_minutes: 2 };
        let state = AppState::with_sender(config, sender);

        let before = chrono::Utc::now().timestamp_millis();
        let event = LambdaEvent::new(trigger_event(None), Context::default());
        let output = create_auth_challenge(&state, event).await.unwrap();
        let after = chrono::Utc::now().timestamp_millis();

        let expires_at: i64 = output.response.unwrap().private_challenge_parameters["expiresAt"]
            .parse()
            .unwrap();
        assert!(expires_at >= before + 120_000);
        assert!(expires_at <= after + 120_000);
    }
}
