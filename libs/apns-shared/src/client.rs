use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::config::ApnsConfig;

/// Error type for APNs operations
#[derive(Error, Debug)]
pub enum ApnsError {
    #[error("Failed to load APNs signing key: {0}")]
    KeyLoad(String),

    #[error("Failed to sign provider token: {0}")]
    Signing(String),

    #[error("APNs transport error: {0}")]
    Transport(String),

    #[error("APNs rejected notification ({status}): {reason}")]
    Rejected { status: u16, reason: String },
}

impl ApnsError {
    /// True when APNs reported the device token as no longer valid.
    pub fn is_unregistered(&self) -> bool {
        matches!(
            self,
            ApnsError::Rejected { reason, .. }
                if reason == "Unregistered" || reason == "BadDeviceToken"
        )
    }
}

/// Successful APNs delivery
#[derive(Debug, Clone)]
pub struct ApnsResponse {
    /// Provider-assigned message id from the `apns-id` response header
    pub apns_id: Option<String>,
}

/// Provider token claims, per the APNs token-based auth scheme
#[derive(Debug, Serialize)]
struct ProviderClaims<'a> {
    iss: &'a str,
    iat: i64,
}

#[derive(Debug, Serialize)]
struct AlertBlock<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct ApsBlock<'a> {
    alert: AlertBlock<'a>,
    sound: &'a str,
    badge: u32,
}

#[derive(Debug, Serialize)]
struct ApnsRequestBody<'a> {
    aps: ApsBlock<'a>,
    #[serde(rename = "senderIdentifier")]
    sender_identifier: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApnsErrorBody {
    reason: Option<String>,
}

/// Apple Push Notification service client
///
/// Authenticates with a per-request ES256 provider token. Each send opens
/// its own connection; there is no pooling across calls.
pub struct ApnsClient {
    signing_key: EncodingKey,
    key_id: String,
    team_id: String,
    topic: String,
    host: String,
}

impl ApnsClient {
    /// Create a new APNs client from configuration
    ///
    /// Reads the `.p8` signing key from disk. Fails if the key file is
    /// missing or is not a valid EC PEM key.
    pub fn new(cfg: &ApnsConfig) -> Result<Self, ApnsError> {
        let pem = std::fs::read(&cfg.key_path)
            .map_err(|e| ApnsError::KeyLoad(format!("failed to read {}: {e}", cfg.key_path)))?;

        let signing_key = EncodingKey::from_ec_pem(&pem)
            .map_err(|e| ApnsError::KeyLoad(format!("invalid EC key material: {e}")))?;

        info!(
            "Initialized APNs client for bundle_id={}, production={}",
            cfg.bundle_id, cfg.is_production
        );

        Ok(Self {
            signing_key,
            key_id: cfg.key_id.clone(),
            team_id: cfg.team_id.clone(),
            topic: cfg.bundle_id.clone(),
            host: cfg.endpoint().to_string(),
        })
    }

    /// APNs endpoint host this client targets
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Mint a short-lived provider token for one request
    fn provider_token(&self) -> Result<String, ApnsError> {
        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.key_id.clone());

        let claims = ProviderClaims {
            iss: &self.team_id,
            iat: Utc::now().timestamp(),
        };

        encode(&header, &claims, &self.signing_key)
            .map_err(|e| ApnsError::Signing(e.to_string()))
    }

    /// Send one alert notification to a single device
    ///
    /// A single attempt per call; no retries. Rejections carry the `reason`
    /// string from the APNs response body.
    pub async fn send(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        badge: u32,
        sender: &str,
    ) -> Result<ApnsResponse, ApnsError> {
        let token_prefix = device_token.chars().take(8).collect::<String>();
        let bearer = self.provider_token()?;

        let request_body = ApnsRequestBody {
            aps: ApsBlock {
                alert: AlertBlock { title, body },
                sound: "default",
                badge,
            },
            sender_identifier: sender,
        };

        let url = format!("https://{}/3/device/{}", self.host, device_token);

        // One connection per send, torn down afterwards.
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApnsError::Transport(e.to_string()))?;

        let response = http_client
            .post(&url)
            .header("authorization", format!("bearer {bearer}"))
            .header("apns-topic", &self.topic)
            .header("apns-push-type", "alert")
            .header("apns-priority", "10")
            .header("apns-expiration", "0")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ApnsError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::OK {
            let apns_id = response
                .headers()
                .get("apns-id")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());

            info!(
                "APNs notification sent to token {} (apns_id: {:?})",
                token_prefix, apns_id
            );
            return Ok(ApnsResponse { apns_id });
        }

        let reason = response
            .json::<ApnsErrorBody>()
            .await
            .ok()
            .and_then(|b| b.reason)
            .unwrap_or_else(|| "Unknown".to_string());

        error!(
            "APNs rejected notification for token {} ({}): {}",
            token_prefix, status, reason
        );

        Err(ApnsError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = ApnsRequestBody {
            aps: ApsBlock {
                alert: AlertBlock {
                    title: "New message",
                    body: "New message from oma@example.net",
                },
                sound: "default",
                badge: 3,
            },
            sender_identifier: "oma@example.net",
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["aps"]["alert"]["title"], "New message");
        assert_eq!(json["aps"]["sound"], "default");
        assert_eq!(json["aps"]["badge"], 3);
        assert_eq!(json["senderIdentifier"], "oma@example.net");
    }

    #[test]
    fn test_provider_claims_shape() {
        let claims = ProviderClaims {
            iss: "TEAM123456",
            iat: 1700000000,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["iss"], "TEAM123456");
        assert_eq!(json["iat"], 1700000000);
        assert!(json.get("exp").is_none());
    }

    #[test]
    fn test_unregistered_detection() {
        let unregistered = ApnsError::Rejected {
            status: 410,
            reason: "Unregistered".to_string(),
        };
        let bad_token = ApnsError::Rejected {
            status: 400,
            reason: "BadDeviceToken".to_string(),
        };
        let throttled = ApnsError::Rejected {
            status: 429,
            reason: "TooManyRequests".to_string(),
        };

        assert!(unregistered.is_unregistered());
        assert!(bad_token.is_unregistered());
        assert!(!throttled.is_unregistered());
        assert!(!ApnsError::Transport("reset".into()).is_unregistered());
    }

    #[test]
    fn test_error_body_parsing() {
        let body: ApnsErrorBody = serde_json::from_str(r#"{"reason":"Unregistered"}"#).unwrap();
        assert_eq!(body.reason.as_deref(), Some("Unregistered"));

        let empty: ApnsErrorBody = serde_json::from_str("{}").unwrap();
        assert!(empty.reason.is_none());
    }
}
