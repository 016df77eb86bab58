use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::FcmError;
use crate::models::*;

const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

/// Firebase Cloud Messaging client
///
/// Sends through the FCM HTTP v1 API, authenticating with an OAuth2 access
/// token minted from a Google service account and cached until shortly
/// before expiry.
pub struct FcmClient {
    pub project_id: String,
    credentials: Arc<ServiceAccountKey>,
    token_cache: Arc<Mutex<Option<TokenCache>>>,
    http_client: reqwest::Client,
}

impl FcmClient {
    /// Create a new FCM client from a service account key
    pub fn new(credentials: ServiceAccountKey) -> Self {
        Self {
            project_id: credentials.project_id.clone(),
            credentials: Arc::new(credentials),
            token_cache: Arc::new(Mutex::new(None)),
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a new FCM client from a service account JSON file
    pub fn from_credentials_file(path: impl AsRef<Path>) -> Result<Self, FcmError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|e| {
            FcmError::Credential(format!("failed to read {}: {e}", path.display()))
        })?;

        let credentials: ServiceAccountKey = serde_json::from_slice(&raw).map_err(|e| {
            FcmError::Credential(format!("invalid service account JSON: {e}"))
        })?;

        info!(
            "Loaded FCM service account for project {}",
            credentials.project_id
        );

        Ok(Self::new(credentials))
    }

    /// Send one notification to a single device
    ///
    /// The message always carries the generic notification block plus
    /// android and apns overrides; the data map is string-typed.
    pub async fn send(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        badge: u32,
        sender: &str,
        message_count: u32,
    ) -> Result<FcmResponse, FcmError> {
        let token_prefix = device_token.chars().take(8).collect::<String>();
        let access_token = self.get_access_token().await?;

        let mut data = HashMap::new();
        data.insert("type".to_string(), "message".to_string());
        data.insert("sender".to_string(), sender.to_string());
        data.insert("messageCount".to_string(), message_count.to_string());

        let message = FcmMessage {
            message: FcmMessageContent {
                token: device_token.to_string(),
                notification: FcmNotification {
                    title: title.to_string(),
                    body: body.to_string(),
                },
                data,
                android: AndroidConfig {
                    priority: "high".to_string(),
                    notification: AndroidNotification {
                        sound: "default".to_string(),
                    },
                },
                apns: ApnsOverride {
                    payload: ApnsOverridePayload {
                        aps: ApsOverride {
                            alert: ApsAlert {
                                title: title.to_string(),
                                body: body.to_string(),
                            },
                            sound: "default".to_string(),
                            badge,
                        },
                    },
                },
            },
        };

        let url = format!(
            "https://fcm.googleapis.com/v1/projects/{}/messages:send",
            self.project_id
        );

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .header("Content-Type", "application/json")
            .json(&message)
            .send()
            .await
            .map_err(|e| FcmError::Transport(e.to_string()))?;

        let status = response.status();
        match status {
            reqwest::StatusCode::OK => {
                let fcm_response: FcmApiResponse = response
                    .json()
                    .await
                    .map_err(|e| FcmError::Delivery(format!("failed to parse response: {e}")))?;

                let message_id = fcm_response
                    .name
                    .unwrap_or_else(|| Uuid::new_v4().to_string());

                info!(
                    "FCM notification sent to token {} (message_id: {})",
                    token_prefix, message_id
                );
                Ok(FcmResponse { message_id })
            }
            reqwest::StatusCode::NOT_FOUND => {
                error!("FCM token {} is no longer registered", token_prefix);
                Err(FcmError::RegistrationNotFound)
            }
            _ => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());

                if is_unregistered_body(&error_text) {
                    error!("FCM token {} is no longer registered", token_prefix);
                    return Err(FcmError::RegistrationNotFound);
                }

                error!(
                    "FCM send failed for token {} ({}): {}",
                    token_prefix, status, error_text
                );
                Err(FcmError::Delivery(format!("{status} - {error_text}")))
            }
        }
    }

    /// Get access token from service account (with caching)
    async fn get_access_token(&self) -> Result<String, FcmError> {
        {
            let cache = self.token_cache.lock().expect("Token cache lock poisoned");
            if let Some(cached) = cache.as_ref() {
                let now = Utc::now().timestamp();
                if cached.expires_at > now + 60 {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        // Generate new JWT and exchange for an access token
        let now = Utc::now();
        let claims = JwtClaims {
            iss: self.credentials.client_email.clone(),
            sub: self.credentials.client_email.clone(),
            scope: FCM_SCOPE.to_string(),
            aud: self.credentials.token_uri.clone(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .map_err(|e| FcmError::KeyParse(e.to_string()))?;

        let token = encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| FcmError::JwtEncode(e.to_string()))?;

        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", &token),
        ];

        let response = self
            .http_client
            .post(&self.credentials.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| FcmError::Token(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FcmError::Token(format!(
                "token request failed with status {}",
                response.status()
            )));
        }

        let token_response: GoogleTokenResponse = response
            .json()
            .await
            .map_err(|e| FcmError::Token(format!("failed to parse token response: {e}")))?;

        let expires_at = Utc::now().timestamp() + token_response.expires_in;
        {
            let mut cache = self.token_cache.lock().expect("Token cache lock poisoned");
            *cache = Some(TokenCache {
                access_token: token_response.access_token.clone(),
                expires_at,
            });
        }

        Ok(token_response.access_token)
    }
}

/// Detect unregistered-token rejections that arrive as 400-level error bodies
fn is_unregistered_body(error_text: &str) -> bool {
    match serde_json::from_str::<FcmApiError>(error_text) {
        Ok(parsed) => parsed.error.is_some_and(|e| {
            e.status.as_deref() == Some("NOT_FOUND")
                || e.message
                    .as_deref()
                    .is_some_and(|m| m.contains("UNREGISTERED") || m.contains("not found"))
        }),
        Err(_) => false,
    }
}
