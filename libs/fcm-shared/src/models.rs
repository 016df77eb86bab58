use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Successful FCM delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmResponse {
    /// Opaque message identifier returned by the service
    pub message_id: String,
}

/// Google Service Account Key
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    pub client_id: String,
    pub token_uri: String,
}

/// OAuth2 Token Cache
#[derive(Debug, Clone)]
pub struct TokenCache {
    pub access_token: String,
    pub expires_at: i64,
}

/// JWT Claims for the Google OAuth2 JWT-bearer grant
#[derive(Debug, Serialize)]
pub struct JwtClaims {
    pub iss: String,
    pub sub: String,
    pub scope: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

/// Google OAuth2 Token Response
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// FCM HTTP v1 Message Request
#[derive(Debug, Serialize)]
pub struct FcmMessage {
    pub message: FcmMessageContent,
}

/// FCM Message Content
///
/// Always carries the generic notification block plus android and apns
/// overrides, so a token that actually belongs to the other platform still
/// renders with sound and badge.
#[derive(Debug, Serialize)]
pub struct FcmMessageContent {
    pub token: String,
    pub notification: FcmNotification,
    pub data: HashMap<String, String>,
    pub android: AndroidConfig,
    pub apns: ApnsOverride,
}

/// FCM Notification Payload
#[derive(Debug, Serialize)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,
}

/// Android-specific delivery options
#[derive(Debug, Serialize)]
pub struct AndroidConfig {
    pub priority: String,
    pub notification: AndroidNotification,
}

#[derive(Debug, Serialize)]
pub struct AndroidNotification {
    pub sound: String,
}

/// APNs override block for tokens that turn out to be iOS-bound
#[derive(Debug, Serialize)]
pub struct ApnsOverride {
    pub payload: ApnsOverridePayload,
}

#[derive(Debug, Serialize)]
pub struct ApnsOverridePayload {
    pub aps: ApsOverride,
}

#[derive(Debug, Serialize)]
pub struct ApsOverride {
    pub alert: ApsAlert,
    pub sound: String,
    pub badge: u32,
}

#[derive(Debug, Serialize)]
pub struct ApsAlert {
    pub title: String,
    pub body: String,
}

/// FCM API Response
#[derive(Debug, Deserialize)]
pub struct FcmApiResponse {
    pub name: Option<String>,
}

/// FCM API Error Response
#[derive(Debug, Deserialize)]
pub struct FcmApiError {
    pub error: Option<FcmApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct FcmApiErrorBody {
    pub status: Option<String>,
    pub message: Option<String>,
}
