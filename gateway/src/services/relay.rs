use std::sync::Arc;

use tracing::{info, warn};

use apns_shared::{ApnsClient, ApnsError};
use fcm_shared::{FcmClient, FcmError};

use crate::error::GatewayError;
use crate::models::{DeliveryMethod, DeliveryOutcome, PushPayload, ResolvedTokens};

/// Direct provider-push transport (the APNs path)
#[async_trait::async_trait]
pub trait DirectPush: Send + Sync {
    /// Returns the provider-assigned message id, when one is given
    async fn deliver(
        &self,
        device_token: &str,
        payload: &PushPayload,
    ) -> Result<Option<String>, ApnsError>;
}

/// Cross-platform push transport (the FCM path)
#[async_trait::async_trait]
pub trait CrossPlatformPush: Send + Sync {
    async fn deliver(
        &self,
        device_token: &str,
        payload: &PushPayload,
    ) -> Result<String, FcmError>;
}

#[async_trait::async_trait]
impl DirectPush for ApnsClient {
    async fn deliver(
        &self,
        device_token: &str,
        payload: &PushPayload,
    ) -> Result<Option<String>, ApnsError> {
        self.send(
            device_token,
            &payload.title,
            &payload.body,
            payload.badge,
            &payload.sender,
        )
        .await
        .map(|response| response.apns_id)
    }
}

#[async_trait::async_trait]
impl CrossPlatformPush for FcmClient {
    async fn deliver(
        &self,
        device_token: &str,
        payload: &PushPayload,
    ) -> Result<String, FcmError> {
        self.send(
            device_token,
            &payload.title,
            &payload.body,
            payload.badge,
            &payload.sender,
            payload.badge,
        )
        .await
        .map(|response| response.message_id)
    }
}

/// Sequences the two delivery paths for one request
///
/// One linear fallback: the direct path first when a direct token exists and
/// the signing key is loaded, then at most one cross-platform attempt. Never
/// parallel, never retried.
pub struct PushRelay {
    direct: Option<Arc<dyn DirectPush>>,
    cross: Arc<dyn CrossPlatformPush>,
}

impl PushRelay {
    pub fn new(direct: Option<Arc<dyn DirectPush>>, cross: Arc<dyn CrossPlatformPush>) -> Self {
        Self { direct, cross }
    }

    /// Whether the direct path is configured
    pub fn direct_enabled(&self) -> bool {
        self.direct.is_some()
    }

    /// Relay one notification per the fallback order
    pub async fn relay(
        &self,
        tokens: &ResolvedTokens,
        payload: &PushPayload,
    ) -> Result<DeliveryOutcome, GatewayError> {
        if let (Some(apns_token), Some(direct)) =
            (tokens.apns_token.as_deref(), self.direct.as_ref())
        {
            match direct.deliver(apns_token, payload).await {
                Ok(apns_id) => {
                    info!(method = "apns", "Notification delivered");
                    return Ok(DeliveryOutcome {
                        method: DeliveryMethod::Apns,
                        message_id: apns_id,
                    });
                }
                Err(err) => match tokens.fcm_token.as_deref() {
                    Some(fcm_token) => {
                        warn!("APNs delivery failed, falling back to FCM: {err}");
                        return self.cross_attempt(fcm_token, payload).await;
                    }
                    None => {
                        warn!("APNs delivery failed with no fallback token: {err}");
                        return Err(err.into());
                    }
                },
            }
        }

        match tokens.fcm_token.as_deref() {
            Some(fcm_token) => self.cross_attempt(fcm_token, payload).await,
            None => Err(GatewayError::NoValidToken),
        }
    }

    async fn cross_attempt(
        &self,
        fcm_token: &str,
        payload: &PushPayload,
    ) -> Result<DeliveryOutcome, GatewayError> {
        let message_id = self.cross.deliver(fcm_token, payload).await?;
        info!(method = "fcm", "Notification delivered");
        Ok(DeliveryOutcome {
            method: DeliveryMethod::Fcm,
            message_id: Some(message_id),
        })
    }

    /// Force one direct-path attempt, for diagnostic endpoints
    pub async fn deliver_direct(
        &self,
        device_token: &str,
        payload: &PushPayload,
    ) -> Result<DeliveryOutcome, GatewayError> {
        let direct = self.direct.as_ref().ok_or_else(|| {
            GatewayError::Unconfigured("APNs signing key not loaded".to_string())
        })?;

        let apns_id = direct.deliver(device_token, payload).await?;
        Ok(DeliveryOutcome {
            method: DeliveryMethod::Apns,
            message_id: apns_id,
        })
    }

    /// Force one cross-platform attempt, for diagnostic endpoints
    pub async fn deliver_cross(
        &self,
        device_token: &str,
        payload: &PushPayload,
    ) -> Result<DeliveryOutcome, GatewayError> {
        self.cross_attempt(device_token, payload).await
    }
}
