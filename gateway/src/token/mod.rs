use crate::error::GatewayError;
use crate::models::{PlatformHint, ResolvedTokens};

/// Decode the opaque device-token string into platform-specific tokens
///
/// Wire forms: `apns:<hex>`, `fcm:<token>`, the dual form
/// `apns:<hex>|fcm:<token>` (segment order irrelevant), or a bare legacy
/// token treated as cross-platform.
pub fn resolve(raw: &str) -> Result<ResolvedTokens, GatewayError> {
    let mut apns_token = None;
    let mut fcm_token = None;
    let mut platform_hint = PlatformHint::Unknown;

    if raw.contains('|') {
        for segment in raw.split('|') {
            if let Some(value) = segment.strip_prefix("apns:") {
                if !value.is_empty() {
                    apns_token = Some(value.to_string());
                    platform_hint = PlatformHint::Ios;
                }
            } else if let Some(value) = segment.strip_prefix("fcm:") {
                if !value.is_empty() {
                    fcm_token = Some(value.to_string());
                }
            }
            // Unknown segment prefixes are ignored.
        }
    } else if let Some(value) = raw.strip_prefix("apns:") {
        if !value.is_empty() {
            apns_token = Some(value.to_string());
            platform_hint = PlatformHint::Ios;
        }
    } else if let Some(value) = raw.strip_prefix("fcm:") {
        if !value.is_empty() {
            fcm_token = Some(value.to_string());
            platform_hint = PlatformHint::Android;
        }
    } else if !raw.is_empty() {
        // Legacy tokens carry no prefix and are implicitly cross-platform.
        fcm_token = Some(raw.to_string());
    }

    if apns_token.is_none() && fcm_token.is_none() {
        return Err(GatewayError::NoValidToken);
    }

    Ok(ResolvedTokens {
        platform_hint,
        apns_token,
        fcm_token,
    })
}
