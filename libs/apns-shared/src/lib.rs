/// APNs Shared Library
///
/// Direct provider-push client for Apple Push Notification service.
///
/// It handles:
/// - ES256 provider token generation (signed per request)
/// - Sandbox/production endpoint selection
/// - Alert notification building and sending over HTTP/2
/// - Typed response handling (apns-id on success, reason on rejection)
pub mod client;
pub mod config;

pub use client::{ApnsClient, ApnsError, ApnsResponse};
pub use config::ApnsConfig;
