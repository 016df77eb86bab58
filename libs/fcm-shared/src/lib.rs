/// FCM Shared Library
///
/// Firebase Cloud Messaging client for the cross-platform push path.
///
/// It handles:
/// - OAuth2 token generation from a Google service account
/// - Token caching with automatic refresh
/// - Message delivery through the FCM HTTP v1 API
/// - Platform overrides so iOS-bound tokens still render correctly
pub mod client;
pub mod errors;
pub mod models;

pub use client::FcmClient;
pub use errors::FcmError;
pub use models::{FcmResponse, ServiceAccountKey};
