use thiserror::Error;

/// FCM Client Error Types
#[derive(Error, Debug)]
pub enum FcmError {
    #[error("Failed to load service account: {0}")]
    Credential(String),

    #[error("Failed to parse private key: {0}")]
    KeyParse(String),

    #[error("Failed to encode JWT: {0}")]
    JwtEncode(String),

    #[error("Failed to get access token: {0}")]
    Token(String),

    #[error("FCM transport error: {0}")]
    Transport(String),

    #[error("FCM registration token is no longer valid")]
    RegistrationNotFound,

    #[error("FCM delivery error: {0}")]
    Delivery(String),
}
