use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use apns_shared::ApnsError;
use fcm_shared::FcmError;

/// Gateway error taxonomy; each variant owns its HTTP mapping
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    MalformedPayload(String),

    #[error("No valid token found")]
    NoValidToken,

    #[error("Token expired")]
    RegistrationNotFound,

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Delivery(String),

    #[error("{0}")]
    Unconfigured(String),
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MalformedPayload(_) | GatewayError::NoValidToken => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::RegistrationNotFound => StatusCode::GONE,
            GatewayError::Transport(_)
            | GatewayError::Delivery(_)
            | GatewayError::Unconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

impl From<ApnsError> for GatewayError {
    fn from(err: ApnsError) -> Self {
        if err.is_unregistered() {
            return GatewayError::RegistrationNotFound;
        }
        match err {
            ApnsError::Transport(msg) => GatewayError::Transport(msg),
            other => GatewayError::Delivery(other.to_string()),
        }
    }
}

impl From<FcmError> for GatewayError {
    fn from(err: FcmError) -> Self {
        match err {
            FcmError::RegistrationNotFound => GatewayError::RegistrationNotFound,
            FcmError::Transport(msg) => GatewayError::Transport(msg),
            other => GatewayError::Delivery(other.to_string()),
        }
    }
}
