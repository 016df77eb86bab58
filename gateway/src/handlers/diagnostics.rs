use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::GatewayError;
use crate::handlers::success_body;
use crate::models::PushPayload;
use crate::services::PushRelay;

#[derive(Debug, Deserialize)]
pub struct TestPushBody {
    pub token: String,
}

fn test_payload() -> PushPayload {
    PushPayload {
        title: "Test notification".to_string(),
        body: "Push gateway connectivity test".to_string(),
        badge: 1,
        sender: "gateway-test".to_string(),
    }
}

/// Force one direct-delivery test push
///
/// POST /test-apns
pub async fn test_apns(
    body: web::Json<TestPushBody>,
    relay: web::Data<Arc<PushRelay>>,
) -> Result<HttpResponse, GatewayError> {
    let device_token = body.token.strip_prefix("apns:").unwrap_or(&body.token);
    let outcome = relay.deliver_direct(device_token, &test_payload()).await?;
    Ok(HttpResponse::Ok().json(success_body(&outcome)))
}

/// Force one cross-platform test push
///
/// POST /test-fcm (and the legacy alias POST /test-push)
pub async fn test_fcm(
    body: web::Json<TestPushBody>,
    relay: web::Data<Arc<PushRelay>>,
) -> Result<HttpResponse, GatewayError> {
    let device_token = body.token.strip_prefix("fcm:").unwrap_or(&body.token);
    let outcome = relay.deliver_cross(device_token, &test_payload()).await?;
    Ok(HttpResponse::Ok().json(success_body(&outcome)))
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/test-apns", web::post().to(test_apns))
        .route("/test-fcm", web::post().to(test_fcm))
        .route("/test-push", web::post().to(test_fcm));
}
