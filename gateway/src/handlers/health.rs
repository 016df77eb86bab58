use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::config::GatewayConfig;

/// Liveness and configuration summary
///
/// GET /health
pub async fn health(config: web::Data<Arc<GatewayConfig>>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "push-gateway",
        "environment": config.environment,
        "apnsEnabled": config.apns.is_some(),
        "apnsHost": config.apns_host(),
    }))
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
