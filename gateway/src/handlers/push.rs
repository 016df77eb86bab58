use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::GatewayError;
use crate::handlers::success_body;
use crate::models::PushPayload;
use crate::services::PushRelay;
use crate::{parser, token};

/// Relay one push hook to whichever downstream transport applies
///
/// POST /push
pub async fn relay_push(
    req: HttpRequest,
    body: web::Bytes,
    relay: web::Data<Arc<PushRelay>>,
) -> Result<HttpResponse, GatewayError> {
    let content_type = req
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let request = parser::parse(content_type, &body)?;
    let tokens = token::resolve(&request.raw_token)?;
    let payload = PushPayload::from_request(&request);

    let outcome = relay.relay(&tokens, &payload).await?;
    Ok(HttpResponse::Ok().json(success_body(&outcome)))
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/push", web::post().to(relay_push));
}
