/// HTTP boundary tests
///
/// Drives the actix app with stub transports and checks the wire-visible
/// contract: response shapes, status codes, and content-type dispatch.
use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};

use apns_shared::{ApnsConfig, ApnsError};
use fcm_shared::FcmError;
use push_gateway::handlers::{diagnostics, health, push};
use push_gateway::models::PushPayload;
use push_gateway::services::{CrossPlatformPush, DirectPush, PushRelay};
use push_gateway::GatewayConfig;

struct StubDirect {
    outcome: fn() -> Result<Option<String>, ApnsError>,
}

#[async_trait::async_trait]
impl DirectPush for StubDirect {
    async fn deliver(
        &self,
        _device_token: &str,
        _payload: &PushPayload,
    ) -> Result<Option<String>, ApnsError> {
        (self.outcome)()
    }
}

struct StubCross {
    outcome: fn() -> Result<String, FcmError>,
}

#[async_trait::async_trait]
impl CrossPlatformPush for StubCross {
    async fn deliver(
        &self,
        _device_token: &str,
        _payload: &PushPayload,
    ) -> Result<String, FcmError> {
        (self.outcome)()
    }
}

fn test_config(apns: bool) -> Arc<GatewayConfig> {
    Arc::new(GatewayConfig {
        environment: "test".to_string(),
        port: 8000,
        apns: apns.then(|| {
            ApnsConfig::new(
                "/keys/AuthKey.p8".into(),
                "ABC123DEFG".into(),
                "TEAM123456".into(),
                "app.commeazy.ios".into(),
                false,
            )
        }),
        fcm_credentials_path: "/keys/service-account.json".to_string(),
    })
}

fn test_relay(
    direct: Option<fn() -> Result<Option<String>, ApnsError>>,
    cross: fn() -> Result<String, FcmError>,
) -> Arc<PushRelay> {
    let direct_stub =
        direct.map(|outcome| Arc::new(StubDirect { outcome }) as Arc<dyn DirectPush>);
    let cross_stub = Arc::new(StubCross { outcome: cross }) as Arc<dyn CrossPlatformPush>;
    Arc::new(PushRelay::new(direct_stub, cross_stub))
}

macro_rules! test_app {
    ($config:expr, $relay:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($config))
                .app_data(web::Data::new($relay))
                .configure(|cfg| {
                    push::register_routes(cfg);
                    health::register_routes(cfg);
                    diagnostics::register_routes(cfg);
                }),
        )
        .await
    };
}

#[actix_web::test]
async fn health_reports_configuration() {
    let app = test_app!(test_config(true), test_relay(None, || Ok("x".into())));

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "push-gateway");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["apnsEnabled"], true);
    assert_eq!(body["apnsHost"], "api.sandbox.push.apple.com");
}

#[actix_web::test]
async fn json_android_push_goes_through_fcm() {
    let relay = test_relay(None, || Ok("projects/p/messages/42".to_string()));
    let app = test_app!(test_config(false), relay);

    let req = test::TestRequest::post()
        .uri("/push")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"token":"abc123","platform":"android","sender":"oma@domain","count":2}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["method"], "fcm");
    assert_eq!(body["messageId"], "projects/p/messages/42");
}

#[actix_web::test]
async fn xml_stanza_with_apns_token_goes_direct() {
    let relay = test_relay(Some(|| Ok(Some("1234".to_string()))), || {
        Ok("unused".to_string())
    });
    let app = test_app!(test_config(true), relay);

    let req = test::TestRequest::post()
        .uri("/push")
        .insert_header(("content-type", "application/xml"))
        .set_payload("<push><node>apns:DEADBEEF</node></push>")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["method"], "apns");
    assert_eq!(body["apnsId"], "1234");
}

#[actix_web::test]
async fn apns_only_token_without_signing_key_rejects() {
    let app = test_app!(test_config(false), test_relay(None, || Ok("x".into())));

    let req = test::TestRequest::post()
        .uri("/push")
        .insert_header(("content-type", "application/xml"))
        .set_payload("<push><node>apns:DEADBEEF</node></push>")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "No valid token found");
}

#[actix_web::test]
async fn malformed_body_rejects_with_400() {
    let app = test_app!(test_config(false), test_relay(None, || Ok("x".into())));

    let req = test::TestRequest::post()
        .uri("/push")
        .insert_header(("content-type", "application/xml"))
        .set_payload("<push><node>abc")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn stale_fcm_token_maps_to_410() {
    let relay = test_relay(None, || Err(FcmError::RegistrationNotFound));
    let app = test_app!(test_config(false), relay);

    let req = test::TestRequest::post()
        .uri("/push")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"token":"stale-token"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::GONE);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Token expired");
}

#[actix_web::test]
async fn delivery_failure_maps_to_500() {
    let relay = test_relay(None, || Err(FcmError::Delivery("500 - internal".to_string())));
    let app = test_app!(test_config(false), relay);

    let req = test::TestRequest::post()
        .uri("/push")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"token":"abc123"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_apns_endpoint_requires_signing_key() {
    let app = test_app!(test_config(false), test_relay(None, || Ok("x".into())));

    let req = test::TestRequest::post()
        .uri("/test-apns")
        .set_json(serde_json::json!({"token": "DEADBEEF"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn legacy_test_push_behaves_as_test_fcm() {
    let relay = test_relay(None, || Ok("projects/p/messages/7".to_string()));
    let app = test_app!(test_config(false), relay);

    for uri in ["/test-fcm", "/test-push"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(serde_json::json!({"token": "fcm:abc123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["method"], "fcm", "{uri}");
        assert_eq!(body["messageId"], "projects/p/messages/7", "{uri}");
    }
}
