use std::io;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apns_shared::ApnsClient;
use fcm_shared::FcmClient;
use push_gateway::handlers::{
    diagnostics::register_routes as register_diagnostics,
    health::register_routes as register_health, push::register_routes as register_push,
};
use push_gateway::services::{CrossPlatformPush, DirectPush};
use push_gateway::{GatewayConfig, PushRelay};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting push gateway");

    let config = match GatewayConfig::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return Err(io::Error::new(io::ErrorKind::Other, "Configuration error"));
        }
    };

    // FCM credential is required; the gateway cannot run without its
    // fallback path.
    let fcm_client = match FcmClient::from_credentials_file(&config.fcm_credentials_path) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Failed to load FCM service account: {}", e);
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "FCM credential missing",
            ));
        }
    };

    // APNs key is optional; without it the gateway runs in degraded mode
    // with the direct path disabled.
    let apns_client = match &config.apns {
        Some(apns_cfg) => match ApnsClient::new(apns_cfg) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::warn!("APNs disabled: {}", e);
                None
            }
        },
        None => {
            tracing::warn!("APNs disabled: signing key not configured");
            None
        }
    };

    tracing::info!(
        environment = %config.environment,
        apns_enabled = apns_client.is_some(),
        apns_host = config.apns_host().unwrap_or("-"),
        "Gateway configuration loaded"
    );

    let relay = Arc::new(PushRelay::new(
        apns_client.map(|c| c as Arc<dyn DirectPush>),
        fcm_client as Arc<dyn CrossPlatformPush>,
    ));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting HTTP server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(relay.clone()))
            .wrap(middleware::Logger::default())
            .route("/", web::get().to(|| async { "CommEazy Push Gateway v0.1" }))
            .configure(|cfg| {
                register_push(cfg);
                register_health(cfg);
                register_diagnostics(cfg);
            })
    })
    .bind(&addr)?
    .run()
    .await
}
