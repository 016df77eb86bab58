pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod services;
pub mod token;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use services::PushRelay;
