//! Weather gateway server.
//!
//! Reads its configuration from the environment (`OPENWEATHER_KEY` is
//! required) and serves until the process is stopped.

use tracing_subscriber::EnvFilter;
use weather_gateway::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            return Err(err.into());
        }
    };

    match &config.allowed_origin {
        Some(origin) => tracing::info!("CORS restricted to {}", origin),
        None => tracing::info!("CORS open to any origin"),
    }
    tracing::info!("Upstream: {}", config.upstream_base_url);
    tracing::info!(
        "Try: curl 'http://localhost:{}/?zip=10001&country=us'",
        config.port
    );

    GatewayServer::from_config(config)?.run().await
}
