//! # Weather Gateway
//!
//! A small fetch-style HTTP gateway that sits between a browser front-end and
//! the OpenWeather API. It keeps the API key on the server and turns one
//! zip-code query into two upstream calls.
//!
//! ## Request flow
//!
//! ```text
//!  browser ──GET /?zip=10001&country=us──▶ WeatherGateway
//!                                            │
//!                                            ├─▶ /geo/1.0/zip        (zip → lat/lon)
//!                                            │
//!                                            └─▶ /data/2.5/weather   (lat/lon → weather)
//!                                            │
//!  browser ◀── upstream body + CORS headers ─┘
//! ```
//!
//! `OPTIONS` requests are answered locally as CORS preflights and never reach
//! the upstream.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use weather_gateway::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let config = GatewayConfig::new()
//!         .api_key("your-openweather-key")
//!         .allowed_origin("https://roundedweather.com");
//!
//!     GatewayServer::from_config(config)?.run().await
//! }
//! ```
//!
//! ## Errors
//!
//! | Condition                          | Status | Body                                         |
//! |------------------------------------|--------|----------------------------------------------|
//! | geocoding returned non-2xx         | 404    | `{"error":"Location not found"}`             |
//! | any other upstream failure         | 500    | `{"error":"Failed to fetch weather data"}`   |
//! | preflight from a disallowed origin | 403    | plain text, no CORS headers                  |

pub mod cors;
pub mod display;
pub mod error;
pub mod gateway;
pub mod http;
pub mod runtime;
pub mod upstream;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::cors::{AllowedOrigin, CorsPolicy};
    pub use crate::error::{GatewayError, UpstreamError};
    pub use crate::gateway::{Handler, RequestContext, WeatherGateway};
    pub use crate::http::{GatewayRequest, GatewayResponse, Method, StatusCode};
    pub use crate::runtime::{ConfigError, GatewayConfig, GatewayServer};
    pub use crate::upstream::{
        GeocodeResult, LocationQuery, OpenWeatherClient, UpstreamResponse, WeatherProvider,
    };
    pub use async_trait::async_trait;
}

// Re-export for convenience
pub use error::{GatewayError, UpstreamError};
pub use gateway::{Handler, WeatherGateway};
pub use http::{GatewayRequest, GatewayResponse};
pub use runtime::{GatewayConfig, GatewayServer};
