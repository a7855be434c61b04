//! Gateway configuration.

use crate::cors::CorsPolicy;
use crate::upstream::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ENV_API_KEY: &str = "OPENWEATHER_KEY";
pub const ENV_BASE_URL: &str = "OPENWEATHER_BASE_URL";
pub const ENV_HOST: &str = "GATEWAY_HOST";
pub const ENV_PORT: &str = "GATEWAY_PORT";
pub const ENV_ALLOWED_ORIGIN: &str = "GATEWAY_ALLOWED_ORIGIN";

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENWEATHER_KEY is not set")]
    MissingApiKey,
    #[error("invalid GATEWAY_PORT value '{0}'")]
    InvalidPort(String),
}

/// Configuration for the gateway server.
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Upstream credential. Never serialized, logged or echoed.
    #[serde(skip_serializing, default)]
    pub api_key: String,
    /// Base URL of the upstream provider.
    pub upstream_base_url: String,
    /// Single allow-listed origin; `None` answers `*`.
    pub allowed_origin: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
            api_key: String::new(),
            upstream_base_url: DEFAULT_BASE_URL.to_string(),
            allowed_origin: None,
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &"<redacted>")
            .field("upstream_base_url", &self.upstream_base_url)
            .field("allowed_origin", &self.allowed_origin)
            .finish()
    }
}

impl GatewayConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = Self::new().api_key(api_key);

        if let Some(host) = lookup(ENV_HOST) {
            config = config.host(host);
        }
        if let Some(port) = lookup(ENV_PORT) {
            let parsed = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
            config = config.port(parsed);
        }
        if let Some(url) = lookup(ENV_BASE_URL) {
            config = config.upstream_base_url(url);
        }
        if let Some(origin) = lookup(ENV_ALLOWED_ORIGIN).filter(|o| !o.is_empty()) {
            config = config.allowed_origin(origin);
        }

        Ok(config)
    }

    /// Set the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the upstream credential.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Set the upstream base URL.
    pub fn upstream_base_url(mut self, url: impl Into<String>) -> Self {
        self.upstream_base_url = url.into();
        self
    }

    /// Restrict CORS to a single origin.
    pub fn allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origin = Some(origin.into());
        self
    }

    /// CORS policy implied by `allowed_origin`.
    pub fn cors_policy(&self) -> CorsPolicy {
        match &self.allowed_origin {
            Some(origin) => CorsPolicy::restricted(origin.clone()),
            None => CorsPolicy::permissive(),
        }
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
