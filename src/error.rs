//! Error types for the gateway boundary and the upstream client.

use crate::http::StatusCode;

/// Failure while talking to the upstream weather provider.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The request never produced a response (DNS, connect, TLS, body read).
    ///
    /// The request URL carries the credential, so it is stripped on conversion.
    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),
    /// The upstream answered with a non-success status.
    #[error("upstream returned status {0}")]
    Status(u16),
    /// The upstream body was not the JSON we expected.
    #[error("malformed upstream payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors surfaced to the caller of the gateway.
///
/// Every variant is terminal for the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The geocoding call did not succeed for the given zip and country.
    #[error("Location not found")]
    LocationNotFound,
    /// Anything else that went wrong while fetching weather.
    #[error("Failed to fetch weather data")]
    UpstreamFailure,
    /// A preflight arrived from an origin outside the allow-list.
    #[error("Origin not allowed")]
    OriginRejected,
}

impl GatewayError {
    /// HTTP status the error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::LocationNotFound => StatusCode::NOT_FOUND,
            GatewayError::UpstreamFailure => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::OriginRejected => StatusCode::FORBIDDEN,
        }
    }

    /// User-facing message, suitable for direct display.
    pub fn message(&self) -> &'static str {
        match self {
            GatewayError::LocationNotFound => "Location not found",
            GatewayError::UpstreamFailure => "Failed to fetch weather data",
            GatewayError::OriginRejected => "Origin not allowed",
        }
    }

    /// Map a geocoding failure: a non-success status means the location is unknown.
    pub fn from_geocode(err: &UpstreamError) -> Self {
        match err {
            UpstreamError::Status(_) => GatewayError::LocationNotFound,
            _ => GatewayError::UpstreamFailure,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.without_url())
    }
}

impl From<UpstreamError> for GatewayError {
    fn from(_: UpstreamError) -> Self {
        GatewayError::UpstreamFailure
    }
}
