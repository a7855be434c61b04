//! CORS policy for gateway responses.
//!
//! Two variants exist: a permissive one that answers `*`, and a restricted one
//! bound to a single allow-listed origin. Only preflight requests have their
//! `Origin` checked; the restricted variant still stamps its fixed origin on
//! every other response.

use crate::error::GatewayError;
use crate::http::{GatewayRequest, GatewayResponse};
use serde::{Deserialize, Serialize};

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";

const ALLOWED_METHODS: &str = "GET, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

/// Which origins may read gateway responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedOrigin {
    /// Any origin (`*`).
    #[default]
    Any,
    /// Exactly this origin, compared byte for byte.
    Exact(String),
}

/// CORS headers and preflight check for one gateway deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsPolicy {
    origin: AllowedOrigin,
}

impl CorsPolicy {
    /// Policy that answers any origin with `*`.
    pub fn permissive() -> Self {
        Self {
            origin: AllowedOrigin::Any,
        }
    }

    /// Policy restricted to a single origin.
    pub fn restricted(origin: impl Into<String>) -> Self {
        Self {
            origin: AllowedOrigin::Exact(origin.into()),
        }
    }

    pub fn allowed_origin(&self) -> &AllowedOrigin {
        &self.origin
    }

    /// The three CORS headers every non-rejected response carries.
    pub fn headers(&self) -> [(&'static str, String); 3] {
        let origin = match &self.origin {
            AllowedOrigin::Any => "*".to_string(),
            AllowedOrigin::Exact(origin) => origin.clone(),
        };
        [
            (ALLOW_ORIGIN, origin),
            (ALLOW_METHODS, ALLOWED_METHODS.to_string()),
            (ALLOW_HEADERS, ALLOWED_HEADERS.to_string()),
        ]
    }

    /// Attach the CORS headers to a response.
    pub fn apply(&self, response: GatewayResponse) -> GatewayResponse {
        response.headers(self.headers())
    }

    /// Validate a preflight request's `Origin` header.
    ///
    /// A missing header does not match a restricted origin.
    pub fn check_preflight(&self, request: &GatewayRequest) -> Result<(), GatewayError> {
        match &self.origin {
            AllowedOrigin::Any => Ok(()),
            AllowedOrigin::Exact(allowed) => match request.get_header("origin") {
                Some(origin) if origin == allowed => Ok(()),
                _ => Err(GatewayError::OriginRejected),
            },
        }
    }

    /// Answer a preflight: 204 with CORS headers, or 403 plain text without them.
    pub fn preflight(&self, request: &GatewayRequest) -> GatewayResponse {
        match self.check_preflight(request) {
            Ok(()) => self.apply(GatewayResponse::no_content()),
            Err(err) => GatewayResponse::error(err.status(), err.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Method, StatusCode};

    const ROUNDED: &str = "https://roundedweather.com";

    fn preflight_from(origin: Option<&str>) -> GatewayRequest {
        let request = GatewayRequest::new(Method::Options, "/");
        match origin {
            Some(origin) => request.header("Origin", origin),
            None => request,
        }
    }

    #[test]
    fn test_permissive_headers() {
        let response = CorsPolicy::permissive().apply(GatewayResponse::ok());
        assert_eq!(response.get_header(ALLOW_ORIGIN), Some(&"*".to_string()));
        assert_eq!(response.get_header(ALLOW_METHODS), Some(&"GET, OPTIONS".to_string()));
        assert_eq!(response.get_header(ALLOW_HEADERS), Some(&"Content-Type".to_string()));
    }

    #[test]
    fn test_restricted_stamps_fixed_origin() {
        let response = CorsPolicy::restricted(ROUNDED).apply(GatewayResponse::ok());
        assert_eq!(response.get_header(ALLOW_ORIGIN), Some(&ROUNDED.to_string()));
    }

    #[test]
    fn test_permissive_preflight_accepts_anything() {
        let policy = CorsPolicy::permissive();
        assert!(policy.check_preflight(&preflight_from(None)).is_ok());
        assert!(policy.check_preflight(&preflight_from(Some("https://evil.example"))).is_ok());
    }

    #[test]
    fn test_restricted_preflight_matches_exactly() {
        let policy = CorsPolicy::restricted(ROUNDED);
        assert!(policy.check_preflight(&preflight_from(Some(ROUNDED))).is_ok());
        assert_eq!(
            policy.check_preflight(&preflight_from(Some("https://roundedweather.com/"))),
            Err(GatewayError::OriginRejected)
        );
        assert_eq!(
            policy.check_preflight(&preflight_from(None)),
            Err(GatewayError::OriginRejected)
        );
    }

    #[test]
    fn test_rejected_preflight_has_no_cors_headers() {
        let response =
            CorsPolicy::restricted(ROUNDED).preflight(&preflight_from(Some("https://other.example")));
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.get_header("content-type"), Some(&"text/plain".to_string()));
        assert!(response.get_header(ALLOW_ORIGIN).is_none());
        assert!(response.get_header(ALLOW_METHODS).is_none());
    }

    #[test]
    fn test_accepted_preflight_is_empty_204() {
        let response = CorsPolicy::restricted(ROUNDED).preflight(&preflight_from(Some(ROUNDED)));
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert!(response.body.is_none());
        assert_eq!(response.get_header(ALLOW_ORIGIN), Some(&ROUNDED.to_string()));
    }
}
