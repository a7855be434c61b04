//! The weather gateway: zip → coordinates → current weather.

use crate::cors::CorsPolicy;
use crate::error::GatewayError;
use crate::gateway::{Handler, RequestContext};
use crate::http::{GatewayRequest, GatewayResponse, Method, StatusCode};
use crate::upstream::{LocationQuery, UpstreamResponse, WeatherProvider};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Stateless handler that hides the upstream credential behind two chained calls.
///
/// Nothing is kept between requests; every GET geocodes afresh.
pub struct WeatherGateway {
    provider: Arc<dyn WeatherProvider>,
    cors: CorsPolicy,
}

impl WeatherGateway {
    pub fn new(provider: Arc<dyn WeatherProvider>, cors: CorsPolicy) -> Self {
        Self { provider, cors }
    }

    /// Run the upstream chain for one location.
    pub async fn lookup(&self, query: &LocationQuery) -> Result<UpstreamResponse, GatewayError> {
        let location = self.provider.geocode(query).await.map_err(|err| {
            warn!("Geocoding {} failed: {}", query.geocode_param(), err);
            GatewayError::from_geocode(&err)
        })?;

        debug!(
            "Resolved {} to {} ({}, {})",
            query.geocode_param(),
            location.resolved_name,
            location.latitude,
            location.longitude
        );

        self.provider.current_weather(&location).await.map_err(|err| {
            warn!(
                "Weather lookup for {}, {} failed: {}",
                location.latitude, location.longitude, err
            );
            GatewayError::from(err)
        })
    }

    /// Wrap the upstream weather reply in the gateway's envelope.
    fn pass_through(&self, upstream: UpstreamResponse) -> GatewayResponse {
        let status = StatusCode::from(upstream.status);
        if !status.is_success() {
            warn!("Forwarding upstream weather status {}", status.0);
        }

        let response = GatewayResponse::new(status)
            .append_headers(upstream.forwardable_headers())
            .header("content-type", "application/json")
            .body(upstream.body);
        self.cors.apply(response)
    }

    /// Render a gateway error as the JSON `{"error": ...}` envelope.
    pub fn error_response(&self, err: GatewayError) -> GatewayResponse {
        if err == GatewayError::OriginRejected {
            return GatewayResponse::error(err.status(), err.message());
        }

        let response = match GatewayResponse::json(&ErrorBody {
            error: err.message(),
        }) {
            Ok(response) => response.with_status(err.status()),
            Err(_) => GatewayResponse::error(err.status(), err.message()),
        };
        self.cors.apply(response)
    }
}

#[async_trait]
impl Handler for WeatherGateway {
    async fn fetch(&self, request: GatewayRequest, ctx: &RequestContext) -> GatewayResponse {
        if request.method == Method::Options {
            debug!("Answering preflight [{}]", ctx.request_id);
            return self.cors.preflight(&request);
        }

        let query =
            LocationQuery::from_params(request.query_param("zip"), request.query_param("country"));

        match self.lookup(&query).await {
            Ok(upstream) => self.pass_through(upstream),
            Err(err) => {
                debug!("Request failed with {:?} [{}]", err, ctx.request_id);
                self.error_response(err)
            }
        }
    }

    fn name(&self) -> &str {
        "weather"
    }
}
