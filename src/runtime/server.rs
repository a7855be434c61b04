//! Gateway HTTP server implementation.

use crate::error::UpstreamError;
use crate::gateway::{Handler, RequestContext, WeatherGateway};
use crate::http::{GatewayRequest, GatewayResponse, Method};
use crate::runtime::GatewayConfig;
use crate::upstream::OpenWeatherClient;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Pause after a failed accept so fd exhaustion does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Gateway HTTP server.
///
/// Accepts connections, converts each request into a [`GatewayRequest`] and
/// hands it to a single [`Handler`].
pub struct GatewayServer {
    /// Server configuration.
    config: GatewayConfig,
    /// Request handler.
    handler: Arc<dyn Handler>,
}

impl GatewayServer {
    /// Create a new server around an arbitrary handler.
    pub fn new(config: GatewayConfig, handler: Arc<dyn Handler>) -> Self {
        Self { config, handler }
    }

    /// Create a server running the weather gateway against OpenWeather.
    pub fn from_config(config: GatewayConfig) -> Result<Self, UpstreamError> {
        let client = OpenWeatherClient::new(&config.upstream_base_url, &config.api_key)?;
        let gateway = WeatherGateway::new(Arc::new(client), config.cors_policy());
        Ok(Self::new(config, Arc::new(gateway)))
    }

    /// Bind the configured address and serve forever.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve connections from an already-bound listener.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(
            "Gateway '{}' listening on {}",
            self.handler.name(),
            listener.local_addr()?
        );

        loop {
            let Some((stream, remote_addr)) = accepted(listener.accept().await) else {
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            };
            let io = TokioIo::new(stream);

            let handler = self.handler.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let handler = handler.clone();
                    async move { handle_request(req, handler, remote_addr).await }
                });

                if let Err(err) = http1::Builder::new()
                    .serve_connection(io, service)
                    .await
                {
                    error!("Error serving connection: {:?}", err);
                }
            });
        }
    }
}

/// Unwrap an accept result, logging failures. Accept errors never stop the server.
fn accepted<T>(result: std::io::Result<T>) -> Option<T> {
    match result {
        Ok(conn) => Some(conn),
        Err(err) => {
            error!("Failed to accept connection: {}", err);
            None
        }
    }
}

/// Handle an incoming HTTP request.
async fn handle_request(
    req: Request<Incoming>,
    handler: Arc<dyn Handler>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let request_id = generate_request_id();
    let request = convert_request(&req);

    debug!(
        "Handling request: {} {} from {} [{}]",
        request.method,
        request.path(),
        remote_addr,
        request_id
    );

    let ctx = RequestContext::new(&request_id).with_remote_addr(remote_addr);
    let response = handler.fetch(request, &ctx).await;

    debug!("Responding {} [{}]", response.status.0, request_id);
    Ok(build_response(response))
}

/// Convert a hyper Request to GatewayRequest.
fn convert_request(req: &Request<Incoming>) -> GatewayRequest {
    let method = Method::from(req.method());
    let url = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let mut headers = HashMap::new();
    for (name, value) in req.headers() {
        if let Ok(v) = value.to_str() {
            headers.insert(name.as_str().to_string(), v.to_string());
        }
    }

    GatewayRequest {
        method,
        url,
        headers,
    }
}

/// Build a hyper Response from GatewayResponse.
fn build_response(response: GatewayResponse) -> Response<Full<Bytes>> {
    let status = hyper::StatusCode::from_u16(response.status.0).unwrap_or_else(|_| {
        warn!(
            "Invalid status code {}, falling back to 500 Internal Server Error",
            response.status.0
        );
        hyper::StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut builder = Response::builder().status(status);

    for (name, value) in response.headers {
        builder = builder.header(name, value);
    }

    let body = response.body.unwrap_or_default();
    builder.body(Full::new(body)).unwrap_or_else(|err| {
        error!("Failed to build response: {}", err);
        let mut fallback = Response::new(Full::new(Bytes::new()));
        *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    })
}

/// Generate a unique request ID.
fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{:x}", timestamp)
}
