//! Handler trait and per-request context.

use crate::http::{GatewayRequest, GatewayResponse};
use async_trait::async_trait;
use std::net::SocketAddr;

/// Execution context for a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Request ID for tracing.
    pub request_id: String,
    /// Peer address, when the request came in over a socket.
    pub remote_addr: Option<SocketAddr>,
}

impl RequestContext {
    /// Create a new request context.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            remote_addr: None,
        }
    }

    /// Attach the peer address.
    pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }
}

/// Fetch-style request handler the server dispatches every request to.
///
/// Handlers fold their own failures into a response; the server never sees
/// an error from `fetch`.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handle an incoming HTTP request (fetch event).
    async fn fetch(&self, request: GatewayRequest, ctx: &RequestContext) -> GatewayResponse;

    /// Get the handler name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;

    struct EchoPath;

    #[async_trait]
    impl Handler for EchoPath {
        async fn fetch(&self, request: GatewayRequest, ctx: &RequestContext) -> GatewayResponse {
            GatewayResponse::text(format!("{} {}", request.path(), ctx.request_id))
        }

        fn name(&self) -> &str {
            "echo-path"
        }
    }

    #[test]
    fn test_request_context() {
        let addr: SocketAddr = "127.0.0.1:8787".parse().unwrap();
        let ctx = RequestContext::new("req-456").with_remote_addr(addr);
        assert_eq!(ctx.request_id, "req-456");
        assert_eq!(ctx.remote_addr, Some(addr));
        assert_eq!(RequestContext::default().remote_addr, None);
    }

    #[test]
    fn test_handler_as_trait_object() {
        let handler: Box<dyn Handler> = Box::new(EchoPath);
        let request = GatewayRequest::new(Method::Get, "/weather?zip=10001");
        let response =
            tokio_test::block_on(handler.fetch(request, &RequestContext::new("req-1")));
        assert_eq!(handler.name(), "echo-path");
        assert_eq!(response.text_body(), Some("/weather req-1".to_string()));
    }
}
