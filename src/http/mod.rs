//! HTTP types for the gateway providing a fetch-like API.

mod request;
mod response;

pub use request::{GatewayRequest, Method};
pub use response::{GatewayResponse, StatusCode};
