//! Gateway runtime: configuration and the HTTP server loop.

mod config;
mod server;

pub use config::{ConfigError, GatewayConfig};
pub use server::GatewayServer;
