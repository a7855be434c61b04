//! Request handling: the handler seam and the weather gateway behind it.

pub mod handler;
mod weather;

pub use handler::{Handler, RequestContext};
pub use weather::WeatherGateway;
