//! Upstream weather provider contract and its OpenWeather implementation.

mod openweather;
mod types;

pub use openweather::{OpenWeatherClient, DEFAULT_BASE_URL};
pub use types::{
    GeocodeResult, LocationQuery, UpstreamResponse, DEFAULT_COUNTRY, DEFAULT_ZIP,
};

use crate::error::UpstreamError;
use async_trait::async_trait;

/// The two upstream calls the gateway chains together.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Resolve a zip and country to coordinates.
    ///
    /// A non-success upstream status is reported as [`UpstreamError::Status`].
    async fn geocode(&self, query: &LocationQuery) -> Result<GeocodeResult, UpstreamError>;

    /// Fetch current weather (metric units) for the given coordinates.
    ///
    /// The upstream reply is returned as-is whatever its status.
    async fn current_weather(
        &self,
        location: &GeocodeResult,
    ) -> Result<UpstreamResponse, UpstreamError>;
}
