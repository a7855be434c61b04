//! OpenWeather client: zip geocoding and current weather by coordinates.

use crate::error::UpstreamError;
use crate::upstream::{GeocodeResult, LocationQuery, UpstreamResponse, WeatherProvider};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const GEOCODE_PATH: &str = "/geo/1.0/zip";
const WEATHER_PATH: &str = "/data/2.5/weather";

/// [`WeatherProvider`] backed by the OpenWeather HTTP API.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Arc::new(client),
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn geocode(&self, query: &LocationQuery) -> Result<GeocodeResult, UpstreamError> {
        let zip = query.geocode_param();
        let response = self
            .client
            .get(self.endpoint(GEOCODE_PATH))
            .query(&[("zip", zip.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        debug!("Geocode lookup for {} returned {}", zip, status);
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn current_weather(
        &self,
        location: &GeocodeResult,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let lat = location.latitude.to_string();
        let lon = location.longitude.to_string();
        let response = self
            .client
            .get(self.endpoint(WEATHER_PATH))
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        debug!("Weather lookup for {},{} returned {}", lat, lon, status);

        // Repeated headers stay as separate entries. Values that are not
        // visible ASCII cannot be carried as strings and are skipped.
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| match value.to_str() {
                Ok(v) => Some((name.as_str().to_string(), v.to_string())),
                Err(_) => {
                    debug!("Skipping non-text upstream header {}", name);
                    None
                }
            })
            .collect();
        let body = response.bytes().await?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
