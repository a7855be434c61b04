//! Values exchanged with the upstream weather provider.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ZIP: &str = "10001";
pub const DEFAULT_COUNTRY: &str = "us";

/// Headers that describe a single hop or the framing of the upstream body;
/// they are never copied onto a gateway response.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "transfer-encoding",
    "content-length",
    "te",
    "trailer",
    "upgrade",
];

/// Location to resolve, built per request from the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub zip_code: String,
    pub country_code: String,
}

impl LocationQuery {
    pub fn new(zip_code: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            zip_code: zip_code.into(),
            country_code: country_code.into(),
        }
    }

    /// Build from optional parameters. Only absent values fall back to defaults.
    pub fn from_params(zip: Option<String>, country: Option<String>) -> Self {
        Self {
            zip_code: zip.unwrap_or_else(|| DEFAULT_ZIP.to_string()),
            country_code: country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        }
    }

    /// The `zip` parameter value the geocoding endpoint expects: `{zip},{country}`.
    pub fn geocode_param(&self) -> String {
        format!("{},{}", self.zip_code, self.country_code)
    }
}

impl Default for LocationQuery {
    fn default() -> Self {
        Self::new(DEFAULT_ZIP, DEFAULT_COUNTRY)
    }
}

/// Coordinates returned by the geocoding endpoint.
///
/// Only `lat` and `lon` are required; the descriptive fields default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "name", default)]
    pub resolved_name: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
}

/// Raw upstream reply, passed through to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Headers that may be copied onto a gateway response.
    pub fn forwardable_headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .filter(|(name, _)| is_forwardable(name))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

fn is_forwardable(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    !HOP_BY_HOP.contains(&name.as_str()) && !name.starts_with("proxy-")
}
