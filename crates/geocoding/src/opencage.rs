//! HTTP client for the OpenCage forward-geocoding endpoint.
//!
//! Issues `GET {base_url}?q=<address>&key=<api_key>&limit=1` and takes the
//! `geometry` of the first result. Each lookup is bounded by the configured
//! timeout; there is no retry and no caching.

use std::time::Duration;

use async_trait::async_trait;
use places_core::geo::Coordinates;
use places_core::geocoding::{Geocoder, GeocodingError};
use serde::Deserialize;

/// Public OpenCage forward-geocoding endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Connection settings for [`OpenCageGeocoder`].
#[derive(Debug, Clone)]
pub struct OpenCageConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Errors from the OpenCage HTTP layer, before they are folded into
/// [`GeocodingError`].
#[derive(Debug, thiserror::Error)]
pub enum OpenCageError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// OpenCage returned a non-2xx status code.
    #[error("OpenCage API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<OpenCageError> for GeocodingError {
    fn from(err: OpenCageError) -> Self {
        GeocodingError::ServiceUnavailable(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ForwardResponse {
    #[serde(default)]
    results: Vec<ForwardResult>,
}

#[derive(Debug, Deserialize)]
struct ForwardResult {
    geometry: Coordinates,
}

/// [`Geocoder`] backed by the OpenCage REST API.
pub struct OpenCageGeocoder {
    client: reqwest::Client,
    config: OpenCageConfig,
}

impl OpenCageGeocoder {
    /// Build a client with its own connection pool and the configured timeout.
    pub fn new(config: OpenCageConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn forward(&self, address: &str) -> Result<Option<Coordinates>, OpenCageError> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("q", address),
                ("key", self.config.api_key.as_str()),
                ("limit", "1"),
            ])
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(OpenCageError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response.json::<ForwardResponse>().await?;
        Ok(payload.results.into_iter().next().map(|r| r.geometry))
    }
}

#[async_trait]
impl Geocoder for OpenCageGeocoder {
    async fn locate(&self, address: &str) -> Result<Coordinates, GeocodingError> {
        match self.forward(address).await {
            Ok(Some(location)) if location.is_valid() => Ok(location),
            Ok(Some(location)) => Err(GeocodingError::ServiceUnavailable(format!(
                "out-of-range coordinates {location:?}"
            ))),
            Ok(None) => {
                tracing::debug!(address, "OpenCage returned no results");
                Err(GeocodingError::AddressNotResolved)
            }
            Err(err) => {
                tracing::warn!(error = %err, "OpenCage lookup failed");
                Err(err.into())
            }
        }
    }
}
