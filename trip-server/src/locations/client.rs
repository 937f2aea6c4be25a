//! Location (geocoding) API client.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, LocationId};

use super::error::LocationError;

/// Default base URL for the location service.
const DEFAULT_BASE_URL: &str = "http://localhost:8081";

/// A stored location as returned by the location service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    pub coordinate: Coordinate,
}

/// Configuration for the location client.
#[derive(Debug, Clone)]
pub struct LocationClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LocationClientConfig {
    /// Create a new config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 10,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for LocationClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for the location service.
#[derive(Debug, Clone)]
pub struct LocationClient {
    http: reqwest::Client,
    base_url: String,
}

impl LocationClient {
    /// Create a new location client.
    pub fn new(config: LocationClientConfig) -> Result<Self, LocationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a location record by identifier.
    pub async fn fetch(&self, id: &LocationId) -> Result<LocationData, LocationError> {
        let url = format!("{}/locations/{}", self.base_url, id.as_str());

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LocationError::NotFound(id.clone()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LocationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| LocationError::Json {
            message: e.to_string(),
        })
    }

    /// Resolve a location identifier to its coordinate.
    pub async fn coordinate(&self, id: &LocationId) -> Result<Coordinate, LocationError> {
        self.fetch(id).await.map(|data| data.coordinate)
    }
}
