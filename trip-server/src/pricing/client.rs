//! Pricing API HTTP client.
//!
//! Provides async methods for price estimates between two coordinates and
//! for ride requests, whose response carries the pickup ETA.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use crate::domain::Coordinate;

use super::error::{Endpoint, PricingError};
use super::types::{PriceEstimate, PriceResponse, RideRequest, RideResponse};

/// Default base URL for the pricing API.
const DEFAULT_BASE_URL: &str = "https://sandbox-api.uber.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the pricing client.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Server token for price estimates ("Token" auth)
    pub server_token: String,
    /// OAuth access token for ride requests ("Bearer" auth)
    pub access_token: Option<String>,
    /// Product to request rides for
    pub product_id: String,
    /// Base URL for the API (defaults to the sandbox)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PricingConfig {
    /// Create a new config with the given server token.
    pub fn new(server_token: impl Into<String>) -> Self {
        Self {
            server_token: server_token.into(),
            access_token: None,
            product_id: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set the access token and product used for ride requests.
    pub fn with_ride_requests(
        mut self,
        access_token: impl Into<String>,
        product_id: impl Into<String>,
    ) -> Self {
        self.access_token = Some(access_token.into());
        self.product_id = product_id.into();
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Pricing API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct PricingClient {
    http: reqwest::Client,
    base_url: String,
    server_auth: HeaderValue,
    bearer_auth: Option<HeaderValue>,
    product_id: String,
    semaphore: Arc<Semaphore>,
}

impl PricingClient {
    /// Create a new pricing client with the given configuration.
    pub fn new(config: PricingConfig) -> Result<Self, PricingError> {
        let server_auth = HeaderValue::from_str(&format!("Token {}", config.server_token))
            .map_err(|_| PricingError::InvalidToken { kind: "server" })?;

        let bearer_auth = config
            .access_token
            .as_deref()
            .map(|token| {
                HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| PricingError::InvalidToken { kind: "access" })
            })
            .transpose()?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(PricingError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            server_auth,
            bearer_auth,
            product_id: config.product_id,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Get price estimates for every tier between two points.
    pub async fn price_estimates(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Vec<PriceEstimate>, PricingError> {
        let endpoint = Endpoint::PriceEstimate;
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| PricingError::Closed(endpoint))?;

        let url = format!("{}/v1/estimates/price", self.base_url);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.server_auth.clone())
            .query(&[
                ("start_latitude", from.lat.to_string()),
                ("start_longitude", from.lng.to_string()),
                ("end_latitude", to.lat.to_string()),
                ("end_longitude", to.lng.to_string()),
            ])
            .send()
            .await
            .map_err(|source| PricingError::Http { endpoint, source })?;

        let parsed: PriceResponse = decode(endpoint, response).await?;
        Ok(parsed.prices)
    }

    /// Request a ride between two points and return the pickup ETA in seconds.
    pub async fn ride_eta(&self, from: Coordinate, to: Coordinate) -> Result<f64, PricingError> {
        let endpoint = Endpoint::RideRequest;
        let bearer = self
            .bearer_auth
            .clone()
            .ok_or(PricingError::NotConfigured(endpoint))?;

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| PricingError::Closed(endpoint))?;

        let url = format!("{}/v1/requests", self.base_url);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, bearer)
            .json(&RideRequest::new(&self.product_id, from, to))
            .send()
            .await
            .map_err(|source| PricingError::Http { endpoint, source })?;

        let parsed: RideResponse = decode(endpoint, response).await?;
        Ok(parsed.eta)
    }
}

/// Map error statuses, then parse the body as `T`.
async fn decode<T: DeserializeOwned>(
    endpoint: Endpoint,
    response: reqwest::Response,
) -> Result<T, PricingError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(PricingError::Unauthorized { endpoint });
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(PricingError::RateLimited { endpoint });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PricingError::Status {
            endpoint,
            status: status.as_u16(),
            body,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| PricingError::Http { endpoint, source })?;

    serde_json::from_str(&body).map_err(|e| PricingError::Decode {
        endpoint,
        message: format!("{e} (body: {})", body.chars().take(200).collect::<String>()),
    })
}
