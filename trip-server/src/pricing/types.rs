//! Wire types for the pricing API.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Score};

/// One service tier's estimate for a trip between two points.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriceEstimate {
    /// Tier label, e.g. "uberX".
    pub display_name: String,
    /// Lower bound of the fare, used as the leg's cost.
    #[serde(default)]
    pub low_estimate: f64,
    /// Trip duration in seconds.
    #[serde(default)]
    pub duration: f64,
    /// Trip distance in miles.
    #[serde(default)]
    pub distance: f64,
}

impl PriceEstimate {
    /// The estimate as a leg score.
    pub fn score(&self) -> Score {
        Score::new(self.low_estimate, self.duration, self.distance)
    }
}

/// Response body of the price estimate endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceResponse {
    #[serde(default)]
    pub prices: Vec<PriceEstimate>,
}

/// Request body of the ride request (ETA) endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RideRequest {
    pub product_id: String,
    pub start_latitude: f64,
    pub start_longitude: f64,
    pub end_latitude: f64,
    pub end_longitude: f64,
}

impl RideRequest {
    pub fn new(product_id: impl Into<String>, from: Coordinate, to: Coordinate) -> Self {
        Self {
            product_id: product_id.into(),
            start_latitude: from.lat,
            start_longitude: from.lng,
            end_latitude: to.lat,
            end_longitude: to.lng,
        }
    }
}

/// Response body of the ride request endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RideResponse {
    /// Estimated pickup wait in seconds.
    #[serde(default)]
    pub eta: f64,
}
