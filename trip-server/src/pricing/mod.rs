//! Ride pricing API client.
//!
//! Two endpoints are used:
//! - price estimates, which return one entry per service tier with a
//!   fare, duration and distance for a pair of coordinates
//! - ride requests, whose response carries the pickup ETA

mod client;
mod error;
mod types;

pub use client::{PricingClient, PricingConfig};
pub use error::{Endpoint, PricingError};
pub use types::{PriceEstimate, PriceResponse, RideRequest, RideResponse};
