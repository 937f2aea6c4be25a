//! Location service client.
//!
//! Resolves opaque location identifiers to coordinates.

mod client;
mod error;

pub use client::{LocationClient, LocationClientConfig, LocationData};
pub use error::LocationError;
