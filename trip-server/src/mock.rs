//! Offline collaborators for development and testing.
//!
//! Loads a fixed set of locations from a JSON file and prices legs from
//! their great-circle distance, so the server can run without geocoding or
//! pricing credentials.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{Coordinate, LocationId};
use crate::geo::haversine_miles;
use crate::locations::LocationData;
use crate::planner::{EtaEstimator, LocationResolver, PlanError, PriceEstimator};
use crate::pricing::PriceEstimate;

/// Pickup wait reported for every ride request, in seconds.
const PICKUP_WAIT_SECS: f64 = 240.0;

/// A ride tier in the mock price list.
struct MockTier {
    display_name: &'static str,
    base_fare: f64,
    per_mile: f64,
    /// Average speed used to derive the leg duration.
    mph: f64,
}

const TIERS: [MockTier; 2] = [
    MockTier {
        display_name: "uberX",
        base_fare: 2.0,
        per_mile: 1.5,
        mph: 18.0,
    },
    MockTier {
        display_name: "uberXL",
        base_fare: 3.5,
        per_mile: 2.4,
        mph: 18.0,
    },
];

/// Error loading mock location data.
#[derive(Debug, thiserror::Error)]
pub enum MockDataError {
    #[error("failed to read mock data {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse mock data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("mock location '{id}' has an invalid identifier")]
    InvalidId { id: String },

    #[error("no locations in mock data")]
    Empty,
}

/// Geocoder, pricing and ETA service backed by static data.
#[derive(Debug, Clone)]
pub struct MockCollaborators {
    locations: HashMap<LocationId, LocationData>,
}

impl MockCollaborators {
    /// Build from already-parsed locations.
    pub fn new(locations: Vec<LocationData>) -> Result<Self, MockDataError> {
        if locations.is_empty() {
            return Err(MockDataError::Empty);
        }

        let locations: HashMap<_, _> = locations
            .into_iter()
            .map(|loc| match LocationId::parse(&loc.id) {
                Ok(id) => Ok((id, loc)),
                Err(_) => Err(MockDataError::InvalidId { id: loc.id }),
            })
            .collect::<Result<_, MockDataError>>()?;

        Ok(Self { locations })
    }

    /// Parse a JSON array of locations.
    pub fn from_json(json: &str) -> Result<Self, MockDataError> {
        let locations: Vec<LocationData> = serde_json::from_str(json)?;
        Self::new(locations)
    }

    /// Load a JSON array of locations from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MockDataError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| MockDataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Look up a location by identifier.
    pub fn location(&self, id: &LocationId) -> Option<&LocationData> {
        self.locations.get(id)
    }

    /// Identifiers of all known locations, sorted.
    pub fn location_ids(&self) -> Vec<LocationId> {
        let mut ids: Vec<_> = self.locations.keys().cloned().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Price one tier for a leg of `miles`, rounded like the live service
/// (whole dollars, whole seconds, hundredths of a mile).
fn quote(tier: &MockTier, miles: f64) -> PriceEstimate {
    PriceEstimate {
        display_name: tier.display_name.to_string(),
        low_estimate: (tier.base_fare + tier.per_mile * miles).round(),
        duration: (miles / tier.mph * 3600.0).round(),
        distance: (miles * 100.0).round() / 100.0,
    }
}

impl LocationResolver for MockCollaborators {
    async fn resolve(&self, location: &LocationId) -> Result<Coordinate, PlanError> {
        self.location(location)
            .map(|loc| loc.coordinate)
            .ok_or_else(|| PlanError::LocationNotFound(location.to_string()))
    }
}

impl PriceEstimator for MockCollaborators {
    async fn estimate_price(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Vec<PriceEstimate>, PlanError> {
        let miles = haversine_miles(from, to);
        Ok(TIERS.iter().map(|tier| quote(tier, miles)).collect())
    }
}

impl EtaEstimator for MockCollaborators {
    async fn estimate_eta(&self, _from: Coordinate, _to: Coordinate) -> Result<f64, PlanError> {
        Ok(PICKUP_WAIT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/mock_locations.json");

    fn loc(s: &str) -> LocationId {
        LocationId::parse(s).unwrap()
    }

    #[test]
    fn load_fixture() {
        let mock = MockCollaborators::load(FIXTURE).unwrap();
        assert!(mock.len() >= 4);
        assert!(mock.location_ids().contains(&loc("ferry-building")));
        assert_eq!(
            mock.location(&loc("coit-tower")).unwrap().city,
            "San Francisco"
        );
    }

    #[test]
    fn load_from_temp_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "home", "coordinate": {{"lat": 1.0, "lng": 2.0}}}}]"#
        )
        .unwrap();

        let mock = MockCollaborators::load(file.path()).unwrap();
        let home = mock.location(&loc("home")).unwrap();
        assert_eq!(home.coordinate, Coordinate::new(1.0, 2.0));
        assert_eq!(home.name, "");
    }

    #[test]
    fn load_errors() {
        assert!(matches!(
            MockCollaborators::load("/nonexistent/mock.json"),
            Err(MockDataError::Io { .. })
        ));
        assert!(matches!(
            MockCollaborators::from_json("[]"),
            Err(MockDataError::Empty)
        ));
        assert!(matches!(
            MockCollaborators::from_json("{"),
            Err(MockDataError::Json(_))
        ));
        assert!(matches!(
            MockCollaborators::from_json(
                r#"[{"id": "has space", "coordinate": {"lat": 0.0, "lng": 0.0}}]"#
            ),
            Err(MockDataError::InvalidId { .. })
        ));
    }

    #[tokio::test]
    async fn resolves_known_locations_only() {
        let mock = MockCollaborators::load(FIXTURE).unwrap();

        let coord = mock.resolve(&loc("ferry-building")).await.unwrap();
        assert!((coord.lat - 37.7955).abs() < 1e-9);

        assert_eq!(
            mock.resolve(&loc("atlantis")).await,
            Err(PlanError::LocationNotFound("atlantis".into()))
        );
    }

    #[tokio::test]
    async fn prices_scale_with_distance() {
        let mock = MockCollaborators::load(FIXTURE).unwrap();
        let ferry = mock.resolve(&loc("ferry-building")).await.unwrap();
        let coit = mock.resolve(&loc("coit-tower")).await.unwrap();
        let park = mock.resolve(&loc("golden-gate-park")).await.unwrap();

        let near = mock.estimate_price(ferry, coit).await.unwrap();
        let far = mock.estimate_price(ferry, park).await.unwrap();

        assert_eq!(near.len(), 2);
        assert_eq!(near[0].display_name, "uberX");
        assert!(near[0].low_estimate < far[0].low_estimate);
        assert!(near[0].duration < far[0].duration);
        assert!(near[0].distance < far[0].distance);

        // the larger tier is never cheaper
        assert!(far[1].low_estimate >= far[0].low_estimate);
    }

    #[tokio::test]
    async fn fixed_pickup_wait() {
        let mock = MockCollaborators::load(FIXTURE).unwrap();
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 1.0);
        assert_eq!(mock.estimate_eta(a, b).await, Ok(PICKUP_WAIT_SECS));
    }
}
