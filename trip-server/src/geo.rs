//! Great-circle distance between coordinates.
//!
//! Ignores roads, so it is only an estimate. Used by the offline
//! collaborators to produce plausible prices and durations.

use crate::domain::Coordinate;

/// Earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance between two coordinates, in miles.
pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_MILES * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        let p = Coordinate::new(37.7749, -122.4194);
        assert!(haversine_miles(p, p) < 1e-9);
    }

    #[test]
    fn known_distance() {
        // San Francisco to Los Angeles is ~347 miles
        let sf = Coordinate::new(37.7749, -122.4194);
        let la = Coordinate::new(34.0522, -118.2437);
        let d = haversine_miles(sf, la);
        assert!(d > 330.0 && d < 360.0, "SF to LA should be ~347mi, got {d}");
    }

    #[test]
    fn symmetric() {
        let a = Coordinate::new(37.79, -122.39);
        let b = Coordinate::new(37.80, -122.41);
        assert!((haversine_miles(a, b) - haversine_miles(b, a)).abs() < 1e-12);
    }
}
