//! Location identifier and coordinate types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted length of a location identifier.
const MAX_ID_LEN: usize = 64;

/// Error returned when parsing an invalid location identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location identifier: {reason}")]
pub struct InvalidLocationId {
    reason: &'static str,
}

/// An opaque location identifier, as understood by the geocoding service.
///
/// The identifier is only checked for shape (non-empty, at most 64 ASCII
/// alphanumerics, `-` or `_`) so it can be placed in a URL path safely.
/// Whether it names a real location is for the geocoder to decide.
///
/// # Examples
///
/// ```
/// use trip_server::domain::LocationId;
///
/// let id = LocationId::parse("5642ac2b4f2a3a0f0c5e0d11").unwrap();
/// assert_eq!(id.as_str(), "5642ac2b4f2a3a0f0c5e0d11");
///
/// assert!(LocationId::parse("").is_err());
/// assert!(LocationId::parse("../etc").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationId(String);

impl LocationId {
    /// Parse a location identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidLocationId> {
        if s.is_empty() {
            return Err(InvalidLocationId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_ID_LEN {
            return Err(InvalidLocationId {
                reason: "must be at most 64 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(InvalidLocationId {
                reason: "must contain only ASCII letters, digits, '-' or '_'",
            });
        }

        Ok(LocationId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LocationId {
    type Error = InvalidLocationId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LocationId::parse(&value)
    }
}

impl From<LocationId> for String {
    fn from(id: LocationId) -> Self {
        id.0
    }
}

impl fmt::Debug for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationId({})", self.0)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(LocationId::parse("5642ac2b4f2a3a0f0c5e0d11").is_ok());
        assert!(LocationId::parse("ferry-building").is_ok());
        assert!(LocationId::parse("A").is_ok());
        assert!(LocationId::parse("loc_42").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(LocationId::parse("").is_err());
    }

    #[test]
    fn reject_path_characters() {
        assert!(LocationId::parse("a/b").is_err());
        assert!(LocationId::parse("..").is_err());
        assert!(LocationId::parse("a b").is_err());
        assert!(LocationId::parse("café").is_err());
    }

    #[test]
    fn reject_too_long() {
        let long = "a".repeat(65);
        assert!(LocationId::parse(&long).is_err());
        assert!(LocationId::parse(&long[..64]).is_ok());
    }

    #[test]
    fn serde_validates() {
        let id: LocationId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.as_str(), "abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");

        let bad: Result<LocationId, _> = serde_json::from_str("\"a b\"");
        assert!(bad.is_err());
    }

    #[test]
    fn display_and_debug() {
        let id = LocationId::parse("home").unwrap();
        assert_eq!(id.to_string(), "home");
        assert_eq!(format!("{id:?}"), "LocationId(home)");
    }
}
