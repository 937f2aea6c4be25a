//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from API/IO errors.

use super::LocationId;

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A trip needs at least one destination
    #[error("at least one destination is required")]
    NoDestinations,

    /// The same destination was listed twice
    #[error("destination {0} is listed more than once")]
    DuplicateDestination(LocationId),

    /// The starting location was also listed as a destination
    #[error("starting location {0} cannot also be a destination")]
    StartIsDestination(LocationId),

    /// Trip identifier could not be parsed
    #[error("invalid trip identifier: {0}")]
    InvalidTripId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::NoDestinations;
        assert_eq!(err.to_string(), "at least one destination is required");

        let a = LocationId::parse("A").unwrap();
        let err = DomainError::DuplicateDestination(a.clone());
        assert_eq!(err.to_string(), "destination A is listed more than once");

        let err = DomainError::StartIsDestination(a);
        assert_eq!(
            err.to_string(),
            "starting location A cannot also be a destination"
        );

        let err = DomainError::InvalidTripId("xyz".into());
        assert_eq!(err.to_string(), "invalid trip identifier: xyz");
    }
}
