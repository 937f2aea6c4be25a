//! Planner error types.

use std::fmt;

use crate::domain::DomainError;

/// The external collaborator a failed call was made to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalService {
    Geocoding,
    Pricing,
    Eta,
}

impl fmt::Display for ExternalService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExternalService::Geocoding => "geocoding",
            ExternalService::Pricing => "pricing",
            ExternalService::Eta => "ETA",
        })
    }
}

/// Error from planning or progression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// The planning request violates a precondition
    #[error("invalid planning request: {0}")]
    InvalidInput(String),

    /// A location identifier is malformed or unknown
    #[error("location {0} not found")]
    LocationNotFound(String),

    /// An external call failed or timed out
    #[error("{service} service error: {message}")]
    ExternalService {
        service: ExternalService,
        message: String,
    },

    /// A progress record's next-destination pointer is inconsistent with its route
    #[error("invalid progression state: {0}")]
    InvalidProgressionState(String),
}

impl PlanError {
    pub(crate) fn external(service: ExternalService, message: impl ToString) -> Self {
        PlanError::ExternalService {
            service,
            message: message.to_string(),
        }
    }
}

impl From<DomainError> for PlanError {
    fn from(e: DomainError) -> Self {
        PlanError::InvalidInput(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PlanError::LocationNotFound("abc".into());
        assert_eq!(err.to_string(), "location abc not found");

        let err = PlanError::external(ExternalService::Pricing, "timed out after 10s");
        assert_eq!(err.to_string(), "pricing service error: timed out after 10s");

        let err = PlanError::InvalidProgressionState("next destination X not on route".into());
        assert_eq!(
            err.to_string(),
            "invalid progression state: next destination X not on route"
        );
    }

    #[test]
    fn domain_errors_are_invalid_input() {
        let err: PlanError = DomainError::NoDestinations.into();
        assert_eq!(
            err,
            PlanError::InvalidInput("at least one destination is required".into())
        );
    }
}
