//! Pricing client error types.

use std::fmt;

/// The pricing API call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /v1/estimates/price`
    PriceEstimate,
    /// `POST /v1/requests`
    RideRequest,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::PriceEstimate => "price estimate",
            Endpoint::RideRequest => "ride request",
        })
    }
}

/// Errors from the pricing HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    /// A token cannot be sent as a header value
    #[error("{kind} token contains characters not allowed in a header")]
    InvalidToken { kind: &'static str },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The call needs credentials that were not supplied
    #[error("{0} needs an access token and product id")]
    NotConfigured(Endpoint),

    /// The client's request limiter has been shut down
    #[error("{0} limiter closed")]
    Closed(Endpoint),

    /// Network failure or client-side timeout
    #[error("{endpoint} call failed: {source}")]
    Http {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} rejected the credentials")]
    Unauthorized { endpoint: Endpoint },

    #[error("{endpoint} was rate limited")]
    RateLimited { endpoint: Endpoint },

    /// Any other non-success status
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        body: String,
    },

    /// Success status but a body that does not match the wire format
    #[error("{endpoint} response could not be read: {message}")]
    Decode { endpoint: Endpoint, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_endpoint() {
        let err = PricingError::RateLimited {
            endpoint: Endpoint::PriceEstimate,
        };
        assert_eq!(err.to_string(), "price estimate was rate limited");

        let err = PricingError::Status {
            endpoint: Endpoint::RideRequest,
            status: 422,
            body: "surge confirmation required".into(),
        };
        assert_eq!(
            err.to_string(),
            "ride request returned HTTP 422: surge confirmation required"
        );

        let err = PricingError::NotConfigured(Endpoint::RideRequest);
        assert_eq!(
            err.to_string(),
            "ride request needs an access token and product id"
        );

        let err = PricingError::InvalidToken { kind: "server" };
        assert_eq!(
            err.to_string(),
            "server token contains characters not allowed in a header"
        );
    }
}
