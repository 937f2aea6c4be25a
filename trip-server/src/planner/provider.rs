//! Collaborator traits used by the planner.
//!
//! These abstractions allow planning and progression to be tested with
//! mock data. The HTTP clients implement them for production use.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::{Coordinate, LocationId};
use crate::locations::{LocationClient, LocationError};
use crate::pricing::{PriceEstimate, PricingClient};

use super::error::{ExternalService, PlanError};

/// Resolves location identifiers to coordinates.
pub trait LocationResolver: Sync {
    /// Fails with `PlanError::LocationNotFound` for unknown identifiers.
    fn resolve(
        &self,
        location: &LocationId,
    ) -> impl Future<Output = Result<Coordinate, PlanError>> + Send;
}

/// Produces per-tier price estimates for a trip between two points.
pub trait PriceEstimator: Sync {
    fn estimate_price(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<Vec<PriceEstimate>, PlanError>> + Send;
}

/// Produces the pickup wait time, in seconds, for a trip between two points.
pub trait EtaEstimator: Sync {
    fn estimate_eta(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<f64, PlanError>> + Send;
}

impl LocationResolver for LocationClient {
    async fn resolve(&self, location: &LocationId) -> Result<Coordinate, PlanError> {
        self.coordinate(location).await.map_err(|e| match e {
            LocationError::NotFound(id) => PlanError::LocationNotFound(id.to_string()),
            other => PlanError::external(ExternalService::Geocoding, other),
        })
    }
}

impl PriceEstimator for PricingClient {
    async fn estimate_price(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Vec<PriceEstimate>, PlanError> {
        self.price_estimates(from, to)
            .await
            .map_err(|e| PlanError::external(ExternalService::Pricing, e))
    }
}

impl EtaEstimator for PricingClient {
    async fn estimate_eta(&self, from: Coordinate, to: Coordinate) -> Result<f64, PlanError> {
        self.ride_eta(from, to)
            .await
            .map_err(|e| PlanError::external(ExternalService::Eta, e))
    }
}

/// Run an external call, failing with `ExternalService` if it exceeds `limit`.
pub(crate) async fn with_timeout<T>(
    service: ExternalService,
    limit: Duration,
    call: impl Future<Output = Result<T, PlanError>>,
) -> Result<T, PlanError> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(%service, ?limit, "external call timed out");
            Err(PlanError::external(
                service,
                format!("timed out after {}ms", limit.as_millis()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn with_timeout_passes_through_results() {
        let ok = with_timeout(ExternalService::Eta, Duration::from_secs(1), async {
            Ok::<_, PlanError>(42.0)
        })
        .await;
        assert_eq!(ok, Ok(42.0));

        let err = with_timeout(ExternalService::Eta, Duration::from_secs(1), async {
            Err::<f64, _>(PlanError::LocationNotFound("x".into()))
        })
        .await;
        assert_eq!(err, Err(PlanError::LocationNotFound("x".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn with_timeout_expires() {
        let result = with_timeout(ExternalService::Pricing, Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, PlanError>(())
        })
        .await;

        assert_eq!(
            result,
            Err(PlanError::ExternalService {
                service: ExternalService::Pricing,
                message: "timed out after 50ms".into(),
            })
        );
    }
}
