//! Application state for the web layer.

use std::sync::Arc;

use crate::domain::{Coordinate, LocationId};
use crate::locations::LocationClient;
use crate::mock::MockCollaborators;
use crate::planner::{EtaEstimator, LocationResolver, PlanError, PlannerConfig, PriceEstimator};
use crate::pricing::{PriceEstimate, PricingClient};
use crate::service::TripService;
use crate::store::MemoryStore;

/// The geocoding, pricing and ETA services the server talks to.
pub enum Collaborators {
    /// Real HTTP services.
    Live {
        locations: LocationClient,
        pricing: PricingClient,
    },
    /// Static fixture data.
    Mock(MockCollaborators),
}

impl LocationResolver for Collaborators {
    async fn resolve(&self, location: &LocationId) -> Result<Coordinate, PlanError> {
        match self {
            Collaborators::Live { locations, .. } => locations.resolve(location).await,
            Collaborators::Mock(mock) => mock.resolve(location).await,
        }
    }
}

impl PriceEstimator for Collaborators {
    async fn estimate_price(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Vec<PriceEstimate>, PlanError> {
        match self {
            Collaborators::Live { pricing, .. } => pricing.estimate_price(from, to).await,
            Collaborators::Mock(mock) => mock.estimate_price(from, to).await,
        }
    }
}

impl EtaEstimator for Collaborators {
    async fn estimate_eta(&self, from: Coordinate, to: Coordinate) -> Result<f64, PlanError> {
        match self {
            Collaborators::Live { pricing, .. } => pricing.estimate_eta(from, to).await,
            Collaborators::Mock(mock) => mock.estimate_eta(from, to).await,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub trips: Arc<TripService<Collaborators, MemoryStore>>,
}

impl AppState {
    /// Create a new app state with an empty in-memory store.
    pub fn new(collaborators: Collaborators, config: PlannerConfig) -> Self {
        Self {
            trips: Arc::new(TripService::new(collaborators, MemoryStore::new(), config)),
        }
    }
}
