//! Trip use cases: plan a trip, look one up, request the next leg.
//!
//! Ties the planner and progression machine to a [`TripStore`]. Identifiers
//! arrive as raw strings from the web layer and are validated here.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use crate::domain::{LocationId, TripId, TripPlan, TripProgress};
use crate::planner::{
    EtaEstimator, LocationResolver, PlanError, PlanRequest, Planner, PlannerConfig, PriceEstimator,
    Progression,
};
use crate::store::{StoreError, TripStore};

/// Error from a trip use case.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    /// The trip identifier is malformed
    #[error("invalid trip identifier: {0}")]
    InvalidIdentifier(String),

    /// No plan or progress record exists for the identifier
    #[error("trip {0} not found")]
    RecordNotFound(TripId),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What is stored for a trip identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum TripRecord {
    /// Planned but never requested.
    Planned(TripPlan),
    /// Requested at least once.
    InProgress(TripProgress),
}

/// Trip use cases over a set of collaborators and a store.
pub struct TripService<C, S> {
    collaborators: C,
    store: S,
    config: PlannerConfig,
    /// Serialises progression calls per trip.
    locks: LockTable,
}

type LockTable = Mutex<HashMap<TripId, Arc<tokio::sync::Mutex<()>>>>;

/// A claim on one trip's entry in the lock table.
///
/// The entry is removed when the last lease for the trip is dropped, which
/// also happens when a request future is cancelled part way.
struct LockLease<'a> {
    id: TripId,
    table: &'a LockTable,
    lock: Arc<tokio::sync::Mutex<()>>,
}

impl<'a> LockLease<'a> {
    fn acquire(table: &'a LockTable, id: TripId) -> Self {
        let lock = table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id)
            .or_default()
            .clone();
        Self { id, table, lock }
    }
}

impl Drop for LockLease<'_> {
    fn drop(&mut self) {
        let mut locks = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        // one reference in the table, one here
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.id);
        }
    }
}

impl<C, S> TripService<C, S>
where
    C: LocationResolver + PriceEstimator + EtaEstimator,
    S: TripStore,
{
    pub fn new(collaborators: C, store: S, config: PlannerConfig) -> Self {
        Self {
            collaborators,
            store,
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Plan the cheapest round trip and store it.
    ///
    /// A malformed location identifier cannot name a known location, so it
    /// is reported as not found.
    pub async fn plan_trip(
        &self,
        start: &str,
        destinations: &[String],
    ) -> Result<TripPlan, TripError> {
        let start = parse_location(start)?;
        let destinations = destinations
            .iter()
            .map(|d| parse_location(d))
            .collect::<Result<Vec<_>, _>>()?;

        let request = PlanRequest::new(start, destinations);
        let planner = Planner::new(&self.collaborators, &self.collaborators, &self.config);
        let result = planner.plan(&request).await?;
        let routes_explored = result.routes_explored;

        let plan = TripPlan::new(result.route, result.score);
        self.store.insert_plan(plan.clone()).await?;

        info!(trip = %plan.id, routes_explored, "stored trip plan");
        Ok(plan)
    }

    /// Look up a trip. The progress record wins over the plan once it exists.
    pub async fn get_trip(&self, id: &str) -> Result<TripRecord, TripError> {
        let id = parse_trip_id(id)?;

        if let Some(progress) = self.store.progress(id).await? {
            return Ok(TripRecord::InProgress(progress));
        }

        self.store
            .plan(id)
            .await?
            .map(TripRecord::Planned)
            .ok_or(TripError::RecordNotFound(id))
    }

    /// Request the next leg of a trip.
    ///
    /// The first call creates the progress record from the plan. Each later
    /// call advances one leg, and a finished trip is returned unchanged.
    /// Calls for the same trip are serialised, and nothing is stored when a
    /// collaborator fails.
    pub async fn request_trip(&self, id: &str) -> Result<TripProgress, TripError> {
        let id = parse_trip_id(id)?;

        let lease = LockLease::acquire(&self.locks, id);
        let _guard = lease.lock.lock().await;
        self.request_locked(id).await
    }

    async fn request_locked(&self, id: TripId) -> Result<TripProgress, TripError> {
        let progression = Progression::new(&self.collaborators, &self.collaborators, &self.config);

        match self.store.progress(id).await? {
            Some(current) if current.status.is_finished() => {
                debug!(trip = %id, "request for finished trip");
                Ok(current)
            }
            Some(current) => {
                let next = progression.advance(&current).await?;
                self.store.update_progress(next.clone()).await?;
                Ok(next)
            }
            None => {
                let plan = self
                    .store
                    .plan(id)
                    .await?
                    .ok_or(TripError::RecordNotFound(id))?;
                let progress = progression.begin(&plan).await?;
                self.store.insert_progress(progress.clone()).await?;
                Ok(progress)
            }
        }
    }
}

fn parse_location(s: &str) -> Result<LocationId, PlanError> {
    LocationId::parse(s).map_err(|_| PlanError::LocationNotFound(s.to_string()))
}

fn parse_trip_id(s: &str) -> Result<TripId, TripError> {
    TripId::parse(s).map_err(|_| TripError::InvalidIdentifier(s.to_string()))
}
