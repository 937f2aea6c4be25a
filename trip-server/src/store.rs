//! Persistence for trip plans and progress records.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::RwLock;

use crate::domain::{TripId, TripPlan, TripProgress};

/// Error from a trip store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// A record with this identifier already exists
    #[error("record {0} already exists")]
    Conflict(TripId),

    /// Update of a record that was never created
    #[error("record {0} does not exist")]
    Missing(TripId),
}

/// Create, read and update trip records by identifier.
///
/// Plans and progress records live in separate collections; a progress
/// record shares its plan's identifier.
pub trait TripStore: Send + Sync {
    fn insert_plan(&self, plan: TripPlan) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn plan(&self, id: TripId) -> impl Future<Output = Result<Option<TripPlan>, StoreError>> + Send;

    fn insert_progress(
        &self,
        progress: TripProgress,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn progress(
        &self,
        id: TripId,
    ) -> impl Future<Output = Result<Option<TripProgress>, StoreError>> + Send;

    fn update_progress(
        &self,
        progress: TripProgress,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// In-process store. Records are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    plans: RwLock<HashMap<TripId, TripPlan>>,
    progress: RwLock<HashMap<TripId, TripProgress>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn plan_count(&self) -> usize {
        self.plans.read().await.len()
    }
}

impl TripStore for MemoryStore {
    async fn insert_plan(&self, plan: TripPlan) -> Result<(), StoreError> {
        let mut plans = self.plans.write().await;
        if plans.contains_key(&plan.id) {
            return Err(StoreError::Conflict(plan.id));
        }
        plans.insert(plan.id, plan);
        Ok(())
    }

    async fn plan(&self, id: TripId) -> Result<Option<TripPlan>, StoreError> {
        Ok(self.plans.read().await.get(&id).cloned())
    }

    async fn insert_progress(&self, progress: TripProgress) -> Result<(), StoreError> {
        let mut records = self.progress.write().await;
        if records.contains_key(&progress.id) {
            return Err(StoreError::Conflict(progress.id));
        }
        records.insert(progress.id, progress);
        Ok(())
    }

    async fn progress(&self, id: TripId) -> Result<Option<TripProgress>, StoreError> {
        Ok(self.progress.read().await.get(&id).cloned())
    }

    async fn update_progress(&self, progress: TripProgress) -> Result<(), StoreError> {
        let mut records = self.progress.write().await;
        match records.get_mut(&progress.id) {
            Some(existing) => {
                *existing = progress;
                Ok(())
            }
            None => Err(StoreError::Missing(progress.id)),
        }
    }
}
