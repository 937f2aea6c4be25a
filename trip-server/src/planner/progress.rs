//! Trip progression state machine.
//!
//! Walks a caller through a planned route one leg per call:
//!
//! - `requesting`: created from a plan, heading to the first stop
//! - `active`: at least one stop reached, more legs remain
//! - `finished`: back at the start (terminal)

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::{LocationId, ProgressStatus, TripPlan, TripProgress};

use super::config::PlannerConfig;
use super::error::{ExternalService, PlanError};
use super::provider::{EtaEstimator, LocationResolver, with_timeout};

/// What one progression call does to a non-finished record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The return leg is complete.
    Finish,
    /// Head from `from` to `to`.
    Advance { from: LocationId, to: LocationId },
}

/// Work out the next step for a record, or `None` if it is already finished.
///
/// Pure: does not touch the record or any collaborator.
pub fn next_step(progress: &TripProgress) -> Result<Option<Step>, PlanError> {
    if progress.status.is_finished() {
        return Ok(None);
    }

    let next = progress.next_destination.as_ref().ok_or_else(|| {
        PlanError::InvalidProgressionState("trip is not finished but has no next destination".into())
    })?;

    if next == &progress.start {
        return Ok(Some(Step::Finish));
    }

    let last = progress.route.last().ok_or_else(|| {
        PlanError::InvalidProgressionState("trip has an empty route".into())
    })?;

    if next == last {
        return Ok(Some(Step::Advance {
            from: last.clone(),
            to: progress.start.clone(),
        }));
    }

    let k = progress
        .route
        .iter()
        .position(|stop| stop == next)
        .ok_or_else(|| {
            PlanError::InvalidProgressionState(format!(
                "next destination {next} is not on the route"
            ))
        })?;

    // k is not the last index, so k + 1 is in bounds
    Ok(Some(Step::Advance {
        from: progress.route[k].clone(),
        to: progress.route[k + 1].clone(),
    }))
}

/// Drives progress records using the geocoding and ETA collaborators.
pub struct Progression<'a, L: LocationResolver, E: EtaEstimator> {
    resolver: &'a L,
    eta: &'a E,
    config: &'a PlannerConfig,
}

impl<'a, L: LocationResolver, E: EtaEstimator> Progression<'a, L, E> {
    /// Create a new progression driver.
    pub fn new(resolver: &'a L, eta: &'a E, config: &'a PlannerConfig) -> Self {
        Self {
            resolver,
            eta,
            config,
        }
    }

    /// Create the progress record for a plan, heading to its first stop.
    pub async fn begin(&self, plan: &TripPlan) -> Result<TripProgress, PlanError> {
        let first = plan.route.first().ok_or_else(|| {
            PlanError::InvalidProgressionState("plan has an empty route".into())
        })?;

        let wait_time_eta = self.leg_eta(&plan.start, first).await?;

        info!(trip = %plan.id, next = %first, wait_time_eta, "trip requested");

        Ok(TripProgress {
            id: plan.id,
            status: ProgressStatus::Requesting,
            start: plan.start.clone(),
            next_destination: Some(first.clone()),
            route: plan.route.clone(),
            score: plan.score,
            wait_time_eta,
            updated_at: Utc::now(),
        })
    }

    /// Advance a record by exactly one leg.
    ///
    /// Returns a new record; the input is never modified, so on error the
    /// caller still holds the previous valid state. Finished records are
    /// returned unchanged.
    pub async fn advance(&self, progress: &TripProgress) -> Result<TripProgress, PlanError> {
        let Some(step) = next_step(progress)? else {
            debug!(trip = %progress.id, "trip already finished");
            return Ok(progress.clone());
        };

        let mut updated = progress.clone();
        updated.updated_at = Utc::now();

        match step {
            Step::Finish => {
                updated.status = ProgressStatus::Finished;
                updated.next_destination = None;
                updated.wait_time_eta = 0.0;
                info!(trip = %progress.id, "trip finished");
            }
            Step::Advance { from, to } => {
                updated.wait_time_eta = self.leg_eta(&from, &to).await?;
                updated.status = ProgressStatus::Active;
                info!(trip = %progress.id, %from, %to, wait_time_eta = updated.wait_time_eta, "trip advanced");
                updated.next_destination = Some(to);
            }
        }

        Ok(updated)
    }

    async fn leg_eta(&self, from: &LocationId, to: &LocationId) -> Result<f64, PlanError> {
        let timeout = self.config.call_timeout;
        let from = with_timeout(ExternalService::Geocoding, timeout, self.resolver.resolve(from)).await?;
        let to = with_timeout(ExternalService::Geocoding, timeout, self.resolver.resolve(to)).await?;
        with_timeout(ExternalService::Eta, timeout, self.eta.estimate_eta(from, to)).await
    }
}
