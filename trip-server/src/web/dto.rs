//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{TripPlan, TripProgress};

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    /// Where the trip starts and ends
    pub starting_from_location_id: String,

    /// Locations to visit, in any order
    pub location_ids: Vec<String>,
}

/// A stored plan.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    pub id: String,

    /// Always "planning"
    pub status: String,

    pub starting_from_location_id: String,

    /// Interior stops in visiting order
    pub best_route_location_ids: Vec<String>,

    pub total_uber_costs: f64,

    /// Seconds
    pub total_uber_duration: f64,

    /// Miles
    pub total_distance: f64,
}

/// A trip in progress.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub id: String,

    /// "requesting", "active" or "finished"
    pub status: String,

    pub starting_from_location_id: String,

    /// Where the rider is heading; empty once finished
    pub next_destination_location_id: String,

    pub best_route_location_ids: Vec<String>,

    /// Pickup wait for the current leg, in seconds
    pub uber_wait_time_eta: f64,

    pub total_uber_costs: f64,
    pub total_uber_duration: f64,
    pub total_distance: f64,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl From<&TripPlan> for PlanResponse {
    fn from(plan: &TripPlan) -> Self {
        Self {
            id: plan.id.to_string(),
            status: plan.status.as_str().to_string(),
            starting_from_location_id: plan.start.to_string(),
            best_route_location_ids: plan.route.iter().map(ToString::to_string).collect(),
            total_uber_costs: plan.score.cost,
            total_uber_duration: plan.score.duration,
            total_distance: plan.score.distance,
        }
    }
}

impl From<&TripProgress> for ProgressResponse {
    fn from(progress: &TripProgress) -> Self {
        Self {
            id: progress.id.to_string(),
            status: progress.status.as_str().to_string(),
            starting_from_location_id: progress.start.to_string(),
            next_destination_location_id: progress
                .next_destination
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            best_route_location_ids: progress.route.iter().map(ToString::to_string).collect(),
            uber_wait_time_eta: progress.wait_time_eta,
            total_uber_costs: progress.score.cost,
            total_uber_duration: progress.score.duration,
            total_distance: progress.score.distance,
        }
    }
}
