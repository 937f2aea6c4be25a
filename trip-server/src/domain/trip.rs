//! Trip records: the stored plan and the progress through it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DomainError, LocationId, Route, Score};

/// Generated identifier shared by a plan and its progress record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(Uuid);

impl TripId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        TripId(Uuid::new_v4())
    }

    /// Parse an identifier supplied by a caller.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(s)
            .map(TripId)
            .map_err(|_| DomainError::InvalidTripId(s.to_string()))
    }
}

impl FromStr for TripId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TripId::parse(s)
    }
}

impl fmt::Debug for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TripId({})", self.0)
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Status of a stored plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Planning,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Planning => "planning",
        }
    }
}

/// Status of a trip in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// Created from a plan; the first leg's wait time is known.
    Requesting,
    /// At least one stop has been reached and more legs remain.
    Active,
    /// Back at the start. Terminal.
    Finished,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Requesting => "requesting",
            ProgressStatus::Active => "active",
            ProgressStatus::Finished => "finished",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, ProgressStatus::Finished)
    }
}

/// The best route found for a planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub id: TripId,
    pub status: PlanStatus,
    pub start: LocationId,
    /// Interior stops in visiting order (start and return stripped).
    pub route: Vec<LocationId>,
    pub score: Score,
    pub created_at: DateTime<Utc>,
}

impl TripPlan {
    /// Create a plan record with a fresh identifier.
    pub fn new(route: Route, score: Score) -> Self {
        let start = route.start().clone();
        Self {
            id: TripId::generate(),
            status: PlanStatus::Planning,
            start,
            route: route.into_stops(),
            score,
            created_at: Utc::now(),
        }
    }
}

/// A caller's progression through a plan, one leg at a time.
///
/// Holds its own copy of the route; it never shares state with the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripProgress {
    pub id: TripId,
    pub status: ProgressStatus,
    pub start: LocationId,
    /// Where the caller is heading. `None` once finished.
    pub next_destination: Option<LocationId>,
    pub route: Vec<LocationId>,
    /// Aggregate score carried over from the plan.
    pub score: Score,
    /// Estimated wait for the current leg, in seconds. Zero once finished.
    pub wait_time_eta: f64,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_id_roundtrip() {
        let id = TripId::generate();
        let parsed = TripId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn trip_id_rejects_garbage() {
        assert!(TripId::parse("").is_err());
        assert!(TripId::parse("5642ac2b4f2a3a0f0c5e0d11").is_err());
        assert!("not-a-uuid".parse::<TripId>().is_err());
    }

    #[test]
    fn status_names() {
        assert_eq!(PlanStatus::Planning.as_str(), "planning");
        assert_eq!(ProgressStatus::Requesting.as_str(), "requesting");
        assert_eq!(ProgressStatus::Active.as_str(), "active");
        assert_eq!(ProgressStatus::Finished.as_str(), "finished");
        assert_eq!(
            serde_json::to_string(&ProgressStatus::Finished).unwrap(),
            "\"finished\""
        );
    }

    #[test]
    fn plan_strips_start() {
        let s = LocationId::parse("S").unwrap();
        let a = LocationId::parse("A").unwrap();
        let b = LocationId::parse("B").unwrap();
        let route = Route::new(s.clone(), vec![a.clone(), b.clone()]).unwrap();

        let plan = TripPlan::new(route, Score::new(10.0, 1.0, 1.0));
        assert_eq!(plan.start, s);
        assert_eq!(plan.route, vec![a, b]);
        assert_eq!(plan.status, PlanStatus::Planning);
    }

    #[test]
    fn plans_get_distinct_ids() {
        let s = LocationId::parse("S").unwrap();
        let a = LocationId::parse("A").unwrap();
        let route = Route::new(s, vec![a]).unwrap();

        let p1 = TripPlan::new(route.clone(), Score::ZERO);
        let p2 = TripPlan::new(route, Score::ZERO);
        assert_ne!(p1.id, p2.id);
    }
}
