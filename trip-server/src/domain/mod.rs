//! Domain types for the trip planner.
//!
//! This module contains the core domain model types. All types enforce
//! their invariants at construction time, so code that receives these
//! types can trust their validity.

mod error;
mod location;
mod route;
mod score;
mod trip;

pub use error::DomainError;
pub use location::{Coordinate, InvalidLocationId, LocationId};
pub use route::{Route, validate_stops};
pub use score::Score;
pub use trip::{PlanStatus, ProgressStatus, TripId, TripPlan, TripProgress};
