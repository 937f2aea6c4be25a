//! Round-trip planner and trip progression.
//!
//! Planning answers: "starting here, in which order should I visit these
//! places so the loop back home is cheapest?" It prices every leg once,
//! then tries every visiting order.
//!
//! Progression walks a caller through the chosen route one leg at a time,
//! fetching the pickup wait for each new leg.

mod config;
mod error;
mod matrix;
mod progress;
mod provider;
mod search;

pub use config::{DEFAULT_TIER, MissingTierPolicy, PlannerConfig};
pub use error::{ExternalService, PlanError};
pub use matrix::{CostMatrix, LegKey, select_tier};
pub use progress::{Progression, Step, next_step};
pub use provider::{EtaEstimator, LocationResolver, PriceEstimator};
pub use search::{PlanRequest, Planner, RouteSearch, SearchResult, for_each_permutation};
