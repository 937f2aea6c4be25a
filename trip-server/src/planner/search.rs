//! Exhaustive round-trip search.
//!
//! Tries every visiting order of the destinations and keeps the closed
//! loop with the lexicographically smallest (cost, duration, distance).

use tracing::{debug, info};

use crate::domain::{LocationId, Route, Score, validate_stops};

use super::config::PlannerConfig;
use super::error::PlanError;
use super::matrix::CostMatrix;
use super::provider::{LocationResolver, PriceEstimator};

/// Request for route planning.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Where the trip starts and ends.
    pub start: LocationId,

    /// Locations to visit, in caller order.
    pub destinations: Vec<LocationId>,
}

impl PlanRequest {
    /// Create a new plan request.
    pub fn new(start: LocationId, destinations: Vec<LocationId>) -> Self {
        Self {
            start,
            destinations,
        }
    }

    /// Validate the plan request.
    pub fn validate(&self, config: &PlannerConfig) -> Result<(), PlanError> {
        validate_stops(&self.start, &self.destinations)?;

        if self.destinations.len() > config.max_destinations {
            return Err(PlanError::InvalidInput(format!(
                "{} destinations requested, at most {} supported",
                self.destinations.len(),
                config.max_destinations
            )));
        }

        Ok(())
    }
}

/// Result of route search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The best closed loop.
    pub route: Route,

    /// Aggregate score of `route`.
    pub score: Score,

    /// Number of visiting orders scored.
    pub routes_explored: usize,
}

/// Exhaustive search over one request's cost matrix.
pub struct RouteSearch<'a> {
    matrix: &'a CostMatrix,
}

impl<'a> RouteSearch<'a> {
    pub fn new(matrix: &'a CostMatrix) -> Self {
        Self { matrix }
    }

    /// Find the best visiting order of `destinations` starting and ending at `start`.
    ///
    /// A candidate replaces the best so far only if it is strictly better,
    /// so among tied routes the first enumerated wins. Enumeration order is
    /// fixed by [`for_each_permutation`], which makes the result
    /// deterministic for a given matrix and input order.
    pub fn best_route(
        &self,
        start: &LocationId,
        destinations: &[LocationId],
    ) -> Result<SearchResult, PlanError> {
        validate_stops(start, destinations)?;

        // Dense leg table: index 0 is the start, i + 1 is destinations[i].
        let ids: Vec<&LocationId> = std::iter::once(start).chain(destinations).collect();
        let mut legs = vec![vec![Score::ZERO; ids.len()]; ids.len()];
        for (i, from) in ids.iter().enumerate() {
            for (j, to) in ids.iter().enumerate() {
                if i == j {
                    continue;
                }
                legs[i][j] = self.matrix.get(from, to).ok_or_else(|| {
                    PlanError::InvalidInput(format!("cost matrix has no entry for {from} -> {to}"))
                })?;
            }
        }

        let mut best_score = Score::WORST;
        let mut best_order: Vec<usize> = Vec::new();
        let mut routes_explored = 0;

        for_each_permutation(destinations.len(), |order| {
            routes_explored += 1;

            let mut score = Score::ZERO;
            let mut at = 0;
            for &dest in order {
                score += legs[at][dest + 1];
                at = dest + 1;
            }
            score += legs[at][0];

            if score.is_better_than(&best_score) {
                best_score = score;
                best_order.clear();
                best_order.extend_from_slice(order);
            }
        });

        let stops = best_order
            .iter()
            .map(|&i| destinations[i].clone())
            .collect();
        let route = Route::new(start.clone(), stops)?;

        debug!(routes_explored, ?best_score, "route search complete");

        Ok(SearchResult {
            route,
            score: best_score,
            routes_explored,
        })
    }
}

/// Call `visit` with every permutation of `0..n`.
///
/// Permutations are produced by the recursive swap scheme (swap each
/// position into the last slot, permute the prefix, swap back). For
/// `n == 2` the order is `[1, 0]` then `[0, 1]`.
pub fn for_each_permutation(n: usize, mut visit: impl FnMut(&[usize])) {
    let mut order: Vec<usize> = (0..n).collect();
    permute(&mut order, n, &mut visit);
}

fn permute(order: &mut [usize], size: usize, visit: &mut impl FnMut(&[usize])) {
    if size <= 1 {
        visit(order);
        return;
    }
    for i in 0..size {
        order.swap(i, size - 1);
        permute(order, size - 1, visit);
        order.swap(i, size - 1);
    }
}

/// Route planner: builds the cost matrix, then searches it.
pub struct Planner<'a, L: LocationResolver, P: PriceEstimator> {
    resolver: &'a L,
    pricing: &'a P,
    config: &'a PlannerConfig,
}

impl<'a, L: LocationResolver, P: PriceEstimator> Planner<'a, L, P> {
    /// Create a new planner.
    pub fn new(resolver: &'a L, pricing: &'a P, config: &'a PlannerConfig) -> Self {
        Self {
            resolver,
            pricing,
            config,
        }
    }

    /// Plan the cheapest round trip for a request.
    ///
    /// Each call owns its cost matrix; concurrent calls share nothing.
    pub async fn plan(&self, request: &PlanRequest) -> Result<SearchResult, PlanError> {
        request.validate(self.config)?;

        let matrix = CostMatrix::build(
            &request.start,
            &request.destinations,
            self.resolver,
            self.pricing,
            self.config,
        )
        .await?;

        let result = RouteSearch::new(&matrix).best_route(&request.start, &request.destinations)?;

        info!(
            start = %request.start,
            destinations = request.destinations.len(),
            cost = result.score.cost,
            duration = result.score.duration,
            distance = result.score.distance,
            "planned trip"
        );

        Ok(result)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
