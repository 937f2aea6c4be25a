//! Pairwise cost matrix.
//!
//! Holds the score of every ordered pair of distinct locations among the
//! start and the destinations of one planning request. A matrix is built
//! once per request and is read-only afterwards; nothing is cached between
//! requests.

use std::collections::HashMap;
use std::iter;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, warn};

use crate::domain::{Coordinate, LocationId, Route, Score};
use crate::pricing::PriceEstimate;

use super::config::{MissingTierPolicy, PlannerConfig};
use super::error::{ExternalService, PlanError};
use super::provider::{LocationResolver, PriceEstimator, with_timeout};

/// Directed pair of distinct locations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LegKey {
    pub from: LocationId,
    pub to: LocationId,
}

impl LegKey {
    pub fn new(from: LocationId, to: LocationId) -> Self {
        Self { from, to }
    }
}

/// Score of every leg between a start and a set of destinations.
#[derive(Debug, Clone, Default)]
pub struct CostMatrix {
    scores: HashMap<LegKey, Score>,
}

impl CostMatrix {
    /// Build a matrix from explicit leg scores. Self-pairs are ignored.
    pub fn from_legs(legs: impl IntoIterator<Item = (LocationId, LocationId, Score)>) -> Self {
        let scores = legs
            .into_iter()
            .filter(|(from, to, _)| from != to)
            .map(|(from, to, score)| (LegKey::new(from, to), score))
            .collect();

        Self { scores }
    }

    /// Resolve every location, then price every ordered pair.
    ///
    /// Makes N+1 geocoding calls and N·(N+1) pricing calls, at most
    /// `config.max_concurrent_calls` at a time. Any failure aborts the build
    /// and no partial matrix is returned.
    pub async fn build<L, P>(
        start: &LocationId,
        destinations: &[LocationId],
        resolver: &L,
        pricing: &P,
        config: &PlannerConfig,
    ) -> Result<Self, PlanError>
    where
        L: LocationResolver,
        P: PriceEstimator,
    {
        let ids: Vec<&LocationId> = iter::once(start).chain(destinations).collect();
        let ids = &ids;
        let size = ids.len();

        // Map over indices: a `&LocationId` closure argument makes the futures non-Send.
        let coords: Vec<Coordinate> = stream::iter(0..size)
            .map(|i| {
                with_timeout(
                    ExternalService::Geocoding,
                    config.call_timeout,
                    resolver.resolve(ids[i]),
                )
            })
            .buffered(config.concurrency())
            .try_collect()
            .await?;

        debug!(locations = size, "resolved coordinates");

        let pairs: Vec<(usize, usize)> = (0..size)
            .flat_map(|i| (0..size).filter(move |&j| j != i).map(move |j| (i, j)))
            .collect();

        let coords = &coords;
        let scores: Vec<(LegKey, Score)> = stream::iter(pairs)
            .map(|(i, j)| async move {
                let estimates = with_timeout(
                    ExternalService::Pricing,
                    config.call_timeout,
                    pricing.estimate_price(coords[i], coords[j]),
                )
                .await?;

                let score = leg_score(&estimates, ids[i], ids[j], config)?;
                Ok::<_, PlanError>((LegKey::new(ids[i].clone(), ids[j].clone()), score))
            })
            .buffered(config.concurrency())
            .try_collect()
            .await?;

        debug!(legs = scores.len(), "priced all legs");

        Ok(Self {
            scores: scores.into_iter().collect(),
        })
    }

    /// Score of the leg `from` → `to`, if present.
    pub fn get(&self, from: &LocationId, to: &LocationId) -> Option<Score> {
        self.scores
            .get(&LegKey::new(from.clone(), to.clone()))
            .copied()
    }

    /// Sum of leg scores along a closed route, or `None` if a leg is missing.
    pub fn route_score(&self, route: &Route) -> Option<Score> {
        route
            .legs()
            .map(|(from, to)| self.get(from, to))
            .sum::<Option<Score>>()
    }

    /// Number of legs in the matrix.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns true if the matrix holds no legs.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Pick the configured tier's estimate out of all tiers returned for a leg.
///
/// If several entries carry the label, the last one wins.
pub fn select_tier(estimates: &[PriceEstimate], tier: &str) -> Option<Score> {
    estimates
        .iter()
        .rfind(|e| e.display_name == tier)
        .map(PriceEstimate::score)
}

fn leg_score(
    estimates: &[PriceEstimate],
    from: &LocationId,
    to: &LocationId,
    config: &PlannerConfig,
) -> Result<Score, PlanError> {
    if let Some(score) = select_tier(estimates, &config.tier_label) {
        return Ok(score);
    }

    match config.missing_tier {
        MissingTierPolicy::Reject => Err(PlanError::external(
            ExternalService::Pricing,
            format!(
                "no '{}' estimate for leg {} -> {}",
                config.tier_label, from, to
            ),
        )),
        MissingTierPolicy::Zero => {
            warn!(%from, %to, tier = %config.tier_label, "no estimate for tier, scoring leg as zero");
            Ok(Score::ZERO)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn loc(s: &str) -> LocationId {
        LocationId::parse(s).unwrap()
    }

    fn estimate(tier: &str, cost: f64) -> PriceEstimate {
        PriceEstimate {
            display_name: tier.to_string(),
            low_estimate: cost,
            duration: cost * 60.0,
            distance: cost / 2.0,
        }
    }

    /// Resolver mapping each id to a coordinate whose latitude is its index.
    struct IndexResolver {
        known: Vec<LocationId>,
    }

    impl LocationResolver for IndexResolver {
        async fn resolve(&self, location: &LocationId) -> Result<Coordinate, PlanError> {
            self.known
                .iter()
                .position(|l| l == location)
                .map(|i| Coordinate::new(i as f64, 0.0))
                .ok_or_else(|| PlanError::LocationNotFound(location.to_string()))
        }
    }

    /// Pricing whose uberX cost encodes the pair: 10·from + to.
    struct PairPricing {
        calls: Mutex<Vec<(f64, f64)>>,
        tiers: Vec<&'static str>,
    }

    impl PairPricing {
        fn new(tiers: Vec<&'static str>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                tiers,
            }
        }
    }

    impl PriceEstimator for PairPricing {
        async fn estimate_price(
            &self,
            from: Coordinate,
            to: Coordinate,
        ) -> Result<Vec<PriceEstimate>, PlanError> {
            self.calls.lock().unwrap().push((from.lat, to.lat));
            let cost = from.lat * 10.0 + to.lat;
            Ok(self.tiers.iter().map(|t| estimate(t, cost)).collect())
        }
    }

    #[test]
    fn select_tier_ignores_other_tiers() {
        let estimates = vec![
            estimate("uberPOOL", 3.0),
            estimate("uberX", 7.0),
            estimate("uberXL", 12.0),
        ];
        assert_eq!(
            select_tier(&estimates, "uberX"),
            Some(Score::new(7.0, 420.0, 3.5))
        );
        assert_eq!(select_tier(&estimates, "uberBLACK"), None);
    }

    #[test]
    fn select_tier_last_match_wins() {
        let estimates = vec![estimate("uberX", 7.0), estimate("uberX", 8.0)];
        assert_eq!(select_tier(&estimates, "uberX").map(|s| s.cost), Some(8.0));
    }

    #[tokio::test]
    async fn build_prices_every_ordered_pair() {
        let start = loc("S");
        let dests = vec![loc("A"), loc("B"), loc("C")];
        let resolver = IndexResolver {
            known: vec![loc("S"), loc("A"), loc("B"), loc("C")],
        };
        let pricing = PairPricing::new(vec!["uberPOOL", "uberX"]);
        let config = PlannerConfig::default();

        let matrix = CostMatrix::build(&start, &dests, &resolver, &pricing, &config)
            .await
            .unwrap();

        // N·(N+1) entries, one pricing call each
        assert_eq!(matrix.len(), 12);
        assert_eq!(pricing.calls.lock().unwrap().len(), 12);

        assert_eq!(matrix.get(&loc("S"), &loc("A")).unwrap().cost, 1.0);
        assert_eq!(matrix.get(&loc("C"), &loc("S")).unwrap().cost, 30.0);
        assert_eq!(matrix.get(&loc("B"), &loc("C")).unwrap().cost, 23.0);
        assert_eq!(matrix.get(&loc("A"), &loc("A")), None);
    }

    #[tokio::test]
    async fn unknown_location_aborts_build() {
        let start = loc("S");
        let dests = vec![loc("A"), loc("Z")];
        let resolver = IndexResolver {
            known: vec![loc("S"), loc("A")],
        };
        let pricing = PairPricing::new(vec!["uberX"]);

        let result =
            CostMatrix::build(&start, &dests, &resolver, &pricing, &PlannerConfig::default()).await;

        assert_eq!(result.unwrap_err(), PlanError::LocationNotFound("Z".into()));
        assert!(pricing.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_tier_rejected_by_default() {
        let start = loc("S");
        let dests = vec![loc("A")];
        let resolver = IndexResolver {
            known: vec![loc("S"), loc("A")],
        };
        let pricing = PairPricing::new(vec!["uberPOOL"]);

        let result =
            CostMatrix::build(&start, &dests, &resolver, &pricing, &PlannerConfig::default()).await;

        match result {
            Err(PlanError::ExternalService { service, message }) => {
                assert_eq!(service, ExternalService::Pricing);
                assert!(message.contains("uberX"));
            }
            other => panic!("expected pricing error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_tier_scores_zero_when_configured() {
        let start = loc("S");
        let dests = vec![loc("A")];
        let resolver = IndexResolver {
            known: vec![loc("S"), loc("A")],
        };
        let pricing = PairPricing::new(vec!["uberPOOL"]);
        let config = PlannerConfig::default().with_missing_tier(MissingTierPolicy::Zero);

        let matrix = CostMatrix::build(&start, &dests, &resolver, &pricing, &config)
            .await
            .unwrap();

        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.get(&loc("S"), &loc("A")), Some(Score::ZERO));
    }

    #[test]
    fn route_score_sums_legs() {
        let matrix = CostMatrix::from_legs([
            (loc("S"), loc("A"), Score::new(5.0, 1.0, 1.0)),
            (loc("A"), loc("B"), Score::new(2.0, 1.0, 1.0)),
            (loc("B"), loc("S"), Score::new(3.0, 1.0, 1.0)),
        ]);

        let route = Route::new(loc("S"), vec![loc("A"), loc("B")]).unwrap();
        assert_eq!(matrix.route_score(&route), Some(Score::new(10.0, 3.0, 3.0)));

        let reversed = Route::new(loc("S"), vec![loc("B"), loc("A")]).unwrap();
        assert_eq!(matrix.route_score(&reversed), None);
    }

    #[test]
    fn from_legs_drops_self_pairs() {
        let matrix = CostMatrix::from_legs([(loc("S"), loc("S"), Score::ZERO)]);
        assert!(matrix.is_empty());
    }
}
