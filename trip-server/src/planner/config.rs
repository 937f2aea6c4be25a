//! Planner configuration.

use std::time::Duration;

/// Tier label whose estimates are used when none is configured.
pub const DEFAULT_TIER: &str = "uberX";

/// What to do when the pricing service has no estimate for the configured tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTierPolicy {
    /// Fail the planning call.
    #[default]
    Reject,
    /// Score the leg as zero cost, duration and distance.
    ///
    /// A zero leg looks free to the search, so routes through it win
    /// regardless of their real cost.
    Zero,
}

/// Configuration parameters for planning and progression.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Pricing tier whose estimates score each leg.
    pub tier_label: String,

    /// Largest accepted destination count.
    /// The search is exhaustive, so work grows as N!.
    pub max_destinations: usize,

    /// Maximum number of pricing or geocoding calls in flight for one plan.
    pub max_concurrent_calls: usize,

    /// Time limit for each individual external call.
    pub call_timeout: Duration,

    /// Behaviour when a leg has no estimate for `tier_label`.
    pub missing_tier: MissingTierPolicy,
}

impl PlannerConfig {
    /// Create a new configuration for the given tier with default limits.
    pub fn new(tier_label: impl Into<String>) -> Self {
        Self {
            tier_label: tier_label.into(),
            ..Self::default()
        }
    }

    /// Set the destination ceiling.
    pub fn with_max_destinations(mut self, n: usize) -> Self {
        self.max_destinations = n;
        self
    }

    /// Set the number of concurrent external calls.
    pub fn with_max_concurrent_calls(mut self, n: usize) -> Self {
        self.max_concurrent_calls = n;
        self
    }

    /// Set the per-call timeout.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Set the missing-tier policy.
    pub fn with_missing_tier(mut self, policy: MissingTierPolicy) -> Self {
        self.missing_tier = policy;
        self
    }

    /// Concurrency limit, never below one.
    pub(crate) fn concurrency(&self) -> usize {
        self.max_concurrent_calls.max(1)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            tier_label: DEFAULT_TIER.to_string(),
            max_destinations: 8, // 8! = 40320 routes
            max_concurrent_calls: 5,
            call_timeout: Duration::from_secs(10),
            missing_tier: MissingTierPolicy::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.tier_label, "uberX");
        assert_eq!(config.max_destinations, 8);
        assert_eq!(config.max_concurrent_calls, 5);
        assert_eq!(config.call_timeout, Duration::from_secs(10));
        assert_eq!(config.missing_tier, MissingTierPolicy::Reject);
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new("uberXL")
            .with_max_destinations(5)
            .with_max_concurrent_calls(2)
            .with_call_timeout(Duration::from_millis(250))
            .with_missing_tier(MissingTierPolicy::Zero);

        assert_eq!(config.tier_label, "uberXL");
        assert_eq!(config.max_destinations, 5);
        assert_eq!(config.max_concurrent_calls, 2);
        assert_eq!(config.call_timeout, Duration::from_millis(250));
        assert_eq!(config.missing_tier, MissingTierPolicy::Zero);
    }

    #[test]
    fn concurrency_is_at_least_one() {
        let config = PlannerConfig::default().with_max_concurrent_calls(0);
        assert_eq!(config.concurrency(), 1);
    }
}
