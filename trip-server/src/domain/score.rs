//! Route score: cost, duration and distance.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Aggregate travel metrics for a leg or a whole route.
///
/// Scores add element-wise along a route. Routes are compared
/// lexicographically: cost first, then duration, then distance. Ties are
/// broken only on exact equality of the higher-priority metric.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Score {
    pub cost: f64,
    pub duration: f64,
    pub distance: f64,
}

impl Score {
    /// The additive identity.
    pub const ZERO: Score = Score {
        cost: 0.0,
        duration: 0.0,
        distance: 0.0,
    };

    /// Worse than every finite score; the starting point of a search.
    pub const WORST: Score = Score {
        cost: f64::INFINITY,
        duration: f64::INFINITY,
        distance: f64::INFINITY,
    };

    pub fn new(cost: f64, duration: f64, distance: f64) -> Self {
        Self {
            cost,
            duration,
            distance,
        }
    }

    /// Returns true if `self` is strictly better (smaller) than `other`.
    ///
    /// Equal scores are never better, so the first of several tied
    /// candidates wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_server::domain::Score;
    ///
    /// let cheap = Score::new(10.0, 900.0, 4.0);
    /// let pricey = Score::new(12.0, 600.0, 3.0);
    /// assert!(cheap.is_better_than(&pricey));
    ///
    /// // Same cost and duration: distance decides
    /// let shorter = Score::new(10.0, 900.0, 3.5);
    /// assert!(shorter.is_better_than(&cheap));
    ///
    /// // Identical scores do not replace each other
    /// assert!(!cheap.is_better_than(&cheap));
    /// ```
    pub fn is_better_than(&self, other: &Score) -> bool {
        if self.cost != other.cost {
            return self.cost < other.cost;
        }
        if self.duration != other.duration {
            return self.duration < other.duration;
        }
        self.distance < other.distance
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score {
            cost: self.cost + rhs.cost,
            duration: self.duration + rhs.duration,
            distance: self.distance + rhs.distance,
        }
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Score {
    fn sum<I: Iterator<Item = Score>>(iter: I) -> Score {
        iter.fold(Score::ZERO, Add::add)
    }
}
