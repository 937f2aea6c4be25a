//! Closed-loop route type.

use super::{DomainError, LocationId};

/// A round trip: start, each interior stop once, then back to start.
///
/// # Invariants
///
/// - At least one interior stop
/// - Interior stops are distinct and never equal to the start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    start: LocationId,
    stops: Vec<LocationId>,
}

impl Route {
    /// Construct a route, validating the stop set.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_server::domain::{LocationId, Route};
    ///
    /// let s = LocationId::parse("S").unwrap();
    /// let a = LocationId::parse("A").unwrap();
    /// let b = LocationId::parse("B").unwrap();
    ///
    /// let route = Route::new(s.clone(), vec![a.clone(), b.clone()]).unwrap();
    /// let legs: Vec<_> = route.legs().collect();
    /// assert_eq!(legs, vec![(&s, &a), (&a, &b), (&b, &s)]);
    ///
    /// // A stop may not repeat
    /// assert!(Route::new(s.clone(), vec![a.clone(), a.clone()]).is_err());
    /// ```
    pub fn new(start: LocationId, stops: Vec<LocationId>) -> Result<Self, DomainError> {
        validate_stops(&start, &stops)?;
        Ok(Self { start, stops })
    }

    /// The location the route starts and ends at.
    pub fn start(&self) -> &LocationId {
        &self.start
    }

    /// The interior stops, in visiting order.
    pub fn stops(&self) -> &[LocationId] {
        &self.stops
    }

    /// Consume the route, returning the interior stops.
    pub fn into_stops(self) -> Vec<LocationId> {
        self.stops
    }

    /// Every location in visiting order, with the start at both ends.
    pub fn closed(&self) -> impl Iterator<Item = &LocationId> {
        std::iter::once(&self.start)
            .chain(self.stops.iter())
            .chain(std::iter::once(&self.start))
    }

    /// Consecutive (from, to) pairs of the closed loop.
    pub fn legs(&self) -> impl Iterator<Item = (&LocationId, &LocationId)> {
        self.closed().zip(self.closed().skip(1))
    }
}

/// Check that `stops` is a valid destination set for `start`.
///
/// Used both for planning requests and for route construction.
pub fn validate_stops(start: &LocationId, stops: &[LocationId]) -> Result<(), DomainError> {
    if stops.is_empty() {
        return Err(DomainError::NoDestinations);
    }

    for (i, stop) in stops.iter().enumerate() {
        if stop == start {
            return Err(DomainError::StartIsDestination(stop.clone()));
        }
        if stops[..i].contains(stop) {
            return Err(DomainError::DuplicateDestination(stop.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> LocationId {
        LocationId::parse(s).unwrap()
    }

    #[test]
    fn closed_sequence_has_start_at_both_ends() {
        let route = Route::new(loc("S"), vec![loc("A"), loc("B"), loc("C")]).unwrap();
        let closed: Vec<&str> = route.closed().map(|l| l.as_str()).collect();
        assert_eq!(closed, vec!["S", "A", "B", "C", "S"]);
        assert_eq!(route.legs().count(), 4);
    }

    #[test]
    fn single_stop_route() {
        let route = Route::new(loc("S"), vec![loc("A")]).unwrap();
        let legs: Vec<(&str, &str)> = route
            .legs()
            .map(|(f, t)| (f.as_str(), t.as_str()))
            .collect();
        assert_eq!(legs, vec![("S", "A"), ("A", "S")]);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            Route::new(loc("S"), vec![]),
            Err(DomainError::NoDestinations)
        );
    }

    #[test]
    fn rejects_start_as_stop() {
        assert_eq!(
            Route::new(loc("S"), vec![loc("A"), loc("S")]),
            Err(DomainError::StartIsDestination(loc("S")))
        );
    }

    #[test]
    fn rejects_duplicates() {
        assert_eq!(
            Route::new(loc("S"), vec![loc("A"), loc("B"), loc("A")]),
            Err(DomainError::DuplicateDestination(loc("A")))
        );
    }

    #[test]
    fn into_stops_strips_start() {
        let route = Route::new(loc("S"), vec![loc("B"), loc("A")]).unwrap();
        assert_eq!(route.into_stops(), vec![loc("B"), loc("A")]);
    }
}
