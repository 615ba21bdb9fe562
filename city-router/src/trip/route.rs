//! Validated stop lists.

use serde::Serialize;

use crate::graph::NodeId;

/// Why a stop list was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A trip needs a start and at least one destination
    #[error("route needs at least two stops, got {0}")]
    TooFewStops(usize),

    /// The same stop listed twice in a row
    #[error("stop {stop} is listed twice in a row at position {index}")]
    ConsecutiveDuplicate { index: usize, stop: NodeId },

    /// A stop listed again later in the route. Round trips are not supported.
    #[error(
        "stop {stop} appears at positions {first} and {again}; round trips are not supported"
    )]
    RepeatedStop {
        stop: NodeId,
        first: usize,
        again: usize,
    },
}

/// One point-to-point search within a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegPlan<'r> {
    pub index: usize,
    pub from: &'r NodeId,
    pub to: &'r NodeId,
}

/// An ordered list of distinct stops: a start followed by destinations.
///
/// # Examples
///
/// ```
/// use city_router::graph::NodeId;
/// use city_router::trip::Route;
///
/// let stops = ["A", "C", "B"].map(|s| NodeId::parse(s).unwrap());
/// let route = Route::new(stops.to_vec()).unwrap();
/// assert_eq!(route.leg_count(), 2);
///
/// // Returning to a stop is rejected
/// let stops = ["A", "B", "A"].map(|s| NodeId::parse(s).unwrap());
/// assert!(Route::new(stops.to_vec()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Route {
    stops: Vec<NodeId>,
}

impl Route {
    /// Validate a stop list.
    ///
    /// # Errors
    ///
    /// - Fewer than two stops
    /// - Two consecutive stops are equal
    /// - Any stop appears more than once, so a round trip back to the
    ///   start such as `[A, B, C, A]` is rejected
    pub fn new(stops: Vec<NodeId>) -> Result<Self, RouteError> {
        if stops.len() < 2 {
            return Err(RouteError::TooFewStops(stops.len()));
        }

        for (i, pair) in stops.windows(2).enumerate() {
            if pair[0] == pair[1] {
                return Err(RouteError::ConsecutiveDuplicate {
                    index: i + 1,
                    stop: pair[1].clone(),
                });
            }
        }

        for (again, stop) in stops.iter().enumerate() {
            if let Some(first) = stops[..again].iter().position(|s| s == stop) {
                return Err(RouteError::RepeatedStop {
                    stop: stop.clone(),
                    first,
                    again,
                });
            }
        }

        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[NodeId] {
        &self.stops
    }

    pub fn start(&self) -> &NodeId {
        &self.stops[0]
    }

    pub fn leg_count(&self) -> usize {
        self.stops.len() - 1
    }

    /// Consecutive stop pairs in travel order.
    pub fn legs(&self) -> impl Iterator<Item = LegPlan<'_>> {
        self.stops
            .windows(2)
            .enumerate()
            .map(|(index, pair)| LegPlan {
                index,
                from: &pair[0],
                to: &pair[1],
            })
    }
}
