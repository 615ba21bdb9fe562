//! Multi-leg trip driver.
//!
//! Runs one search per consecutive pair of stops, stepping each engine at
//! the configured cadence and reporting every event to an observer. A leg
//! without a path ends the trip. Cancellation is checked before every step.

use std::collections::HashSet;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::cancel::CancelHandle;
use super::config::TripConfig;
use super::result::{LegResult, TripOutcome, TripResult};
use super::route::{LegPlan, Route, RouteError};
use crate::graph::{Graph, NodeId};
use crate::search::{Distance, SearchEngine, SearchError, StepEvent};

/// Structural failure that prevents a trip from running.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripError {
    /// Stop list failed validation
    #[error("invalid route: {0}")]
    InvalidRoute(#[from] RouteError),

    /// A stop is not in the graph
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Progress reported with every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub leg_index: usize,
    pub leg_count: usize,
    /// Nodes settled in the current leg.
    pub leg_nodes_visited: usize,
    /// Nodes settled across all legs so far, counting repeats.
    pub trip_nodes_visited: usize,
    /// Distinct nodes settled across all legs so far.
    pub distinct_nodes_visited: usize,
    pub elapsed: Duration,
}

/// Receives trip events as they happen. Every method defaults to doing nothing.
pub trait TripObserver {
    fn leg_started(&mut self, _leg: &LegPlan<'_>) {}

    fn step(&mut self, _event: &StepEvent, _progress: &Progress) {}

    fn leg_finished(&mut self, _leg: &LegResult) {}
}

impl TripObserver for () {}

/// Trip-wide accumulators.
struct Tally {
    started: Instant,
    legs: Vec<LegResult>,
    total_distance: u64,
    nodes_visited: usize,
    explored: Vec<NodeId>,
    explored_set: HashSet<NodeId>,
}

impl Tally {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            legs: Vec::new(),
            total_distance: 0,
            nodes_visited: 0,
            explored: Vec::new(),
            explored_set: HashSet::new(),
        }
    }

    fn record_visit(&mut self, node: &NodeId) {
        self.nodes_visited += 1;
        if self.explored_set.insert(node.clone()) {
            self.explored.push(node.clone());
        }
    }
}

/// How a single leg ended.
enum LegEnd {
    Found(LegResult),
    NoPath,
    Cancelled,
}

/// Drives trips over a graph.
pub struct TripPlanner<'a> {
    graph: &'a Graph,
    config: &'a TripConfig,
}

impl<'a> TripPlanner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a Graph, config: &'a TripConfig) -> Self {
        Self { graph, config }
    }

    /// Validate a stop list and run the trip.
    ///
    /// Returns `Ok(None)` if the trip was cancelled.
    ///
    /// # Errors
    ///
    /// - [`TripError::InvalidRoute`] if the stop list is malformed
    /// - [`TripError::Search`] if a stop is not in the graph
    ///
    /// Both are reported before any leg runs.
    pub async fn run(
        &self,
        stops: Vec<NodeId>,
        observer: &mut impl TripObserver,
        cancel: &CancelHandle,
    ) -> Result<Option<TripOutcome>, TripError> {
        let route = Route::new(stops)?;
        self.run_route(&route, observer, cancel).await
    }

    /// Run an already validated route. See [`TripPlanner::run`].
    pub async fn run_route(
        &self,
        route: &Route,
        observer: &mut impl TripObserver,
        cancel: &CancelHandle,
    ) -> Result<Option<TripOutcome>, TripError> {
        if let Some(missing) = route.stops().iter().find(|s| !self.graph.contains(s)) {
            return Err(SearchError::UnknownNode(missing.clone()).into());
        }

        let algorithm = self.config.algorithm;
        let mut tally = Tally::new();

        info!(
            algorithm = %algorithm,
            stops = route.stops().len(),
            start = %route.start(),
            "Starting trip"
        );

        for leg in route.legs() {
            let mut engine = algorithm.engine(self.graph, leg.from, leg.to)?;

            debug!(leg = leg.index, from = %leg.from, to = %leg.to, "Leg started");
            observer.leg_started(&leg);

            match self
                .drive_leg(engine.as_mut(), &leg, route.leg_count(), &mut tally, observer, cancel)
                .await
            {
                LegEnd::Found(result) => {
                    debug!(
                        leg = leg.index,
                        distance = result.total_distance,
                        hops = result.hops(),
                        visited = result.nodes_visited,
                        "Leg finished"
                    );
                    tally.total_distance =
                        tally.total_distance.saturating_add(result.total_distance);
                    observer.leg_finished(&result);
                    tally.legs.push(result);
                }
                LegEnd::NoPath => {
                    warn!(leg = leg.index, from = %leg.from, to = %leg.to, "No path for leg");
                    return Ok(Some(TripOutcome::NoPathForLeg {
                        leg_index: leg.index,
                        from: leg.from.clone(),
                        to: leg.to.clone(),
                        completed: tally.legs,
                        total_nodes_visited: tally.nodes_visited,
                        elapsed: tally.started.elapsed(),
                    }));
                }
                LegEnd::Cancelled => {
                    info!(leg = leg.index, "Trip cancelled");
                    return Ok(None);
                }
            }
        }

        let result = TripResult {
            algorithm,
            legs: tally.legs,
            total_distance: tally.total_distance,
            total_nodes_visited: tally.nodes_visited,
            explored: tally.explored,
            elapsed: tally.started.elapsed(),
        };

        info!(
            legs = result.total_legs(),
            distance = result.total_distance,
            visited = result.total_nodes_visited,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Trip complete"
        );

        Ok(Some(TripOutcome::Completed(result)))
    }

    async fn drive_leg(
        &self,
        engine: &mut dyn SearchEngine,
        leg: &LegPlan<'_>,
        leg_count: usize,
        tally: &mut Tally,
        observer: &mut impl TripObserver,
        cancel: &CancelHandle,
    ) -> LegEnd {
        let delay = self.config.step_delay();
        let mut leg_visited = 0;

        loop {
            if cancel.is_cancelled() {
                return LegEnd::Cancelled;
            }

            let event = engine.advance();
            if let StepEvent::Visit { node, .. } = &event {
                leg_visited += 1;
                tally.record_visit(node);
            }

            let progress = Progress {
                leg_index: leg.index,
                leg_count,
                leg_nodes_visited: leg_visited,
                trip_nodes_visited: tally.nodes_visited,
                distinct_nodes_visited: tally.explored.len(),
                elapsed: tally.started.elapsed(),
            };
            observer.step(&event, &progress);

            if let StepEvent::Done {
                path,
                total_distance,
                ..
            } = event
            {
                if path.is_empty() {
                    return LegEnd::NoPath;
                }
                let total_distance = self.leg_distance(&path, total_distance);
                return LegEnd::Found(LegResult {
                    leg_index: leg.index,
                    from: leg.from.clone(),
                    to: leg.to.clone(),
                    path,
                    total_distance,
                    nodes_visited: leg_visited,
                });
            }

            pause(delay, cancel).await;
        }
    }

    /// Weighted engines report their own distance; for the others the
    /// distance is summed along the path they returned.
    fn leg_distance(&self, path: &[NodeId], reported: Option<Distance>) -> u64 {
        if let Some(Distance::Finite(d)) = reported {
            return d;
        }
        self.graph.path_distance(path).unwrap_or_else(|| {
            warn!(path = ?path, "Path contains a hop with no edge");
            0
        })
    }
}

/// Wait out the step delay, waking early if the trip is cancelled.
async fn pause(delay: Duration, cancel: &CancelHandle) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
        return;
    }
    tokio::select! {
        _ = tokio::time::sleep(delay) => {}
        _ = cancel.cancelled() => {}
    }
}
