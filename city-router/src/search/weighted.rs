//! Dijkstra and A*.
//!
//! Both settle nodes in priority order from a lazy-deletion heap: a node is
//! pushed again whenever its distance improves, and entries for nodes that
//! are already settled are dropped when popped. Dijkstra's priority is the
//! distance so far; A* adds the straight-line distance to the end. The
//! relaxation test always compares true distances, never priorities.

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use super::queue::PriorityQueue;
use super::state::{SearchState, frontier_members, validate_endpoints};
use super::{Algorithm, Distance, SearchEngine, SearchError, StepEvent};
use crate::graph::{Graph, NodeId, Weight};

/// Stepwise shortest-path search over a borrowed graph.
#[derive(Debug, Clone)]
pub struct WeightedSearch<'g> {
    graph: &'g Graph,
    algorithm: Algorithm,
    state: SearchState,
    open: PriorityQueue<NodeId>,
    /// Best known distance from the start. Missing means unreached.
    dist: HashMap<NodeId, Weight>,
}

impl<'g> WeightedSearch<'g> {
    /// Dijkstra's algorithm from `start` to `end`.
    pub fn dijkstra(graph: &'g Graph, start: &NodeId, end: &NodeId) -> Result<Self, SearchError> {
        Self::new(graph, start, end, Algorithm::Dijkstra)
    }

    /// A* from `start` to `end`, guided by straight-line distance.
    pub fn astar(graph: &'g Graph, start: &NodeId, end: &NodeId) -> Result<Self, SearchError> {
        Self::new(graph, start, end, Algorithm::AStar)
    }

    fn new(
        graph: &'g Graph,
        start: &NodeId,
        end: &NodeId,
        algorithm: Algorithm,
    ) -> Result<Self, SearchError> {
        validate_endpoints(graph, start, end)?;

        let mut search = Self {
            graph,
            algorithm,
            state: SearchState::new(start.clone(), end.clone()),
            open: PriorityQueue::new(),
            dist: HashMap::from([(start.clone(), 0)]),
        };
        let priority = search.priority(start, 0);
        search.open.push(priority, start.clone());

        Ok(search)
    }

    fn priority(&self, node: &NodeId, g: Weight) -> f64 {
        let estimate = match self.algorithm {
            Algorithm::AStar => self.graph.heuristic(node, &self.state.end).unwrap_or(0.0),
            _ => 0.0,
        };
        g as f64 + estimate
    }

    fn end_distance(&self) -> Distance {
        match self.dist.get(&self.state.end) {
            Some(&d) if self.state.reached_end() => Distance::Finite(d),
            _ => Distance::Infinite,
        }
    }

    fn relax_neighbors(&mut self, current: &NodeId) {
        let Some(&current_dist) = self.dist.get(current) else {
            return;
        };

        let graph = self.graph;
        for edge in graph.neighbors(current) {
            if self.state.is_visited(&edge.neighbor) {
                continue;
            }
            let candidate = current_dist.saturating_add(edge.weight);
            let improved = self
                .dist
                .get(&edge.neighbor)
                .is_none_or(|&known| candidate < known);
            if improved {
                self.dist.insert(edge.neighbor.clone(), candidate);
                self.state.set_parent(edge.neighbor.clone(), current.clone());
                let priority = self.priority(&edge.neighbor, candidate);
                self.open.push(priority, edge.neighbor.clone());
            }
        }
    }
}

impl SearchEngine for WeightedSearch<'_> {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn advance(&mut self) -> StepEvent {
        if let Some(done) = self.state.done() {
            return done.clone();
        }
        if self.state.reached_end() {
            let total = self.end_distance();
            return self.state.finish(Some(total));
        }

        // Lazy deletion: skip entries for nodes settled through a shorter route.
        let current = loop {
            match self.open.pop() {
                Some((_, node)) if self.state.is_visited(&node) => continue,
                Some((_, node)) => break node,
                None => {
                    trace!(end = %self.state.end, algorithm = %self.algorithm, "Heap exhausted");
                    return self.state.finish(Some(Distance::Infinite));
                }
            }
        };

        self.state.mark_visited(current.clone());
        if current != self.state.end {
            self.relax_neighbors(&current);
        }

        trace!(
            node = %current,
            algorithm = %self.algorithm,
            distance = self.dist.get(&current).copied().unwrap_or_default(),
            heap = self.open.len(),
            "Weighted visit"
        );

        StepEvent::Visit {
            node: current,
            visited: self.state.visited().to_vec(),
            frontier: frontier_members(&self.state, self.open.items()),
            distances: Some(
                self.dist
                    .iter()
                    .map(|(id, d)| (id.clone(), *d))
                    .collect::<BTreeMap<_, _>>(),
            ),
        }
    }

    fn is_done(&self) -> bool {
        self.state.done().is_some()
    }
}
