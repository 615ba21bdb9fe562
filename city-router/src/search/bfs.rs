//! Breadth-first search.
//!
//! Settles nodes in order of hop count from the start, so the reported path
//! has the fewest edges. Weights are ignored.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use super::state::{SearchState, frontier_members, validate_endpoints};
use super::{Algorithm, SearchEngine, SearchError, StepEvent};
use crate::graph::{Graph, NodeId};

/// Stepwise BFS over a borrowed graph.
#[derive(Debug, Clone)]
pub struct Bfs<'g> {
    graph: &'g Graph,
    state: SearchState,
    queue: VecDeque<NodeId>,
    /// Nodes that have been enqueued at least once.
    discovered: HashSet<NodeId>,
}

impl<'g> Bfs<'g> {
    /// Create a BFS from `start` to `end`.
    pub fn new(graph: &'g Graph, start: &NodeId, end: &NodeId) -> Result<Self, SearchError> {
        validate_endpoints(graph, start, end)?;

        let mut discovered = HashSet::new();
        discovered.insert(start.clone());

        Ok(Self {
            graph,
            state: SearchState::new(start.clone(), end.clone()),
            queue: VecDeque::from([start.clone()]),
            discovered,
        })
    }
}

impl SearchEngine for Bfs<'_> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
    }

    fn advance(&mut self) -> StepEvent {
        if let Some(done) = self.state.done() {
            return done.clone();
        }
        if self.state.reached_end() {
            return self.state.finish(None);
        }

        let Some(current) = self.queue.pop_front() else {
            trace!(end = %self.state.end, "BFS frontier exhausted");
            return self.state.finish(None);
        };

        self.state.mark_visited(current.clone());

        if current != self.state.end {
            let graph = self.graph;
            for edge in graph.neighbors(&current) {
                if self.discovered.insert(edge.neighbor.clone()) {
                    self.state.set_parent(edge.neighbor.clone(), current.clone());
                    self.queue.push_back(edge.neighbor.clone());
                }
            }
        }

        trace!(
            node = %current,
            visited = self.state.visited().len(),
            queued = self.queue.len(),
            "BFS visit"
        );

        StepEvent::Visit {
            node: current,
            visited: self.state.visited().to_vec(),
            frontier: frontier_members(&self.state, self.queue.iter()),
            distances: None,
        }
    }

    fn is_done(&self) -> bool {
        self.state.done().is_some()
    }
}
