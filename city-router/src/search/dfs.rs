//! Depth-first search.
//!
//! Explores the most recently pushed node first. Pushes are speculative and
//! the visited check happens on pop, so a node may sit on the stack several
//! times; only its first pop settles it. The path found is whatever the
//! exploration order produced and carries no optimality guarantee.

use tracing::trace;

use super::state::{SearchState, frontier_members, validate_endpoints};
use super::{Algorithm, SearchEngine, SearchError, StepEvent};
use crate::graph::{Graph, NodeId};

/// Stack entry: a node and the node that pushed it.
#[derive(Debug, Clone)]
struct Pending {
    node: NodeId,
    from: Option<NodeId>,
}

/// Stepwise DFS over a borrowed graph.
#[derive(Debug, Clone)]
pub struct Dfs<'g> {
    graph: &'g Graph,
    state: SearchState,
    stack: Vec<Pending>,
}

impl<'g> Dfs<'g> {
    /// Create a DFS from `start` to `end`.
    pub fn new(graph: &'g Graph, start: &NodeId, end: &NodeId) -> Result<Self, SearchError> {
        validate_endpoints(graph, start, end)?;

        Ok(Self {
            graph,
            state: SearchState::new(start.clone(), end.clone()),
            stack: vec![Pending {
                node: start.clone(),
                from: None,
            }],
        })
    }
}

impl SearchEngine for Dfs<'_> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
    }

    fn advance(&mut self) -> StepEvent {
        if let Some(done) = self.state.done() {
            return done.clone();
        }
        if self.state.reached_end() {
            return self.state.finish(None);
        }

        // Discard entries for nodes settled since they were pushed.
        let current = loop {
            match self.stack.pop() {
                Some(entry) if self.state.is_visited(&entry.node) => continue,
                Some(entry) => break entry,
                None => {
                    trace!(end = %self.state.end, "DFS stack exhausted");
                    return self.state.finish(None);
                }
            }
        };

        if let Some(from) = current.from {
            self.state.set_parent(current.node.clone(), from);
        }
        self.state.mark_visited(current.node.clone());

        if current.node != self.state.end {
            // Reverse so the first-listed neighbor is popped first.
            let graph = self.graph;
            for edge in graph.neighbors(&current.node).iter().rev() {
                if !self.state.is_visited(&edge.neighbor) {
                    self.stack.push(Pending {
                        node: edge.neighbor.clone(),
                        from: Some(current.node.clone()),
                    });
                }
            }
        }

        trace!(
            node = %current.node,
            visited = self.state.visited().len(),
            stacked = self.stack.len(),
            "DFS visit"
        );

        StepEvent::Visit {
            node: current.node,
            visited: self.state.visited().to_vec(),
            frontier: frontier_members(&self.state, self.stack.iter().map(|p| &p.node)),
            distances: None,
        }
    }

    fn is_done(&self) -> bool {
        self.state.done().is_some()
    }
}
