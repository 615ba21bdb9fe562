//! Bookkeeping shared by every engine: settled nodes, parents, and the
//! terminal event.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::error::SearchError;
use super::event::{Distance, StepEvent};
use crate::graph::{Graph, NodeId};

/// Check that both endpoints exist before any step runs.
pub(crate) fn validate_endpoints(
    graph: &Graph,
    start: &NodeId,
    end: &NodeId,
) -> Result<(), SearchError> {
    for id in [start, end] {
        if !graph.contains(id) {
            return Err(SearchError::UnknownNode(id.clone()));
        }
    }
    Ok(())
}

/// Per-search state: what has been settled, how each node was reached, and
/// whether the search has ended.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub start: NodeId,
    pub end: NodeId,
    visited: Vec<NodeId>,
    visited_set: HashSet<NodeId>,
    /// Predecessor of each reached node. The start maps to `None`.
    parent: HashMap<NodeId, Option<NodeId>>,
    /// Set once `end` is settled; the next step reports `Done`.
    reached_end: bool,
    done: Option<StepEvent>,
}

impl SearchState {
    pub fn new(start: NodeId, end: NodeId) -> Self {
        let mut parent = HashMap::new();
        parent.insert(start.clone(), None);
        Self {
            start,
            end,
            visited: Vec::new(),
            visited_set: HashSet::new(),
            parent,
            reached_end: false,
            done: None,
        }
    }

    pub fn is_visited(&self, id: &NodeId) -> bool {
        self.visited_set.contains(id)
    }

    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.parent.insert(id, Some(parent));
    }

    /// Settle a node. Notes when the end has been reached.
    pub fn mark_visited(&mut self, id: NodeId) {
        if id == self.end {
            self.reached_end = true;
        }
        self.visited_set.insert(id.clone());
        self.visited.push(id);
    }

    pub fn visited(&self) -> &[NodeId] {
        &self.visited
    }

    pub fn reached_end(&self) -> bool {
        self.reached_end
    }

    /// The cached terminal event, once the search has finished.
    pub fn done(&self) -> Option<&StepEvent> {
        self.done.as_ref()
    }

    /// Walk parents back from the end. Empty if the end was never reached.
    pub fn path(&self) -> Vec<NodeId> {
        if !self.reached_end {
            return Vec::new();
        }

        let mut path = vec![self.end.clone()];
        let mut current = &self.end;
        while let Some(Some(prev)) = self.parent.get(current) {
            path.push(prev.clone());
            current = prev;
        }
        path.reverse();
        path
    }

    /// Build the terminal event and remember it so repeated calls agree.
    pub fn finish(&mut self, total_distance: Option<Distance>) -> StepEvent {
        let path = self.path();
        trace!(
            start = %self.start,
            end = %self.end,
            hops = path.len().saturating_sub(1),
            visited = self.visited.len(),
            "Search finished"
        );
        let event = StepEvent::Done {
            path,
            visited: self.visited.clone(),
            total_distance,
        };
        self.done = Some(event.clone());
        event
    }
}

/// Sorted, de-duplicated frontier membership, excluding settled nodes.
pub(crate) fn frontier_members<'a>(
    state: &SearchState,
    pending: impl Iterator<Item = &'a NodeId>,
) -> Vec<NodeId> {
    let mut members: Vec<NodeId> = pending
        .filter(|id| !state.is_visited(id))
        .cloned()
        .collect();
    members.sort();
    members.dedup();
    members
}
