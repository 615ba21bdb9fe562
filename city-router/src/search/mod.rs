//! Interruptible graph searches.
//!
//! Every engine is a plain state machine bound to a graph and a pair of
//! endpoints. Each call to [`SearchEngine::advance`] settles at most one node
//! and reports what happened, so a caller can animate the search at whatever
//! pace it likes:
//!
//! ```text
//! Ready --advance--> Visit --advance--> ... --advance--> Done
//! ```
//!
//! The call that settles the end node returns its `Visit`; the next call
//! returns `Done`. Once finished, an engine keeps returning the same `Done`.

mod bfs;
mod dfs;
mod error;
mod event;
mod queue;
mod state;
mod weighted;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeId};

pub use bfs::Bfs;
pub use dfs::Dfs;
pub use error::SearchError;
pub use event::{Distance, StepEvent};
pub use queue::PriorityQueue;
pub use weighted::WeightedSearch;

/// The traversal strategies on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::AStar,
    ];

    /// Returns true if the algorithm tracks path cost itself.
    ///
    /// Unweighted searches report no distance; callers derive one from the
    /// edges along the returned path.
    pub fn is_weighted(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }

    /// Build an engine for this algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownNode`] if either endpoint is not in the graph.
    pub fn engine<'g>(
        self,
        graph: &'g Graph,
        start: &NodeId,
        end: &NodeId,
    ) -> Result<Box<dyn SearchEngine + 'g>, SearchError> {
        let engine: Box<dyn SearchEngine + 'g> = match self {
            Algorithm::Bfs => Box::new(Bfs::new(graph, start, end)?),
            Algorithm::Dfs => Box::new(Dfs::new(graph, start, end)?),
            Algorithm::Dijkstra => Box::new(WeightedSearch::dijkstra(graph, start, end)?),
            Algorithm::AStar => Box::new(WeightedSearch::astar(graph, start, end)?),
        };
        Ok(engine)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Algorithm::Bfs),
            "dfs" | "depth-first" => Ok(Algorithm::Dfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            _ => Err(SearchError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A search that can be advanced one node at a time.
pub trait SearchEngine {
    /// Which algorithm this engine runs.
    fn algorithm(&self) -> Algorithm;

    /// Perform one unit of work.
    ///
    /// Returns `Visit` when a node was settled and `Done` when the search
    /// has finished. Callers should stop after the first `Done`.
    fn advance(&mut self) -> StepEvent;

    /// Returns true once `Done` has been produced.
    fn is_done(&self) -> bool;
}

/// Drive an engine to completion, collecting every event including `Done`.
pub fn run_to_end(engine: &mut dyn SearchEngine) -> Vec<StepEvent> {
    let mut events = Vec::new();
    loop {
        let event = engine.advance();
        let done = event.is_done();
        events.push(event);
        if done {
            return events;
        }
    }
}
