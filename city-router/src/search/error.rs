//! Search error types.

use crate::graph::NodeId;

/// Errors raised when constructing a search engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Start or end node is not in the graph
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// Algorithm name could not be parsed
    #[error("unknown algorithm {0:?} (expected bfs, dfs, dijkstra or astar)")]
    UnknownAlgorithm(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SearchError::UnknownNode(NodeId::parse("atlantis").unwrap());
        assert_eq!(err.to_string(), "unknown node: atlantis");

        let err = SearchError::UnknownAlgorithm("greedy".into());
        assert_eq!(
            err.to_string(),
            "unknown algorithm \"greedy\" (expected bfs, dfs, dijkstra or astar)"
        );
    }
}
