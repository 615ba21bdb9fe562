//! Graph construction error types.

use super::{InvalidNodeId, MAX_WEIGHT, NodeId};

/// Errors raised while building or loading a graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// An edge references a node that has not been added
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A node identifier in a graph document is malformed
    #[error(transparent)]
    InvalidId(#[from] InvalidNodeId),

    /// Node coordinates are NaN or infinite
    #[error("node {0} has non-finite coordinates")]
    NonFiniteCoordinates(NodeId),

    /// An edge weight, given or derived from coordinates, exceeds [`MAX_WEIGHT`]
    #[error("edge {from} - {to} is too heavy (limit {MAX_WEIGHT})")]
    WeightOutOfRange { from: NodeId, to: NodeId },

    /// Failed to read a graph file
    #[error("failed to read graph file: {0}")]
    Io(#[from] std::io::Error),

    /// Graph document is not valid JSON for the expected shape
    #[error("invalid graph document: {0}")]
    Json(#[from] serde_json::Error),
}
