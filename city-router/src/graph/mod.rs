//! Weighted undirected city graph.
//!
//! The graph is built once (programmatically, from a JSON document, or from
//! the built-in sample city) and then shared read-only by every search.
//! All construction invariants are checked at insertion time so that the
//! search engines never have to deal with dangling edges.

mod city;
mod error;
mod node;

use std::collections::HashMap;

pub use city::{EdgeSpec, GraphDocument, NodeSpec, sample_city};
pub use error::GraphError;
pub use node::{Category, InvalidNodeId, Node, NodeId, Position};

/// Edge weight. Weights are non-negative integers.
pub type Weight = u64;

/// Heaviest edge [`Graph::add_edge`] accepts. Sums of path and trip
/// distances stay far below `u64::MAX` with this bound.
pub const MAX_WEIGHT: Weight = u32::MAX as Weight;

/// One entry in a node's adjacency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub neighbor: NodeId,
    pub weight: Weight,
}

/// A weighted undirected graph of places.
///
/// # Invariants
///
/// - Every edge endpoint is a node of the graph
/// - `edge_weight(u, v) == edge_weight(v, u)` for every pair
///
/// # Examples
///
/// ```
/// use city_router::graph::{Category, Graph, NodeId};
///
/// let a = NodeId::parse("A").unwrap();
/// let b = NodeId::parse("B").unwrap();
///
/// let mut graph = Graph::new();
/// graph.add_node(a.clone(), 0.0, 0.0, "Start", Category::Junction);
/// graph.add_node(b.clone(), 3.0, 4.0, "End", Category::Junction);
///
/// // Weight defaults to the rounded straight-line distance
/// assert_eq!(graph.add_edge(&a, &b, None).unwrap(), 5);
/// assert_eq!(graph.edge_weight(&b, &a), Some(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: HashMap<NodeId, Node>,
    adjacency: HashMap<NodeId, Vec<Edge>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, replacing any existing node with the same id.
    ///
    /// Existing edges of a replaced node are kept with their weights.
    pub fn add_node(
        &mut self,
        id: NodeId,
        x: f64,
        y: f64,
        label: impl Into<String>,
        category: Category,
    ) {
        let node = Node::new(id.clone(), x, y, label, category);
        self.nodes.insert(id, node);
    }

    /// Connect two existing nodes in both directions.
    ///
    /// Without an explicit weight the edge gets the straight-line distance
    /// between the endpoints, rounded to the nearest integer. Adding a pair
    /// that is already connected replaces its weight. Returns the weight used.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NodeNotFound`] if either endpoint is missing
    /// - [`GraphError::NonFiniteCoordinates`] if the weight is derived from a
    ///   node placed at NaN or infinity
    /// - [`GraphError::WeightOutOfRange`] if the weight exceeds [`MAX_WEIGHT`]
    pub fn add_edge(
        &mut self,
        from: &NodeId,
        to: &NodeId,
        weight: Option<Weight>,
    ) -> Result<Weight, GraphError> {
        let from_pos = self.position(from)?;
        let to_pos = self.position(to)?;

        let weight = match weight {
            Some(w) => w,
            None => {
                for (id, pos) in [(from, from_pos), (to, to_pos)] {
                    if !pos.is_finite() {
                        return Err(GraphError::NonFiniteCoordinates(id.clone()));
                    }
                }
                // Saturates on overflow, which the range check below rejects
                from_pos.distance_to(&to_pos).round() as Weight
            }
        };
        if weight > MAX_WEIGHT {
            return Err(GraphError::WeightOutOfRange {
                from: from.clone(),
                to: to.clone(),
            });
        }

        self.insert_directed(from, to, weight);
        if from != to {
            self.insert_directed(to, from, weight);
        }

        Ok(weight)
    }

    fn position(&self, id: &NodeId) -> Result<Position, GraphError> {
        self.nodes
            .get(id)
            .map(|n| n.position)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    fn insert_directed(&mut self, from: &NodeId, to: &NodeId, weight: Weight) {
        let edges = self.adjacency.entry(from.clone()).or_default();
        match edges.iter_mut().find(|e| &e.neighbor == to) {
            Some(edge) => edge.weight = weight,
            None => edges.push(Edge {
                neighbor: to.clone(),
                weight,
            }),
        }
    }

    /// Neighbors of a node in insertion order.
    ///
    /// Returns an empty slice for unknown nodes and nodes without edges.
    pub fn neighbors(&self, id: &NodeId) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Straight-line distance between two nodes, or `None` if either is
    /// unknown or placed at non-finite coordinates.
    ///
    /// This is the A* heuristic. It is admissible as long as no edge is
    /// lighter than the distance between its endpoints.
    pub fn heuristic(&self, a: &NodeId, b: &NodeId) -> Option<f64> {
        let a = self.nodes.get(a)?;
        let b = self.nodes.get(b)?;
        Some(a.position.distance_to(&b.position)).filter(|d| d.is_finite())
    }

    /// Weight of the edge between two nodes, if they are adjacent.
    pub fn edge_weight(&self, from: &NodeId, to: &NodeId) -> Option<Weight> {
        self.neighbors(from)
            .iter()
            .find(|e| &e.neighbor == to)
            .map(|e| e.weight)
    }

    /// Sum of the edge weights along a path.
    ///
    /// Returns `None` if two consecutive nodes are not adjacent or the sum
    /// does not fit in a [`Weight`]. Empty and single-node paths have
    /// distance zero.
    pub fn path_distance(&self, path: &[NodeId]) -> Option<Weight> {
        path.windows(2).try_fold(0, |total: Weight, pair| {
            total.checked_add(self.edge_weight(&pair[0], &pair[1])?)
        })
    }

    /// Look up a node.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns true if the node exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All node ids, sorted.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.adjacency.values().map(Vec::len).sum();
        let self_loops = self
            .adjacency
            .iter()
            .flat_map(|(from, edges)| edges.iter().filter(move |e| &e.neighbor == from))
            .count();
        (directed + self_loops) / 2
    }
}
