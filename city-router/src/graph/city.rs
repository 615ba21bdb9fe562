//! Graph documents and the built-in sample city.
//!
//! A graph document is the JSON form of a city: a list of nodes with plane
//! coordinates and a list of undirected edges whose weight may be omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Category, Graph, GraphError, NodeId, Weight};

/// A node entry in a graph document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub category: Category,
}

/// An edge entry in a graph document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
}

/// Serialized form of a graph.
///
/// ```
/// use city_router::graph::Graph;
///
/// let json = r#"{
///     "nodes": [
///         {"id": "A", "x": 0, "y": 0},
///         {"id": "B", "x": 6, "y": 8, "label": "Bridge", "category": "landmark"}
///     ],
///     "edges": [{"from": "A", "to": "B"}]
/// }"#;
///
/// let graph = Graph::from_json_str(json).unwrap();
/// assert_eq!(graph.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl Graph {
    /// Build a graph from a document.
    ///
    /// Nodes are inserted first, so edges may reference nodes listed in any
    /// order. Nodes without a label use their id as label.
    pub fn from_document(doc: &GraphDocument) -> Result<Self, GraphError> {
        let mut graph = Graph::new();

        for node in &doc.nodes {
            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(GraphError::NonFiniteCoordinates(node.id.clone()));
            }
            let label = node
                .label
                .clone()
                .unwrap_or_else(|| node.id.as_str().to_string());
            graph.add_node(node.id.clone(), node.x, node.y, label, node.category);
        }

        for edge in &doc.edges {
            graph.add_edge(&edge.from, &edge.to, edge.weight)?;
        }

        debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            "Built graph from document"
        );

        Ok(graph)
    }

    /// Parse a JSON graph document.
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        let doc: GraphDocument = serde_json::from_str(json)?;
        Self::from_document(&doc)
    }

    /// Load a JSON graph document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

// (id, x, y, label, category)
const SAMPLE_NODES: [(&str, f64, f64, &str, Category); 17] = [
    ("harbour", 0.0, 0.0, "Harbour", Category::Landmark),
    ("fish-market", 60.0, 0.0, "Fish Market", Category::Commercial),
    ("old-town", 120.0, 0.0, "Old Town", Category::Residential),
    ("cathedral", 200.0, 0.0, "Cathedral", Category::Landmark),
    ("ferry-terminal", 0.0, 80.0, "Ferry Terminal", Category::Station),
    ("city-hall", 60.0, 80.0, "City Hall", Category::Landmark),
    ("central-station", 120.0, 80.0, "Central Station", Category::Station),
    ("museum", 200.0, 80.0, "Museum", Category::Landmark),
    ("riverside-park", 0.0, 160.0, "Riverside Park", Category::Park),
    ("market-square", 60.0, 160.0, "Market Square", Category::Commercial),
    ("university", 120.0, 160.0, "University", Category::Landmark),
    ("hospital", 200.0, 160.0, "Hospital", Category::Junction),
    ("stadium", 0.0, 240.0, "Stadium", Category::Landmark),
    ("suburbs", 60.0, 240.0, "Suburbs", Category::Residential),
    ("botanic-garden", 120.0, 240.0, "Botanic Garden", Category::Park),
    ("airport", 200.0, 240.0, "Airport", Category::Station),
    ("lighthouse-island", 320.0, 320.0, "Lighthouse Island", Category::Landmark),
];

// Diagonals are 60x80 so their rounded length (100) is exact.
const SAMPLE_EDGES: [(&str, &str, Option<Weight>); 27] = [
    ("harbour", "fish-market", None),
    ("fish-market", "old-town", None),
    ("old-town", "cathedral", Some(95)), // narrow streets
    ("harbour", "ferry-terminal", None),
    ("harbour", "city-hall", None),
    ("fish-market", "city-hall", None),
    ("old-town", "central-station", None),
    ("cathedral", "museum", None),
    ("ferry-terminal", "city-hall", None),
    ("city-hall", "central-station", None),
    ("central-station", "museum", None),
    ("ferry-terminal", "riverside-park", None),
    ("city-hall", "university", None),
    ("central-station", "market-square", None),
    ("central-station", "university", None),
    ("museum", "hospital", None),
    ("riverside-park", "market-square", None),
    ("market-square", "university", None),
    ("university", "hospital", Some(120)), // ring road
    ("riverside-park", "stadium", None),
    ("market-square", "suburbs", None),
    ("suburbs", "university", None),
    ("university", "botanic-garden", None),
    ("hospital", "airport", None),
    ("stadium", "suburbs", None),
    ("suburbs", "botanic-garden", None),
    ("botanic-garden", "airport", None),
];

/// Create the built-in sample city.
///
/// Sixteen places on a rough 4x4 grid plus one unreachable island. Every
/// edge weight is at least the straight-line distance between its endpoints,
/// so the A* heuristic stays admissible.
///
/// # Errors
///
/// Fails only if the built-in table holds a malformed id or an edge to a
/// place it does not list.
pub fn sample_city() -> Result<Graph, GraphError> {
    let doc = GraphDocument {
        nodes: SAMPLE_NODES
            .iter()
            .map(|&(id, x, y, label, category)| {
                Ok(NodeSpec {
                    id: NodeId::parse(id)?,
                    x,
                    y,
                    label: Some(label.to_string()),
                    category,
                })
            })
            .collect::<Result<_, GraphError>>()?,
        edges: SAMPLE_EDGES
            .iter()
            .map(|&(from, to, weight)| {
                Ok(EdgeSpec {
                    from: NodeId::parse(from)?,
                    to: NodeId::parse(to)?,
                    weight,
                })
            })
            .collect::<Result<_, GraphError>>()?,
    };

    Graph::from_document(&doc)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::parse(s).unwrap()
    }

    #[test]
    fn sample_city_is_complete() {
        let city = sample_city().unwrap();
        assert_eq!(city.len(), SAMPLE_NODES.len());
        assert_eq!(city.edge_count(), SAMPLE_EDGES.len());
        for (from, to, weight) in SAMPLE_EDGES {
            let stored = city.edge_weight(&id(from), &id(to));
            assert!(stored.is_some(), "{from} - {to} missing");
            if weight.is_some() {
                assert_eq!(stored, weight);
            }
        }
        assert!(city.neighbors(&id("lighthouse-island")).is_empty());
    }

    #[test]
    fn sample_city_weights() {
        let city = sample_city().unwrap();
        assert_eq!(city.edge_weight(&id("harbour"), &id("fish-market")), Some(60));
        assert_eq!(city.edge_weight(&id("harbour"), &id("city-hall")), Some(100));
        assert_eq!(city.edge_weight(&id("cathedral"), &id("old-town")), Some(95));
        assert_eq!(city.edge_weight(&id("hospital"), &id("university")), Some(120));
    }

    #[test]
    fn sample_city_heuristic_is_admissible_per_edge() {
        let city = sample_city().unwrap();
        for from in city.node_ids() {
            for edge in city.neighbors(&from) {
                let straight = city.heuristic(&from, &edge.neighbor).unwrap();
                assert!(
                    straight <= edge.weight as f64,
                    "{from} -> {} weight {} shorter than {straight}",
                    edge.neighbor,
                    edge.weight
                );
            }
        }
    }

    #[test]
    fn document_defaults() {
        let json = r#"{"nodes": [{"id": "solo", "x": 1.5, "y": -2}]}"#;
        let graph = Graph::from_json_str(json).unwrap();
        let node = graph.node(&id("solo")).unwrap();
        assert_eq!(node.label, "solo");
        assert_eq!(node.category, Category::Junction);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn document_with_unknown_endpoint_fails() {
        let json = r#"{
            "nodes": [{"id": "A", "x": 0, "y": 0}],
            "edges": [{"from": "A", "to": "B", "weight": 3}]
        }"#;
        let err = Graph::from_json_str(json).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(ref n) if n == &id("B")));
    }

    #[test]
    fn document_with_bad_id_fails() {
        let json = r#"{"nodes": [{"id": "two words", "x": 0, "y": 0}]}"#;
        let err = Graph::from_json_str(json).unwrap_err();
        assert!(matches!(err, GraphError::Json(_)));
    }

    #[test]
    fn document_rejects_negative_weight() {
        let json = r#"{
            "nodes": [{"id": "A", "x": 0, "y": 0}, {"id": "B", "x": 1, "y": 0}],
            "edges": [{"from": "A", "to": "B", "weight": -1}]
        }"#;
        assert!(matches!(
            Graph::from_json_str(json).unwrap_err(),
            GraphError::Json(_)
        ));
    }

    #[test]
    fn from_document_rejects_nan() {
        let doc = GraphDocument {
            nodes: vec![NodeSpec {
                id: id("nan"),
                x: f64::NAN,
                y: 0.0,
                label: None,
                category: Category::Park,
            }],
            edges: vec![],
        };
        let err = Graph::from_document(&doc).unwrap_err();
        assert!(matches!(err, GraphError::NonFiniteCoordinates(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "nodes": [
                    {{"id": "A", "x": 0, "y": 0}},
                    {{"id": "B", "x": 0, "y": 7}}
                ],
                "edges": [{{"from": "A", "to": "B"}}]
            }}"#
        )
        .unwrap();

        let graph = Graph::load(file.path()).unwrap();
        assert_eq!(graph.edge_weight(&id("B"), &id("A")), Some(7));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Graph::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }
}
