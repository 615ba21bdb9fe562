//! Node identity and attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid node identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid node id: {reason}")]
pub struct InvalidNodeId {
    reason: &'static str,
}

/// Identifier of a place in the city graph.
///
/// Identifiers are non-empty and contain no whitespace, so they can be typed
/// on a command line and used as JSON keys unchanged.
///
/// # Examples
///
/// ```
/// use city_router::graph::NodeId;
///
/// let museum = NodeId::parse("museum").unwrap();
/// assert_eq!(museum.as_str(), "museum");
///
/// assert!(NodeId::parse("").is_err());
/// assert!(NodeId::parse("city hall").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Parse a node identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidNodeId> {
        if s.is_empty() {
            return Err(InvalidNodeId {
                reason: "must not be empty",
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidNodeId {
                reason: "must not contain whitespace",
            });
        }
        Ok(NodeId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeId {
    type Error = InvalidNodeId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NodeId::parse(&value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of place a node represents. Only used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Landmark,
    Station,
    Park,
    Residential,
    Commercial,
    #[default]
    Junction,
}

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another point.
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A place in the city graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    pub label: String,
    pub category: Category,
}

impl Node {
    pub fn new(id: NodeId, x: f64, y: f64, label: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            position: Position::new(x, y),
            label: label.into(),
            category,
        }
    }
}
