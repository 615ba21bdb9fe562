//! Events produced by stepping a search engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::graph::{NodeId, Weight};

/// A path cost that may be unreachable.
///
/// Orders every finite distance before `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    Finite(Weight),
    Infinite,
}

impl Distance {
    /// The finite value, if any.
    pub fn finite(self) -> Option<Weight> {
        match self {
            Distance::Finite(w) => Some(w),
            Distance::Infinite => None,
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Distance::Infinite)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(w) => write!(f, "{w}"),
            Distance::Infinite => f.write_str("∞"),
        }
    }
}

/// One unit of search progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    /// A node was just settled.
    Visit {
        node: NodeId,
        /// Settled nodes in the order they were settled, `node` last.
        visited: Vec<NodeId>,
        /// Nodes still waiting in the frontier, sorted, without duplicates.
        frontier: Vec<NodeId>,
        /// Best known distances. Only weighted searches report these.
        #[serde(skip_serializing_if = "Option::is_none")]
        distances: Option<BTreeMap<NodeId, Weight>>,
    },

    /// The search is over.
    Done {
        /// Start-to-end path, or empty if the end is unreachable.
        path: Vec<NodeId>,
        visited: Vec<NodeId>,
        /// Cost of `path`. Only weighted searches report this.
        #[serde(skip_serializing_if = "Option::is_none")]
        total_distance: Option<Distance>,
    },
}

impl StepEvent {
    pub fn is_done(&self) -> bool {
        matches!(self, StepEvent::Done { .. })
    }

    /// Settled nodes so far.
    pub fn visited(&self) -> &[NodeId] {
        match self {
            StepEvent::Visit { visited, .. } | StepEvent::Done { visited, .. } => visited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::parse(s).unwrap()
    }

    #[test]
    fn distance_ordering() {
        assert!(Distance::Finite(0) < Distance::Finite(1));
        assert!(Distance::Finite(u64::MAX) < Distance::Infinite);
        assert_eq!(Distance::Finite(7).finite(), Some(7));
        assert_eq!(Distance::Infinite.finite(), None);
        assert!(Distance::Infinite.is_infinite());
    }

    #[test]
    fn distance_display() {
        assert_eq!(Distance::Finite(15).to_string(), "15");
        assert_eq!(Distance::Infinite.to_string(), "∞");
    }

    #[test]
    fn visit_serializes_with_tag() {
        let event = StepEvent::Visit {
            node: id("A"),
            visited: vec![id("A")],
            frontier: vec![id("B")],
            distances: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "event": "visit",
                "node": "A",
                "visited": ["A"],
                "frontier": ["B"],
            })
        );
    }

    #[test]
    fn done_serializes_distance() {
        let event = StepEvent::Done {
            path: vec![],
            visited: vec![id("A")],
            total_distance: Some(Distance::Infinite),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "done");
        assert_eq!(json["total_distance"], "infinite");
        assert!(event.is_done());
        assert_eq!(event.visited(), &[id("A")]);
    }
}
