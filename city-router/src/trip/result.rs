//! Trip outcomes.

use std::time::Duration;

use serde::Serialize;

use crate::graph::{NodeId, Weight};
use crate::search::Algorithm;

/// Outcome of one leg that found a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegResult {
    /// Position of the leg within the trip, starting at zero.
    pub leg_index: usize,
    pub from: NodeId,
    pub to: NodeId,
    pub path: Vec<NodeId>,
    /// Physical length of `path`, whatever algorithm produced it.
    pub total_distance: Weight,
    pub nodes_visited: usize,
}

impl LegResult {
    /// Number of edges along the path.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Summary of a trip whose legs all succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripResult {
    pub algorithm: Algorithm,
    pub legs: Vec<LegResult>,
    pub total_distance: Weight,
    /// Sum of per-leg visit counts; a node settled in two legs counts twice.
    pub total_nodes_visited: usize,
    /// Distinct nodes settled across all legs, in first-settled order.
    pub explored: Vec<NodeId>,
    pub elapsed: Duration,
}

impl TripResult {
    pub fn total_legs(&self) -> usize {
        self.legs.len()
    }

    /// The whole trip as one node sequence, without repeating the stop
    /// shared by consecutive legs.
    pub fn full_path(&self) -> Vec<NodeId> {
        let mut full: Vec<NodeId> = Vec::new();
        for leg in &self.legs {
            let skip = usize::from(full.last().is_some_and(|last| leg.path.first() == Some(last)));
            full.extend(leg.path.iter().skip(skip).cloned());
        }
        full
    }
}

/// How a trip that ran to the end turned out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TripOutcome {
    /// Every leg found a path.
    Completed(TripResult),

    /// A leg exhausted its frontier; later legs were not attempted.
    NoPathForLeg {
        leg_index: usize,
        from: NodeId,
        to: NodeId,
        /// Legs that succeeded before the failure.
        completed: Vec<LegResult>,
        total_nodes_visited: usize,
        elapsed: Duration,
    },
}

impl TripOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TripOutcome::Completed(_))
    }

    /// The trip summary, if every leg succeeded.
    pub fn completed(&self) -> Option<&TripResult> {
        match self {
            TripOutcome::Completed(result) => Some(result),
            TripOutcome::NoPathForLeg { .. } => None,
        }
    }
}
