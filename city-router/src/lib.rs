//! Stepwise route finding through a city graph.
//!
//! Searches (BFS, DFS, Dijkstra, A*) advance one node at a time so a front
//! end can animate them, and trips chain searches across several stops.

pub mod graph;
pub mod search;
pub mod trip;
