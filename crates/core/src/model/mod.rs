//! Core data model for dependency graphs.
//!
//! The graph is stored as a backward adjacency: for each node we keep the
//! ordered list of `(tail, kind)` pairs through which relevance flows away
//! from it. Nodes are opaque string identifiers.

mod graph;
mod kind;
mod weights;

pub use graph::{DependencyGraph, Edge};
pub use kind::EdgeKind;
pub use weights::{WeightError, WeightTable, WeightsConfig};

/// Identifier of a node in the dependency graph.
pub type NodeId = String;
