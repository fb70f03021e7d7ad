use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{EdgeKind, NodeId};

/// A directed dependency `tail -> head` labelled with a kind.
///
/// Relevance flows backwards: from `head` to `tail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub tail: NodeId,
    pub head: NodeId,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(tail: impl Into<NodeId>, head: impl Into<NodeId>, kind: EdgeKind) -> Self {
        Self { tail: tail.into(), head: head.into(), kind }
    }
}

/// Immutable-after-construction dependency graph.
///
/// Keeps the declared vertex list in input order and the backward adjacency
/// `head -> [(tail, kind)]` in edge insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyGraph {
    vertices: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    backward: HashMap<NodeId, Vec<(NodeId, EdgeKind)>>,
    endpoints: HashSet<NodeId>,
    edges: Vec<Edge>,
}

impl DependencyGraph {
    /// Create a graph with the given declared vertices and no edges.
    pub fn new<I, S>(vertices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        let mut graph = Self::default();
        for v in vertices {
            let v = v.into();
            if !graph.index.contains_key(&v) {
                graph.index.insert(v.clone(), graph.vertices.len());
                graph.vertices.push(v);
            }
        }
        graph
    }

    pub fn from_parts<I, S>(vertices: I, edges: impl IntoIterator<Item = Edge>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        let mut graph = Self::new(vertices);
        for edge in edges {
            graph.add_edge(edge);
        }
        graph
    }

    /// Append an edge to the backward adjacency of its head.
    ///
    /// Endpoints need not be declared vertices; they are still usable as
    /// nodes but are left out of the dependency matrix.
    pub fn add_edge(&mut self, edge: Edge) {
        for endpoint in [&edge.tail, &edge.head] {
            if !self.index.contains_key(endpoint) {
                warn!(node = %endpoint, "edge endpoint is not a declared vertex");
            }
        }
        self.backward
            .entry(edge.head.clone())
            .or_default()
            .push((edge.tail.clone(), edge.kind));
        self.endpoints.insert(edge.tail.clone());
        self.endpoints.insert(edge.head.clone());
        self.edges.push(edge);
    }

    /// Nodes that `node` depends on, with the kind of each dependency.
    pub fn dependencies_of(&self, node: &str) -> &[(NodeId, EdgeKind)] {
        self.backward.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn vertices(&self) -> &[NodeId] {
        &self.vertices
    }

    /// Edges in insertion order, including those with undeclared endpoints.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True if `node` is declared or appears as an edge endpoint.
    pub fn contains(&self, node: &str) -> bool {
        self.index.contains_key(node) || self.endpoints.contains(node)
    }

    /// |V| x |V| table indexed by declared vertex order; `[tail][head]` holds
    /// the kind of the last edge between them.
    pub fn dependency_matrix(&self) -> Vec<Vec<Option<EdgeKind>>> {
        let n = self.vertices.len();
        let mut matrix = vec![vec![None; n]; n];
        for edge in &self.edges {
            if let (Some(&t), Some(&h)) = (self.index.get(&edge.tail), self.index.get(&edge.head)) {
                matrix[t][h] = Some(edge.kind);
            }
        }
        matrix
    }
}
