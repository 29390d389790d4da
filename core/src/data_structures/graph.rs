//! Static weighted directed graph
//!
//! Adjacency-list graph whose edges carry an immutable integer weight. In a
//! flow context the weight is read as the edge capacity; a negative weight
//! keeps the edge in the structure while making it unable to carry flow.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, FlowError, NodeId};

/// Immutable directed edge with integer weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Capacity,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, weight: Capacity) -> Self {
        Self { from, to, weight }
    }

    /// Returns the endpoint opposite to `vertex`
    pub fn other_endpoint(&self, vertex: NodeId) -> Result<NodeId, FlowError> {
        if vertex == self.from {
            Ok(self.to)
        } else if vertex == self.to {
            Ok(self.from)
        } else {
            Err(FlowError::InvalidEndpoint { vertex, from: self.from, to: self.to })
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{} ({})", self.from, self.to, self.weight)
    }
}

/// Adjacency-list weighted directed graph over vertices `[0, V)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedDirectedGraph {
    /// Outgoing edges per vertex, in insertion order
    adjacency: Vec<Vec<Edge>>,
    /// Total number of edges
    edge_count: usize,
}

impl WeightedDirectedGraph {
    /// Creates a graph with `vertex_count` vertices and no edges
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Builds a graph from `(from, to, weight)` triples, in order
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self, FlowError>
    where
        I: IntoIterator<Item = (usize, usize, Capacity)>,
    {
        let mut graph = Self::new(vertex_count);
        for (from, to, weight) in edges {
            graph.add_edge(NodeId(from), NodeId(to), weight)?;
        }
        Ok(graph)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Appends a directed edge; both endpoints must lie in `[0, V)`
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: Capacity,
    ) -> Result<(), FlowError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        self.adjacency[from.as_usize()].push(Edge::new(from, to, weight));
        self.edge_count += 1;
        Ok(())
    }

    /// Outgoing edges of `vertex` in insertion order
    pub fn adj(&self, vertex: NodeId) -> Result<&[Edge], FlowError> {
        self.check_vertex(vertex)?;
        Ok(&self.adjacency[vertex.as_usize()])
    }

    /// All edges grouped by tail vertex (ascending), insertion order within a vertex
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency.iter().flatten()
    }

    pub fn check_vertex(&self, vertex: NodeId) -> Result<(), FlowError> {
        if vertex.as_usize() < self.vertex_count() {
            Ok(())
        } else {
            Err(FlowError::OutOfRange { vertex, vertex_count: self.vertex_count() })
        }
    }
}
