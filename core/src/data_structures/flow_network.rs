//! Flow network representation with residual capacity tracking
//!
//! A flow network is derived from a static [`WeightedDirectedGraph`]: every
//! static edge becomes exactly one [`FlowEdge`] stored in an arena, and the
//! arena index is registered both in the tail's outgoing list and in the
//! head's incoming list. The two lists therefore share one flow value, so
//! forward residuals and cancel residuals can be enumerated from either
//! endpoint in O(degree) without duplicated, drifting state.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, EdgeId, FlowError, NodeId};
use crate::data_structures::graph::{Edge, WeightedDirectedGraph};

/// Flow edge: one static edge plus the flow currently committed to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Tail vertex
    from: NodeId,
    /// Head vertex
    to: NodeId,
    /// Original edge capacity
    capacity: Capacity,
    /// Current flow through edge
    flow: Capacity,
}

impl FlowEdge {
    /// Create new flow edge carrying no flow
    pub fn new(edge: &Edge) -> Self {
        Self {
            from: edge.from,
            to: edge.to,
            capacity: edge.weight,
            flow: 0,
        }
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn flow(&self) -> Capacity {
        self.flow
    }

    /// Returns the endpoint opposite to `vertex`
    pub fn other_endpoint(&self, vertex: NodeId) -> Result<NodeId, FlowError> {
        if vertex == self.from {
            Ok(self.to)
        } else if vertex == self.to {
            Ok(self.from)
        } else {
            Err(self.invalid_endpoint(vertex))
        }
    }

    /// Residual capacity when leaving through this edge from `vertex`.
    ///
    /// From the tail this is `capacity - flow`, from the head it is the
    /// cancellable `flow`. Edges with negative capacity never carry flow.
    pub fn residual_capacity(&self, vertex: NodeId) -> Result<Capacity, FlowError> {
        if vertex != self.from && vertex != self.to {
            return Err(self.invalid_endpoint(vertex));
        }
        if self.capacity < 0 {
            return Ok(0);
        }
        if vertex == self.from {
            Ok(self.capacity - self.flow)
        } else {
            Ok(self.flow)
        }
    }

    /// Commits `amount` units of flow leaving from `vertex`.
    ///
    /// The amount is not clamped: pushing more than the residual capacity
    /// breaks the capacity invariant, which the correctness validator reports.
    pub fn push_flow(&mut self, amount: Capacity, vertex: NodeId) -> Result<(), FlowError> {
        if vertex == self.from {
            self.flow += amount;
            Ok(())
        } else if vertex == self.to {
            self.flow -= amount;
            Ok(())
        } else {
            Err(self.invalid_endpoint(vertex))
        }
    }

    /// Whether `0 <= flow <= capacity` (or `flow == 0` for inert edges)
    pub fn is_feasible(&self) -> bool {
        if self.capacity < 0 {
            self.flow == 0
        } else {
            0 <= self.flow && self.flow <= self.capacity
        }
    }

    fn invalid_endpoint(&self, vertex: NodeId) -> FlowError {
        FlowError::InvalidEndpoint { vertex, from: self.from, to: self.to }
    }
}

impl fmt::Display for FlowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{} {}/{}", self.from, self.to, self.flow, self.capacity)
    }
}

/// Flow carried by one edge of a finished computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeFlow {
    pub edge: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Capacity,
    pub flow: Capacity,
}

/// Source side of a minimum cut
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Vertices reachable from the source in the final residual graph, ascending
    source_side: Vec<NodeId>,
}

impl MinCut {
    /// Builds a cut from any collection of vertices; duplicates are dropped
    pub fn new(mut vertices: Vec<NodeId>) -> Self {
        vertices.sort_unstable();
        vertices.dedup();
        Self { source_side: vertices }
    }

    pub fn vertices(&self) -> &[NodeId] {
        &self.source_side
    }

    pub fn contains(&self, vertex: NodeId) -> bool {
        self.source_side.binary_search(&vertex).is_ok()
    }

    pub fn len(&self) -> usize {
        self.source_side.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_side.is_empty()
    }
}

/// Flow network with shared forward/backward edge indexing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNetwork {
    /// Arena of flow edges, one per static edge
    edges: Vec<FlowEdge>,
    /// Outgoing arena indices per vertex
    outgoing: Vec<Vec<EdgeId>>,
    /// Incoming arena indices per vertex
    incoming: Vec<Vec<EdgeId>>,
    source: NodeId,
    sink: NodeId,
}

impl FlowNetwork {
    /// Derives a flow network from `graph` with the given terminals.
    ///
    /// Fails with `IdenticalTerminals` when `source == sink`. The source
    /// must have no incoming edges and the sink no outgoing edges; this is
    /// not checked.
    pub fn new(
        graph: &WeightedDirectedGraph,
        source: NodeId,
        sink: NodeId,
    ) -> Result<Self, FlowError> {
        graph.check_vertex(source)?;
        graph.check_vertex(sink)?;
        if source == sink {
            return Err(FlowError::IdenticalTerminals { vertex: source });
        }

        let vertex_count = graph.vertex_count();
        let mut network = Self {
            edges: Vec::with_capacity(graph.edge_count()),
            outgoing: vec![Vec::new(); vertex_count],
            incoming: vec![Vec::new(); vertex_count],
            source,
            sink,
        };

        for edge in graph.edges() {
            let id = EdgeId(network.edges.len());
            network.edges.push(FlowEdge::new(edge));
            network.outgoing[edge.from.as_usize()].push(id);
            network.incoming[edge.to.as_usize()].push(id);
        }

        Ok(network)
    }

    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    /// Edges leaving `vertex`, in construction order
    pub fn outgoing(&self, vertex: NodeId) -> Result<&[EdgeId], FlowError> {
        self.check_vertex(vertex)?;
        Ok(&self.outgoing[vertex.as_usize()])
    }

    /// Edges entering `vertex`, in construction order
    pub fn incoming(&self, vertex: NodeId) -> Result<&[EdgeId], FlowError> {
        self.check_vertex(vertex)?;
        Ok(&self.incoming[vertex.as_usize()])
    }

    /// # Panics
    /// If `id` was not issued by this network.
    pub fn edge(&self, id: EdgeId) -> &FlowEdge {
        &self.edges[id.as_usize()]
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &FlowEdge)> + '_ {
        self.edges.iter().enumerate().map(|(i, edge)| (EdgeId(i), edge))
    }

    /// Network flow value: sum of flow over edges leaving the source
    pub fn total_flow_from_source(&self) -> Capacity {
        self.outgoing[self.source.as_usize()]
            .iter()
            .map(|&id| self.edge(id).flow)
            .sum()
    }

    /// Pushes `amount` along `path`, which must start at the source.
    ///
    /// Each edge is traversed from the current vertex, forward or backward,
    /// and the current vertex then moves to its other endpoint.
    pub fn push_along(&mut self, path: &[EdgeId], amount: Capacity) -> Result<(), FlowError> {
        let mut current = self.source;
        for &id in path {
            let edge = self.edges.get_mut(id.as_usize()).ok_or_else(|| {
                FlowError::InvariantViolation(format!("unknown edge {}", id.as_usize()))
            })?;
            edge.push_flow(amount, current)?;
            current = edge.other_endpoint(current)?;
        }
        Ok(())
    }

    /// Vertices visited when walking `path` from the source
    pub fn path_vertices(&self, path: &[EdgeId]) -> Result<Vec<NodeId>, FlowError> {
        let mut current = self.source;
        let mut vertices = Vec::with_capacity(path.len() + 1);
        vertices.push(current);
        for &id in path {
            current = self.edge(id).other_endpoint(current)?;
            vertices.push(current);
        }
        Ok(vertices)
    }

    /// Flow on every edge, in arena order
    pub fn flow_assignment(&self) -> Vec<EdgeFlow> {
        self.edges()
            .map(|(id, edge)| EdgeFlow {
                edge: id,
                from: edge.from,
                to: edge.to,
                capacity: edge.capacity,
                flow: edge.flow,
            })
            .collect()
    }

    /// Total capacity of edges leaving the cut's source side
    pub fn cut_capacity(&self, cut: &MinCut) -> Capacity {
        self.edges
            .iter()
            .filter(|edge| cut.contains(edge.from) && !cut.contains(edge.to))
            .map(|edge| edge.capacity.max(0))
            .sum()
    }

    fn check_vertex(&self, vertex: NodeId) -> Result<(), FlowError> {
        if vertex.as_usize() < self.vertex_count() {
            Ok(())
        } else {
            Err(FlowError::OutOfRange { vertex, vertex_count: self.vertex_count() })
        }
    }
}

impl fmt::Display for FlowNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vertex, out) in self.outgoing.iter().enumerate() {
            writeln!(f, "Vertex {}:", vertex)?;
            for &id in out {
                writeln!(f, "\t{}", self.edge(id))?;
            }
        }
        Ok(())
    }
}
