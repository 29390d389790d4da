//! Edmonds-Karp shortest augmenting path search
//!
//! One call performs a single breadth-first exploration of the residual
//! network from the source. Forward residuals are read from each vertex's
//! outgoing edges and cancel residuals from its incoming edges, so the
//! search can route flow backwards along an edge to undo an earlier push.
//! The search stops the instant the sink is discovered, which bounds the
//! number of augmentations by O(V * E).
//!
//! When the queue drains without reaching the sink, the vertices that
//! received a predecessor edge (plus the source) form the source side of a
//! minimum cut.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;

use log::{error, trace};

use crate::algorithm::graph::max_flow::{AugmentingPath, AugmentingPathSearch};
use crate::algorithm::traits::{Capacity, EdgeId, FlowError, NodeId};
use crate::data_structures::flow_network::{FlowNetwork, MinCut};

/// BFS colouring of a vertex within one search call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    Frontier,
    Settled,
}

/// Breadth-first augmenting path search.
///
/// Colour, predecessor and queue storage belong to one computation and are
/// reset at the start of every call; flow state lives in the network.
#[derive(Debug, Clone, Default)]
pub struct EdmondsKarpSearch {
    color: Vec<Color>,
    /// Edge used to discover each vertex
    predecessor: Vec<Option<EdgeId>>,
    queue: VecDeque<NodeId>,
    /// Vertices dequeued during the last call
    explored: usize,
}

impl EdmondsKarpSearch {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            color: vec![Color::Unvisited; vertex_count],
            predecessor: vec![None; vertex_count],
            queue: VecDeque::with_capacity(vertex_count),
            explored: 0,
        }
    }

    fn reset(&mut self, vertex_count: usize) {
        self.color.clear();
        self.color.resize(vertex_count, Color::Unvisited);
        self.predecessor.clear();
        self.predecessor.resize(vertex_count, None);
        self.queue.clear();
        self.explored = 0;
    }

    /// Marks `vertex` as discovered through `edge`
    fn discover(&mut self, vertex: NodeId, edge: EdgeId) {
        trace!("discovered vertex {} via edge {}", vertex, edge.as_usize());
        self.color[vertex.as_usize()] = Color::Frontier;
        self.predecessor[vertex.as_usize()] = Some(edge);
        self.queue.push_back(vertex);
    }

    fn is_unvisited(&self, vertex: NodeId) -> bool {
        self.color[vertex.as_usize()] == Color::Unvisited
    }

    /// Walks predecessor edges back from the sink and returns the path in
    /// source-to-sink order with its bottleneck.
    fn reconstruct(&self, network: &FlowNetwork) -> Result<AugmentingPath, FlowError> {
        let source = network.source();
        let mut edges = Vec::new();
        let mut bottleneck = Capacity::MAX;
        let mut vertex = network.sink();

        while vertex != source {
            let id = match self.predecessor[vertex.as_usize()] {
                Some(id) if edges.len() < network.vertex_count() => id,
                _ => {
                    error!("augmenting path reconstruction stopped at vertex {}", vertex);
                    return Err(FlowError::BrokenPredecessorChain { vertex });
                }
            };
            let edge = network.edge(id);
            let previous = edge.other_endpoint(vertex)?;
            bottleneck = bottleneck.min(edge.residual_capacity(previous)?);
            edges.push(id);
            vertex = previous;
        }

        edges.reverse();
        Ok(AugmentingPath::Found { bottleneck, edges })
    }

    /// Source plus every vertex that received a predecessor edge
    fn reachable(&self, network: &FlowNetwork) -> MinCut {
        let mut vertices = vec![network.source()];
        vertices.extend(
            self.predecessor
                .iter()
                .enumerate()
                .filter(|(_, edge)| edge.is_some())
                .map(|(v, _)| NodeId(v)),
        );
        MinCut::new(vertices)
    }
}

impl AugmentingPathSearch for EdmondsKarpSearch {
    fn name(&self) -> &'static str {
        "Edmonds-Karp"
    }

    fn find_augmenting_path(&mut self, network: &FlowNetwork) -> Result<AugmentingPath, FlowError> {
        self.reset(network.vertex_count());

        let source = network.source();
        let sink = network.sink();
        self.color[source.as_usize()] = Color::Frontier;
        self.queue.push_back(source);

        while let Some(v1) = self.queue.pop_front() {
            self.color[v1.as_usize()] = Color::Settled;
            self.explored += 1;

            // forward residual
            for &id in network.outgoing(v1)? {
                let edge = network.edge(id);
                let v2 = edge.to();
                if self.is_unvisited(v2) && edge.residual_capacity(v1)? > 0 {
                    self.discover(v2, id);
                    if v2 == sink {
                        return self.reconstruct(network);
                    }
                }
            }

            // cancel residual
            for &id in network.incoming(v1)? {
                let edge = network.edge(id);
                let v2 = edge.from();
                if self.is_unvisited(v2) && edge.residual_capacity(v1)? > 0 {
                    self.discover(v2, id);
                    if v2 == sink {
                        return self.reconstruct(network);
                    }
                }
            }
        }

        Ok(AugmentingPath::Exhausted { reachable: self.reachable(network) })
    }

    fn explored(&self) -> usize {
        self.explored
    }
}
