//! Capacitated bipartite assignment
//!
//! Left members may each take up to `left_capacity` units, right members up
//! to `right_capacity`, and every allowed pair carries at most
//! `pair_capacity`. The largest feasible allocation is a maximum flow on
//!
//! ```text
//! source --left_capacity--> left_i --pair_capacity--> right_j --right_capacity--> sink
//! ```
//!
//! and the per-pair allocation is read straight off the flow assignment.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::max_flow::{MaxFlowConfig, MaxFlowSolver};
use crate::algorithm::traits::{Capacity, FlowError, NodeId};
use crate::data_structures::graph::WeightedDirectedGraph;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentProblem {
    pub left: usize,
    pub right: usize,
    pub left_capacity: Capacity,
    pub right_capacity: Capacity,
    pub pair_capacity: Capacity,
    /// Allowed `(left, right)` pairs
    pub pairs: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResult {
    /// Total units allocated
    pub total: Capacity,
    /// `allocation[i][j]` units between left `i` and right `j`
    pub allocation: Vec<Vec<Capacity>>,
}

impl AssignmentProblem {
    fn left_vertex(&self, i: usize) -> NodeId {
        NodeId(i)
    }

    fn right_vertex(&self, j: usize) -> NodeId {
        NodeId(self.left + j)
    }

    fn source(&self) -> NodeId {
        NodeId(self.left + self.right)
    }

    fn sink(&self) -> NodeId {
        NodeId(self.left + self.right + 1)
    }

    /// Flow graph: left members, right members, source, sink
    pub fn flow_graph(&self) -> Result<WeightedDirectedGraph, FlowError> {
        let mut graph = WeightedDirectedGraph::new(self.left + self.right + 2);

        for i in 0..self.left {
            graph.add_edge(self.source(), self.left_vertex(i), self.left_capacity)?;
        }
        for j in 0..self.right {
            graph.add_edge(self.right_vertex(j), self.sink(), self.right_capacity)?;
        }
        for &(i, j) in &self.pairs {
            if i >= self.left {
                return Err(FlowError::OutOfRange { vertex: NodeId(i), vertex_count: self.left });
            }
            if j >= self.right {
                return Err(FlowError::OutOfRange { vertex: NodeId(j), vertex_count: self.right });
            }
            graph.add_edge(self.left_vertex(i), self.right_vertex(j), self.pair_capacity)?;
        }

        Ok(graph)
    }

    pub fn solve(&self) -> Result<AssignmentResult, FlowError> {
        self.solve_with(MaxFlowConfig::default())
    }

    pub fn solve_with(&self, config: MaxFlowConfig) -> Result<AssignmentResult, FlowError> {
        let graph = self.flow_graph()?;
        let (result, _) = MaxFlowSolver::new(config).solve(&graph, self.source(), self.sink())?;

        let mut allocation = vec![vec![0; self.right]; self.left];
        for edge in &result.flow_assignment {
            let (from, to) = (edge.from.as_usize(), edge.to.as_usize());
            if from < self.left && (self.left..self.left + self.right).contains(&to) {
                allocation[from][to - self.left] += edge.flow;
            }
        }

        Ok(AssignmentResult { total: result.max_flow, allocation })
    }
}
