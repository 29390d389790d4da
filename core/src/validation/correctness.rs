//! Flow Correctness Verification
//!
//! Checks a flow network and its reported cut against the invariants any
//! maximum flow must satisfy:
//!
//! - **Capacity feasibility**: `0 <= flow <= capacity` on every edge, and
//!   `flow == 0` on edges with negative capacity
//! - **Conservation**: inflow equals outflow at every vertex except the
//!   source and the sink
//! - **Cut soundness**: the source side contains the source and not the sink
//! - **Max-flow = min-cut**: the flow value equals the capacity of the edges
//!   leaving the source side
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::traits::{Capacity, EdgeId, FlowError, NodeId};
use crate::data_structures::flow_network::{FlowNetwork, MinCut};

/// A single broken flow invariant
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvariantViolation {
    #[error("edge {edge:?} carries {flow} with capacity {capacity}")]
    CapacityInfeasible { edge: EdgeId, flow: Capacity, capacity: Capacity },

    #[error("vertex {vertex} receives {inflow} but sends {outflow}")]
    ConservationBroken { vertex: NodeId, inflow: Capacity, outflow: Capacity },

    #[error("source {0} is missing from the cut")]
    SourceOutsideCut(NodeId),

    #[error("sink {0} lies on the source side of the cut")]
    SinkInsideCut(NodeId),

    #[error("flow value {max_flow} differs from cut capacity {cut_capacity}")]
    CutMismatch { max_flow: Capacity, cut_capacity: Capacity },
}

/// Outcome of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectnessReport {
    pub violations: Vec<InvariantViolation>,
    pub edges_checked: usize,
    pub vertices_checked: usize,
}

impl CorrectnessReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Collapses the report into a `FlowError::InvariantViolation` listing every problem
    pub fn into_result(self) -> Result<(), FlowError> {
        if self.violations.is_empty() {
            return Ok(());
        }
        let message = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(FlowError::InvariantViolation(message))
    }
}

/// Validator for flow networks produced by the augmenting-path framework
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowValidator;

impl FlowValidator {
    pub fn new() -> Self {
        Self
    }

    /// Capacity feasibility and conservation; valid at any point of a run
    pub fn check_flow(&self, network: &FlowNetwork) -> CorrectnessReport {
        let mut report = CorrectnessReport::default();
        self.check_capacities(network, &mut report);
        self.check_conservation(network, &mut report);
        report
    }

    /// Every invariant, including those that only hold once the network is saturated
    pub fn validate(&self, network: &FlowNetwork, cut: &MinCut) -> CorrectnessReport {
        let mut report = self.check_flow(network);

        if !cut.contains(network.source()) {
            report.violations.push(InvariantViolation::SourceOutsideCut(network.source()));
        }
        if cut.contains(network.sink()) {
            report.violations.push(InvariantViolation::SinkInsideCut(network.sink()));
        }

        let max_flow = network.total_flow_from_source();
        let cut_capacity = network.cut_capacity(cut);
        if max_flow != cut_capacity {
            report.violations.push(InvariantViolation::CutMismatch { max_flow, cut_capacity });
        }

        report
    }

    fn check_capacities(&self, network: &FlowNetwork, report: &mut CorrectnessReport) {
        for (id, edge) in network.edges() {
            report.edges_checked += 1;
            if !edge.is_feasible() {
                report.violations.push(InvariantViolation::CapacityInfeasible {
                    edge: id,
                    flow: edge.flow(),
                    capacity: edge.capacity(),
                });
            }
        }
    }

    fn check_conservation(&self, network: &FlowNetwork, report: &mut CorrectnessReport) {
        let mut inflow = vec![0; network.vertex_count()];
        let mut outflow = vec![0; network.vertex_count()];
        for (_, edge) in network.edges() {
            outflow[edge.from().as_usize()] += edge.flow();
            inflow[edge.to().as_usize()] += edge.flow();
        }

        for v in 0..network.vertex_count() {
            let vertex = NodeId(v);
            if vertex == network.source() || vertex == network.sink() {
                continue;
            }
            report.vertices_checked += 1;
            if inflow[v] != outflow[v] {
                report.violations.push(InvariantViolation::ConservationBroken {
                    vertex,
                    inflow: inflow[v],
                    outflow: outflow[v],
                });
            }
        }
    }
}
