//! Core algorithm trait definitions for the flowcut engine
//!
//! This module establishes the shared vocabulary of the crate: vertex
//! identifiers, integer capacities, the error type every flow operation
//! reports through, and the trait surface that max-flow solvers expose.
//!
//! # Key Design Principles
//! - Positional vertex identity behind a newtype
//! - Explicit `Result` propagation for every caller-facing failure
//! - String parameter interface mirroring the typed configuration
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::data_structures::graph::WeightedDirectedGraph;

/// Integer edge capacity; negative values mark edges that cannot carry flow
pub type Capacity = i64;

/// Node identifier ensuring type safety and preventing mixing with other numeric types
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

/// Index of a flow edge inside a network's edge arena
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// Comprehensive error types for flow operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Vertex {vertex} is not an endpoint of edge {from}->{to}")]
    InvalidEndpoint { vertex: NodeId, from: NodeId, to: NodeId },

    #[error("Vertex {vertex} is outside of range [0, {vertex_count})")]
    OutOfRange { vertex: NodeId, vertex_count: usize },

    #[error("Source and sink are both vertex {vertex}")]
    IdenticalTerminals { vertex: NodeId },

    #[error("Predecessor chain broken at vertex {vertex} while rebuilding augmenting path")]
    BrokenPredecessorChain { vertex: NodeId },

    #[error("Flow invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Algorithm execution metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlgorithmMetrics {
    pub steps_executed: usize,
    pub nodes_explored: usize,
    pub execution_time: Duration,
}

/// Algorithm complexity information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
}

/// Main algorithm trait
///
/// # Invariants
/// - State isolation between runs
/// - Deterministic behavior for given inputs
pub trait Algorithm: fmt::Debug + Send + Sync {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., max_flow)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description with complexity guarantees
    fn description(&self) -> String;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns the current value of every supported parameter
    fn parameters(&self) -> HashMap<String, String>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;
}

/// Maximum flow algorithm specialization
pub trait MaxFlowAlgorithm: Algorithm {
    /// Output of one max-flow computation
    type Output;

    /// Computes a maximum flow and minimum cut between `source` and `sink`.
    ///
    /// `source` must have no incoming edges and `sink` no outgoing edges.
    fn max_flow(
        &mut self,
        graph: &WeightedDirectedGraph,
        source: NodeId,
        sink: NodeId,
    ) -> Result<Self::Output, FlowError>;
}

/// Performance profiling integration
#[derive(Debug, Default)]
pub struct AlgorithmProfiler {
    metrics: AlgorithmMetrics,
    start_time: Option<Instant>,
}

impl AlgorithmProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.metrics.execution_time = start.elapsed();
        }
    }

    pub fn record_nodes_explored(&mut self, count: usize) {
        self.metrics.nodes_explored += count;
    }

    pub fn record_step(&mut self) {
        self.metrics.steps_executed += 1;
    }

    pub fn get_metrics(&self) -> AlgorithmMetrics {
        self.metrics.clone()
    }
}
