//! flowcut: Maximum Flow / Minimum Cut Engine
//!
//! Integer-capacity maximum flow over a static weighted directed graph,
//! computed with the Ford-Fulkerson method and Edmonds-Karp breadth-first
//! augmenting paths. Every run reports the flow value, the flow on each
//! edge and the source side of a minimum cut; reductions built on top turn
//! that cut into human-checkable certificates.
//!
//! ```
//! use flowcut_core::{edmonds_karp, NodeId, WeightedDirectedGraph};
//!
//! let graph = WeightedDirectedGraph::from_edges(3, [(0, 1, 4), (1, 2, 3), (0, 2, 1)]).unwrap();
//! let result = edmonds_karp(&graph, NodeId(0), NodeId(2)).unwrap();
//! assert_eq!(result.max_flow, 4);
//! assert_eq!(result.min_cut.vertices(), &[NodeId(0), NodeId(1)]);
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod validation;

pub use crate::algorithm::graph::{
    edmonds_karp, AssignmentProblem, AssignmentResult, AugmentingPath, AugmentingPathFramework,
    AugmentingPathSearch, EdmondsKarpSearch, Elimination, EliminationError, EliminationProblem,
    MaxFlowConfig, MaxFlowResult, MaxFlowSolver, SearchStrategy, VerificationLevel,
};
pub use crate::algorithm::state::{FlowPath, FlowPhase};
pub use crate::algorithm::traits::{
    Algorithm, Capacity, EdgeId, FlowError, MaxFlowAlgorithm, NodeId,
};
pub use crate::data_structures::{FlowEdge, FlowNetwork, MinCut, WeightedDirectedGraph};
pub use crate::validation::FlowValidator;
