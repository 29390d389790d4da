//! Maximum flow / minimum cut algorithms and their reductions
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod assignment;
pub mod edmonds_karp;
pub mod elimination;
pub mod max_flow;

pub use self::assignment::{AssignmentProblem, AssignmentResult};
pub use self::edmonds_karp::EdmondsKarpSearch;
pub use self::elimination::{
    Elimination, EliminationError, EliminationNetwork, EliminationProblem,
};
pub use self::max_flow::{
    edmonds_karp, AugmentingPath, AugmentingPathFramework, AugmentingPathSearch, FlowMetrics,
    MaxFlowConfig, MaxFlowResult, MaxFlowSolver, SearchStrategy, VerificationLevel,
};
