//! Augmenting-Path Maximum Flow Framework
//!
//! This module implements the Ford-Fulkerson method over a [`FlowNetwork`]:
//! repeatedly ask a pluggable search for an augmenting path, push its
//! bottleneck, and stop once the residual graph no longer connects source
//! and sink. The set of vertices the final search reached is the source
//! side of a minimum cut, so every run yields the flow value, the flow on
//! every edge and a cut whose capacity equals that value.
//!
//! Termination follows from integrality: each augmentation raises the flow
//! by a positive integer and the flow is bounded by the finite capacities.
//! With the breadth-first [`EdmondsKarpSearch`] the number of augmentations
//! is additionally bounded by O(V * E).
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::edmonds_karp::EdmondsKarpSearch;
use crate::algorithm::state::{FlowPath, FlowPhase, FlowState};
use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmProfiler, Capacity, EdgeId, FlowError,
    MaxFlowAlgorithm, NodeId,
};
use crate::data_structures::flow_network::{EdgeFlow, FlowNetwork, MinCut};
use crate::data_structures::graph::WeightedDirectedGraph;
use crate::validation::correctness::FlowValidator;

/// Result of one augmenting path search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AugmentingPath {
    /// Source-to-sink path; every edge has at least `bottleneck` residual
    /// capacity in the direction it is traversed
    Found { bottleneck: Capacity, edges: Vec<EdgeId> },
    /// No path exists; `reachable` is the residual reach of the source
    Exhausted { reachable: MinCut },
}

/// Path search strategy plugged into the framework
pub trait AugmentingPathSearch {
    fn name(&self) -> &'static str;

    /// Searches the current residual graph of `network`
    fn find_augmenting_path(&mut self, network: &FlowNetwork) -> Result<AugmentingPath, FlowError>;

    /// Vertices examined by the most recent call
    fn explored(&self) -> usize {
        0
    }
}

/// Available path search strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Breadth-first shortest augmenting paths
    #[default]
    EdmondsKarp,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::EdmondsKarp => f.write_str("edmonds_karp"),
        }
    }
}

impl FromStr for SearchStrategy {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "edmonds_karp" => Ok(SearchStrategy::EdmondsKarp),
            _ => Err(FlowError::InvalidParameter {
                name: "strategy".to_string(),
                reason: format!("unknown search strategy '{}'", value),
            }),
        }
    }
}

/// How much invariant checking a run performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationLevel {
    Disabled,
    /// Validate flow and cut once the network is saturated
    #[default]
    Final,
    /// Also check feasibility and conservation after every augmentation
    EveryAugmentation,
}

impl fmt::Display for VerificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VerificationLevel::Disabled => "disabled",
            VerificationLevel::Final => "final",
            VerificationLevel::EveryAugmentation => "every_augmentation",
        };
        f.write_str(name)
    }
}

impl FromStr for VerificationLevel {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "disabled" => Ok(VerificationLevel::Disabled),
            "final" => Ok(VerificationLevel::Final),
            "every_augmentation" => Ok(VerificationLevel::EveryAugmentation),
            _ => Err(FlowError::InvalidParameter {
                name: "verification".to_string(),
                reason: format!("unknown verification level '{}'", value),
            }),
        }
    }
}

/// Solver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxFlowConfig {
    pub strategy: SearchStrategy,
    pub verification: VerificationLevel,
    /// Keep every augmenting path in the result
    pub record_trace: bool,
}

impl Default for MaxFlowConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::EdmondsKarp,
            verification: VerificationLevel::Final,
            record_trace: false,
        }
    }
}

impl MaxFlowConfig {
    /// Parses a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        serde_json::from_str(json).map_err(|e| FlowError::InvalidConfig(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, FlowError> {
        serde_json::to_string(self).map_err(|e| FlowError::InvalidConfig(e.to_string()))
    }
}

/// Flow algorithm performance metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of augmenting paths pushed
    pub augmentations: usize,
    /// Vertices dequeued across all searches
    pub vertices_explored: usize,
    /// Wall-clock time of the run
    pub execution_time_ms: f64,
}

/// Maximum flow result with detailed flow information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Maximum flow value
    pub max_flow: Capacity,
    /// Flow on every edge, in network order
    pub flow_assignment: Vec<EdgeFlow>,
    /// Source side of the minimum cut
    pub min_cut: MinCut,
    /// Augmenting paths in the order they were pushed (empty unless traced)
    pub flow_paths: Vec<FlowPath>,
    pub metrics: FlowMetrics,
}

impl MaxFlowResult {
    /// Flow carried by the first edge `from -> to`, if such an edge exists
    pub fn flow_between(&self, from: NodeId, to: NodeId) -> Option<Capacity> {
        self.flow_assignment
            .iter()
            .find(|e| e.from == from && e.to == to)
            .map(|e| e.flow)
    }
}

/// Ford-Fulkerson driver over one flow network
#[derive(Debug)]
pub struct AugmentingPathFramework<S: AugmentingPathSearch> {
    network: FlowNetwork,
    search: S,
    state: FlowState,
    verification: VerificationLevel,
    min_cut: Option<MinCut>,
    profiler: AlgorithmProfiler,
}

impl<S: AugmentingPathSearch> AugmentingPathFramework<S> {
    pub fn new(network: FlowNetwork, search: S) -> Self {
        Self {
            network,
            search,
            state: FlowState::new(false),
            verification: VerificationLevel::Final,
            min_cut: None,
            profiler: AlgorithmProfiler::new(),
        }
    }

    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.state = FlowState::new(record_trace);
        self
    }

    pub fn with_verification(mut self, verification: VerificationLevel) -> Self {
        self.verification = verification;
        self
    }

    pub fn network(&self) -> &FlowNetwork {
        &self.network
    }

    pub fn phase(&self) -> FlowPhase {
        self.state.phase()
    }

    /// Minimum cut, available once the network is saturated
    pub fn min_cut(&self) -> Option<&MinCut> {
        self.min_cut.as_ref()
    }

    /// Runs one search and, if a path was found, one augmentation.
    ///
    /// Returns the phase the framework is left in; calling `step` on a
    /// saturated framework is a no-op.
    pub fn step(&mut self) -> Result<FlowPhase, FlowError> {
        if self.state.phase().is_terminal() {
            return Ok(FlowPhase::Saturated);
        }

        let outcome = self.search.find_augmenting_path(&self.network)?;
        self.profiler.record_nodes_explored(self.search.explored());

        match outcome {
            AugmentingPath::Found { bottleneck, edges } => {
                if bottleneck <= 0 {
                    return Err(FlowError::InvariantViolation(format!(
                        "{} returned a path with bottleneck {}",
                        self.search.name(),
                        bottleneck
                    )));
                }

                self.state.transition(FlowPhase::Augmenting)?;
                self.network.push_along(&edges, bottleneck)?;
                self.profiler.record_step();

                let network = &self.network;
                self.state.record_augmentation(bottleneck, || network.path_vertices(&edges))?;
                debug!(
                    "augmentation {}: pushed {} over {} edges",
                    self.state.augmentations(),
                    bottleneck,
                    edges.len()
                );

                if self.verification == VerificationLevel::EveryAugmentation {
                    FlowValidator::new().check_flow(&self.network).into_result()?;
                }

                self.state.transition(FlowPhase::Searching)?;
            }
            AugmentingPath::Exhausted { reachable } => {
                self.state.transition(FlowPhase::Saturated)?;
                info!(
                    "{} saturated after {} augmentations: max flow {}, cut of {} vertices",
                    self.search.name(),
                    self.state.augmentations(),
                    self.network.total_flow_from_source(),
                    reachable.len()
                );
                self.min_cut = Some(reachable);
            }
        }

        Ok(self.state.phase())
    }

    /// Augments until saturation and assembles the result
    pub fn run(&mut self) -> Result<MaxFlowResult, FlowError> {
        self.profiler.start();
        while !self.step()?.is_terminal() {}
        self.profiler.stop();

        let min_cut = self
            .min_cut
            .clone()
            .ok_or_else(|| FlowError::InvariantViolation("saturated without a cut".to_string()))?;

        let max_flow = self.network.total_flow_from_source();
        if max_flow != self.state.pushed() {
            return Err(FlowError::InvariantViolation(format!(
                "source emits {} but augmentations pushed {}",
                max_flow,
                self.state.pushed()
            )));
        }
        if self.verification != VerificationLevel::Disabled {
            FlowValidator::new().validate(&self.network, &min_cut).into_result()?;
        }

        let profile = self.profiler.get_metrics();
        Ok(MaxFlowResult {
            max_flow,
            flow_assignment: self.network.flow_assignment(),
            min_cut,
            flow_paths: self.state.trace().to_vec(),
            metrics: FlowMetrics {
                augmentations: self.state.augmentations(),
                vertices_explored: profile.nodes_explored,
                execution_time_ms: profile.execution_time.as_secs_f64() * 1000.0,
            },
        })
    }

    /// Hands back the saturated network
    pub fn into_network(self) -> FlowNetwork {
        self.network
    }
}

/// Maximum flow solver dispatching on the configured search strategy
#[derive(Debug, Clone, Default)]
pub struct MaxFlowSolver {
    config: MaxFlowConfig,
}

impl MaxFlowSolver {
    pub fn new(config: MaxFlowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MaxFlowConfig {
        &self.config
    }

    /// Runs the configured strategy on a freshly built network and returns
    /// both the result and the saturated network.
    pub fn solve(
        &self,
        graph: &WeightedDirectedGraph,
        source: NodeId,
        sink: NodeId,
    ) -> Result<(MaxFlowResult, FlowNetwork), FlowError> {
        let network = FlowNetwork::new(graph, source, sink)?;
        match self.config.strategy {
            SearchStrategy::EdmondsKarp => {
                let search = EdmondsKarpSearch::new(network.vertex_count());
                self.drive(network, search)
            }
        }
    }

    fn drive<S: AugmentingPathSearch>(
        &self,
        network: FlowNetwork,
        search: S,
    ) -> Result<(MaxFlowResult, FlowNetwork), FlowError> {
        let mut framework = AugmentingPathFramework::new(network, search)
            .with_trace(self.config.record_trace)
            .with_verification(self.config.verification);
        let result = framework.run()?;
        Ok((result, framework.into_network()))
    }
}

impl Algorithm for MaxFlowSolver {
    fn name(&self) -> &'static str {
        match self.config.strategy {
            SearchStrategy::EdmondsKarp => "Edmonds-Karp",
        }
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> String {
        "Ford-Fulkerson augmenting path maximum flow with breadth-first shortest paths, \
         reporting the flow assignment and the source side of a minimum cut."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V * E^2)".to_string(),
            space_complexity: "O(V + E)".to_string(),
        }
    }

    fn parameters(&self) -> HashMap<String, String> {
        let mut parameters = HashMap::new();
        parameters.insert("strategy".to_string(), self.config.strategy.to_string());
        parameters.insert("verification".to_string(), self.config.verification.to_string());
        parameters.insert("record_trace".to_string(), self.config.record_trace.to_string());
        parameters
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError> {
        match name {
            "strategy" => {
                self.config.strategy = value.parse()?;
                Ok(())
            }
            "verification" => {
                self.config.verification = value.parse()?;
                Ok(())
            }
            "record_trace" => {
                self.config.record_trace =
                    value.parse::<bool>().map_err(|_| FlowError::InvalidParameter {
                        name: name.to_string(),
                        reason: "record_trace must be true or false".to_string(),
                    })?;
                Ok(())
            }
            _ => Err(FlowError::InvalidParameter {
                name: name.to_string(),
                reason: "unknown parameter".to_string(),
            }),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters().remove(name)
    }
}

impl MaxFlowAlgorithm for MaxFlowSolver {
    type Output = MaxFlowResult;

    fn max_flow(
        &mut self,
        graph: &WeightedDirectedGraph,
        source: NodeId,
        sink: NodeId,
    ) -> Result<MaxFlowResult, FlowError> {
        self.solve(graph, source, sink).map(|(result, _)| result)
    }
}

/// Edmonds-Karp with the default configuration
pub fn edmonds_karp(
    graph: &WeightedDirectedGraph,
    source: NodeId,
    sink: NodeId,
) -> Result<MaxFlowResult, FlowError> {
    MaxFlowSolver::default().max_flow(graph, source, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn traced_solver() -> MaxFlowSolver {
        MaxFlowSolver::new(MaxFlowConfig {
            verification: VerificationLevel::EveryAugmentation,
            record_trace: true,
            ..MaxFlowConfig::default()
        })
    }

    fn nodes(ids: &[usize]) -> Vec<NodeId> {
        ids.iter().copied().map(NodeId).collect()
    }

    /// s=0, a=1, b=2, c=3, d=4, t=5
    fn classic() -> WeightedDirectedGraph {
        WeightedDirectedGraph::from_edges(
            6,
            [
                (0, 1, 16),
                (0, 3, 13),
                (1, 3, 10),
                (3, 1, 4),
                (1, 2, 12),
                (4, 2, 7),
                (2, 3, 9),
                (3, 4, 14),
                (4, 5, 4),
                (2, 5, 20),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_classic_network() {
        init_logging();
        let result = traced_solver().max_flow(&classic(), NodeId(0), NodeId(5)).unwrap();

        assert_eq!(result.max_flow, 23);
        assert_eq!(result.min_cut.vertices(), nodes(&[0, 1, 3, 4]).as_slice());
        assert_eq!(result.metrics.augmentations, 3);

        let paths: Vec<(Vec<NodeId>, Capacity)> =
            result.flow_paths.iter().map(|p| (p.path.clone(), p.flow)).collect();
        assert_eq!(
            paths,
            vec![
                (nodes(&[0, 1, 2, 5]), 12),
                (nodes(&[0, 3, 4, 5]), 4),
                (nodes(&[0, 3, 4, 2, 5]), 7),
            ]
        );

        assert_eq!(result.flow_between(NodeId(0), NodeId(1)), Some(12));
        assert_eq!(result.flow_between(NodeId(0), NodeId(3)), Some(11));
        assert_eq!(result.flow_between(NodeId(2), NodeId(5)), Some(19));
        assert_eq!(result.flow_between(NodeId(4), NodeId(2)), Some(7));
        assert_eq!(result.flow_between(NodeId(1), NodeId(3)), Some(0));
        assert_eq!(result.flow_between(NodeId(5), NodeId(0)), None);
    }

    #[test]
    fn test_trivial_saturation() {
        let graph = WeightedDirectedGraph::from_edges(2, [(0, 1, 5)]).unwrap();
        let result = edmonds_karp(&graph, NodeId(0), NodeId(1)).unwrap();

        assert_eq!(result.max_flow, 5);
        assert_eq!(result.min_cut.vertices(), &[NodeId(0)]);
        assert!(result.flow_paths.is_empty());
    }

    #[test]
    fn test_disconnected_terminals() {
        let graph = WeightedDirectedGraph::from_edges(4, [(0, 2, 3), (3, 1, 3)]).unwrap();
        let result = edmonds_karp(&graph, NodeId(0), NodeId(1)).unwrap();

        assert_eq!(result.max_flow, 0);
        assert_eq!(result.min_cut.vertices(), nodes(&[0, 2]).as_slice());
        assert!(!result.min_cut.contains(NodeId(1)));
    }

    #[test]
    fn test_optimum_requires_cancellation() {
        // s=0, a=1, b=2, c=3, e=4, f=5, t=6: the first shortest path s-a-b-t
        // blocks both s-c-b-t and s-a-e-f-t until a->b is cancelled
        let graph = WeightedDirectedGraph::from_edges(
            7,
            [
                (0, 1, 1),
                (0, 3, 1),
                (1, 2, 1),
                (1, 4, 1),
                (2, 6, 1),
                (3, 2, 1),
                (4, 5, 1),
                (5, 6, 1),
            ],
        )
        .unwrap();
        let result = traced_solver().max_flow(&graph, NodeId(0), NodeId(6)).unwrap();

        assert_eq!(result.max_flow, 2);
        assert_eq!(result.flow_between(NodeId(1), NodeId(2)), Some(0));
        assert_eq!(result.flow_paths[0].path, nodes(&[0, 1, 2, 6]));
        assert_eq!(result.flow_paths[1].path, nodes(&[0, 3, 2, 1, 4, 5, 6]));
        assert_eq!(result.min_cut.vertices(), &[NodeId(0)]);
    }

    #[test]
    fn test_isolated_terminals() {
        let graph = WeightedDirectedGraph::new(2);
        let result = edmonds_karp(&graph, NodeId(0), NodeId(1)).unwrap();

        assert_eq!(result.max_flow, 0);
        assert_eq!(result.min_cut.vertices(), &[NodeId(0)]);
        assert!(result.flow_assignment.is_empty());
    }

    #[test]
    fn test_negative_capacity_edges_carry_nothing() {
        let graph =
            WeightedDirectedGraph::from_edges(3, [(0, 1, 4), (1, 2, -1), (0, 2, 2)]).unwrap();
        let result = edmonds_karp(&graph, NodeId(0), NodeId(2)).unwrap();

        assert_eq!(result.max_flow, 2);
        assert_eq!(result.flow_between(NodeId(1), NodeId(2)), Some(0));
        assert_eq!(result.min_cut.vertices(), nodes(&[0, 1]).as_slice());
    }

    #[test]
    fn test_out_of_range_terminal() {
        let err = edmonds_karp(&classic(), NodeId(0), NodeId(6)).unwrap_err();
        assert_eq!(err, FlowError::OutOfRange { vertex: NodeId(6), vertex_count: 6 });
    }

    #[test]
    fn test_identical_terminals() {
        let graph = WeightedDirectedGraph::from_edges(2, [(0, 1, 5)]).unwrap();
        let unchecked = MaxFlowSolver::new(MaxFlowConfig {
            verification: VerificationLevel::Disabled,
            ..MaxFlowConfig::default()
        });

        for solver in [MaxFlowSolver::default(), unchecked] {
            assert_eq!(
                solver.solve(&graph, NodeId(0), NodeId(0)).unwrap_err(),
                FlowError::IdenticalTerminals { vertex: NodeId(0) }
            );
        }
    }

    #[test]
    fn test_step_by_step_phases() {
        let graph = WeightedDirectedGraph::from_edges(2, [(0, 1, 5)]).unwrap();
        let network = FlowNetwork::new(&graph, NodeId(0), NodeId(1)).unwrap();
        let mut framework = AugmentingPathFramework::new(network, EdmondsKarpSearch::new(2));

        assert_eq!(framework.phase(), FlowPhase::Searching);
        assert!(framework.min_cut().is_none());
        assert_eq!(framework.step().unwrap(), FlowPhase::Searching);
        assert_eq!(framework.network().total_flow_from_source(), 5);
        assert_eq!(framework.step().unwrap(), FlowPhase::Saturated);
        assert_eq!(framework.step().unwrap(), FlowPhase::Saturated);
        assert_eq!(framework.min_cut().unwrap().vertices(), &[NodeId(0)]);
    }

    #[derive(Debug)]
    struct StalledSearch;

    impl AugmentingPathSearch for StalledSearch {
        fn name(&self) -> &'static str {
            "stalled"
        }

        fn find_augmenting_path(&mut self, _: &FlowNetwork) -> Result<AugmentingPath, FlowError> {
            Ok(AugmentingPath::Found { bottleneck: 0, edges: Vec::new() })
        }
    }

    #[test]
    fn test_zero_bottleneck_is_rejected() {
        let graph = WeightedDirectedGraph::from_edges(2, [(0, 1, 5)]).unwrap();
        let network = FlowNetwork::new(&graph, NodeId(0), NodeId(1)).unwrap();
        let mut framework = AugmentingPathFramework::new(network, StalledSearch);

        assert!(matches!(framework.run(), Err(FlowError::InvariantViolation(_))));
    }

    /// Claims one empty augmenting path, then gives up
    #[derive(Debug, Default)]
    struct PhantomSearch {
        calls: usize,
    }

    impl AugmentingPathSearch for PhantomSearch {
        fn name(&self) -> &'static str {
            "phantom"
        }

        fn find_augmenting_path(
            &mut self,
            network: &FlowNetwork,
        ) -> Result<AugmentingPath, FlowError> {
            self.calls += 1;
            if self.calls == 1 {
                Ok(AugmentingPath::Found { bottleneck: 2, edges: Vec::new() })
            } else {
                Ok(AugmentingPath::Exhausted {
                    reachable: MinCut::new(vec![network.source()]),
                })
            }
        }
    }

    #[test]
    fn test_pushed_total_must_match_source_outflow() {
        let graph = WeightedDirectedGraph::from_edges(2, [(0, 1, 5)]).unwrap();
        let network = FlowNetwork::new(&graph, NodeId(0), NodeId(1)).unwrap();
        let mut framework = AugmentingPathFramework::new(network, PhantomSearch::default())
            .with_verification(VerificationLevel::Disabled);

        match framework.run() {
            Err(FlowError::InvariantViolation(message)) => {
                assert_eq!(message, "source emits 0 but augmentations pushed 2");
            }
            other => panic!("expected an invariant violation, got {:?}", other),
        }
    }

    #[test]
    fn test_parameter_setting() {
        let mut solver = MaxFlowSolver::default();
        assert_eq!(solver.name(), "Edmonds-Karp");
        assert_eq!(solver.category(), "max_flow");

        assert!(solver.set_parameter("record_trace", "true").is_ok());
        assert_eq!(solver.get_parameter("record_trace"), Some("true".to_string()));
        assert!(solver.set_parameter("verification", "every_augmentation").is_ok());
        assert_eq!(solver.config().verification, VerificationLevel::EveryAugmentation);
        assert!(solver.set_parameter("strategy", "edmonds_karp").is_ok());

        assert!(solver.set_parameter("invalid_param", "value").is_err());
        assert!(solver.set_parameter("record_trace", "maybe").is_err());
        assert!(solver.set_parameter("strategy", "dinic").is_err());
        assert!(solver.get_parameter("invalid_param").is_none());
    }

    #[test]
    fn test_config_from_json() {
        let config = MaxFlowConfig::from_json(r#"{"record_trace": true}"#).unwrap();
        assert!(config.record_trace);
        assert_eq!(config.strategy, SearchStrategy::EdmondsKarp);
        assert_eq!(config.verification, VerificationLevel::Final);

        let config = MaxFlowConfig::from_json(r#"{"verification": "disabled"}"#).unwrap();
        assert_eq!(config.verification, VerificationLevel::Disabled);
        assert_eq!(MaxFlowConfig::from_json(&config.to_json().unwrap()).unwrap(), config);

        assert!(matches!(
            MaxFlowConfig::from_json(r#"{"strategy": "push_relabel"}"#),
            Err(FlowError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_result_serializes() {
        let graph = WeightedDirectedGraph::from_edges(2, [(0, 1, 5)]).unwrap();
        let result = edmonds_karp(&graph, NodeId(0), NodeId(1)).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["max_flow"], 5);
        assert_eq!(json["flow_assignment"][0]["flow"], 5);
    }
}

/// Property-based testing
#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::{quickcheck, TestResult};

    const VERTICES: usize = 6;
    const SOURCE: NodeId = NodeId(0);
    const SINK: NodeId = NodeId(VERTICES - 1);

    /// Random graph with no edges into the source, none out of the sink,
    /// no self-loops and capacities in [-3, 16]
    fn random_graph(raw: &[(u8, u8, u8)]) -> WeightedDirectedGraph {
        let edges = raw
            .iter()
            .map(|&(a, b, c)| {
                (a as usize % VERTICES, b as usize % VERTICES, (c % 20) as Capacity - 3)
            })
            .filter(|&(a, b, _)| a != b && b != SOURCE.as_usize() && a != SINK.as_usize());
        WeightedDirectedGraph::from_edges(VERTICES, edges).unwrap()
    }

    fn brute_force_min_cut(graph: &WeightedDirectedGraph) -> Capacity {
        let inner = VERTICES - 2;
        (0..1u32 << inner)
            .map(|mask| {
                let on_source_side = |v: NodeId| {
                    v == SOURCE || (v != SINK && mask & (1 << (v.as_usize() - 1)) != 0)
                };
                graph
                    .edges()
                    .filter(|e| on_source_side(e.from) && !on_source_side(e.to))
                    .map(|e| e.weight.max(0))
                    .sum::<Capacity>()
            })
            .min()
            .unwrap_or(0)
    }

    fn unchecked() -> MaxFlowSolver {
        MaxFlowSolver::new(MaxFlowConfig {
            verification: VerificationLevel::Disabled,
            ..MaxFlowConfig::default()
        })
    }

    quickcheck! {
        fn prop_max_flow_equals_min_cut(raw: Vec<(u8, u8, u8)>) -> bool {
            let graph = random_graph(&raw);
            let (result, network) = unchecked().solve(&graph, SOURCE, SINK).unwrap();

            result.max_flow == network.cut_capacity(&result.min_cut)
                && result.max_flow == brute_force_min_cut(&graph)
        }

        fn prop_flow_is_feasible_and_conserved(raw: Vec<(u8, u8, u8)>) -> bool {
            let graph = random_graph(&raw);
            let (result, network) = unchecked().solve(&graph, SOURCE, SINK).unwrap();

            FlowValidator::new().validate(&network, &result.min_cut).is_valid()
                && result.min_cut.contains(SOURCE)
                && !result.min_cut.contains(SINK)
        }

        fn prop_runs_are_deterministic(raw: Vec<(u8, u8, u8)>) -> bool {
            let graph = random_graph(&raw);
            let first = edmonds_karp(&graph, SOURCE, SINK).unwrap();
            let second = edmonds_karp(&graph, SOURCE, SINK).unwrap();

            first.flow_assignment == second.flow_assignment && first.min_cut == second.min_cut
        }

        fn prop_cut_is_idempotent(raw: Vec<(u8, u8, u8)>) -> TestResult {
            let graph = random_graph(&raw);
            if graph.edge_count() == 0 {
                return TestResult::discard();
            }
            let (result, network) = unchecked().solve(&graph, SOURCE, SINK).unwrap();
            let mut search = EdmondsKarpSearch::new(network.vertex_count());

            let again = search.find_augmenting_path(&network).unwrap();
            TestResult::from_bool(again == AugmentingPath::Exhausted { reachable: result.min_cut })
        }

        fn prop_cancellation_is_scale_free(scale: u8) -> TestResult {
            if scale == 0 {
                return TestResult::discard();
            }
            let k = scale as Capacity;
            let graph = WeightedDirectedGraph::from_edges(
                7,
                [
                    (0, 1, k),
                    (0, 3, k),
                    (1, 2, k),
                    (1, 4, k),
                    (2, 6, k),
                    (3, 2, k),
                    (4, 5, k),
                    (5, 6, k),
                ],
            )
            .unwrap();
            let result = edmonds_karp(&graph, NodeId(0), NodeId(6)).unwrap();

            TestResult::from_bool(
                result.max_flow == 2 * k && result.flow_between(NodeId(1), NodeId(2)) == Some(0),
            )
        }

        fn prop_every_augmentation_stays_feasible(raw: Vec<(u8, u8, u8)>) -> bool {
            let graph = random_graph(&raw);
            let network = FlowNetwork::new(&graph, SOURCE, SINK).unwrap();
            let mut framework =
                AugmentingPathFramework::new(network, EdmondsKarpSearch::new(VERTICES));

            loop {
                match framework.step() {
                    Ok(FlowPhase::Saturated) => return true,
                    Ok(_) => {
                        if !FlowValidator::new().check_flow(framework.network()).is_valid() {
                            return false;
                        }
                    }
                    Err(_) => return false,
                }
            }
        }
    }
}
