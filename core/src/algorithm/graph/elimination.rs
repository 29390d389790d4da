//! Elimination certificates via maximum flow
//!
//! Given each entity's current wins, its remaining games and the schedule of
//! remaining games between every pair, an entity `q` is eliminated when no
//! outcome of the remaining games lets it finish with at least as many wins
//! as everybody else.
//!
//! The check builds one flow network per queried entity:
//!
//! ```text
//!            games(a,b)            games(a,b)        ceiling(q) - wins(a)
//!   source ------------> pair(a,b) ----------> a ------------------------> sink
//!                                  ----------> b
//! ```
//!
//! where `ceiling(q) = wins(q) + remaining(q)`. `q` is eliminated exactly when
//! the maximum flow leaves some source edge unsaturated. The entities on the
//! source side of the minimum cut then prove it: together they have already
//! won, or must still win among themselves, more than `ceiling(q)` games on
//! average. The reported certificate is the smallest prefix of that set
//! (highest wins first) for which the average bound already holds.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::max_flow::{MaxFlowConfig, MaxFlowSolver};
use crate::algorithm::traits::{Capacity, FlowError, NodeId};
use crate::data_structures::flow_network::MinCut;
use crate::data_structures::graph::WeightedDirectedGraph;

/// Input validation and computation errors for the elimination reduction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EliminationError {
    #[error("{field} has {actual} entries, expected {expected}")]
    DimensionMismatch { field: &'static str, expected: usize, actual: usize },

    #[error("{field} of entity {entity} is negative")]
    NegativeCount { field: &'static str, entity: usize },

    #[error("games between {first} and {second} differ by direction")]
    AsymmetricSchedule { first: usize, second: usize },

    #[error("entity {0} is scheduled against itself")]
    SelfScheduled(usize),

    #[error("unknown entity {0}")]
    UnknownEntity(usize),

    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// Standings and remaining schedule of a division
#[derive(Debug, Clone)]
pub struct EliminationProblem {
    names: Vec<String>,
    wins: Vec<Capacity>,
    losses: Vec<Capacity>,
    remaining: Vec<Capacity>,
    /// Remaining games between every ordered pair; symmetric, zero diagonal
    games: Vec<Vec<Capacity>>,
    config: MaxFlowConfig,
}

/// Flow network built for one queried entity
#[derive(Debug, Clone)]
pub struct EliminationNetwork {
    pub graph: WeightedDirectedGraph,
    pub source: NodeId,
    pub sink: NodeId,
    /// Entity pair represented by each pair vertex, in vertex order
    pub pairs: Vec<(usize, usize)>,
}

/// Proof that an entity cannot finish first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    /// The eliminated entity
    pub entity: usize,
    /// Best final win total the entity can reach
    pub ceiling: Capacity,
    /// Entities that together outscore the ceiling on average
    pub certificate: Vec<usize>,
    /// Current wins summed over the certificate
    pub total_wins: Capacity,
    /// Remaining games played among the certificate entities
    pub mutual_games: Capacity,
}

impl Elimination {
    /// Average final wins the certificate entities are guaranteed
    pub fn average_wins(&self) -> f64 {
        if self.certificate.is_empty() {
            return 0.0;
        }
        (self.total_wins + self.mutual_games) as f64 / self.certificate.len() as f64
    }

    /// Whether the certificate really exceeds the ceiling on average
    pub fn is_conclusive(&self) -> bool {
        let size = self.certificate.len() as Capacity;
        size > 0 && self.total_wins + self.mutual_games > self.ceiling * size
    }
}

impl EliminationProblem {
    pub fn new(
        names: Vec<String>,
        wins: Vec<Capacity>,
        losses: Vec<Capacity>,
        remaining: Vec<Capacity>,
        games: Vec<Vec<Capacity>>,
    ) -> Result<Self, EliminationError> {
        let n = names.len();
        let check_len = |field: &'static str, actual: usize| {
            if actual == n {
                Ok(())
            } else {
                Err(EliminationError::DimensionMismatch { field, expected: n, actual })
            }
        };
        check_len("wins", wins.len())?;
        check_len("losses", losses.len())?;
        check_len("remaining", remaining.len())?;
        check_len("games", games.len())?;
        for row in &games {
            check_len("games row", row.len())?;
        }

        for entity in 0..n {
            let counts = [("wins", &wins), ("losses", &losses), ("remaining", &remaining)];
            for (field, values) in counts {
                if values[entity] < 0 {
                    return Err(EliminationError::NegativeCount { field, entity });
                }
            }
            if games[entity][entity] != 0 {
                return Err(EliminationError::SelfScheduled(entity));
            }
            for other in (entity + 1)..n {
                if games[entity][other] < 0 {
                    return Err(EliminationError::NegativeCount { field: "games", entity });
                }
                if games[entity][other] != games[other][entity] {
                    return Err(EliminationError::AsymmetricSchedule {
                        first: entity,
                        second: other,
                    });
                }
            }
        }

        Ok(Self {
            names,
            wins,
            losses,
            remaining,
            games,
            config: MaxFlowConfig::default(),
        })
    }

    /// Overrides the solver configuration used for every query
    pub fn with_config(mut self, config: MaxFlowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, entity: usize) -> Option<&str> {
        self.names.get(entity).map(String::as_str)
    }

    pub fn wins(&self, entity: usize) -> Option<Capacity> {
        self.wins.get(entity).copied()
    }

    pub fn losses(&self, entity: usize) -> Option<Capacity> {
        self.losses.get(entity).copied()
    }

    pub fn remaining(&self, entity: usize) -> Option<Capacity> {
        self.remaining.get(entity).copied()
    }

    pub fn games_between(&self, first: usize, second: usize) -> Option<Capacity> {
        self.games.get(first).and_then(|row| row.get(second)).copied()
    }

    /// Most wins `entity` can finish with
    pub fn ceiling(&self, entity: usize) -> Result<Capacity, EliminationError> {
        self.check_entity(entity)?;
        Ok(self.wins[entity] + self.remaining[entity])
    }

    /// First other entity that already has more wins than `entity` can reach
    pub fn trivial_eliminator(&self, entity: usize) -> Result<Option<usize>, EliminationError> {
        let ceiling = self.ceiling(entity)?;
        Ok((0..self.len()).find(|&other| other != entity && self.wins[other] > ceiling))
    }

    /// Builds the flow network deciding whether `entity` is eliminated.
    ///
    /// Vertices `0..n` are the entities, followed by one vertex per pair with
    /// remaining games (pairs involving `entity` excluded), then source and sink.
    pub fn flow_graph_for(&self, entity: usize) -> Result<EliminationNetwork, EliminationError> {
        let ceiling = self.ceiling(entity)?;
        let n = self.len();

        let pairs: Vec<(usize, usize)> = (0..n)
            .filter(|&a| a != entity)
            .flat_map(|a| ((a + 1)..n).map(move |b| (a, b)))
            .filter(|&(a, b)| b != entity && self.games[a][b] > 0)
            .collect();

        let source = NodeId(n + pairs.len());
        let sink = NodeId(source.as_usize() + 1);
        let mut graph = WeightedDirectedGraph::new(sink.as_usize() + 1);

        for other in (0..n).filter(|&other| other != entity) {
            graph.add_edge(NodeId(other), sink, ceiling - self.wins[other])?;
        }
        for (k, &(a, b)) in pairs.iter().enumerate() {
            let pair = NodeId(n + k);
            let games = self.games[a][b];
            graph.add_edge(source, pair, games)?;
            graph.add_edge(pair, NodeId(a), games)?;
            graph.add_edge(pair, NodeId(b), games)?;
        }

        Ok(EliminationNetwork { graph, source, sink, pairs })
    }

    /// Decides whether `entity` is eliminated and, if so, certifies it
    pub fn certificate_of_elimination(
        &self,
        entity: usize,
    ) -> Result<Option<Elimination>, EliminationError> {
        let ceiling = self.ceiling(entity)?;

        if let Some(leader) = self.trivial_eliminator(entity)? {
            info!("{} is trivially eliminated by {}", self.names[entity], self.names[leader]);
            return Ok(Some(Elimination {
                entity,
                ceiling,
                certificate: vec![leader],
                total_wins: self.wins[leader],
                mutual_games: 0,
            }));
        }

        let layout = self.flow_graph_for(entity)?;
        let solver = MaxFlowSolver::new(self.config.clone());
        let (result, network) = solver.solve(&layout.graph, layout.source, layout.sink)?;

        let mut all_games_placed = true;
        for &id in network.outgoing(layout.source)? {
            let edge = network.edge(id);
            all_games_placed &= edge.flow() == edge.capacity();
        }
        if all_games_placed {
            debug!("{} can still finish first (flow {})", self.names[entity], result.max_flow);
            return Ok(None);
        }

        let elimination = self.reduce_cut(entity, ceiling, &result.min_cut);
        info!(
            "{} is eliminated by {} entities with {} wins and {} mutual games",
            self.names[entity],
            elimination.certificate.len(),
            elimination.total_wins,
            elimination.mutual_games
        );
        Ok(Some(elimination))
    }

    /// Every eliminated entity, in index order
    pub fn eliminated_entities(&self) -> Result<Vec<Elimination>, EliminationError> {
        let mut eliminated = Vec::new();
        for entity in 0..self.len() {
            if let Some(elimination) = self.certificate_of_elimination(entity)? {
                eliminated.push(elimination);
            }
        }
        Ok(eliminated)
    }

    /// Same as [`Self::eliminated_entities`], one independent network per rayon task
    pub fn eliminated_entities_parallel(&self) -> Result<Vec<Elimination>, EliminationError> {
        let verdicts = (0..self.len())
            .into_par_iter()
            .map(|entity| self.certificate_of_elimination(entity))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(verdicts.into_iter().flatten().collect())
    }

    /// Shrinks the entity part of the cut to the shortest prefix, by wins
    /// descending, whose average final wins exceed `ceiling`.
    fn reduce_cut(&self, entity: usize, ceiling: Capacity, cut: &MinCut) -> Elimination {
        let mut members: Vec<usize> = cut
            .vertices()
            .iter()
            .map(|v| v.as_usize())
            .filter(|&v| v < self.len() && v != entity)
            .collect();
        members.sort_by(|&a, &b| self.wins[b].cmp(&self.wins[a]).then(a.cmp(&b)));

        let mut certificate = Vec::with_capacity(members.len());
        let mut total_wins = 0;
        let mut mutual_games = 0;
        for member in members {
            mutual_games += certificate
                .iter()
                .map(|&other: &usize| self.games[member][other])
                .sum::<Capacity>();
            certificate.push(member);
            total_wins += self.wins[member];
            if total_wins + mutual_games > ceiling * certificate.len() as Capacity {
                break;
            }
        }

        Elimination { entity, ceiling, certificate, total_wins, mutual_games }
    }

    fn check_entity(&self, entity: usize) -> Result<(), EliminationError> {
        if entity < self.len() {
            Ok(())
        } else {
            Err(EliminationError::UnknownEntity(entity))
        }
    }
}
