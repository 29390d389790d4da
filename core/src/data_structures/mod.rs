//! Static graphs and the flow networks derived from them
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod graph;
pub mod flow_network;

pub use self::graph::{Edge, WeightedDirectedGraph};
pub use self::flow_network::{EdgeFlow, FlowEdge, FlowNetwork, MinCut};
