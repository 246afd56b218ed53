//! Topology inspection and strategy selection.
//!
//! Selection runs once per loaded network:
//!
//! 1. star topology → [`CentreCalculator`]
//! 2. matrices fit the memory budget and density is high enough →
//!    [`FloydWarshallCalculator`]
//! 3. otherwise the configured single-source heuristic (Dijkstra or A*)

use std::fmt;

use tracing::info;

use cv_core::{NodeId, PathHeuristic, SimConfig};

use crate::calculator::{
    AStarCalculator, CentreCalculator, CentreDetection, DijkstraCalculator,
    FloydWarshallCalculator, PathCalculator,
};
use crate::network::Network;
use crate::path::PathDescriptor;
use crate::{SpatialError, SpatialResult};

// ── TopologyStats ─────────────────────────────────────────────────────────────

/// Size and shape figures that drive strategy selection.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopologyStats {
    pub vertices: usize,
    /// Twice the undirected edge count.
    pub directed_edges: usize,
    /// Estimated size of the two `n × n` Floyd–Warshall matrices.
    pub matrix_mib: u64,
    /// `directed_edges / (n (n − 1))`; zero for fewer than two vertices.
    pub density: f64,
}

impl TopologyStats {
    pub fn of(network: &Network) -> Self {
        let vertices = network.node_count();
        let directed_edges = network.edge_count();
        let v = vertices as u64;
        let matrix_mib = (2 * 8 * v * v) / (1024 * 1024);
        let density = if vertices < 2 {
            0.0
        } else {
            directed_edges as f64 / (vertices as f64 * (vertices as f64 - 1.0))
        };
        Self { vertices, directed_edges, matrix_mib, density }
    }

    /// Whether the all-pairs strategy is within budget for this topology.
    pub fn admits_floyd_warshall(&self, config: &SimConfig) -> bool {
        self.matrix_mib <= config.floyd_warshall_max_mib
            && self.density >= config.floyd_warshall_min_density
    }
}

// ── Strategy ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    Centre,
    FloydWarshall,
    Dijkstra,
    AStar,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyKind::Centre        => "centre",
            StrategyKind::FloydWarshall => "floyd-warshall",
            StrategyKind::Dijkstra      => "dijkstra",
            StrategyKind::AStar         => "a*",
        })
    }
}

/// The path calculator chosen for a network.
pub enum Strategy {
    Centre(CentreCalculator),
    FloydWarshall(FloydWarshallCalculator),
    Dijkstra(DijkstraCalculator),
    AStar(AStarCalculator),
}

impl Strategy {
    /// Inspect `network` and pick the cheapest applicable strategy.
    pub fn select(network: &Network, config: &SimConfig) -> Strategy {
        let stats = TopologyStats::of(network);
        info!(
            vertices = stats.vertices,
            edges = stats.directed_edges,
            matrix_mib = stats.matrix_mib,
            density = stats.density,
            "network topology"
        );

        let strategy = if let CentreDetection::Star(centre) = CentreCalculator::detect(network) {
            Strategy::Centre(CentreCalculator::new(centre))
        } else if stats.admits_floyd_warshall(config) {
            Strategy::FloydWarshall(FloydWarshallCalculator::new(network))
        } else {
            match config.heuristic {
                PathHeuristic::Dijkstra => Strategy::Dijkstra(DijkstraCalculator),
                PathHeuristic::AStar    => Strategy::AStar(AStarCalculator),
            }
        };
        info!(strategy = %strategy.kind(), "path strategy selected");
        strategy
    }

    /// Build a specific strategy regardless of the selection rules.
    ///
    /// `Centre` fails unless the network is a star.
    pub fn build(kind: StrategyKind, network: &Network) -> SpatialResult<Strategy> {
        Ok(match kind {
            StrategyKind::Centre => match CentreCalculator::detect(network) {
                CentreDetection::Star(c) => Strategy::Centre(CentreCalculator::new(c)),
                _ => return Err(SpatialError::NotAStar),
            },
            StrategyKind::FloydWarshall => {
                Strategy::FloydWarshall(FloydWarshallCalculator::new(network))
            }
            StrategyKind::Dijkstra => Strategy::Dijkstra(DijkstraCalculator),
            StrategyKind::AStar    => Strategy::AStar(AStarCalculator),
        })
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Centre(_)        => StrategyKind::Centre,
            Strategy::FloydWarshall(_) => StrategyKind::FloydWarshall,
            Strategy::Dijkstra(_)      => StrategyKind::Dijkstra,
            Strategy::AStar(_)         => StrategyKind::AStar,
        }
    }

    /// The hub node when the centre strategy is active.
    pub fn centre(&self) -> Option<NodeId> {
        match self {
            Strategy::Centre(c) => Some(c.centre()),
            _ => None,
        }
    }
}

impl PathCalculator for Strategy {
    fn shortest_path(&self, network: &Network, from: NodeId, to: NodeId) -> PathDescriptor {
        match self {
            Strategy::Centre(c)        => c.shortest_path(network, from, to),
            Strategy::FloydWarshall(c) => c.shortest_path(network, from, to),
            Strategy::Dijkstra(c)      => c.shortest_path(network, from, to),
            Strategy::AStar(c)         => c.shortest_path(network, from, to),
        }
    }
}
