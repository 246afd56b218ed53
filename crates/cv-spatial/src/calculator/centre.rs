//! Star-topology strategy.
//!
//! When one node is incident to every edge, the shortest path between two
//! leaves always runs through that node, and the path between a leaf and the
//! centre is the direct edge.

use tracing::warn;

use cv_core::NodeId;

use crate::network::Network;
use crate::path::PathDescriptor;

use super::PathCalculator;

/// Outcome of inspecting a network for a star shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CentreDetection {
    /// Every edge touches this node and it reaches every other node.
    Star(NodeId),
    /// Every edge touches one node, but some nodes have no edge at all.
    Inaccessible(NodeId),
    NotStar,
}

#[derive(Clone, Debug)]
pub struct CentreCalculator {
    centre: NodeId,
}

impl CentreCalculator {
    /// Use `centre` as the hub.  Callers should obtain it from [`detect`](Self::detect).
    pub fn new(centre: NodeId) -> Self {
        Self { centre }
    }

    pub fn centre(&self) -> NodeId {
        self.centre
    }

    /// Inspect `network` for a star topology.
    ///
    /// Only the incidence count of the busiest node is checked: it must equal
    /// the number of edges and `node_count − 1`.  Edge deduplication at build
    /// time makes this sufficient for preprocessed networks.
    pub fn detect(network: &Network) -> CentreDetection {
        let n = network.node_count();
        if n == 0 {
            return CentreDetection::NotStar;
        }

        let mut best = NodeId(0);
        for i in 1..n as u32 {
            if network.out_degree(NodeId(i)) > network.out_degree(best) {
                best = NodeId(i);
            }
        }

        let incidence = network.out_degree(best);
        if incidence != network.undirected_edge_count() {
            return CentreDetection::NotStar;
        }
        if incidence != n - 1 {
            warn!(centre = %best, incidence, nodes = n, "some nodes are inaccessible");
            return CentreDetection::Inaccessible(best);
        }
        CentreDetection::Star(best)
    }
}

impl PathCalculator for CentreCalculator {
    fn shortest_path(&self, network: &Network, from: NodeId, to: NodeId) -> PathDescriptor {
        if from == to {
            return PathDescriptor::trivial(from);
        }
        let nodes = if from != self.centre && to != self.centre {
            vec![from, self.centre, to]
        } else {
            vec![from, to]
        };
        PathDescriptor::from_nodes(network, nodes)
    }
}
