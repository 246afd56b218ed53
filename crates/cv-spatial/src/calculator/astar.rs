//! A* search guided by straight-line distance to the target.
//!
//! Edge weights are air distances, so the straight-line heuristic never
//! overestimates and the first time the target is popped its cost is optimal.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use cv_core::NodeId;

use crate::network::Network;
use crate::path::PathDescriptor;

use super::{reconstruct, Dist, PathCalculator};

#[derive(Clone, Copy, Debug, Default)]
pub struct AStarCalculator;

impl PathCalculator for AStarCalculator {
    fn shortest_path(&self, network: &Network, from: NodeId, to: NodeId) -> PathDescriptor {
        if from == to {
            return PathDescriptor::trivial(from);
        }

        let n = network.node_count();
        let goal = network.position(to);
        let h = |node: NodeId| network.position(node).distance_to(goal);

        let mut g = vec![f64::INFINITY; n];
        let mut prev = vec![NodeId::INVALID; n];
        let mut closed = vec![false; n];

        g[from.index()] = 0.0;

        // Keyed by f = g + h; ties broken by NodeId.
        let mut open: BinaryHeap<Reverse<(Dist, NodeId)>> = BinaryHeap::new();
        open.push(Reverse((Dist(h(from)), from)));

        while let Some(Reverse((_, node))) = open.pop() {
            if node == to {
                return reconstruct(network, &prev, to);
            }
            if closed[node.index()] {
                continue;
            }
            closed[node.index()] = true;

            let g_node = g[node.index()];
            for (neighbor, length) in network.neighbors(node) {
                if closed[neighbor.index()] {
                    continue;
                }
                let tentative = g_node + length;
                if tentative < g[neighbor.index()] {
                    g[neighbor.index()] = tentative;
                    prev[neighbor.index()] = node;
                    open.push(Reverse((Dist(tentative + h(neighbor)), neighbor)));
                }
            }
        }

        PathDescriptor::unreachable()
    }
}
