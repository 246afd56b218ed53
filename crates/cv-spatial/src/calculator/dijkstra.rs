//! Single-source Dijkstra, run fresh for every query.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use cv_core::NodeId;

use crate::network::Network;
use crate::path::PathDescriptor;

use super::{reconstruct, Dist, PathCalculator};

/// Standard Dijkstra over the CSR graph, stopping once the target is popped.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraCalculator;

impl PathCalculator for DijkstraCalculator {
    fn shortest_path(&self, network: &Network, from: NodeId, to: NodeId) -> PathDescriptor {
        if from == to {
            return PathDescriptor::trivial(from);
        }

        let n = network.node_count();
        let mut dist = vec![f64::INFINITY; n];
        // prev[v] = node that reached v; INVALID for unreached nodes.
        let mut prev = vec![NodeId::INVALID; n];

        dist[from.index()] = 0.0;

        // Min-heap: (cost, node).  NodeId secondary key keeps tie-breaking
        // deterministic.
        let mut heap: BinaryHeap<Reverse<(Dist, NodeId)>> = BinaryHeap::new();
        heap.push(Reverse((Dist(0.0), from)));

        while let Some(Reverse((Dist(cost), node))) = heap.pop() {
            if node == to {
                return reconstruct(network, &prev, to);
            }

            // Stale entry.
            if cost > dist[node.index()] {
                continue;
            }

            for (neighbor, length) in network.neighbors(node) {
                let new_cost = cost + length;
                if new_cost < dist[neighbor.index()] {
                    dist[neighbor.index()] = new_cost;
                    prev[neighbor.index()] = node;
                    heap.push(Reverse((Dist(new_cost), neighbor)));
                }
            }
        }

        PathDescriptor::unreachable()
    }
}
