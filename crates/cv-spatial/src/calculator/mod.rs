//! Shortest-path strategies.
//!
//! # Pluggability
//!
//! The dispatcher calls path computation through the [`PathCalculator`]
//! trait.  Four implementations exist:
//!
//! | Strategy                   | Applies to                       | Query cost           |
//! |----------------------------|----------------------------------|----------------------|
//! | [`CentreCalculator`]       | star topologies                  | O(1)                 |
//! | [`FloydWarshallCalculator`]| dense graphs that fit in memory  | O(path length)       |
//! | [`DijkstraCalculator`]     | default fallback                 | O((V+E) log V)       |
//! | [`AStarCalculator`]        | configured fallback              | ≤ Dijkstra           |
//!
//! [`Strategy::select`](crate::Strategy::select) inspects the topology once
//! and picks one.  All strategies agree on total distance for every pair.

use std::cmp::Ordering;

use cv_core::NodeId;

use crate::network::Network;
use crate::path::PathDescriptor;

pub mod astar;
pub mod centre;
pub mod dijkstra;
pub mod floyd_warshall;

pub use astar::AStarCalculator;
pub use centre::{CentreCalculator, CentreDetection};
pub use dijkstra::DijkstraCalculator;
pub use floyd_warshall::FloydWarshallCalculator;

// ── PathCalculator trait ──────────────────────────────────────────────────────

/// Shortest-path capability over a fixed network.
///
/// Implementations hold no per-query mutable state, so a single instance can
/// answer any number of queries.
pub trait PathCalculator: Send + Sync {
    /// Shortest path from `from` to `to`.
    ///
    /// Unreachable pairs return [`PathDescriptor::unreachable`]; `from == to`
    /// returns a trivial single-node path.
    fn shortest_path(&self, network: &Network, from: NodeId, to: NodeId) -> PathDescriptor;
}

// ── Shared internals ──────────────────────────────────────────────────────────

/// Totally ordered `f64` for use as a heap key.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Dist(pub f64);

impl Eq for Dist {}

impl PartialOrd for Dist {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dist {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Walk a predecessor array back from `to` and build the descriptor.
pub(crate) fn reconstruct(network: &Network, prev: &[NodeId], to: NodeId) -> PathDescriptor {
    let mut nodes = vec![to];
    let mut cur = to;
    while prev[cur.index()] != NodeId::INVALID {
        cur = prev[cur.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    PathDescriptor::from_nodes(network, nodes)
}
