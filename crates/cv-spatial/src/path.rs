//! Shortest-path result type.

use cv_core::NodeId;

use crate::network::Network;

/// An ordered node sequence with its total and per-hop distances.
///
/// `partial_distances[k]` is the length of the hop `nodes[k] → nodes[k+1]`,
/// so it always has `nodes.len() − 1` entries for a reachable pair.  An empty
/// node list with an infinite distance means "unreachable".
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathDescriptor {
    pub nodes: Vec<NodeId>,
    pub distance: f64,
    pub partial_distances: Vec<f64>,
}

impl PathDescriptor {
    pub fn unreachable() -> Self {
        Self { nodes: Vec::new(), distance: f64::INFINITY, partial_distances: Vec::new() }
    }

    /// Zero-length path from a node to itself.
    pub fn trivial(node: NodeId) -> Self {
        Self { nodes: vec![node], distance: 0.0, partial_distances: Vec::new() }
    }

    /// Build a descriptor from a node sequence, measuring each hop with the
    /// network's edge geometry.
    pub fn from_nodes(network: &Network, nodes: Vec<NodeId>) -> Self {
        if nodes.is_empty() {
            return Self::unreachable();
        }
        let partial_distances: Vec<f64> = nodes
            .windows(2)
            .map(|w| network.air_distance(w[0], w[1]))
            .collect();
        let distance = partial_distances.iter().sum();
        Self { nodes, distance, partial_distances }
    }

    #[inline]
    pub fn is_reachable(&self) -> bool {
        !self.nodes.is_empty() && self.distance.is_finite()
    }

    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn target(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.partial_distances.len()
    }

    /// The same path walked in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.reverse();
        let mut partial_distances = self.partial_distances.clone();
        partial_distances.reverse();
        Self { nodes, distance: self.distance, partial_distances }
    }

    /// Iterator over hops as `(from, to, length)`.
    pub fn hops(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.nodes
            .windows(2)
            .zip(self.partial_distances.iter())
            .map(|(w, &d)| (w[0], w[1], d))
    }
}
