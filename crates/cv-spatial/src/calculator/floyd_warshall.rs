//! All-pairs precompute (Floyd–Warshall).
//!
//! Distance and successor matrices are stored row-major in flat `Vec`s.
//! With the `parallel` feature, the rows of each pivot round are relaxed
//! concurrently; a round only reads the pivot row, which never changes
//! during its own round.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use cv_core::NodeId;

use crate::network::Network;
use crate::path::PathDescriptor;

use super::PathCalculator;

/// Sentinel successor for "no path".
const NO_NEXT: u32 = u32::MAX;

pub struct FloydWarshallCalculator {
    n: usize,
    dist: Vec<f64>,
    next: Vec<u32>,
}

impl FloydWarshallCalculator {
    /// Precompute all pairs.  O(n³) time, O(n²) memory.
    pub fn new(network: &Network) -> Self {
        let n = network.node_count();
        let mut dist = vec![f64::INFINITY; n * n];
        let mut next = vec![NO_NEXT; n * n];

        for e in 0..network.edge_count() {
            let u = network.edge_from[e].index();
            let v = network.edge_to[e].index();
            dist[u * n + v] = network.edge_length[e];
            next[u * n + v] = v as u32;
        }
        for i in 0..n {
            dist[i * n + i] = 0.0;
            next[i * n + i] = i as u32;
        }

        for k in 0..n {
            let pivot: Vec<f64> = dist[k * n..(k + 1) * n].to_vec();

            #[cfg(feature = "parallel")]
            dist.par_chunks_mut(n)
                .zip(next.par_chunks_mut(n))
                .for_each(|(d_row, n_row)| relax_row(k, &pivot, d_row, n_row));

            #[cfg(not(feature = "parallel"))]
            dist.chunks_mut(n)
                .zip(next.chunks_mut(n))
                .for_each(|(d_row, n_row)| relax_row(k, &pivot, d_row, n_row));
        }

        Self { n, dist, next }
    }

    /// Precomputed shortest distance between two nodes.
    pub fn distance(&self, from: NodeId, to: NodeId) -> f64 {
        self.dist[from.index() * self.n + to.index()]
    }
}

/// Relax one row `i` through pivot `k`.
#[inline]
fn relax_row(k: usize, pivot: &[f64], d_row: &mut [f64], n_row: &mut [u32]) {
    let d_ik = d_row[k];
    if d_ik == f64::INFINITY {
        return;
    }
    let via = n_row[k];
    for j in 0..pivot.len() {
        let candidate = d_ik + pivot[j];
        if d_row[j] > candidate {
            d_row[j] = candidate;
            n_row[j] = via;
        }
    }
}

impl PathCalculator for FloydWarshallCalculator {
    fn shortest_path(&self, network: &Network, from: NodeId, to: NodeId) -> PathDescriptor {
        if from == to {
            return PathDescriptor::trivial(from);
        }
        let (i, j) = (from.index(), to.index());
        if self.next[i * self.n + j] == NO_NEXT {
            return PathDescriptor::unreachable();
        }

        let mut nodes = vec![from];
        let mut k = i;
        while k != j {
            k = self.next[k * self.n + j] as usize;
            nodes.push(NodeId(k as u32));
        }
        PathDescriptor::from_nodes(network, nodes)
    }
}
