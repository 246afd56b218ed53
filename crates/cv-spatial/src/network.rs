//! Oasis network representation and builder.
//!
//! # Data layout
//!
//! Nodes are numbered warehouses first (`0..W`), then oases (`W..W+O`).
//! Every undirected edge is stored twice, once per direction, in
//! **Compressed Sparse Row (CSR)** form.  Given a `NodeId n`, its outgoing
//! edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edge weights are the air distance between the endpoints, computed once at
//! build time.  Because each undirected edge appears in both directions, a
//! node's out-degree equals the number of undirected edges incident to it.
//!
//! # Preprocessing
//!
//! [`NetworkBuilder::build`] drops self loops, duplicate edges (in either
//! direction), and edges at least as long as the configured maximum edge
//! length (no carrier could ever traverse them).

use rustc_hash::FxHashSet;
use tracing::debug;

use cv_core::{EdgeId, NodeId, OasisId, Point, WarehouseId};

use crate::{SpatialError, SpatialResult};

// ── Network ───────────────────────────────────────────────────────────────────

/// Undirected weighted graph in CSR format.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`NetworkBuilder`].
pub struct Network {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Planar position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Point>,

    /// Nodes `0..warehouse_count` are warehouses; the rest are oases.
    pub warehouse_count: usize,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    pub edge_from: Vec<NodeId>,
    pub edge_to: Vec<NodeId>,

    /// Air distance between the edge's endpoints.
    pub edge_length: Vec<f64>,
}

impl Network {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn oasis_count(&self) -> usize {
        self.node_pos.len() - self.warehouse_count
    }

    /// Number of directed edges (twice the undirected count).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn undirected_edge_count(&self) -> usize {
        self.edge_to.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    // ── Node lookup ───────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self, node: NodeId) -> Point {
        self.node_pos[node.index()]
    }

    /// Straight-line distance between two nodes.
    #[inline]
    pub fn air_distance(&self, a: NodeId, b: NodeId) -> f64 {
        self.position(a).distance_to(self.position(b))
    }

    #[inline]
    pub fn is_oasis(&self, node: NodeId) -> bool {
        node.is_oasis(self.warehouse_count)
    }

    #[inline]
    pub fn oasis_node(&self, oasis: OasisId) -> NodeId {
        oasis.node(self.warehouse_count)
    }

    /// All warehouse ids in index order.
    pub fn warehouses(&self) -> impl Iterator<Item = WarehouseId> + '_ {
        (0..self.warehouse_count as u32).map(WarehouseId)
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Neighbours of `node` paired with the connecting edge length.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.out_edges(node)
            .map(|e| (self.edge_to[e.index()], self.edge_length[e.index()]))
    }

    /// Number of edges incident to `node`.
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// Warehouses must be added before oases so that node numbering follows the
/// loader contract.
///
/// # Example
///
/// ```
/// use cv_core::Point;
/// use cv_spatial::NetworkBuilder;
///
/// let mut b = NetworkBuilder::new();
/// let w = b.add_warehouse(Point::new(0.0, 0.0)).unwrap();
/// let o = b.add_oasis(Point::new(3.0, 4.0));
/// b.add_edge(w, o).unwrap();
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // both directions
/// ```
pub struct NetworkBuilder {
    nodes:           Vec<Point>,
    warehouse_count: usize,
    raw_edges:       Vec<(NodeId, NodeId)>,
    max_edge_length: f64,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes:           Vec::new(),
            warehouse_count: 0,
            raw_edges:       Vec::new(),
            max_edge_length: f64::INFINITY,
        }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
            ..Self::new()
        }
    }

    /// Edges at least this long are dropped by [`build`](Self::build).
    pub fn max_edge_length(mut self, length: f64) -> Self {
        self.max_edge_length = length;
        self
    }

    /// Add a warehouse node.  Fails once any oasis has been added.
    pub fn add_warehouse(&mut self, pos: Point) -> SpatialResult<NodeId> {
        if self.nodes.len() > self.warehouse_count {
            return Err(SpatialError::WarehouseAfterOasis(NodeId(self.warehouse_count as u32)));
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.warehouse_count += 1;
        Ok(id)
    }

    /// Add an oasis node.
    pub fn add_oasis(&mut self, pos: Point) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add an undirected edge between two previously added nodes.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> SpatialResult<()> {
        for n in [a, b] {
            if n.index() >= self.nodes.len() {
                return Err(SpatialError::NodeNotFound(n));
            }
        }
        self.raw_edges.push((a, b));
        Ok(())
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`Network`].
    ///
    /// Surviving edges keep their input order within each source node.
    pub fn build(self) -> Network {
        let node_count = self.nodes.len();
        let raw_count  = self.raw_edges.len();

        // ── Preprocess ────────────────────────────────────────────────────
        let mut seen: FxHashSet<(NodeId, NodeId)> = FxHashSet::default();
        let mut kept: Vec<(NodeId, NodeId, f64)> = Vec::with_capacity(raw_count);
        for (a, b) in self.raw_edges {
            if a == b {
                continue;
            }
            let length = self.nodes[a.index()].distance_to(self.nodes[b.index()]);
            if length >= self.max_edge_length {
                continue;
            }
            if !seen.insert((a.min(b), a.max(b))) {
                continue;
            }
            kept.push((a, b, length));
        }
        debug!(
            raw = raw_count,
            kept = kept.len(),
            dropped = raw_count - kept.len(),
            "edge preprocessing"
        );

        // ── Expand to both directions, sort by source (stable) ────────────
        let mut directed: Vec<(NodeId, NodeId, f64)> = Vec::with_capacity(kept.len() * 2);
        for &(a, b, length) in &kept {
            directed.push((a, b, length));
            directed.push((b, a, length));
        }
        directed.sort_by_key(|e| e.0);

        let edge_from:   Vec<NodeId> = directed.iter().map(|e| e.0).collect();
        let edge_to:     Vec<NodeId> = directed.iter().map(|e| e.1).collect();
        let edge_length: Vec<f64>    = directed.iter().map(|e| e.2).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &directed {
            node_out_start[e.0.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, directed.len());

        Network {
            node_pos: self.nodes,
            warehouse_count: self.warehouse_count,
            node_out_start,
            edge_from,
            edge_to,
            edge_length,
        }
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
