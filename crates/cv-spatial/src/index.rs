//! Nearest-warehouse ordering.
//!
//! An R-tree (via `rstar`) over warehouse positions answers "warehouses in
//! order of increasing air distance from this point".  Equal distances are
//! ordered by warehouse index so results are stable across runs.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cv_core::{Point, WarehouseId};

use crate::network::Network;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct WarehouseEntry {
    point: [f64; 2],
    id: WarehouseId,
}

impl RTreeObject for WarehouseEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for WarehouseEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── WarehouseIndex ────────────────────────────────────────────────────────────

pub struct WarehouseIndex {
    tree: RTree<WarehouseEntry>,
}

impl WarehouseIndex {
    /// Bulk-load every warehouse of `network`.
    pub fn new(network: &Network) -> Self {
        let entries: Vec<WarehouseEntry> = network
            .warehouses()
            .map(|w| {
                let p = network.position(w.node());
                WarehouseEntry { point: [p.x, p.y], id: w }
            })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Every warehouse, nearest to `pos` first.
    pub fn nearest_first(&self, pos: Point) -> Vec<WarehouseId> {
        let query = [pos.x, pos.y];
        let mut found: Vec<(f64, WarehouseId)> = self
            .tree
            .nearest_neighbor_iter(&query)
            .map(|e| (e.distance_2(&query), e.id))
            .collect();
        // Already distance-ordered; this only settles ties.
        found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        found.into_iter().map(|(_, id)| id).collect()
    }

    /// The single nearest warehouse, if any.
    pub fn nearest(&self, pos: Point) -> Option<WarehouseId> {
        self.nearest_first(pos).first().copied()
    }
}
