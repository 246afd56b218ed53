//! Warehouses: basket inventory and the camels homed there.
//!
//! # Camel pools
//!
//! Every camel a warehouse ever generated is in exactly one of two pools:
//! `idle` (at home, free) or `away` (committed to a trip).  Pools are
//! ordered sets so idle camels are always tried lowest id first.
//!
//! # Inventory
//!
//! Starts at the refill quantity.  Only [`Warehouse::distribute`] removes
//! baskets, and only for loads it actually commits.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use cv_core::{CamelId, Point, SimTime, WarehouseId};
use cv_fleet::{Camel, Fleet};
use cv_spatial::PathDescriptor;

use crate::{InvariantViolation, SimResult};

/// Upper bound on probes drawn by [`Warehouse::missing_camel_count`].
pub const MAX_PROBES: u32 = 10_000;

/// Loader-facing description of a warehouse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WarehouseSpec {
    pub position: Point,
    /// Baskets added per refill, and the initial stock.
    pub refill_count: u32,
    pub refill_interval: f64,
    /// Time to load or unload one basket.
    pub manipulation_time: f64,
}

/// One camel committed to a request by [`Warehouse::distribute`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Commitment {
    pub camel: CamelId,
    pub load: u32,
}

#[derive(Clone, Debug)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub position: Point,
    pub baskets: u32,
    pub refill_count: u32,
    pub refill_interval: f64,
    pub manipulation_time: f64,
    /// Baskets ever added, including the initial stock.
    pub total_stocked: u64,
    /// Baskets ever handed to camels.
    pub total_dispatched: u64,
    idle: BTreeSet<CamelId>,
    away: BTreeSet<CamelId>,
}

impl Warehouse {
    pub fn new(id: WarehouseId, spec: &WarehouseSpec) -> Self {
        Self {
            id,
            position: spec.position,
            baskets: spec.refill_count,
            refill_count: spec.refill_count,
            refill_interval: spec.refill_interval,
            manipulation_time: spec.manipulation_time,
            total_stocked: spec.refill_count as u64,
            total_dispatched: 0,
            idle: BTreeSet::new(),
            away: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.baskets == 0
    }

    pub fn idle(&self) -> impl Iterator<Item = CamelId> + '_ {
        self.idle.iter().copied()
    }

    pub fn away(&self) -> impl Iterator<Item = CamelId> + '_ {
        self.away.iter().copied()
    }

    /// Camels homed here, in either pool.
    pub fn camel_count(&self) -> usize {
        self.idle.len() + self.away.len()
    }

    /// `total_stocked == baskets + total_dispatched`.
    pub fn is_conserved(&self) -> bool {
        self.total_stocked == self.baskets as u64 + self.total_dispatched
    }

    // ── Inventory ─────────────────────────────────────────────────────────

    /// Add one refill's worth of baskets.  Returns the count before.
    pub fn refill(&mut self) -> u32 {
        let before = self.baskets;
        self.baskets += self.refill_count;
        self.total_stocked += self.refill_count as u64;
        before
    }

    fn deduct(&mut self, n: u32) -> Result<(), InvariantViolation> {
        if n > self.baskets {
            return Err(InvariantViolation::InventoryUnderflow {
                warehouse: self.id,
                requested: n,
                available: self.baskets,
            });
        }
        self.baskets -= n;
        self.total_dispatched += n as u64;
        Ok(())
    }

    // ── Camel pools ───────────────────────────────────────────────────────

    /// Move a camel from `away` back to `idle`.
    pub fn return_camel(&mut self, camel: CamelId) -> Result<(), InvariantViolation> {
        if !self.away.remove(&camel) {
            return Err(InvariantViolation::CamelNotAway { camel, warehouse: self.id });
        }
        self.idle.insert(camel);
        Ok(())
    }

    fn commit(&mut self, fleet: &mut Fleet, camel: CamelId, load: u32) -> SimResult<Commitment> {
        self.deduct(load)?;
        self.idle.remove(&camel);
        self.away.insert(camel);
        fleet.camel_mut(camel)?.load = load;
        trace!(warehouse = %self.id, camel = %camel, load, "camel committed");
        Ok(Commitment { camel, load })
    }

    // ── Allocation ────────────────────────────────────────────────────────

    /// Whether any ideal camel could carry one basket along `path` within
    /// `slack`.  A `false` here rules out every real camel too.
    pub fn is_deliverable(&self, ideal: &[Camel], path: &PathDescriptor, slack: f64) -> bool {
        ideal.iter().any(|c| c.can_deliver_in_time(path, 1, self.manipulation_time, slack))
    }

    /// Commit camels to carry up to `amount` baskets along `path`.
    ///
    /// Idle camels go first, lowest id first, each loaded with
    /// `min(max_load, still_needed)` and kept only if it makes the deadline.
    /// New camels are then generated until the amount is covered or a fresh
    /// camel cannot make it; that camel stays here idle and allocation stops.
    ///
    /// Inventory drops by exactly the sum of committed loads.
    pub fn distribute(
        &mut self,
        fleet: &mut Fleet,
        amount: u32,
        path: &PathDescriptor,
        slack: f64,
        now: SimTime,
    ) -> SimResult<Vec<Commitment>> {
        let mut left = amount;
        let mut committed = Vec::new();

        let idle: Vec<CamelId> = self.idle.iter().copied().collect();
        for id in idle {
            if left == 0 {
                break;
            }
            let camel = fleet.camel(id)?;
            let load = camel.load_for(left);
            if camel.can_deliver_in_time(path, load, self.manipulation_time, slack) {
                committed.push(self.commit(fleet, id, load)?);
                left -= load;
            }
        }

        while left > 0 {
            let id = fleet.spawn(now, self.id)?;
            let camel = fleet.camel(id)?;
            let load = camel.load_for(left);
            if camel.can_deliver_in_time(path, load, self.manipulation_time, slack) {
                committed.push(self.commit(fleet, id, load)?);
                left -= load;
            } else {
                trace!(warehouse = %self.id, camel = %id, "generated camel too slow, parked idle");
                self.idle.insert(id);
                break;
            }
        }

        Ok(committed)
    }

    /// How many camels would have to be generated to carry `baskets` along
    /// `path` within `slack`, after the idle camels that can make the trip
    /// have taken their share.
    ///
    /// Draws anonymous probes and never touches the pools.  `None` when
    /// [`MAX_PROBES`] probes were not enough.
    pub fn missing_camel_count(
        &self,
        fleet: &mut Fleet,
        baskets: u32,
        path: &PathDescriptor,
        slack: f64,
        now: SimTime,
    ) -> SimResult<Option<u32>> {
        let mut missing = baskets;
        for id in &self.idle {
            if missing == 0 {
                break;
            }
            let camel = fleet.camel(*id)?;
            let load = camel.load_for(missing);
            if camel.can_deliver_in_time(path, load, self.manipulation_time, slack) {
                missing -= load;
            }
        }
        let mut generated = 0;
        while missing > 0 {
            if generated == MAX_PROBES {
                return Ok(None);
            }
            let probe = fleet.probe(now, self.id)?;
            generated += 1;
            let load = probe.load_for(missing);
            if probe.can_deliver_in_time(path, load, self.manipulation_time, slack) {
                missing -= load;
            }
        }
        Ok(Some(generated))
    }
}
