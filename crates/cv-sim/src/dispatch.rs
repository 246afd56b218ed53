//! Matching requests against warehouses.
//!
//! # First attempt
//!
//! When a request arrives, candidate warehouses are tried nearest first (by
//! air distance to the oasis; by distance to the hub under the centre
//! strategy).  Empty warehouses are skipped without counting; at most
//! `max_warehouses_per_pass` non-empty ones are examined.  A warehouse with
//! a reachable, deliverable path distributes `min(inventory, remaining)`.
//!
//! # Retry
//!
//! A request left with unassigned baskets is parked in the retry set.
//! Whenever a warehouse refills, the parked requests are offered to that
//! warehouse alone, smallest `deadline - arrival` first, skipping those whose oasis is
//! farther than the fastest camel could reach before the deadline.

use std::sync::Arc;

use tracing::debug;

use cv_core::{OasisId, RequestId, SimConfig, WarehouseId};
use cv_spatial::{Network, PathCalculator, PathDescriptor, Strategy, WarehouseIndex};

use crate::event::Event;
use crate::request::RequestState;
use crate::{Sim, SimResult};

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Path strategy plus warehouse ordering for one network.
pub struct Dispatcher {
    strategy: Strategy,
    index: WarehouseIndex,
    /// Fixed candidate order under the centre strategy.
    centre_order: Option<Vec<WarehouseId>>,
    max_per_pass: usize,
}

impl Dispatcher {
    /// Select a strategy for `network` and index its warehouses.
    pub fn new(network: &Network, config: &SimConfig) -> Self {
        Self::with_strategy(Strategy::select(network, config), network, config)
    }

    pub fn with_strategy(strategy: Strategy, network: &Network, config: &SimConfig) -> Self {
        let index = WarehouseIndex::new(network);
        let centre_order = strategy.centre().map(|hub| index.nearest_first(network.position(hub)));
        Self { strategy, index, centre_order, max_per_pass: config.max_warehouses_per_pass }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Warehouses in the order a request for `oasis` should try them.
    pub fn candidates(&self, network: &Network, oasis: OasisId) -> Vec<WarehouseId> {
        match &self.centre_order {
            Some(order) => order.clone(),
            None => self.index.nearest_first(network.position(network.oasis_node(oasis))),
        }
    }

    pub fn path(&self, network: &Network, from: WarehouseId, to: OasisId) -> PathDescriptor {
        self.strategy.shortest_path(network, from.node(), network.oasis_node(to))
    }

    pub fn max_per_pass(&self) -> usize {
        self.max_per_pass
    }
}

// ── Allocation steps ──────────────────────────────────────────────────────────

impl Sim {
    /// First allocation attempt for a freshly received request.
    pub(crate) fn process_request(&mut self, id: RequestId) -> SimResult<()> {
        let oasis = self.requests.get(id)?.oasis;
        let candidates = self.dispatcher.candidates(&self.network, oasis);
        let mut examined = 0;

        for w in candidates {
            if self.warehouses[w.index()].is_empty() {
                continue;
            }
            if examined == self.dispatcher.max_per_pass() {
                break;
            }
            examined += 1;

            self.try_warehouse(w, id)?;
            if self.requests.get(id)?.remaining == 0 {
                return Ok(());
            }
        }

        let request = self.requests.get(id)?;
        let state = if request.has_assignments() {
            RequestState::Unfinished
        } else {
            RequestState::Unprocessed
        };
        debug!(request = %id, remaining = request.remaining, %state, "request parked for retry");
        self.requests.set_state(id, state)?;
        self.requests.park(id)
    }

    /// Offer every parked request to `w`, which just refilled.
    pub(crate) fn retry_parked(&mut self, w: WarehouseId) -> SimResult<()> {
        let reach = self.fleet.factory.max_speed();
        for id in self.requests.parked() {
            if self.warehouses[w.index()].is_empty() {
                break;
            }
            let request = self.requests.get(id)?;
            let oasis_node = self.network.oasis_node(request.oasis);
            if self.network.air_distance(w.node(), oasis_node) > reach * request.slack(self.now) {
                continue;
            }

            self.try_warehouse(w, id)?;

            let request = self.requests.get(id)?;
            if request.remaining == 0 {
                self.requests.unpark(id)?;
            } else if request.has_assignments() {
                self.requests.set_state(id, RequestState::Unfinished)?;
            } else {
                self.requests.set_state(id, RequestState::Unprocessed)?;
            }
        }
        Ok(())
    }

    /// Route from `w` to the request's oasis and, if some camel could make
    /// it, distribute as much as `w` holds.  Returns the baskets committed.
    fn try_warehouse(&mut self, w: WarehouseId, id: RequestId) -> SimResult<u32> {
        let request = self.requests.get(id)?;
        let path = self.dispatcher.path(&self.network, w, request.oasis);
        if !path.is_reachable() {
            return Ok(0);
        }
        let slack = request.slack(self.now);
        let remaining = request.remaining;

        let warehouse = &mut self.warehouses[w.index()];
        if !warehouse.is_deliverable(self.fleet.ideal_camels(), &path, slack) {
            return Ok(0);
        }
        let amount = warehouse.baskets.min(remaining);
        let commitments = warehouse.distribute(&mut self.fleet, amount, &path, slack, self.now)?;
        if commitments.is_empty() {
            return Ok(0);
        }

        let path = Arc::new(path);
        let request = self.requests.get_mut(id)?;
        let mut committed = 0;
        for c in &commitments {
            request.assign(c.camel, c.load);
            committed += c.load;
            self.queue.schedule(
                self.now,
                Event::CamelPrepare { camel: c.camel, request: id, path: Arc::clone(&path) },
            );
        }
        self.requests.set_state(id, RequestState::Active)?;
        debug!(request = %id, warehouse = %w, camels = commitments.len(), baskets = committed, "baskets committed");
        Ok(committed)
    }
}
