//! In-memory statistics gathered from a run.
//!
//! # Rest time
//!
//! A camel rests whenever it is not on a trip:
//! `rest = now − generated_at − Σ (returns_at − departs_at)`.

use std::collections::BTreeMap;

use cv_core::{CamelId, CamelTypeId, OasisId, RequestId, SimTime, WarehouseId};
use cv_sim::{RefillRecord, Request, RequestManager, RequestState, SimObserver, SimSummary, TripRecord};

// ── Per-entity records ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct CamelStats {
    pub kind: CamelTypeId,
    pub generated_at: SimTime,
    pub trips: u32,
    pub baskets: u32,
    /// Total time spent between departure and return.
    pub travelling: f64,
    pub walked: f64,
    pub drinks: u32,
}

impl CamelStats {
    pub fn rest_time(&self, now: SimTime) -> f64 {
        now.since(self.generated_at) - self.travelling
    }
}

/// One batch of baskets that reached an oasis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OasisDelivery {
    pub request: RequestId,
    pub camel: CamelId,
    pub warehouse: WarehouseId,
    pub load: u32,
    pub at: SimTime,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OasisStats {
    pub deliveries: Vec<OasisDelivery>,
    /// Requests for this oasis with the time their last basket arrived.
    pub fulfilled: Vec<(RequestId, SimTime)>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WarehouseStats {
    pub refills: Vec<RefillRecord>,
    pub trips: u32,
    pub baskets_sent: u64,
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// Everything the observer saw, keyed by entity.
#[derive(Clone, Debug, Default)]
pub struct Statistics {
    pub camels: BTreeMap<CamelId, CamelStats>,
    pub oases: BTreeMap<OasisId, OasisStats>,
    pub warehouses: BTreeMap<WarehouseId, WarehouseStats>,
    pub summary: Option<SimSummary>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_trip(&mut self, trip: &TripRecord) {
        let plan = &trip.plan;
        let camel = self.camels.entry(trip.camel).or_insert_with(|| CamelStats {
            kind: trip.kind,
            generated_at: trip.generated_at,
            trips: 0,
            baskets: 0,
            travelling: 0.0,
            walked: 0.0,
            drinks: 0,
        });
        camel.trips += 1;
        camel.baskets += plan.load;
        camel.travelling += plan.returns_at.since(plan.departs_at);
        camel.walked += plan.walked;
        camel.drinks += plan.drinks().count() as u32;

        self.oases.entry(trip.oasis).or_default().deliveries.push(OasisDelivery {
            request: trip.request,
            camel: trip.camel,
            warehouse: trip.warehouse,
            load: plan.load,
            at: plan.delivers_at,
        });

        let warehouse = self.warehouses.entry(trip.warehouse).or_default();
        warehouse.trips += 1;
        warehouse.baskets_sent += plan.load as u64;
    }

    pub fn record_refill(&mut self, refill: &RefillRecord) {
        self.warehouses.entry(refill.warehouse).or_default().refills.push(*refill);
    }

    pub fn record_fulfilled(&mut self, request: &Request) {
        if let Some(at) = request.delivered_at {
            let oasis = self.oases.entry(request.oasis).or_default();
            if !oasis.fulfilled.iter().any(|&(id, _)| id == request.id) {
                oasis.fulfilled.push((request.id, at));
            }
        }
    }

    /// Summed rest time of every camel that made a trip.
    pub fn total_rest(&self, now: SimTime) -> f64 {
        self.camels.values().map(|c| c.rest_time(now)).sum()
    }

    pub fn total_walked(&self) -> f64 {
        self.camels.values().map(|c| c.walked).sum()
    }

    /// Camels that made at least one trip, per type.
    pub fn camels_by_type(&self) -> BTreeMap<CamelTypeId, usize> {
        let mut counts = BTreeMap::new();
        for c in self.camels.values() {
            *counts.entry(c.kind).or_insert(0) += 1;
        }
        counts
    }
}

impl SimObserver for Statistics {
    fn on_trip(&mut self, trip: &TripRecord) {
        self.record_trip(trip);
    }

    fn on_refill(&mut self, refill: &RefillRecord) {
        self.record_refill(refill);
    }

    fn on_request_state(&mut self, _time: SimTime, request: &Request) {
        if matches!(request.state, RequestState::Delivered | RequestState::Completed) {
            self.record_fulfilled(request);
        }
    }

    fn on_sim_end(&mut self, summary: &SimSummary, _requests: &RequestManager) {
        self.summary = Some(summary.clone());
    }
}
